use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use xmltree::Element;

use crate::xml::{child_bool, child_elements, child_parse, child_string, child_text};

/// Overrides for the `create` call; absent ids and passwords are generated
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateMeetingParams {
    pub meeting_id: Option<String>,
    pub name: Option<String>,
    pub attendee_pw: Option<String>,
    pub moderator_pw: Option<String>,
    pub record: Option<bool>,
    pub auto_start_recording: Option<bool>,
    pub allow_start_stop_recording: Option<bool>,
    pub voice_bridge: Option<String>,
    pub max_participants: Option<u32>,
    /// Minutes, 0 means no limit
    pub duration: Option<u32>,
    pub logout_url: Option<String>,
    pub welcome: Option<String>,
    /// Sent as `meta_<key>` in the given order
    pub metadata: Vec<(String, String)>,
}

impl CreateMeetingParams {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Parameters of a `join` URL
#[derive(Debug, Clone, Serialize)]
pub struct JoinParams {
    pub full_name: String,
    pub meeting_id: String,
    /// Attendee or moderator password, selects the role
    pub password: String,
    pub user_id: Option<String>,
    /// Pins the join to one meeting instance
    pub create_time: Option<i64>,
    pub redirect: Option<bool>,
}

impl JoinParams {
    pub fn new(
        full_name: impl Into<String>,
        meeting_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            meeting_id: meeting_id.into(),
            password: password.into(),
            user_id: None,
            create_time: None,
            redirect: None,
        }
    }
}

/// Outcome of `create` or `end`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeetingResult {
    pub meeting_id: String,
    pub internal_meeting_id: Option<String>,
    pub attendee_pw: Option<String>,
    pub moderator_pw: Option<String>,
    pub voice_bridge: Option<String>,
    pub dial_number: Option<String>,
    pub create_time: Option<i64>,
    /// The meeting already existed (`duplicateWarning`)
    pub duplicate: bool,
    pub message_key: Option<String>,
    pub message: Option<String>,
}

impl MeetingResult {
    /// Project a `create` response, echoing `requested_id` when the server omits it
    pub fn from_create_response(root: &Element, requested_id: &str) -> Self {
        let message_key = child_text(root, "messageKey");
        Self {
            meeting_id: child_text(root, "meetingID").unwrap_or_else(|| requested_id.to_string()),
            internal_meeting_id: child_text(root, "internalMeetingID"),
            attendee_pw: child_text(root, "attendeePW"),
            moderator_pw: child_text(root, "moderatorPW"),
            voice_bridge: child_text(root, "voiceBridge"),
            dial_number: child_text(root, "dialNumber"),
            create_time: child_parse(root, "createTime"),
            duplicate: message_key.as_deref() == Some("duplicateWarning"),
            message_key,
            message: child_text(root, "message"),
        }
    }

    /// Project an `end` response
    pub fn from_end_response(root: &Element, meeting_id: &str) -> Self {
        Self {
            meeting_id: meeting_id.to_string(),
            message_key: child_text(root, "messageKey"),
            message: child_text(root, "message"),
            ..Default::default()
        }
    }
}

/// Attendee role reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Role {
    Moderator,
    Viewer,
    Other(String),
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        if role.eq_ignore_ascii_case("MODERATOR") {
            Role::Moderator
        } else if role.eq_ignore_ascii_case("VIEWER") {
            Role::Viewer
        } else {
            Role::Other(role.to_string())
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Moderator => f.write_str("MODERATOR"),
            Role::Viewer => f.write_str("VIEWER"),
            Role::Other(role) => f.write_str(role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attendee {
    pub user_id: String,
    pub full_name: String,
    pub role: Role,
    pub is_presenter: bool,
    pub is_listening_only: bool,
    pub has_joined_voice: bool,
    pub has_video: bool,
    pub client_type: Option<String>,
}

impl Attendee {
    pub fn from_element(element: &Element) -> Self {
        Self {
            user_id: child_string(element, "userID"),
            full_name: child_string(element, "fullName"),
            role: Role::from(child_string(element, "role").as_str()),
            is_presenter: child_bool(element, "isPresenter"),
            is_listening_only: child_bool(element, "isListeningOnly"),
            has_joined_voice: child_bool(element, "hasJoinedVoice"),
            has_video: child_bool(element, "hasVideo"),
            client_type: child_text(element, "clientType"),
        }
    }
}

/// Snapshot of a meeting from `getMeetingInfo` or `getMeetings`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingInfo {
    pub meeting_name: String,
    pub meeting_id: String,
    pub internal_meeting_id: Option<String>,
    /// Epoch milliseconds
    pub create_time: Option<i64>,
    pub voice_bridge: Option<String>,
    pub dial_number: Option<String>,
    pub attendee_pw: Option<String>,
    pub moderator_pw: Option<String>,
    pub running: bool,
    pub has_user_joined: bool,
    pub recording: bool,
    pub has_been_forcibly_ended: bool,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub duration: u32,
    pub participant_count: u32,
    pub listener_count: u32,
    pub voice_participant_count: u32,
    pub video_count: u32,
    pub moderator_count: u32,
    pub max_users: u32,
    pub attendees: Vec<Attendee>,
    pub metadata: BTreeMap<String, String>,
}

impl MeetingInfo {
    pub fn from_element(element: &Element) -> Self {
        let attendees = child_elements(element, "attendees")
            .filter(|node| node.name == "attendee")
            .map(Attendee::from_element)
            .collect();

        let metadata = child_elements(element, "metadata")
            .map(|node| {
                let value = node
                    .get_text()
                    .map(|text| text.trim().to_string())
                    .unwrap_or_default();
                (node.name.clone(), value)
            })
            .collect();

        Self {
            meeting_name: child_string(element, "meetingName"),
            meeting_id: child_string(element, "meetingID"),
            internal_meeting_id: child_text(element, "internalMeetingID"),
            create_time: child_parse(element, "createTime"),
            voice_bridge: child_text(element, "voiceBridge"),
            dial_number: child_text(element, "dialNumber"),
            attendee_pw: child_text(element, "attendeePW"),
            moderator_pw: child_text(element, "moderatorPW"),
            running: child_bool(element, "running"),
            has_user_joined: child_bool(element, "hasUserJoined"),
            recording: child_bool(element, "recording"),
            has_been_forcibly_ended: child_bool(element, "hasBeenForciblyEnded"),
            // The server reports 0 for times that have not happened yet
            start_time: child_parse::<i64>(element, "startTime").filter(|t| *t > 0),
            end_time: child_parse::<i64>(element, "endTime").filter(|t| *t > 0),
            duration: child_parse(element, "duration").unwrap_or(0),
            participant_count: child_parse(element, "participantCount").unwrap_or(0),
            listener_count: child_parse(element, "listenerCount").unwrap_or(0),
            voice_participant_count: child_parse(element, "voiceParticipantCount").unwrap_or(0),
            video_count: child_parse(element, "videoCount").unwrap_or(0),
            moderator_count: child_parse(element, "moderatorCount").unwrap_or(0),
            max_users: child_parse(element, "maxUsers").unwrap_or(0),
            attendees,
            metadata,
        }
    }

    /// Creation time as a UTC timestamp
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.create_time
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
    }

    pub fn moderators(&self) -> impl Iterator<Item = &Attendee> {
        self.attendees.iter().filter(|a| a.role == Role::Moderator)
    }
}
