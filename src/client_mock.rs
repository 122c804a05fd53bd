use mockito::{Matcher, Mock, ServerGuard};
use std::sync::Arc;

use crate::client::BigBlueButtonClient;
use crate::config::ClientConfig;
use crate::ids::MockIdGenerator;
use crate::observer::MockApiObserver;

pub const TEST_SECRET: &str = "330a8b08c3b4c61533e1d0c5ce1ac88f";

// Canned responses in the shape the server sends them

pub const CREATE_SUCCESS: &str = r#"<response>
    <returncode>SUCCESS</returncode>
    <meetingID>weekly-sync</meetingID>
    <internalMeetingID>183f0bf3a0982a127bdb8161e0c44eb696b3e75c-1531155809613</internalMeetingID>
    <parentMeetingID>bbb-none</parentMeetingID>
    <attendeePW>ap</attendeePW>
    <moderatorPW>mp</moderatorPW>
    <createTime>1531155809613</createTime>
    <voiceBridge>70757</voiceBridge>
    <dialNumber>613-555-1234</dialNumber>
    <createDate>Mon Jul 09 17:03:29 UTC 2018</createDate>
    <hasUserJoined>false</hasUserJoined>
    <duration>0</duration>
    <hasBeenForciblyEnded>false</hasBeenForciblyEnded>
    <messageKey></messageKey>
    <message></message>
</response>"#;

pub const CHECKSUM_ERROR: &str = r#"<response>
    <returncode>FAILED</returncode>
    <messageKey>checksumError</messageKey>
    <message>You did not pass the checksum security check</message>
</response>"#;

pub const NOT_FOUND: &str = r#"<response>
    <returncode>FAILED</returncode>
    <messageKey>notFound</messageKey>
    <message>We could not find a meeting with that meeting ID - perhaps the meeting is not yet running?</message>
</response>"#;

pub const END_SUCCESS: &str = r#"<response>
    <returncode>SUCCESS</returncode>
    <messageKey>sentEndMeetingRequest</messageKey>
    <message>A request to end the meeting was sent. Please wait a few seconds, and then use the getMeetingInfo or isMeetingRunning API calls to verify that it was ended.</message>
</response>"#;

pub const MEETING_INFO: &str = r#"<response>
    <returncode>SUCCESS</returncode>
    <meetingName>Weekly Sync</meetingName>
    <meetingID>weekly-sync</meetingID>
    <internalMeetingID>183f0bf3a0982a127bdb8161e0c44eb696b3e75c-1531240585189</internalMeetingID>
    <createTime>1531240585189</createTime>
    <voiceBridge>70066</voiceBridge>
    <attendeePW>ap</attendeePW>
    <moderatorPW>mp</moderatorPW>
    <running>true</running>
    <duration>0</duration>
    <hasUserJoined>true</hasUserJoined>
    <recording>false</recording>
    <hasBeenForciblyEnded>false</hasBeenForciblyEnded>
    <startTime>1531240585239</startTime>
    <endTime>0</endTime>
    <participantCount>2</participantCount>
    <listenerCount>1</listenerCount>
    <voiceParticipantCount>1</voiceParticipantCount>
    <videoCount>1</videoCount>
    <maxUsers>20</maxUsers>
    <moderatorCount>1</moderatorCount>
    <attendees>
        <attendee>
            <userID>w_2wzzszfaptsp</userID>
            <fullName>stu</fullName>
            <role>VIEWER</role>
            <isPresenter>false</isPresenter>
            <isListeningOnly>true</isListeningOnly>
            <hasJoinedVoice>false</hasJoinedVoice>
            <hasVideo>false</hasVideo>
            <clientType>HTML5</clientType>
        </attendee>
        <attendee>
            <userID>w_eo7lxnx3vwuj</userID>
            <fullName>mod</fullName>
            <role>MODERATOR</role>
            <isPresenter>true</isPresenter>
            <isListeningOnly>false</isListeningOnly>
            <hasJoinedVoice>true</hasJoinedVoice>
            <hasVideo>true</hasVideo>
            <clientType>HTML5</clientType>
        </attendee>
    </attendees>
    <metadata>
        <bbb-origin>Greenlight</bbb-origin>
    </metadata>
</response>"#;

pub const MEETINGS: &str = r#"<response>
    <returncode>SUCCESS</returncode>
    <meetings>
        <meeting>
            <meetingName>Weekly Sync</meetingName>
            <meetingID>weekly-sync</meetingID>
            <createTime>1531241258036</createTime>
            <running>false</running>
            <participantCount>0</participantCount>
            <attendees></attendees>
            <metadata></metadata>
        </meeting>
        <meeting>
            <meetingName>Retro</meetingName>
            <meetingID>retro</meetingID>
            <createTime>1531241258040</createTime>
            <running>true</running>
            <participantCount>1</participantCount>
            <attendees>
                <attendee>
                    <userID>w_1</userID>
                    <fullName>alex</fullName>
                    <role>MODERATOR</role>
                    <isPresenter>true</isPresenter>
                    <isListeningOnly>false</isListeningOnly>
                    <hasJoinedVoice>false</hasJoinedVoice>
                    <hasVideo>false</hasVideo>
                </attendee>
            </attendees>
            <metadata>
                <team>platform</team>
            </metadata>
        </meeting>
    </meetings>
</response>"#;

pub const NO_MEETINGS: &str = r#"<response>
    <returncode>SUCCESS</returncode>
    <meetings/>
    <messageKey>noMeetings</messageKey>
    <message>no meetings were found on this server</message>
</response>"#;

pub const VERSION: &str = r#"<response>
    <returncode>SUCCESS</returncode>
    <version>2.0</version>
    <apiVersion>2.0</apiVersion>
    <bbbVersion>2.7.3</bbbVersion>
</response>"#;

pub fn running(value: &str) -> String {
    format!(
        "<response><returncode>SUCCESS</returncode><running>{}</running></response>",
        value
    )
}

/// Server base URL the way deployments mount BigBlueButton
pub fn base_url(server: &ServerGuard) -> String {
    format!("{}/bigbluebutton", server.url())
}

/// Client pointed at the mock server, SHA-256 checksums
pub fn setup_test_client(server: &ServerGuard) -> BigBlueButtonClient {
    let config = ClientConfig::new(base_url(server), TEST_SECRET);
    BigBlueButtonClient::new(config).expect("Failed to build client")
}

/// Mock the given API call, answering `body` with `status`
pub async fn mock_call(server: &mut ServerGuard, call: &str, status: usize, body: &str) -> Mock {
    server
        .mock("GET", Matcher::Regex(format!("^/bigbluebutton/api/{}", call)))
        .match_query(Matcher::Any)
        .with_status(status)
        .with_header("content-type", "text/xml;charset=utf-8")
        .with_body(body)
        .create_async()
        .await
}

/// Observer that accepts any number of notifications
pub fn permissive_observer() -> MockApiObserver {
    let mut observer = MockApiObserver::new();
    observer.expect_url_signed().return_const(());
    observer.expect_request_started().return_const(());
    observer.expect_request_succeeded().return_const(());
    observer.expect_request_failed().return_const(());
    observer
}

/// Id generator returning fixed values
pub fn fixed_ids(meeting_id: &str, password: &str) -> Arc<MockIdGenerator> {
    let mut ids = MockIdGenerator::new();
    ids.expect_meeting_id().return_const(meeting_id.to_string());
    ids.expect_password().return_const(password.to_string());
    Arc::new(ids)
}
