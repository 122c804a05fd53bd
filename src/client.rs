use reqwest::Client;
use std::sync::Arc;
use tracing::warn;
use xmltree::Element;

use crate::auth::BbbAuth;
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::ids::{IdGenerator, RandomIdGenerator};
use crate::models::meeting::{CreateMeetingParams, JoinParams, MeetingInfo, MeetingResult};
use crate::observer::{ApiObserver, TracingObserver};
use crate::xml;

/// BigBlueButton API call names
pub mod calls {
    pub const CREATE: &str = "create";
    pub const JOIN: &str = "join";
    pub const IS_MEETING_RUNNING: &str = "isMeetingRunning";
    pub const GET_MEETING_INFO: &str = "getMeetingInfo";
    pub const END: &str = "end";
    pub const GET_MEETINGS: &str = "getMeetings";
    /// Label for the unsigned version probe at `{server}/api`
    pub const VERSION: &str = "version";
}

type Params = Vec<(String, String)>;

fn push(params: &mut Params, key: &str, value: impl ToString) {
    params.push((key.to_string(), value.to_string()));
}

fn push_opt<T: ToString>(params: &mut Params, key: &str, value: Option<T>) {
    if let Some(value) = value {
        push(params, key, value);
    }
}

/// Client for the BigBlueButton API
pub struct BigBlueButtonClient {
    client: Client,
    config: ClientConfig,
    observer: Arc<dyn ApiObserver>,
    ids: Arc<dyn IdGenerator>,
}

impl BigBlueButtonClient {
    /// Create a client with tracing output and random id generation
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.timeout().is_zero() {
            return Err(ApiError::Config(
                "request timeout must be greater than 0".to_string(),
            ));
        }

        if config.accepts_invalid_certs() {
            warn!(
                "TLS certificate verification is disabled for {}",
                config.server_url()
            );
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(config.accepts_invalid_certs())
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            config,
            observer: Arc::new(TracingObserver),
            ids: Arc::new(RandomIdGenerator::new()),
        })
    }

    /// Create a client from `BBB_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn with_observer(mut self, observer: Arc<dyn ApiObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Signed URL `{server}/api/{call}?{params}&checksum={digest}`
    pub fn api_url<K, V>(&self, call: &str, params: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let query = BbbAuth::signed_query(
            self.config.algorithm(),
            call,
            params,
            self.config.secret(),
        );
        let url = format!("{}/api/{}?{}", self.config.server_url(), call, query);
        self.observer.url_signed(call, &url);
        url
    }

    /// Sign, send and parse one API call
    async fn call(&self, call: &str, params: &Params) -> Result<Element> {
        let url = self.api_url(call, params.as_slice());
        self.execute(call, &url).await
    }

    async fn execute(&self, call: &str, url: &str) -> Result<Element> {
        self.observer.request_started(call);

        match self.fetch(call, url).await {
            Ok((status, root)) => {
                self.observer.request_succeeded(call, status);
                Ok(root)
            }
            Err(err) => {
                self.observer.request_failed(call, &err);
                Err(err)
            }
        }
    }

    async fn fetch(&self, call: &str, url: &str) -> Result<(u16, Element)> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(call, e))?;

        let status = res.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                call: call.to_string(),
                status: status.as_u16(),
            });
        }

        let body = res
            .text()
            .await
            .map_err(|e| self.transport_error(call, e))?;

        let root = xml::parse_response(call, &body)?;
        xml::check_return_code(call, &root)?;

        Ok((status.as_u16(), root))
    }

    fn transport_error(&self, call: &str, err: reqwest::Error) -> ApiError {
        let reason = if err.is_timeout() {
            format!("timed out after {}s", self.config.timeout().as_secs())
        } else {
            err.to_string()
        };

        ApiError::Transport {
            call: call.to_string(),
            reason,
        }
    }

    /// Create a meeting, generating any id or password not supplied
    pub async fn create_meeting(&self, params: &CreateMeetingParams) -> Result<MeetingResult> {
        let meeting_id = params
            .meeting_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.ids.meeting_id());
        let name = params
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| meeting_id.clone());
        let attendee_pw = params
            .attendee_pw
            .clone()
            .unwrap_or_else(|| self.ids.password());
        let moderator_pw = params
            .moderator_pw
            .clone()
            .unwrap_or_else(|| self.ids.password());

        let mut query = Params::new();
        push(&mut query, "name", &name);
        push(&mut query, "meetingID", &meeting_id);
        push(&mut query, "attendeePW", &attendee_pw);
        push(&mut query, "moderatorPW", &moderator_pw);
        push_opt(&mut query, "record", params.record);
        push_opt(&mut query, "autoStartRecording", params.auto_start_recording);
        push_opt(&mut query, "allowStartStopRecording", params.allow_start_stop_recording);
        push_opt(&mut query, "voiceBridge", params.voice_bridge.as_ref());
        push_opt(&mut query, "maxParticipants", params.max_participants);
        push_opt(&mut query, "duration", params.duration);
        push_opt(&mut query, "logoutURL", params.logout_url.as_ref());
        push_opt(&mut query, "welcome", params.welcome.as_ref());
        for (key, value) in &params.metadata {
            push(&mut query, &format!("meta_{}", key), value);
        }

        let root = self.call(calls::CREATE, &query).await?;

        let mut result = MeetingResult::from_create_response(&root, &meeting_id);
        result.attendee_pw.get_or_insert(attendee_pw);
        result.moderator_pw.get_or_insert(moderator_pw);
        Ok(result)
    }

    /// Signed join URL for a browser redirect; no request is made
    pub fn join_url(&self, params: &JoinParams) -> String {
        let mut query = Params::new();
        push(&mut query, "fullName", &params.full_name);
        push(&mut query, "meetingID", &params.meeting_id);
        push(&mut query, "password", &params.password);
        push_opt(&mut query, "userID", params.user_id.as_ref());
        push_opt(&mut query, "createTime", params.create_time);
        push_opt(&mut query, "redirect", params.redirect);

        self.api_url(calls::JOIN, query.as_slice())
    }

    /// `true` iff the server reports `running` as "true" (any case)
    pub async fn is_meeting_running(&self, meeting_id: &str) -> Result<bool> {
        let mut query = Params::new();
        push(&mut query, "meetingID", meeting_id);

        let root = self.call(calls::IS_MEETING_RUNNING, &query).await?;
        Ok(xml::child_bool(&root, "running"))
    }

    /// Snapshot of one meeting. `password` is only needed by pre-2.0 servers.
    pub async fn get_meeting_info(
        &self,
        meeting_id: &str,
        password: Option<&str>,
    ) -> Result<MeetingInfo> {
        let mut query = Params::new();
        push(&mut query, "meetingID", meeting_id);
        push_opt(&mut query, "password", password);

        let root = self.call(calls::GET_MEETING_INFO, &query).await?;
        Ok(MeetingInfo::from_element(&root))
    }

    /// End a meeting, disconnecting all participants
    pub async fn end_meeting(
        &self,
        meeting_id: &str,
        password: Option<&str>,
    ) -> Result<MeetingResult> {
        let mut query = Params::new();
        push(&mut query, "meetingID", meeting_id);
        push_opt(&mut query, "password", password);

        let root = self.call(calls::END, &query).await?;
        Ok(MeetingResult::from_end_response(&root, meeting_id))
    }

    /// All meetings known to the server, in response order
    pub async fn get_meetings(&self) -> Result<Vec<MeetingInfo>> {
        let root = self.call(calls::GET_MEETINGS, &Params::new()).await?;

        let meetings = xml::child_elements(&root, "meetings")
            .filter(|node| node.name == "meeting")
            .map(MeetingInfo::from_element)
            .collect();

        Ok(meetings)
    }

    /// API version reported at `{server}/api`, no checksum required
    pub async fn api_version(&self) -> Result<String> {
        let url = format!("{}/api", self.config.server_url());
        let root = self.execute(calls::VERSION, &url).await?;

        xml::child_text(&root, "version").ok_or_else(|| ApiError::MalformedResponse {
            call: calls::VERSION.to_string(),
            reason: "missing version".to_string(),
        })
    }
}
