use tracing::{debug, error, info};

use crate::error::ApiError;

/// Receives a notification for every step of an API call
#[cfg_attr(test, mockall::automock)]
pub trait ApiObserver: Send + Sync {
    /// A signed URL was built (also called for join URLs, which are never fetched)
    fn url_signed(&self, call: &str, url: &str);

    /// A request is about to be sent
    fn request_started(&self, call: &str);

    /// The server answered with `returncode` SUCCESS
    fn request_succeeded(&self, call: &str, status: u16);

    /// The call failed at the transport or application level
    fn request_failed(&self, call: &str, error: &ApiError);
}

/// Default observer, emits `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ApiObserver for TracingObserver {
    fn url_signed(&self, call: &str, url: &str) {
        debug!("Signed {} URL: {}", call, url);
    }

    fn request_started(&self, call: &str) {
        info!("Calling BigBlueButton API: {}", call);
    }

    fn request_succeeded(&self, call: &str, status: u16) {
        info!("{} succeeded with status: {}", call, status);
    }

    fn request_failed(&self, call: &str, error: &ApiError) {
        error!(kind = ?error.kind(), "{} failed: {}", call, error);
    }
}
