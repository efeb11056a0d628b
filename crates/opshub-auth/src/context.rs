//! Per-request caller context threaded through audit recording.

/// Where a request came from, as far as the transport could tell.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Client IP address, if known.
    pub ip_address: Option<String>,
    /// Client User-Agent, if known.
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Creates a context from optional transport metadata.
    pub fn new(ip_address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            ip_address,
            user_agent,
        }
    }
}
