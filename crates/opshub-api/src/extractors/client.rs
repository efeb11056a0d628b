//! Client metadata extraction from request headers.

use std::net::IpAddr;

use axum::http::HeaderMap;

use opshub_auth::RequestContext;

/// Longest User-Agent value recorded in audit events.
const MAX_USER_AGENT_LEN: usize = 500;

/// Resolves the client IP from proxy headers.
///
/// `X-Forwarded-For` wins, taking the first (client-most) entry; then
/// `X-Real-IP`. A value that does not parse as an IP address is dropped
/// rather than recorded, since these headers are client-controlled.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        let first = forwarded.split(',').next().unwrap_or("").trim();
        if first.parse::<IpAddr>().is_ok() {
            return Some(first.to_string());
        }
    }

    let real_ip = headers.get("x-real-ip").and_then(|v| v.to_str().ok())?;
    let real_ip = real_ip.trim();
    real_ip.parse::<IpAddr>().ok().map(|_| real_ip.to_string())
}

/// Reads the User-Agent header, capped to a recordable length.
pub fn client_user_agent(headers: &HeaderMap) -> Option<String> {
    let ua = headers.get("user-agent").and_then(|v| v.to_str().ok())?;
    let mut ua = ua.to_string();
    if ua.len() > MAX_USER_AGENT_LEN {
        // Truncate on a char boundary.
        let mut cut = MAX_USER_AGENT_LEN;
        while !ua.is_char_boundary(cut) {
            cut -= 1;
        }
        ua.truncate(cut);
    }
    Some(ua)
}

/// Builds the audit context for a request.
pub fn client_context(headers: &HeaderMap) -> RequestContext {
    RequestContext::new(client_ip(headers), client_user_agent(headers))
}
