//! Address bar input
//!
//! Typed addresses without a scheme are taken as plain `http://` hosts, the
//! way the gateway's internal endpoints are usually reached.

use url::Url;

use crate::error::CoreError;

/// Schemes accepted verbatim
const PASSTHROUGH: [&str; 3] = ["about:", "file:", "data:"];

/// Turn address bar text into a URL
pub fn resolve_address(input: &str) -> Result<Url, CoreError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CoreError::InvalidAddress("address is empty".to_string()));
    }
    if input.chars().any(char::is_whitespace) {
        return Err(CoreError::InvalidAddress(input.to_string()));
    }

    let candidate = if input.contains("://") || PASSTHROUGH.iter().any(|p| input.starts_with(p)) {
        input.to_string()
    } else {
        format!("http://{}", input)
    };

    Url::parse(&candidate).map_err(|_| CoreError::InvalidAddress(input.to_string()))
}
