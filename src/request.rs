//! Incoming request model.
//!
//! Only the parts of a request the bootstrap looks at: the URI, query/form
//! parameters, headers and the content type.

use std::collections::BTreeMap;

/// Parameter requesting an environment switch.
pub const SWITCH_ENV_PARAM: &str = "switch_env";

/// Parameter bypassing maintenance mode. Its presence is enough.
pub const MAINTENANCE_BYPASS_PARAM: &str = "maintenance";

/// A web request as seen by the bootstrap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    uri: Option<String>,
    params: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
    content_type: Option<String>,
}

impl Request {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request URI.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Add a query or form parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Add a header. Header names are case-insensitive.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// The request URI, if known.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Whether the URI ends with `suffix`.
    pub fn uri_ends_with(&self, suffix: &str) -> bool {
        self.uri.as_deref().is_some_and(|uri| uri.ends_with(suffix))
    }

    /// A parameter value.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Whether a parameter was sent, whatever its value.
    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// A header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The content type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The requested environment switch, if any.
    pub fn switch_env(&self) -> Option<&str> {
        self.param(SWITCH_ENV_PARAM)
    }
}

/// Split a `name=value` pair. A bare `name` yields an empty value.
pub fn parse_pair(input: &str) -> Result<(String, String), String> {
    let (name, value) = input.split_once('=').unwrap_or((input, ""));
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("expected NAME=VALUE, got '{}'", input));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_case_insensitive() {
        let request = Request::new().with_header("X-Combodo-Ajax", "1");
        assert_eq!(request.header("x-combodo-ajax"), Some("1"));
        assert_eq!(request.header("X-COMBODO-AJAX"), Some("1"));
    }

    #[test]
    fn parameter_presence_without_value() {
        let request = Request::new().with_param(MAINTENANCE_BYPASS_PARAM, "");
        assert!(request.has_param(MAINTENANCE_BYPASS_PARAM));
        assert_eq!(request.param(MAINTENANCE_BYPASS_PARAM), Some(""));
    }

    #[test]
    fn switch_env_reads_parameter() {
        let request = Request::new().with_param(SWITCH_ENV_PARAM, "test");
        assert_eq!(request.switch_env(), Some("test"));
        assert_eq!(Request::new().switch_env(), None);
    }

    #[test]
    fn uri_suffix_match() {
        let request = Request::new().with_uri("/itop/webservices/rest.php");
        assert!(request.uri_ends_with("/webservices/rest.php"));
        assert!(!request.uri_ends_with("/pages/UI.php"));
        assert!(!Request::new().uri_ends_with("/webservices/rest.php"));
    }

    #[test]
    fn parse_pair_splits_on_first_equals() {
        assert_eq!(
            parse_pair("switch_env=a=b").unwrap(),
            ("switch_env".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn parse_pair_bare_name() {
        assert_eq!(
            parse_pair("maintenance").unwrap(),
            ("maintenance".to_string(), String::new())
        );
    }

    #[test]
    fn parse_pair_rejects_empty_name() {
        assert!(parse_pair("=value").is_err());
        assert!(parse_pair("").is_err());
    }
}
