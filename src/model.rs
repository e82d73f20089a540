// Data model for captured HTTP exchanges
//
// These are the records served by GET /data and passed around the inspector.
// Once fetched they are never mutated: the list owns them, the detail view
// only ever sees cloned snapshots carried by selection notifications.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One recorded request/response pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub status: StatusCode,
    #[serde(default)]
    pub request: Message,
    #[serde(default)]
    pub response: Message,
}

/// One side of an exchange: the raw header block plus an optional body
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub raw_headers: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl Message {
    pub fn new(raw_headers: impl Into<String>, body: Option<String>) -> Self {
        Self {
            raw_headers: raw_headers.into(),
            body,
        }
    }

    /// Header block as displayed (surrounding whitespace removed)
    pub fn headers_display(&self) -> &str {
        self.raw_headers.trim()
    }

    /// Body as displayed; an absent or empty body yields `placeholder`
    pub fn body_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.body.as_deref() {
            Some(body) if !body.is_empty() => body,
            _ => placeholder,
        }
    }
}

/// Status code in its textual form
///
/// The wire value is usually an integer, but producers are not trusted: a
/// string, a float or `null` is kept as text and classified later, where an
/// unparsable value simply lands in the highest severity tier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusCode(String);

impl StatusCode {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, parsed the way `parseInt(text, 10)` would
    pub fn code(&self) -> Option<i64> {
        parse_int(&self.0)
    }

    pub fn tier(&self) -> SeverityTier {
        SeverityTier::classify(&self.0)
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code.to_string())
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(code) => serializer.serialize_i64(code),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let text = match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        Ok(Self(text))
    }
}

/// Severity bucket derived from a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityTier {
    /// Informational and success responses
    Success,
    Redirect,
    ClientError,
    /// Server errors, and anything that is not a number
    ServerError,
}

impl SeverityTier {
    /// Classify status text into a tier
    ///
    /// Boundaries are `< 299`, `<= 399`, `<= 499`, so 299 is a redirect.
    /// Text without a leading integer fails every comparison and falls
    /// through to `ServerError`.
    pub fn classify(text: &str) -> Self {
        match parse_int(text) {
            Some(code) if code < 299 => Self::Success,
            Some(code) if code <= 399 => Self::Redirect,
            Some(code) if code <= 499 => Self::ClientError,
            _ => Self::ServerError,
        }
    }

    /// 1-based tier number
    pub fn level(self) -> u8 {
        match self {
            Self::Success => 1,
            Self::Redirect => 2,
            Self::ClientError => 3,
            Self::ServerError => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Redirect => "redirect",
            Self::ClientError => "client-error",
            Self::ServerError => "server-error",
        }
    }
}

/// Base-10 integer prefix parse with `parseInt` semantics
///
/// Leading whitespace is skipped, one optional sign is accepted, then as many
/// ASCII digits as are present. Returns `None` when no digit follows. Values
/// beyond `i64` saturate.
pub fn parse_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        let digit = i64::from(byte - b'0');
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .unwrap_or(i64::MAX);
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_plain_and_prefixed() {
        assert_eq!(parse_int("404"), Some(404));
        assert_eq!(parse_int("  201"), Some(201));
        assert_eq!(parse_int("503 Service Unavailable"), Some(503));
        assert_eq!(parse_int("+302"), Some(302));
        assert_eq!(parse_int("-1"), Some(-1));
        assert_eq!(parse_int("404.9"), Some(404));
    }

    #[test]
    fn test_parse_int_not_a_number() {
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("null"), None);
        assert_eq!(parse_int("x200"), None);
    }

    #[test]
    fn test_parse_int_saturates() {
        assert_eq!(parse_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(SeverityTier::classify("100"), SeverityTier::Success);
        assert_eq!(SeverityTier::classify("200"), SeverityTier::Success);
        assert_eq!(SeverityTier::classify("298"), SeverityTier::Success);
        assert_eq!(SeverityTier::classify("299"), SeverityTier::Redirect);
        assert_eq!(SeverityTier::classify("300"), SeverityTier::Redirect);
        assert_eq!(SeverityTier::classify("399"), SeverityTier::Redirect);
        assert_eq!(SeverityTier::classify("400"), SeverityTier::ClientError);
        assert_eq!(SeverityTier::classify("499"), SeverityTier::ClientError);
        assert_eq!(SeverityTier::classify("500"), SeverityTier::ServerError);
        assert_eq!(SeverityTier::classify("599"), SeverityTier::ServerError);
    }

    #[test]
    fn test_tier_not_a_number_is_server_error() {
        assert_eq!(SeverityTier::classify("teapot"), SeverityTier::ServerError);
        assert_eq!(SeverityTier::classify(""), SeverityTier::ServerError);
        assert_eq!(SeverityTier::ServerError.level(), 4);
    }

    #[test]
    fn test_status_deserializes_from_any_json_scalar() {
        let code: StatusCode = serde_json::from_str("404").unwrap();
        assert_eq!(code.as_str(), "404");
        assert_eq!(code.tier(), SeverityTier::ClientError);

        let text: StatusCode = serde_json::from_str("\"201\"").unwrap();
        assert_eq!(text.code(), Some(201));

        let null: StatusCode = serde_json::from_str("null").unwrap();
        assert_eq!(null.as_str(), "null");
        assert_eq!(null.tier(), SeverityTier::ServerError);
    }

    #[test]
    fn test_status_serializes_numeric_text_as_number() {
        assert_eq!(serde_json::to_string(&StatusCode::from(200)).unwrap(), "200");
        assert_eq!(
            serde_json::to_string(&StatusCode::new("oops")).unwrap(),
            "\"oops\""
        );
    }

    #[test]
    fn test_exchange_from_wire_format() {
        let json = r#"{
            "status": 200,
            "path": "/users?page=2",
            "method": "GET",
            "request": {"raw_headers": "Accept: */*\r\n", "body": ""},
            "response": {"raw_headers": "Content-Type: application/json\r\n", "body": "{}"}
        }"#;
        let exchange: Exchange = serde_json::from_str(json).unwrap();
        assert_eq!(exchange.method, "GET");
        assert_eq!(exchange.path, "/users?page=2");
        assert_eq!(exchange.status.code(), Some(200));
        assert_eq!(exchange.request.headers_display(), "Accept: */*");
        assert_eq!(exchange.response.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_message_body_placeholder() {
        let empty = Message::new("", Some(String::new()));
        assert_eq!(empty.body_or("Empty request body"), "Empty request body");

        let absent = Message::new("", None);
        assert_eq!(absent.body_or("Empty response body"), "Empty response body");

        let present = Message::new("", Some("hello".to_string()));
        assert_eq!(present.body_or("Empty request body"), "hello");
    }

    #[test]
    fn test_message_headers_trimmed() {
        let message = Message::new("\n  Host: example.com\r\nAccept: */*\r\n\r\n", None);
        assert_eq!(
            message.headers_display(),
            "Host: example.com\r\nAccept: */*"
        );
    }
}
