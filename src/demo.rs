// Demo data: a small, realistic capture to explore without any client
//
// `vex serve --demo` preloads these so the inspector has something to show.
// Every severity tier is represented, including the 299 boundary and a
// status that is not a number at all.
//
// `vex serve --file capture.json` preloads a saved /data response instead.

use crate::model::{Exchange, Message, StatusCode};
use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;

/// Build the demo capture
pub fn sample_exchanges() -> Vec<Exchange> {
    vec![
        exchange(
            "GET",
            "/api/users?page=2",
            StatusCode::from(200),
            Message::new("Accept: application/json\r\nUser-Agent: curl/8.5.0\r\n", None),
            Message::new(
                "Content-Type: application/json\r\nX-Request-Id: 7f3a\r\n",
                pretty(json!({
                    "page": 2,
                    "users": [
                        {"id": 11, "name": "Ada Lovelace"},
                        {"id": 12, "name": "Grace Hopper"}
                    ]
                })),
            ),
        ),
        exchange(
            "POST",
            "/api/users",
            StatusCode::from(201),
            Message::new(
                "Content-Type: application/json\r\nContent-Length: 27\r\n",
                pretty(json!({"name": "Barbara Liskov"})),
            ),
            Message::new(
                "Content-Type: application/json\r\nLocation: /api/users/13\r\n",
                pretty(json!({"id": 13, "name": "Barbara Liskov"})),
            ),
        ),
        exchange(
            "POST",
            "/login",
            StatusCode::from(204),
            Message::new(
                "Content-Type: application/x-www-form-urlencoded\r\n",
                Some("username=ada&password=hunter2".to_string()),
            ),
            Message::new("Set-Cookie: session=d41d8cd9; HttpOnly\r\n", None),
        ),
        // Lands in the redirect tier
        exchange(
            "GET",
            "/experimental",
            StatusCode::from(299),
            Message::new("Accept: */*\r\n", None),
            Message::new(
                "Content-Type: text/plain; charset=utf-8\r\n",
                Some("custom success code".to_string()),
            ),
        ),
        exchange(
            "GET",
            "/old-home",
            StatusCode::from(301),
            Message::new("Accept: text/html\r\n", None),
            Message::new("Location: /home\r\n", None),
        ),
        exchange(
            "GET",
            "/feed.xml",
            StatusCode::from(304),
            Message::new("If-None-Match: \"v42\"\r\n", None),
            Message::new("Etag: \"v42\"\r\n", None),
        ),
        exchange(
            "DELETE",
            "/api/users/99",
            StatusCode::from(404),
            Message::new("Authorization: Bearer ****\r\n", None),
            Message::new(
                "Content-Type: application/json\r\n",
                pretty(json!({"error": "user 99 not found"})),
            ),
        ),
        exchange(
            "PUT",
            "/api/orders/17",
            StatusCode::from(422),
            Message::new(
                "Content-Type: text/xml; charset=utf-8\r\n",
                Some("<?xml version=\"1.0\"?><order><qty>-1</qty></order>".to_string()),
            ),
            Message::new(
                "Content-Type: application/json\r\n",
                pretty(json!({"errors": {"qty": "must be positive"}})),
            ),
        ),
        exchange(
            "GET",
            "/reports/q3.pdf",
            StatusCode::from(500),
            Message::new("Accept: application/pdf\r\n", None),
            Message::new(
                "Content-Type: application/pdf\r\n",
                Some("content-type application/pdf preview not supported".to_string()),
            ),
        ),
        exchange(
            "GET",
            "/upstream/health",
            StatusCode::from(503),
            Message::new("Accept: */*\r\n", None),
            Message::new(
                "Retry-After: 30\r\nContent-Type: text/plain\r\n",
                Some("upstream unavailable".to_string()),
            ),
        ),
        // Malformed status from a misbehaving producer
        exchange(
            "PATCH",
            "/api/settings",
            StatusCode::new("n/a"),
            Message::new(
                "Content-Type: application/json\r\n",
                pretty(json!({"theme": "dark"})),
            ),
            Message::default(),
        ),
    ]
}

/// Load a capture saved from a /data response
///
/// A JSON `null` is read as an empty capture.
pub fn load_file(path: &Path) -> Result<Vec<Exchange>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read capture file {}", path.display()))?;
    let exchanges: Option<Vec<Exchange>> = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON array of exchanges", path.display()))?;
    Ok(exchanges.unwrap_or_default())
}

fn exchange(
    method: &str,
    path: &str,
    status: StatusCode,
    request: Message,
    response: Message,
) -> Exchange {
    Exchange {
        method: method.to_string(),
        path: path.to_string(),
        status,
        request,
        response,
    }
}

fn pretty(value: serde_json::Value) -> Option<String> {
    serde_json::to_string_pretty(&value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SeverityTier;
    use std::collections::HashSet;

    #[test]
    fn test_samples_cover_every_tier() {
        let tiers: HashSet<SeverityTier> = sample_exchanges()
            .iter()
            .map(|e| e.status.tier())
            .collect();
        assert_eq!(tiers.len(), 4);
    }

    #[test]
    fn test_samples_include_boundary_and_malformed_status() {
        let samples = sample_exchanges();
        let boundary = samples.iter().find(|e| e.status.as_str() == "299").unwrap();
        assert_eq!(boundary.status.tier(), SeverityTier::Redirect);
        assert!(samples.iter().any(|e| e.status.code().is_none()));
    }

    #[test]
    fn test_load_file_round_trips_samples() {
        let path = std::env::temp_dir().join(format!("vex-demo-{}.json", std::process::id()));
        let samples = sample_exchanges();
        std::fs::write(&path, serde_json::to_string(&samples).unwrap()).unwrap();

        let loaded = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, samples);
    }

    #[test]
    fn test_load_file_null_and_garbage() {
        let dir = std::env::temp_dir();
        let null = dir.join(format!("vex-null-{}.json", std::process::id()));
        std::fs::write(&null, "null").unwrap();
        assert!(load_file(&null).unwrap().is_empty());
        std::fs::remove_file(&null).ok();

        let bad = dir.join(format!("vex-bad-{}.json", std::process::id()));
        std::fs::write(&bad, "{\"not\": \"an array\"}").unwrap();
        assert!(load_file(&bad).is_err());
        std::fs::remove_file(&bad).ok();

        assert!(load_file(&dir.join("vex-definitely-missing.json")).is_err());
    }
}
