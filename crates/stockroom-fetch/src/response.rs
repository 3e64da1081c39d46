//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::Parse(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Unwrap the backend's `{ "data": ..., "status": ... }` envelope.
    ///
    /// Mutation endpoints answer HTTP 200 even when they refuse a request and
    /// put the real outcome in `status`; anything outside 2xx there is
    /// reported as [`FetchError::Rejected`] with `data` as the message.
    pub fn envelope<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        let mut value: serde_json::Value = self.json()?;

        let status = value.get("status").and_then(serde_json::Value::as_u64);
        let data = value
            .get_mut("data")
            .map(serde_json::Value::take)
            .ok_or_else(|| FetchError::Parse("response has no `data` field".to_string()))?;

        if let Some(status) = status {
            if !(200..300).contains(&status) {
                let message = match data {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                return Err(FetchError::Rejected {
                    status: u16::try_from(status).unwrap_or(u16::MAX),
                    message,
                });
            }
        }

        serde_json::from_value(data).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            let message = self.text().unwrap_or_else(|_| "Unknown error".to_string());
            Err(FetchError::Http {
                status: self.status,
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_model::WireRecord;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(299, b"").is_success());
        assert!(!make_response(300, b"").is_success());
        assert!(!make_response(404, b"").is_success());
    }

    #[test]
    fn test_error_for_status() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());
        let err = make_response(500, b"boom").error_for_status().unwrap_err();
        assert_eq!(
            err,
            FetchError::Http {
                status: 500,
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_envelope_list_without_status() {
        let resp = make_response(
            200,
            br#"{"data": [{"inventory_id": 1, "warehouse_id": 1, "sku": "53HA4DWH",
                "quantity": 50, "description": null, "deleted": false, "comments": null}]}"#,
        );
        let rows: Vec<WireRecord> = resp.envelope().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].inventory_id, 1);
    }

    #[test]
    fn test_envelope_success_status() {
        let resp = make_response(
            200,
            br#"{"data": {"inventory_id": 6, "warehouse_id": 2, "sku": "87OQ4BZR",
                "quantity": 5, "deleted": false}, "status": 200}"#,
        );
        let row: WireRecord = resp.envelope().unwrap();
        assert_eq!(row.quantity, 5);
    }

    #[test]
    fn test_envelope_rejection_in_body() {
        let resp = make_response(200, br#"{"data":"invalid input","status":400}"#);
        let err = resp.envelope::<WireRecord>().unwrap_err();
        assert_eq!(
            err,
            FetchError::Rejected {
                status: 400,
                message: "invalid input".to_string()
            }
        );
    }

    #[test]
    fn test_envelope_status_beyond_u16_saturates() {
        let resp = make_response(200, br#"{"data":"overflow","status":70000}"#);
        let err = resp.envelope::<WireRecord>().unwrap_err();
        assert_eq!(
            err,
            FetchError::Rejected {
                status: u16::MAX,
                message: "overflow".to_string()
            }
        );
    }

    #[test]
    fn test_envelope_malformed() {
        assert!(matches!(
            make_response(200, b"not json").envelope::<WireRecord>(),
            Err(FetchError::Parse(_))
        ));
        assert!(matches!(
            make_response(200, br#"{"rows": []}"#).envelope::<Vec<WireRecord>>(),
            Err(FetchError::Parse(_))
        ));
    }
}
