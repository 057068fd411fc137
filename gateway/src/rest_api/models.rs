//! Response envelope shared by all pass-through handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{status, data, message}` envelope. Backend responses that already use the
/// envelope keys are unwrapped; anything else is carried whole under `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn from_remote(status: u16, body: Value) -> Self {
        match body {
            Value::Object(mut map) if map.contains_key("data") || map.contains_key("message") => {
                let message = match map.remove("message") {
                    Some(Value::String(s)) => Some(s),
                    _ => None,
                };
                let data = map.remove("data").filter(|v| !v.is_null());
                Envelope {
                    status,
                    data,
                    message,
                }
            }
            Value::Null => Envelope {
                status,
                data: None,
                message: None,
            },
            other => Envelope {
                status,
                data: Some(other),
                message: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwraps_enveloped_backend_response() {
        let envelope =
            Envelope::from_remote(200, json!({"data": {"id": 1}, "message": "created"}));
        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.data, Some(json!({"id": 1})));
        assert_eq!(envelope.message.as_deref(), Some("created"));
    }

    #[test]
    fn wraps_bare_payloads_under_data() {
        let envelope = Envelope::from_remote(200, json!([1, 2, 3]));
        assert_eq!(envelope.data, Some(json!([1, 2, 3])));
        assert_eq!(envelope.message, None);
    }

    #[test]
    fn passes_remote_error_message_through() {
        let envelope = Envelope::from_remote(404, json!({"message": "Complaint not found"}));
        assert_eq!(envelope.status, 404);
        assert_eq!(envelope.data, None);
        assert_eq!(envelope.message.as_deref(), Some("Complaint not found"));
    }

    #[test]
    fn empty_body_yields_bare_envelope() {
        let envelope = Envelope::from_remote(204, Value::Null);
        assert_eq!(envelope.data, None);
        assert_eq!(envelope.message, None);
    }

    #[test]
    fn null_data_is_dropped() {
        let envelope = Envelope::from_remote(200, json!({"data": null, "message": "ok"}));
        assert_eq!(envelope.data, None);
    }
}
