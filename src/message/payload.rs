//! Classification of inbound JSON bodies.
//!
//! Clients don't tag their payloads, so the shape is decided once, here, by field presence:
//!
//! 1. a non-empty string `message` field
//! 2. a non-empty string `text` field
//! 3. a bare JSON string
//! 4. a `location`, `ipv4` or `ipv6` field (a DDNS update)
//! 5. anything else
use serde::Deserialize;
use serde_json::Value;

const UPDATE_FIELDS: [&str; 3] = ["location", "ipv4", "ipv6"];

/// Address family details reported by a DDNS client.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressInfo {
    #[serde(default)]
    pub addr: Option<String>,
    #[serde(default)]
    pub domains: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
}

/// A DDNS update notification.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DdnsUpdate {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub ipv4: Option<AddressInfo>,
    #[serde(default)]
    pub ipv6: Option<AddressInfo>,
}

/// An inbound payload, resolved to exactly one shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Free-form text from the `message` or `text` field.
    Message(String),
    /// The body itself was a JSON string.
    Raw(String),
    /// A structured DDNS update.
    Update(DdnsUpdate),
    /// Any other JSON, relayed as a pretty-printed dump.
    Opaque(Value),
}

impl Payload {
    /// A short name for the payload shape, for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Message(_) => "message",
            Payload::Raw(_) => "raw",
            Payload::Update(_) => "update",
            Payload::Opaque(_) => "opaque",
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        if let Some(text) = non_empty_str(&value, "message").or_else(|| non_empty_str(&value, "text"))
        {
            return Payload::Message(text.to_string());
        }

        let has_update_fields = value.as_object().is_some_and(|fields| {
            UPDATE_FIELDS
                .iter()
                .any(|f| fields.get(*f).is_some_and(|v| !v.is_null()))
        });
        if has_update_fields {
            return match DdnsUpdate::deserialize(&value) {
                Ok(update) => Payload::Update(update),
                Err(err) => {
                    tracing::debug!("update fields present but malformed ({err}), relaying as JSON");
                    Payload::Opaque(value)
                }
            };
        }

        match value {
            Value::String(raw) => Payload::Raw(raw),
            other => Payload::Opaque(other),
        }
    }
}

fn non_empty_str<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_wins_over_everything() {
        let payload = Payload::from(json!({
            "message": "hi",
            "text": "ignored",
            "ipv4": { "addr": "1.2.3.4" },
        }));
        assert_eq!(payload, Payload::Message("hi".to_string()));
    }

    #[test]
    fn text_used_when_message_empty_or_missing() {
        assert_eq!(
            Payload::from(json!({ "message": "", "text": "from text" })),
            Payload::Message("from text".to_string())
        );
        assert_eq!(
            Payload::from(json!({ "text": "only text" })),
            Payload::Message("only text".to_string())
        );
    }

    #[test]
    fn non_string_message_is_not_a_message() {
        let value = json!({ "message": 42 });
        assert_eq!(Payload::from(value.clone()), Payload::Opaque(value));
    }

    #[test]
    fn bare_string() {
        assert_eq!(
            Payload::from(json!("hello")),
            Payload::Raw("hello".to_string())
        );
    }

    #[test]
    fn ddns_update() {
        let payload = Payload::from(json!({
            "location": "Singapore",
            "ipv4": { "addr": "1.2.3.4", "domains": "a.example", "result": "ok" },
            "extra": true,
        }));
        assert_eq!(
            payload,
            Payload::Update(DdnsUpdate {
                location: Some("Singapore".to_string()),
                ipv4: Some(AddressInfo {
                    addr: Some("1.2.3.4".to_string()),
                    domains: Some("a.example".to_string()),
                    result: Some("ok".to_string()),
                }),
                ipv6: None,
            })
        );
    }

    #[test]
    fn location_alone_is_an_update() {
        assert!(matches!(
            Payload::from(json!({ "location": "Home" })),
            Payload::Update(_)
        ));
    }

    #[test]
    fn null_update_fields_do_not_count() {
        let value = json!({ "ipv4": null, "ipv6": null });
        assert_eq!(Payload::from(value.clone()), Payload::Opaque(value));
    }

    #[test]
    fn malformed_update_falls_back_to_opaque() {
        let value = json!({ "ipv4": "1.2.3.4" });
        assert_eq!(Payload::from(value.clone()), Payload::Opaque(value));
    }

    #[test]
    fn everything_else_is_opaque() {
        for value in [json!({ "foo": 1 }), json!([1, 2]), json!(3), json!(null)] {
            assert_eq!(Payload::from(value.clone()), Payload::Opaque(value));
        }
    }
}
