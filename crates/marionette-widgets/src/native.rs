//! Messages arriving from the native side through the host's inbound channel.

use marionette_bridge::Properties;
use marionette_common::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NativeMessage {
    /// A native event for a widget that is listening for it.
    Event {
        id: ObjectId,
        event: String,
        #[serde(default)]
        data: Value,
    },
    /// Property values reported by the native side, e.g. answers to `get`.
    Properties { id: ObjectId, properties: Properties },
}

impl NativeMessage {
    /// Parse a message from a raw JSON string.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn id(&self) -> &ObjectId {
        match self {
            NativeMessage::Event { id, .. } | NativeMessage::Properties { id, .. } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_event_without_data() {
        let msg =
            NativeMessage::from_json(r#"{"kind":"event","id":"$3","event":"select"}"#).unwrap();
        assert_eq!(
            msg,
            NativeMessage::Event {
                id: ObjectId::new("$3"),
                event: "select".into(),
                data: Value::Null,
            }
        );
    }

    #[test]
    fn parses_properties() {
        let raw = r#"{"kind":"properties","id":"$3","properties":{"text":"hi"}}"#;
        let msg = NativeMessage::from_json(raw).unwrap();
        match msg {
            NativeMessage::Properties { id, properties } => {
                assert_eq!(id.as_str(), "$3");
                assert_eq!(properties["text"], json!("hi"));
            }
            other => panic!("expected properties, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(NativeMessage::from_json(r#"{"kind":"reboot","id":"$1"}"#).is_err());
    }
}
