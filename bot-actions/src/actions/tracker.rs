//! Incoming action request
//!
//! Shape follows the dialogue engine's action webhook:
//! `{"next_action": ..., "sender_id": ..., "tracker": {"slots": {...}, "latest_message": {...}, "events": [...]}}`.
//! Unknown fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Slot holding the name of the slot the form is currently asking for
pub const REQUESTED_SLOT: &str = "requested_slot";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionRequest {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: Tracker,
}

impl ActionRequest {
    pub fn new(next_action: impl Into<String>, tracker: Tracker) -> Self {
        Self {
            next_action: next_action.into(),
            sender_id: None,
            tracker,
        }
    }
}

/// Conversation state as seen by an action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub slots: Map<String, Value>,
    #[serde(default)]
    pub latest_message: LatestMessage,
    #[serde(default)]
    pub events: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Tracker {
    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    pub fn with_latest_message(mut self, text: impl Into<String>, intent: Option<&str>) -> Self {
        self.latest_message = LatestMessage {
            text: Some(text.into()),
            intent: intent.map(|name| Intent {
                name: Some(name.to_string()),
                confidence: None,
            }),
        };
        self
    }

    pub fn slot(&self, name: &str) -> Option<&Value> {
        self.slots.get(name).filter(|v| !v.is_null())
    }

    /// Slot value as text. Numbers are rendered without a trailing `.0`;
    /// blank strings, booleans and structured values read as absent.
    pub fn slot_text(&self, name: &str) -> Option<String> {
        match self.slot(name)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(match n.as_f64() {
                Some(f) if n.is_f64() && f.fract() == 0.0 => format!("{}", f as i64),
                _ => n.to_string(),
            }),
            _ => None,
        }
    }

    pub fn requested_slot(&self) -> Option<&str> {
        self.slot(REQUESTED_SLOT)?.as_str()
    }

    pub fn latest_intent(&self) -> Option<&str> {
        self.latest_message.intent.as_ref()?.name.as_deref()
    }

    /// Slots set since the last user message, in order
    pub fn slots_set_this_turn(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .events
            .iter()
            .rev()
            .take_while(|event| event.get("event").and_then(Value::as_str) != Some("user"))
            .filter(|event| event.get("event").and_then(Value::as_str) == Some("slot"))
            .filter_map(|event| event.get("name").and_then(Value::as_str))
            .collect();
        names.reverse();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_minimal_request() {
        let request: ActionRequest =
            serde_json::from_value(json!({"next_action": "action_show_menu"})).unwrap();
        assert_eq!(request.next_action, "action_show_menu");
        assert!(request.tracker.slots.is_empty());
        assert_eq!(request.tracker.latest_intent(), None);
    }

    #[test]
    fn test_slot_text() {
        let tracker = Tracker::default()
            .with_slot("name", "Asha")
            .with_slot("party_size", 4)
            .with_slot("float_size", 4.0)
            .with_slot("phone", 9876543210u64)
            .with_slot("blank", "  ")
            .with_slot("flag", true)
            .with_slot("nothing", Value::Null);

        assert_eq!(tracker.slot_text("name").as_deref(), Some("Asha"));
        assert_eq!(tracker.slot_text("party_size").as_deref(), Some("4"));
        assert_eq!(tracker.slot_text("float_size").as_deref(), Some("4"));
        assert_eq!(tracker.slot_text("phone").as_deref(), Some("9876543210"));
        assert_eq!(tracker.slot_text("blank"), None);
        assert_eq!(tracker.slot_text("flag"), None);
        assert_eq!(tracker.slot_text("nothing"), None);
        assert_eq!(tracker.slot_text("missing"), None);
    }

    #[test]
    fn test_latest_message() {
        let request: ActionRequest = serde_json::from_value(json!({
            "next_action": "validate_booking_form",
            "tracker": {
                "slots": {"requested_slot": "name", "name": "hi"},
                "latest_message": {"text": "hi", "intent": {"name": "greet", "confidence": 0.98}}
            }
        }))
        .unwrap();
        assert_eq!(request.tracker.requested_slot(), Some("name"));
        assert_eq!(request.tracker.latest_intent(), Some("greet"));
        assert_eq!(request.tracker.latest_message.text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_slots_set_this_turn() {
        let tracker = Tracker {
            events: vec![
                json!({"event": "slot", "name": "name", "value": "Asha"}),
                json!({"event": "user", "text": "9876543210"}),
                json!({"event": "slot", "name": "phone", "value": "9876543210"}),
                json!({"event": "slot", "name": "party_size", "value": 4}),
            ],
            ..Default::default()
        };
        assert_eq!(tracker.slots_set_this_turn(), vec!["phone", "party_size"]);
        assert!(Tracker::default().slots_set_this_turn().is_empty());
    }
}
