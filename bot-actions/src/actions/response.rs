//! Action response: slot events plus messages for the user

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Set (or with `null`, clear) a slot
    Slot { name: String, value: Value },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BotMessage {
    Text { text: String },
    Custom { custom: Value },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub events: Vec<Event>,
    pub responses: Vec<BotMessage>,
}

impl ActionResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn utter(&mut self, text: impl Into<String>) -> &mut Self {
        self.responses.push(BotMessage::Text { text: text.into() });
        self
    }

    pub fn utter_custom(&mut self, custom: Value) -> &mut Self {
        self.responses.push(BotMessage::Custom { custom });
        self
    }

    pub fn set_slot(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.events.push(Event::Slot {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Text messages, in order
    pub fn texts(&self) -> Vec<&str> {
        self.responses
            .iter()
            .filter_map(|m| match m {
                BotMessage::Text { text } => Some(text.as_str()),
                BotMessage::Custom { .. } => None,
            })
            .collect()
    }

    /// Last value set for `name`
    pub fn slot(&self, name: &str) -> Option<&Value> {
        self.events.iter().rev().find_map(|event| match event {
            Event::Slot { name: n, value } if n == name => Some(value),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let mut response = ActionResponse::new();
        response
            .set_slot("booking_confirmed", true)
            .set_slot("name", Value::Null)
            .utter("Saved booking BKG1 for Asha.")
            .utter_custom(json!({"type": "cards", "cards": []}));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "events": [
                    {"event": "slot", "name": "booking_confirmed", "value": true},
                    {"event": "slot", "name": "name", "value": null}
                ],
                "responses": [
                    {"text": "Saved booking BKG1 for Asha."},
                    {"custom": {"type": "cards", "cards": []}}
                ]
            })
        );
        assert_eq!(response.texts(), vec!["Saved booking BKG1 for Asha."]);
        assert_eq!(response.slot("booking_confirmed"), Some(&json!(true)));
        assert_eq!(response.slot("missing"), None);
    }
}
