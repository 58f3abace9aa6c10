//! Conversation (Assistant v1) message models.
//!
//! Inputs, contexts and outputs are open objects: dialog nodes and client
//! applications routinely stash their own keys next to the documented ones,
//! and those keys must survive a round trip back to the service.

use crate::known_fields;
use crate::record::{Dynamic, DynamicRecord, NoKnownFields};
use serde::{Deserialize, Serialize};

known_fields! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct MessageInputFields {
        "text" => pub text: String,
    }
}

/// User input sent with a message request.
pub type MessageInput = DynamicRecord<MessageInputFields>;

impl MessageInput {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::with_known(MessageInputFields {
            text: Some(text.into()),
        })
    }

    pub fn text(&self) -> Option<&str> {
        self.known.text.as_deref()
    }
}

/// Dialog runtime state kept by the service. It has no documented fields.
pub type SystemResponse = DynamicRecord<NoKnownFields>;

impl SystemResponse {
    pub fn dialog_turn_counter(&self) -> Option<i64> {
        self.get("dialog_turn_counter").and_then(Dynamic::as_i64)
    }

    pub fn dialog_request_counter(&self) -> Option<i64> {
        self.get("dialog_request_counter").and_then(Dynamic::as_i64)
    }
}

known_fields! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct ContextFields {
        "conversation_id" => pub conversation_id: String,
        "system" => pub system: SystemResponse,
    }
}

/// Conversation state carried from one turn to the next.
pub type Context = DynamicRecord<ContextFields>;

impl Context {
    pub fn conversation_id(&self) -> Option<&str> {
        self.known.conversation_id.as_deref()
    }

    pub fn system(&self) -> Option<&SystemResponse> {
        self.known.system.as_ref()
    }
}

/// A dialog log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    pub level: String,
    pub msg: String,
}

known_fields! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct OutputDataFields {
        "log_messages" => pub log_messages: Vec<LogMessage>,
        "text" => pub text: Vec<String>,
        "nodes_visited" => pub nodes_visited: Vec<String>,
    }
}

/// Dialog output of one turn.
pub type OutputData = DynamicRecord<OutputDataFields>;

impl OutputData {
    /// Response lines, empty when the dialog produced none.
    pub fn text(&self) -> &[String] {
        self.known.text.as_deref().unwrap_or(&[])
    }
}

known_fields! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct RuntimeIntentFields {
        "intent" => pub intent: String,
        "confidence" => pub confidence: f64,
    }
}

/// An intent recognized in the user input.
pub type RuntimeIntent = DynamicRecord<RuntimeIntentFields>;

/// Body of a message call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<MessageInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_intents: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputData>,
}

/// Result of a message call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<MessageInput>,
    #[serde(default)]
    pub intents: Vec<RuntimeIntent>,
    #[serde(default)]
    pub entities: Vec<serde_json::Value>,
    pub context: Context,
    pub output: OutputData,
}

impl MessageResponse {
    /// Request for the next turn, carrying this turn's context forward.
    pub fn follow_up(&self, text: impl Into<String>) -> MessageRequest {
        MessageRequest {
            input: Some(MessageInput::from_text(text)),
            context: Some(self.context.clone()),
            ..MessageRequest::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_keeps_client_keys() {
        let mut input = MessageInput::from_text("hello");
        input.add("client_tag", "web").unwrap();
        assert_eq!(
            input.to_json_string().unwrap(),
            r#"{"text":"hello","client_tag":"web"}"#
        );
        assert_eq!(input.text(), Some("hello"));
    }

    #[test]
    fn test_context_system_counters() {
        let context = Context::from_json_str(
            r#"{"conversation_id":"c-1","system":{"dialog_turn_counter":2,"dialog_request_counter":3},"user_name":"Ada"}"#,
        )
        .unwrap();
        assert_eq!(context.conversation_id(), Some("c-1"));
        let system = context.system().unwrap();
        assert_eq!(system.dialog_turn_counter(), Some(2));
        assert_eq!(system.dialog_request_counter(), Some(3));
        assert_eq!(context.get("user_name"), Some(&Dynamic::from("Ada")));
    }

    #[test]
    fn test_output_text_defaults_to_empty() {
        let output = OutputData::new();
        assert!(output.text().is_empty());
        assert_eq!(output.to_json_string().unwrap(), "{}");
    }

    #[test]
    fn test_request_omits_unset_parts() {
        let request = MessageRequest {
            input: Some(MessageInput::from_text("hi")),
            ..MessageRequest::default()
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"input":{"text":"hi"}}"#
        );
    }
}
