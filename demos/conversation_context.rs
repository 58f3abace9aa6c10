//! Carry a conversation context, including application keys, across turns.
//!
//! Run with: cargo run --example conversation_context

use watson_sdk::models::{MessageInput, MessageResponse};

const RESPONSE: &str = r#"{
    "context": {
        "conversation_id": "3f1a",
        "system": {"dialog_turn_counter": 1, "dialog_request_counter": 1},
        "room": "kitchen"
    },
    "output": {"text": ["Which lights?"], "nodes_visited": ["ask_room"]}
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let response: MessageResponse = serde_json::from_str(RESPONSE)?;
    for line in response.output.text() {
        println!("assistant: {line}");
    }

    let mut request = response.follow_up("the ones in the hall");
    if let Some(context) = request.context.as_mut() {
        context.remove("room");
        context.add("room", "hall")?;
    }
    let mut input = MessageInput::from_text("the ones in the hall");
    input.add("channel", "voice")?;
    request.input = Some(input);

    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}
