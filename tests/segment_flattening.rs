use serde_json::json;

// Use the public message model from src/model.rs
use chat_statistics::{AnalysisConfig, ChatStatistics, Message, RankedAuthor};

fn message(v: serde_json::Value) -> Message {
    serde_json::from_value(v).expect("deserialize message")
}

#[test]
fn flat_string_text_is_the_identity() {
    let mut msg = message(json!({"id": 1, "from": "A", "text": "plain enough"}));
    assert_eq!(msg.flatten_text(), "plain enough");
}

#[test]
fn segment_sequence_concatenates_in_order() {
    // Mixed raw strings and formatted spans, exactly as exports produce them.
    let mut msg = message(json!({
        "id": 1,
        "from": "A",
        "text": [
            "start ",
            {"type": "bold", "text": "middle"},
            " ",
            {"type": "italic", "text": "end"}
        ]
    }));
    assert_eq!(msg.flatten_text(), "start middle end");
}

#[test]
fn spans_without_text_and_non_string_segments_are_ignored() {
    let mut msg = message(json!({
        "id": 1,
        "from": "A",
        "text": [
            {"type": "photo"},
            7,
            null,
            {"type": "bold", "text": 12},
            "only this survives"
        ]
    }));
    assert_eq!(msg.flatten_text(), "only this survives");
}

#[test]
fn empty_segment_sequence_flattens_without_error() {
    let mut msg = message(json!({"id": 1, "from": "A", "text": []}));
    assert_eq!(msg.flatten_text(), "");
}

#[test]
fn repeated_flattening_returns_the_same_string() {
    let mut msg = message(json!({
        "id": 1,
        "from": "A",
        "text": ["a", {"type": "code", "text": "b"}, "c"]
    }));
    let first = msg.flatten_text().to_string();
    assert_eq!(msg.flatten_text(), first);
    assert_eq!(first, "abc");
}

#[test]
fn segmented_question_is_ranked_end_to_end() {
    // The question mark only appears inside a formatted span; flattening must
    // reassemble it before classification.
    let chat = serde_json::from_value(json!({"messages": [
        {"id": 1, "from": "A", "text": ["میای ", {"type": "bold", "text": "بیرون؟"}]},
        {"id": 2, "from": "B", "reply_to_message_id": 1, "text": "آره"}
    ]}))
    .expect("deserialize chat");

    let mut stats = ChatStatistics::new(chat, AnalysisConfig::new("unused.ttf"));
    let ranking = stats.top_repliers(10).expect("ranking");
    assert_eq!(
        ranking,
        vec![RankedAuthor {
            author: "B".to_string(),
            count: 1
        }]
    );
}
