use serde::Deserialize;
use serde_json::Value;

/// A whole chat export: one JSON document with a top-level `messages` array.
///
/// Unknown fields (chat name, type, etc.) are ignored; only the parts the
/// analysis touches are modeled.
#[derive(Debug, Deserialize)]
pub struct ChatExport {
    pub messages: Vec<Message>,
}

/// One message from the export.
///
/// `id` and `from` are optional at deserialization time because exports contain
/// service entries without them; operations that need those fields demand them
/// lazily and fail with `MissingField` otherwise.
#[derive(Debug, Deserialize)]
pub struct Message {
    pub id: Option<i64>,
    pub from: Option<String>,
    #[serde(default)]
    pub text: MessageText,
    pub reply_to_message_id: Option<i64>,
}

/// Message text as exported: either one flat string, or a sequence of segments
/// where formatted spans appear as objects carrying a `text` key.
///
/// Segments are kept as raw JSON values so a malformed segment degrades to
/// "contributes nothing" during flattening instead of failing the whole load.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageText {
    Plain(String),
    Segments(Vec<Value>),
}

impl Default for MessageText {
    fn default() -> Self {
        MessageText::Plain(String::new())
    }
}

impl Message {
    /// Flattens the text field in place and returns the flat string.
    ///
    /// A plain string passes through unchanged. A segment sequence is replaced
    /// by the in-order concatenation of every string segment and every
    /// string-valued `text` key of an object segment; any other segment
    /// contributes nothing. Idempotent, so repeated inspection is cheap.
    pub fn flatten_text(&mut self) -> &str {
        if let MessageText::Segments(segments) = &self.text {
            self.text = MessageText::Plain(flatten_segments(segments));
        }
        self.plain_text().unwrap_or("")
    }

    /// The text as a flat string, or `None` while it is still segmented.
    pub fn plain_text(&self) -> Option<&str> {
        match &self.text {
            MessageText::Plain(s) => Some(s),
            MessageText::Segments(_) => None,
        }
    }
}

fn flatten_segments(segments: &[Value]) -> String {
    let mut flat = String::new();
    for segment in segments {
        match segment {
            Value::String(s) => flat.push_str(s),
            Value::Object(span) => {
                if let Some(Value::String(s)) = span.get("text") {
                    flat.push_str(s);
                }
            }
            _ => {}
        }
    }
    flat
}
