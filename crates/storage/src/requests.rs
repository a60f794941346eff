#![forbid(unsafe_code)]

#[derive(Clone, Debug, PartialEq)]
pub struct TabCreateRequest {
    pub title: String,
    pub kind: String,
    pub payload: Option<serde_json::Value>,
    /// Tab to insert after; `None` makes the new tab the head.
    pub after_id: Option<String>,
}

/// Partial update. `payload` uses the outer `Option` for "leave unchanged"
/// and the inner one for "replace" vs "clear"; payloads are replaced whole,
/// never merged field by field.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TabEditRequest {
    pub title: Option<String>,
    pub payload: Option<Option<serde_json::Value>>,
}
