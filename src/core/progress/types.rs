use serde::Serialize;

/// A single "is N% done with T" update, as served by the API.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub title: String,
    pub progress: u32,
    pub cover_image: String,
}

impl ProgressRecord {
    pub fn new(title: impl Into<String>, progress: u32, cover_image: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            progress,
            cover_image: cover_image.into(),
        }
    }
}
