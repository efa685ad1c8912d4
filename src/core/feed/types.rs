/// One `<item>` of the upstream feed, reduced to the fields the extractor reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content_encoded: Option<String>,
}

impl FeedItem {
    /// Body HTML used for cover lookup: `description` unless it is empty, then `content:encoded`.
    pub fn body_html(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|text| !text.is_empty())
            .or_else(|| self.content_encoded.as_deref().filter(|text| !text.is_empty()))
    }
}
