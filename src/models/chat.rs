use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Sent,
    Received,
}

/// One chat bubble as handed to the chat store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    /// Local wall-clock time, `HH:MM`
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
}

impl ChatMessage {
    pub fn sent_text<C: Into<String>, T: Into<String>>(content: C, time: T) -> Self {
        Self {
            kind: MessageKind::Sent,
            content: content.into(),
            time: time.into(),
            image_urls: None,
        }
    }

    pub fn sent_pictograms<C: Into<String>, T: Into<String>>(
        content: C,
        time: T,
        image_urls: Vec<String>,
    ) -> Self {
        Self {
            kind: MessageKind::Sent,
            content: content.into(),
            time: time.into(),
            image_urls: Some(image_urls),
        }
    }

    pub fn pictogram_count(&self) -> usize {
        self.image_urls.as_ref().map_or(0, Vec::len)
    }
}
