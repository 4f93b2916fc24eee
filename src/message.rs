use chrono::{DateTime, Local};
use std::path::PathBuf;
use uuid::Uuid;

/// One image reference inside a message's image payload
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    pub path: PathBuf,
    pub filename: Option<String>,
}

/// The structured image payload attached to a message. When present, the
/// message bubble renders a stack of images instead of its text label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageConfig {
    pub images: Vec<ImageAttachment>,
}

impl ImageConfig {
    pub fn single(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string());
        Self {
            images: vec![ImageAttachment { path, filename }],
        }
    }
}

/// One message in a [crate::chat_view::ChatView], sent either by the user or
/// by the counterpart
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    uuid: Uuid,
    text: String,
    is_user: bool,
    /// How many characters of this message the counterpart has read so far
    read_progress: f32,
    reaction: Option<String>,
    image: Option<ImageConfig>,
    timestamp: DateTime<Local>,
}

impl ChatMessage {
    /// Create a new [ChatMessage] with a fresh uuid, timestamped now
    pub fn new(text: impl Into<String>, is_user: bool) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            text: text.into(),
            is_user,
            read_progress: 0.0,
            reaction: None,
            image: None,
            timestamp: Local::now(),
        }
    }

    pub fn with_image(mut self, image: ImageConfig) -> Self {
        self.image = Some(image);
        self
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The message length the read receipt thresholds are measured against
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_user(&self) -> bool {
        self.is_user
    }

    pub fn read_progress(&self) -> f32 {
        self.read_progress
    }

    /// Advance how far the counterpart has read into this message. Values
    /// never move backwards and are clamped to the message length.
    pub fn advance_read_progress(&mut self, read_progress: f32) {
        let clamped = read_progress.clamp(0.0, self.text_len() as f32);
        if clamped > self.read_progress {
            self.read_progress = clamped;
        }
    }

    pub fn reaction(&self) -> Option<&String> {
        self.reaction.as_ref()
    }

    /// Set or replace the single reaction on this message
    pub fn set_reaction(&mut self, emoji: impl Into<String>) {
        let emoji = emoji.into();
        if emoji.is_empty() {
            self.reaction = None;
        } else {
            self.reaction = Some(emoji);
        }
    }

    pub fn image(&self) -> Option<&ImageConfig> {
        self.image.as_ref()
    }

    pub fn time(&self) -> DateTime<Local> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_defaults() {
        let message = ChatMessage::new("hello", true);
        assert_eq!(message.text(), "hello");
        assert!(message.is_user());
        assert_eq!(message.read_progress(), 0.0);
        assert!(message.reaction().is_none());
        assert!(message.image().is_none());
    }

    #[test]
    fn test_text_len_counts_characters_not_bytes() {
        let message = ChatMessage::new("héllo", false);
        assert_eq!(message.text_len(), 5);
    }

    #[test]
    fn test_read_progress_clamps_to_length() {
        let mut message = ChatMessage::new("hi", true);
        message.advance_read_progress(10.0);
        assert_eq!(message.read_progress(), 2.0);
    }

    #[test]
    fn test_read_progress_clamps_negative_to_zero() {
        let mut message = ChatMessage::new("hi", true);
        message.advance_read_progress(-3.0);
        assert_eq!(message.read_progress(), 0.0);
    }

    #[test]
    fn test_read_progress_never_moves_backwards() {
        let mut message = ChatMessage::new("hello", true);
        message.advance_read_progress(4.0);
        message.advance_read_progress(1.0);
        assert_eq!(message.read_progress(), 4.0);
    }

    #[test]
    fn test_set_reaction_replaces_prior() {
        let mut message = ChatMessage::new("hello", false);
        message.set_reaction("👍");
        assert_eq!(message.reaction(), Some(&"👍".to_string()));
        message.set_reaction("❤️");
        assert_eq!(message.reaction(), Some(&"❤️".to_string()));
    }

    #[test]
    fn test_empty_reaction_clears() {
        let mut message = ChatMessage::new("hello", false);
        message.set_reaction("👍");
        message.set_reaction("");
        assert!(message.reaction().is_none());
    }

    #[test]
    fn test_single_image_config_captures_filename() {
        let config = ImageConfig::single(PathBuf::from("/tmp/photo.jpg"));
        assert_eq!(config.images.len(), 1);
        assert_eq!(config.images[0].filename, Some("photo.jpg".to_string()));
    }

    #[test]
    fn test_uuids_are_unique() {
        let first = ChatMessage::new("a", true);
        let second = ChatMessage::new("a", true);
        assert_ne!(first.uuid(), second.uuid());
    }
}
