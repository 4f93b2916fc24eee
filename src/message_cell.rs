use crate::message::{ChatMessage, ImageAttachment, ImageConfig};
use crate::styles::{TIME_TEXT_COLOR, TIME_TEXT_SIZE, bubble_style, reaction_badge_style};
use crate::theme::ThemeConfiguration;
use crate::widgets::bounds_sensor::bounds_sensor;
use chrono::{DateTime, Local};
use iced::advanced::text::Shaping::Advanced;
use iced::widget::{Column, Container, Row, Space, image, mouse_area, text};
use iced::{Bottom, Color, Element, Fill, Left, Padding, Rectangle, Right};

/// Which screen edge a bubble hugs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Side {
    /// Counterpart messages sit against the leading (left) edge
    #[default]
    Leading,
    /// The user's own messages sit against the trailing (right) edge
    Trailing,
}

impl Side {
    pub fn from_sender(is_user: bool) -> Self {
        if is_user { Side::Trailing } else { Side::Leading }
    }
}

/// The read-receipt affordance on a sent message, derived from how far the
/// counterpart has read into it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadReceipt {
    #[default]
    Hidden,
    Partial,
    Full,
}

impl ReadReceipt {
    /// Derive the receipt state from `(read_progress, text_len, is_user)`.
    /// Receipts only ever show on the user's own sent messages. Negative
    /// progress is clamped to "nothing read".
    pub fn from_progress(read_progress: f32, text_len: usize, is_user: bool) -> Self {
        if !is_user {
            return ReadReceipt::Hidden;
        }

        let progress = read_progress.max(0.0);
        if progress <= 0.0 {
            ReadReceipt::Hidden
        } else if progress < text_len as f32 {
            ReadReceipt::Partial
        } else {
            ReadReceipt::Full
        }
    }

    pub fn glyph(&self) -> Option<&'static str> {
        match self {
            ReadReceipt::Hidden => None,
            ReadReceipt::Partial => Some("✓"),
            ReadReceipt::Full => Some("✓✓"),
        }
    }
}

/// Everything a [MessageCell] needs to render one text message
#[derive(Debug, Clone, PartialEq)]
pub struct MessageConfig {
    pub text: String,
    pub is_user: bool,
    /// Sent by the same sender as the previous message, so collapse top spacing
    pub same_as_previous: bool,
    /// How many characters of the message the recipient has read
    pub read_progress: f32,
    pub gradient_start: Color,
    pub gradient_end: Color,
    pub reaction: Option<String>,
    pub accent: Color,
}

impl MessageConfig {
    /// Build the cell configuration for one message under the given theme
    pub fn for_message(message: &ChatMessage, theme: &ThemeConfiguration) -> Self {
        Self {
            text: message.text().to_string(),
            is_user: message.is_user(),
            same_as_previous: false,
            read_progress: message.read_progress(),
            gradient_start: theme.start,
            gradient_end: theme.end,
            reaction: message.reaction().cloned(),
            accent: theme.accent(),
        }
    }

    pub fn grouped(mut self, same_as_previous: bool) -> Self {
        self.same_as_previous = same_as_previous;
        self
    }
}

/// The render inputs captured from a bubble at long-press time, enough to draw
/// an identical static copy of it inside the context-menu overlay
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleSnapshot {
    pub text: String,
    pub is_user: bool,
    pub gradient_start: Color,
    pub gradient_end: Color,
}

impl BubbleSnapshot {
    pub fn capture(message: &ChatMessage, theme: &ThemeConfiguration) -> Self {
        Self {
            text: message.text().to_string(),
            is_user: message.is_user(),
            gradient_start: theme.start,
            gradient_end: theme.end,
        }
    }

    /// Render the captured bubble. Static content, no interactions.
    pub fn view<'a, M: 'a>(&self) -> Element<'a, M> {
        let (start, end, is_user) = (self.gradient_start, self.gradient_end, self.is_user);
        Container::new(
            text(self.text.clone())
                .color(Color::WHITE)
                .size(16)
                .shaping(Advanced),
        )
        .padding([8, 12])
        .style(move |_theme| bubble_style(start, end, is_user))
        .into()
    }
}

/// Raw interactions reported by a [MessageCell] view. The chat view combines
/// these with press timing and tracked bounds into [CellEvent]s.
#[derive(Debug, Clone)]
pub enum CellMessage {
    BubblePressed,
    BubbleReleased,
    BubbleBounds(Rectangle),
    ImagePressed(usize),
    ImageBounds(usize, Rectangle),
}

/// The events a configured cell fires at its host
#[derive(Debug, Clone)]
pub enum CellEvent {
    /// An image in the stack was tapped, with its frame in window coordinates
    ImageTapped { index: usize, frame: Rectangle },
    /// The bubble was long-pressed; carries what the context menu needs
    LongPressed {
        snapshot: BubbleSnapshot,
        frame: Rectangle,
        text: String,
        is_user: bool,
    },
}

/// One reusable message bubble: text or images, sender-aligned gradient,
/// read receipt and reaction badge.
///
/// The cell follows a reset-then-configure contract: every (re)use starts
/// from [MessageCell::reset] state and is fully determined by the arguments
/// of the configure calls, so reconfiguring can never leak prior state.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageCell {
    text: String,
    side: Side,
    grouped: bool,
    read_receipt: ReadReceipt,
    reaction: Option<String>,
    gradient_start: Color,
    gradient_end: Color,
    accent: Color,
    images: Vec<ImageAttachment>,
    timestamp: Option<DateTime<Local>>,
}

impl Default for MessageCell {
    fn default() -> Self {
        Self {
            text: String::new(),
            side: Side::default(),
            grouped: false,
            read_receipt: ReadReceipt::default(),
            reaction: None,
            gradient_start: Color::BLACK,
            gradient_end: Color::BLACK,
            accent: Color::WHITE,
            images: Vec::new(),
            timestamp: None,
        }
    }
}

impl MessageCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cell to its pristine state, independent of any host
    /// recycling mechanism
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Configure the cell for a text message. Resets first, so repeated calls
    /// with identical arguments produce identical state.
    pub fn configure(&mut self, config: &MessageConfig) {
        self.reset();
        self.text = config.text.clone();
        self.side = Side::from_sender(config.is_user);
        self.grouped = config.same_as_previous;
        self.read_receipt =
            ReadReceipt::from_progress(config.read_progress, self.text_len(), config.is_user);
        self.reaction = config.reaction.clone().filter(|emoji| !emoji.is_empty());
        self.gradient_start = config.gradient_start;
        self.gradient_end = config.gradient_end;
        self.accent = config.accent;
    }

    /// Attach or clear the image payload. With `Some`, the image stack takes
    /// the place of the text label; with `None` the cell reverts to text-only.
    pub fn configure_image(&mut self, image: Option<&ImageConfig>) {
        match image {
            Some(config) => self.images = config.images.clone(),
            None => self.images.clear(),
        }
    }

    /// Record when the message was sent so the bubble can show a time
    pub fn configure_time(&mut self, timestamp: DateTime<Local>) {
        self.timestamp = Some(timestamp);
    }

    /// Update only the read-receipt indicator, leaving the rest of the cell
    /// untouched
    pub fn update_read_receipt(&mut self, read_progress: f32, is_user: bool) {
        self.read_receipt = ReadReceipt::from_progress(read_progress, self.text_len(), is_user);
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn read_receipt(&self) -> ReadReceipt {
        self.read_receipt
    }

    pub fn reaction(&self) -> Option<&String> {
        self.reaction.as_ref()
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Build the cell's element tree. Interactions surface as [CellMessage]s
    /// for the host to interpret. The tree owns its content so hosts can
    /// build cells transiently while laying out a message list.
    pub fn view(&self) -> Element<'static, CellMessage> {
        let content: Element<'static, CellMessage> = if self.images.is_empty() {
            text(self.text.clone())
                .color(Color::WHITE)
                .size(16)
                .shaping(Advanced)
                .into()
        } else {
            self.image_stack()
        };

        // Sent time and the read receipt tick marks along the bubble's bottom edge
        let mut footer_row = Row::new().align_y(Bottom).push(content);
        if let Some(timestamp) = &self.timestamp {
            footer_row = footer_row.push(Space::new().width(8)).push(
                text(timestamp.format("%H:%M").to_string())
                    .color(TIME_TEXT_COLOR)
                    .size(TIME_TEXT_SIZE),
            );
        }
        if let Some(glyph) = self.read_receipt.glyph() {
            footer_row = footer_row
                .push(Space::new().width(4))
                .push(text(glyph).size(12).color(self.accent));
        }

        let (start, end) = (self.gradient_start, self.gradient_end);
        let is_user = self.side == Side::Trailing;
        let bubble = Container::new(footer_row)
            .padding([8, 12])
            .style(move |_theme| bubble_style(start, end, is_user));

        // Wrap the bubble in a sensor so the host learns its frame in window
        // coordinates, then watch for presses over the whole of it
        let tracked_bubble = mouse_area(bounds_sensor(bubble, CellMessage::BubbleBounds))
            .on_press(CellMessage::BubblePressed)
            .on_release(CellMessage::BubbleReleased);

        // Collapse the top spacing when this message is grouped with the
        // previous one from the same sender
        let top_padding = if self.grouped { 1.0 } else { 6.0 };
        let mut message_row = Row::new().padding(Padding {
            top: top_padding,
            right: 6.0,
            bottom: if self.reaction.is_some() { 0.0 } else { 6.0 },
            left: 6.0,
        });

        // Keep wide bubbles from spanning the full view width
        let mut message_column = Column::new().width(Fill);
        match self.side {
            Side::Trailing => {
                message_row = message_row
                    .push(Space::new().width(100.0))
                    .push(tracked_bubble);
                message_column = message_column.align_x(Right).push(message_row);
            }
            Side::Leading => {
                message_row = message_row
                    .push(tracked_bubble)
                    .push(Space::new().width(100.0));
                message_column = message_column.align_x(Left).push(message_row);
            }
        }

        // The reaction badge butts up under the bubble, on the bubble's side
        if let Some(reaction) = &self.reaction {
            let accent = self.accent;
            let badge = Container::new(text(reaction.clone()).size(14).shaping(Advanced))
                .padding([2, 8])
                .style(move |_theme| {
                    let mut style = reaction_badge_style(true);
                    style.border.color = accent;
                    style
                });

            let badge_row = Row::new()
                .padding(Padding {
                    top: -6.0,
                    right: 18.0,
                    bottom: 6.0,
                    left: 18.0,
                })
                .push(badge);
            message_column = message_column.push(badge_row);
        }

        message_column.into()
    }

    /// One or more attached images arranged vertically, each tappable and
    /// tracked for its frame
    fn image_stack(&self) -> Element<'static, CellMessage> {
        let mut image_column = Column::new().spacing(4);

        for (index, attachment) in self.images.iter().enumerate() {
            let handle = image::Handle::from_path(&attachment.path);
            image_column = image_column.push(
                mouse_area(bounds_sensor(image(handle).width(220), move |bounds| {
                    CellMessage::ImageBounds(index, bounds)
                }))
                .on_press(CellMessage::ImagePressed(index)),
            );
        }

        image_column.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_config() -> MessageConfig {
        MessageConfig {
            text: "hello there".to_string(),
            is_user: true,
            same_as_previous: false,
            read_progress: 0.0,
            gradient_start: Color::from_rgb(1.0, 0.5, 0.5),
            gradient_end: Color::from_rgb(1.0, 0.4, 0.5),
            reaction: None,
            accent: Color::WHITE,
        }
    }

    #[test]
    fn test_receipt_hidden_at_zero_progress() {
        assert_eq!(
            ReadReceipt::from_progress(0.0, 10, true),
            ReadReceipt::Hidden
        );
    }

    #[test]
    fn test_receipt_hidden_for_counterpart_messages() {
        assert_eq!(
            ReadReceipt::from_progress(10.0, 10, false),
            ReadReceipt::Hidden
        );
    }

    #[test]
    fn test_receipt_partial_mid_message() {
        assert_eq!(
            ReadReceipt::from_progress(3.0, 10, true),
            ReadReceipt::Partial
        );
    }

    #[test]
    fn test_receipt_full_at_message_length() {
        assert_eq!(ReadReceipt::from_progress(2.0, 2, true), ReadReceipt::Full);
    }

    #[test]
    fn test_receipt_full_beyond_message_length() {
        assert_eq!(ReadReceipt::from_progress(99.0, 2, true), ReadReceipt::Full);
    }

    #[test]
    fn test_receipt_negative_progress_clamps_to_hidden() {
        assert_eq!(
            ReadReceipt::from_progress(-5.0, 10, true),
            ReadReceipt::Hidden
        );
    }

    #[test]
    fn test_receipt_glyphs() {
        assert_eq!(ReadReceipt::Hidden.glyph(), None);
        assert_eq!(ReadReceipt::Partial.glyph(), Some("✓"));
        assert_eq!(ReadReceipt::Full.glyph(), Some("✓✓"));
    }

    #[test]
    fn test_configure_is_idempotent() {
        let config = test_config();
        let mut once = MessageCell::new();
        once.configure(&config);

        let mut twice = MessageCell::new();
        twice.configure(&config);
        twice.configure(&config);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_sender_alignment_flips() {
        let mut cell = MessageCell::new();
        cell.configure(&test_config());
        assert_eq!(cell.side(), Side::Trailing);

        cell.configure(&MessageConfig {
            is_user: false,
            ..test_config()
        });
        assert_eq!(cell.side(), Side::Leading);
    }

    #[test]
    fn test_reuse_leaves_no_image_content() {
        let mut cell = MessageCell::new();
        cell.configure(&test_config());
        cell.configure_image(Some(&ImageConfig::single(PathBuf::from("/tmp/a.jpg"))));
        assert!(cell.has_images());

        // Recycled for another message with no image payload
        cell.configure(&test_config());
        cell.configure_image(None);
        assert!(!cell.has_images());
    }

    #[test]
    fn test_configure_alone_clears_prior_images() {
        let mut cell = MessageCell::new();
        cell.configure(&test_config());
        cell.configure_image(Some(&ImageConfig::single(PathBuf::from("/tmp/a.jpg"))));

        cell.configure(&test_config());
        assert!(!cell.has_images());
    }

    #[test]
    fn test_empty_reaction_hides_badge() {
        let mut cell = MessageCell::new();
        cell.configure(&MessageConfig {
            reaction: Some(String::new()),
            ..test_config()
        });
        assert!(cell.reaction().is_none());

        cell.configure(&MessageConfig {
            reaction: Some("😂".to_string()),
            ..test_config()
        });
        assert_eq!(cell.reaction(), Some(&"😂".to_string()));
    }

    #[test]
    fn test_update_read_receipt_standalone() {
        let mut cell = MessageCell::new();
        cell.configure(&MessageConfig {
            text: "hi".to_string(),
            ..test_config()
        });
        assert_eq!(cell.read_receipt(), ReadReceipt::Hidden);

        cell.update_read_receipt(2.0, true);
        assert_eq!(cell.read_receipt(), ReadReceipt::Full);

        cell.update_read_receipt(1.0, true);
        assert_eq!(cell.read_receipt(), ReadReceipt::Partial);
    }

    #[test]
    fn test_update_read_receipt_ignores_counterpart() {
        let mut cell = MessageCell::new();
        cell.configure(&MessageConfig {
            text: "hi".to_string(),
            is_user: false,
            ..test_config()
        });
        cell.update_read_receipt(2.0, false);
        assert_eq!(cell.read_receipt(), ReadReceipt::Hidden);
    }

    #[test]
    fn test_grouping_collapses_top_spacing() {
        let mut cell = MessageCell::new();
        cell.configure(&test_config().grouped(true));
        assert!(cell.is_grouped());
    }

    #[test]
    fn test_snapshot_captures_render_inputs() {
        let message = ChatMessage::new("Hello", false);
        let theme = ThemeConfiguration::default();
        let snapshot = BubbleSnapshot::capture(&message, &theme);
        assert_eq!(snapshot.text, "Hello");
        assert!(!snapshot.is_user);
        assert_eq!(snapshot.gradient_start, theme.start);
        assert_eq!(snapshot.gradient_end, theme.end);
    }
}
