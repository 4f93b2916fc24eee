use crate::emoji_picker::{EmojiPicker, PickerMessage};
use crate::message_cell::BubbleSnapshot;
use crate::styles::{favorite_emoji_style, overlay_action_style, overlay_card_style};
use emojis::Emoji;
use iced::widget::text::Shaping::Advanced;
use iced::widget::{Column, Container, Row, Space, button, text};
use iced::{Element, Fill, Rectangle};
use uuid::Uuid;

/// Everything captured at long-press time that the overlay needs to present
/// itself for one message
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayInvocation {
    pub message_uuid: Uuid,
    pub snapshot: BubbleSnapshot,
    /// The pressed bubble's frame in window coordinates
    pub frame: Rectangle,
    pub text: String,
    pub is_user: bool,
}

/// Interactions inside the overlay, routed back by the host
#[derive(Debug, Clone)]
pub enum OverlayMessage {
    CopyPressed,
    ReplyPressed,
    FavoritePressed(usize),
    OpenPicker,
    EmojiPicked(&'static Emoji),
    Picker(PickerMessage),
    ScrimPressed,
}

impl From<PickerMessage> for OverlayMessage {
    fn from(message: PickerMessage) -> Self {
        OverlayMessage::Picker(message)
    }
}

/// What the overlay asks its host to do. Every action that closes the menu
/// also emits the un-hide event for the original bubble, in order, so hosts
/// can apply the events sequentially.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    /// Hide or restore the live bubble under the overlay's static copy
    ToggleOriginalBubble { uuid: Uuid, hidden: bool },
    CopyText(String),
    ReplyTo(Uuid),
    React { uuid: Uuid, emoji: String },
}

#[derive(Debug)]
enum OverlayState {
    Hidden,
    Shown {
        invocation: OverlayInvocation,
        picker_open: bool,
    },
}

/// The long-press context menu: a dimmed scrim with a static copy of the
/// pressed bubble, a row of favorite reactions, and copy/reply actions.
///
/// Only ever hidden or shown for exactly one message. Showing while already
/// shown replaces the presented message; dismissing while hidden is a no-op.
#[derive(Debug)]
pub struct ContextMenuOverlay {
    state: OverlayState,
    favorite_emojis: Vec<String>,
    picker: EmojiPicker,
}

impl Default for ContextMenuOverlay {
    fn default() -> Self {
        Self {
            state: OverlayState::Hidden,
            favorite_emojis: ["❤️", "👍", "😂", "🔥", "🙏"]
                .map(str::to_string)
                .to_vec(),
            picker: EmojiPicker::new(),
        }
    }
}

impl ContextMenuOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the favorites row. Display order follows this list exactly.
    pub fn set_favorite_emojis(&mut self, favorites: Vec<String>) {
        self.favorite_emojis = favorites;
    }

    pub fn favorite_emojis(&self) -> &[String] {
        &self.favorite_emojis
    }

    pub fn is_shown(&self) -> bool {
        matches!(self.state, OverlayState::Shown { .. })
    }

    /// The message the overlay is currently presenting, if any
    pub fn shown_uuid(&self) -> Option<Uuid> {
        match &self.state {
            OverlayState::Shown { invocation, .. } => Some(invocation.message_uuid),
            OverlayState::Hidden => None,
        }
    }

    /// Present the menu for a long-pressed message. If the menu is already
    /// up for another message, that one is restored first.
    pub fn show(&mut self, invocation: OverlayInvocation) -> Vec<OverlayEvent> {
        let mut events = Vec::new();
        if let Some(previous) = self.shown_uuid()
            && previous != invocation.message_uuid
        {
            events.push(OverlayEvent::ToggleOriginalBubble {
                uuid: previous,
                hidden: false,
            });
        }

        events.push(OverlayEvent::ToggleOriginalBubble {
            uuid: invocation.message_uuid,
            hidden: true,
        });
        self.state = OverlayState::Shown {
            invocation,
            picker_open: false,
        };
        events
    }

    /// Close the menu and restore the original bubble. Does nothing when the
    /// menu is not up.
    pub fn dismiss(&mut self) -> Vec<OverlayEvent> {
        match std::mem::replace(&mut self.state, OverlayState::Hidden) {
            OverlayState::Shown { invocation, .. } => vec![OverlayEvent::ToggleOriginalBubble {
                uuid: invocation.message_uuid,
                hidden: false,
            }],
            OverlayState::Hidden => Vec::new(),
        }
    }

    /// Process an interaction. Actions that resolve the menu close it as a
    /// side effect; opening the inline picker keeps it up.
    pub fn update(&mut self, message: OverlayMessage) -> Vec<OverlayEvent> {
        let (uuid, text) = match &self.state {
            OverlayState::Shown { invocation, .. } => {
                (invocation.message_uuid, invocation.text.clone())
            }
            OverlayState::Hidden => return Vec::new(),
        };

        match message {
            OverlayMessage::CopyPressed => {
                let mut events = vec![OverlayEvent::CopyText(text)];
                events.extend(self.dismiss());
                events
            }
            OverlayMessage::ReplyPressed => {
                let mut events = vec![OverlayEvent::ReplyTo(uuid)];
                events.extend(self.dismiss());
                events
            }
            OverlayMessage::FavoritePressed(index) => {
                match self.favorite_emojis.get(index).cloned() {
                    Some(emoji) => {
                        let mut events = vec![OverlayEvent::React { uuid, emoji }];
                        events.extend(self.dismiss());
                        events
                    }
                    None => Vec::new(),
                }
            }
            OverlayMessage::OpenPicker => {
                if let OverlayState::Shown { picker_open, .. } = &mut self.state {
                    *picker_open = true;
                }
                Vec::new()
            }
            OverlayMessage::EmojiPicked(emoji) => {
                let mut events = vec![OverlayEvent::React {
                    uuid,
                    emoji: emoji.to_string(),
                }];
                events.extend(self.dismiss());
                events
            }
            OverlayMessage::Picker(picker_message) => {
                self.picker.update(picker_message);
                Vec::new()
            }
            OverlayMessage::ScrimPressed => self.dismiss(),
        }
    }

    /// The overlay card, or `None` while hidden. The host layers it over the
    /// chat with its scrim and routes [OverlayMessage]s back here.
    pub fn view(&self, dark: bool) -> Option<Element<'_, OverlayMessage>> {
        let (invocation, picker_open) = match &self.state {
            OverlayState::Shown {
                invocation,
                picker_open,
            } => (invocation, *picker_open),
            OverlayState::Hidden => return None,
        };

        let mut card = Column::new().spacing(10);

        // A copy of the pressed bubble heads the card, at its original width
        // and hugging the same edge it did in the conversation
        let mut bubble_copy = Container::new(invocation.snapshot.view::<OverlayMessage>());
        if invocation.frame.width > 0.0 {
            bubble_copy = bubble_copy.width(invocation.frame.width);
        }
        let copy_row = if invocation.is_user {
            Row::new()
                .width(Fill)
                .push(Space::new().width(Fill))
                .push(bubble_copy)
        } else {
            Row::new()
                .width(Fill)
                .push(bubble_copy)
                .push(Space::new().width(Fill))
        };
        card = card.push(copy_row);

        if picker_open {
            card = card.push(self.picker.view(OverlayMessage::EmojiPicked));
        } else {
            let mut favorites = Row::new().spacing(4);
            for (index, emoji) in self.favorite_emojis.iter().enumerate() {
                favorites = favorites.push(
                    button(text(emoji.clone()).size(22).shaping(Advanced))
                        .style(move |_theme, status| favorite_emoji_style(dark, status))
                        .on_press(OverlayMessage::FavoritePressed(index)),
                );
            }
            favorites = favorites.push(Space::new().width(4)).push(
                button(text("+").size(22))
                    .style(move |_theme, status| favorite_emoji_style(dark, status))
                    .on_press(OverlayMessage::OpenPicker),
            );
            card = card.push(favorites);

            let mut actions = Column::new().spacing(2);
            if !invocation.text.is_empty() {
                actions = actions.push(
                    button(text("Copy"))
                        .width(180)
                        .style(move |_theme, status| overlay_action_style(dark, status))
                        .on_press(OverlayMessage::CopyPressed),
                );
            }
            actions = actions.push(
                button(text("Reply"))
                    .width(180)
                    .style(move |_theme, status| overlay_action_style(dark, status))
                    .on_press(OverlayMessage::ReplyPressed),
            );
            card = card.push(actions);
        }

        Some(
            Container::new(card)
                .padding(12)
                .style(move |_theme| overlay_card_style(dark))
                .into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::{Color, Point, Size};

    fn test_invocation(uuid: Uuid, text: &str) -> OverlayInvocation {
        OverlayInvocation {
            message_uuid: uuid,
            snapshot: BubbleSnapshot {
                text: text.to_string(),
                is_user: true,
                gradient_start: Color::from_rgb(1.0, 0.5, 0.5),
                gradient_end: Color::from_rgb(1.0, 0.4, 0.5),
            },
            frame: Rectangle::new(Point::new(40.0, 200.0), Size::new(180.0, 44.0)),
            text: text.to_string(),
            is_user: true,
        }
    }

    #[test]
    fn test_starts_hidden() {
        let overlay = ContextMenuOverlay::new();
        assert!(!overlay.is_shown());
        assert_eq!(overlay.shown_uuid(), None);
    }

    #[test]
    fn test_show_hides_original_bubble() {
        let mut overlay = ContextMenuOverlay::new();
        let uuid = Uuid::new_v4();
        let events = overlay.show(test_invocation(uuid, "hello"));
        assert_eq!(
            events,
            vec![OverlayEvent::ToggleOriginalBubble { uuid, hidden: true }]
        );
        assert!(overlay.is_shown());
    }

    #[test]
    fn test_show_replaces_current_presentation() {
        let mut overlay = ContextMenuOverlay::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        overlay.show(test_invocation(first, "one"));

        let events = overlay.show(test_invocation(second, "two"));
        assert_eq!(
            events,
            vec![
                OverlayEvent::ToggleOriginalBubble {
                    uuid: first,
                    hidden: false
                },
                OverlayEvent::ToggleOriginalBubble {
                    uuid: second,
                    hidden: true
                },
            ]
        );
        assert_eq!(overlay.shown_uuid(), Some(second));
    }

    #[test]
    fn test_reshow_same_message_does_not_restore_it() {
        let mut overlay = ContextMenuOverlay::new();
        let uuid = Uuid::new_v4();
        overlay.show(test_invocation(uuid, "hello"));
        let events = overlay.show(test_invocation(uuid, "hello"));
        assert_eq!(
            events,
            vec![OverlayEvent::ToggleOriginalBubble { uuid, hidden: true }]
        );
    }

    #[test]
    fn test_dismiss_restores_bubble() {
        let mut overlay = ContextMenuOverlay::new();
        let uuid = Uuid::new_v4();
        overlay.show(test_invocation(uuid, "hello"));

        let events = overlay.dismiss();
        assert_eq!(
            events,
            vec![OverlayEvent::ToggleOriginalBubble {
                uuid,
                hidden: false
            }]
        );
        assert!(!overlay.is_shown());
    }

    #[test]
    fn test_dismiss_while_hidden_is_noop() {
        let mut overlay = ContextMenuOverlay::new();
        assert!(overlay.dismiss().is_empty());
        assert!(!overlay.is_shown());
    }

    #[test]
    fn test_copy_emits_text_then_closes() {
        let mut overlay = ContextMenuOverlay::new();
        let uuid = Uuid::new_v4();
        overlay.show(test_invocation(uuid, "copy me"));

        let events = overlay.update(OverlayMessage::CopyPressed);
        assert_eq!(
            events,
            vec![
                OverlayEvent::CopyText("copy me".to_string()),
                OverlayEvent::ToggleOriginalBubble {
                    uuid,
                    hidden: false
                },
            ]
        );
        assert!(!overlay.is_shown());
    }

    #[test]
    fn test_reply_closes_the_menu() {
        let mut overlay = ContextMenuOverlay::new();
        let uuid = Uuid::new_v4();
        overlay.show(test_invocation(uuid, "hello"));

        let events = overlay.update(OverlayMessage::ReplyPressed);
        assert_eq!(events[0], OverlayEvent::ReplyTo(uuid));
        assert!(!overlay.is_shown());
    }

    #[test]
    fn test_favorite_reaction_closes_the_menu() {
        let mut overlay = ContextMenuOverlay::new();
        overlay.set_favorite_emojis(vec!["🎈".to_string(), "🎃".to_string()]);
        let uuid = Uuid::new_v4();
        overlay.show(test_invocation(uuid, "hello"));

        let events = overlay.update(OverlayMessage::FavoritePressed(1));
        assert_eq!(
            events[0],
            OverlayEvent::React {
                uuid,
                emoji: "🎃".to_string()
            }
        );
        assert!(!overlay.is_shown());
    }

    #[test]
    fn test_out_of_range_favorite_is_ignored() {
        let mut overlay = ContextMenuOverlay::new();
        let uuid = Uuid::new_v4();
        overlay.show(test_invocation(uuid, "hello"));

        let events = overlay.update(OverlayMessage::FavoritePressed(99));
        assert!(events.is_empty());
        assert!(overlay.is_shown());
    }

    #[test]
    fn test_opening_picker_keeps_the_menu_up() {
        let mut overlay = ContextMenuOverlay::new();
        let uuid = Uuid::new_v4();
        overlay.show(test_invocation(uuid, "hello"));

        let events = overlay.update(OverlayMessage::OpenPicker);
        assert!(events.is_empty());
        assert!(overlay.is_shown());
    }

    #[test]
    fn test_favorites_keep_configured_order() {
        let mut overlay = ContextMenuOverlay::new();
        let favorites = vec!["🥇".to_string(), "🥈".to_string(), "🥉".to_string()];
        overlay.set_favorite_emojis(favorites.clone());
        assert_eq!(overlay.favorite_emojis(), favorites.as_slice());
    }

    #[test]
    fn test_interactions_while_hidden_do_nothing() {
        let mut overlay = ContextMenuOverlay::new();
        assert!(overlay.update(OverlayMessage::CopyPressed).is_empty());
        assert!(overlay.update(OverlayMessage::FavoritePressed(0)).is_empty());
    }
}
