use crate::Message;
use crate::chat_view::ChatViewMessage::{
    CancelReply, Cell, ClearInput, DismissOverlay, Input, Overlay, Send,
};
use crate::context_menu::{ContextMenuOverlay, OverlayEvent, OverlayInvocation, OverlayMessage};
use crate::message::{ChatMessage, ImageConfig};
use crate::message_cell::{BubbleSnapshot, CellEvent, CellMessage, MessageCell, MessageConfig};
use crate::styles::{
    DAY_SEPARATOR_STYLE, button_chip_style, reply_to_style, scrollbar_style, text_input_style,
};
use crate::theme::ThemeConfiguration;
use crate::typing_indicator::TypingIndicatorCell;
use chrono::{DateTime, Datelike, Local};
use iced::font::Style::Italic;
use iced::padding::right;
use iced::widget::operation::RelativeOffset;
use iced::widget::scrollable::Scrollbar;
use iced::widget::{
    Button, Column, Container, Id, Row, Space, button, container, operation, scrollable, text,
    text_input,
};
use iced::{Center, Element, Fill, Font, Padding, Rectangle, Task};
use ringmap::RingMap;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const MESSAGE_INPUT_ID: Id = Id::new("message_input");
const CHAT_VIEW_SCROLLABLE_ID: Id = Id::new("chat_view_scrollable");

/// How long a press must be held before it counts as a long press
const LONG_PRESS_THRESHOLD: Duration = Duration::from_millis(450);

#[derive(Debug, Clone)]
pub enum ChatViewMessage {
    Input(String),
    ClearInput,
    Send,
    CancelReply,
    /// Raw bubble and image interactions from one message's cell
    Cell(Uuid, CellMessage),
    Overlay(OverlayMessage),
    DismissOverlay,
}

/// [ChatView] implements view and update methods for Iced for an ordered
/// conversation of [ChatMessage]s, with a typing indicator, an input box,
/// and the long-press context menu over it all
pub struct ChatView {
    messages: RingMap<Uuid, ChatMessage>,
    input: String, // text message typed in so far
    theme: ThemeConfiguration,
    typing_indicator: TypingIndicatorCell,
    preparing_reply_to: Option<Uuid>,
    overlay: ContextMenuOverlay,
    /// While the context menu presents its static copy of a bubble, the live
    /// one collapses to a placeholder of the same size
    hidden_bubble: Option<Uuid>,
    /// Press start time, to tell a tap from a long press at release
    pressed: Option<(Uuid, Instant)>,
    bubble_frames: HashMap<Uuid, Rectangle>,
    image_frames: HashMap<(Uuid, usize), Rectangle>,
}

async fn empty() {}

impl ChatView {
    pub fn new(theme: ThemeConfiguration) -> Self {
        let mut typing_indicator = TypingIndicatorCell::new();
        typing_indicator.configure(false, theme.start, theme.end);

        Self {
            messages: RingMap::new(),
            input: String::new(),
            theme,
            typing_indicator,
            preparing_reply_to: None,
            overlay: ContextMenuOverlay::new(),
            hidden_bubble: None,
            pressed: None,
            bubble_frames: HashMap::new(),
            image_frames: HashMap::new(),
        }
    }

    /// Switch bubble gradients without touching the conversation
    pub fn set_theme(&mut self, theme: ThemeConfiguration) {
        self.theme = theme;
        let animating = self.typing_indicator.is_animating();
        self.typing_indicator.configure(false, theme.start, theme.end);
        if animating {
            self.typing_indicator.start_animation();
        }
    }

    pub fn set_favorite_emojis(&mut self, favorites: Vec<String>) {
        self.overlay.set_favorite_emojis(favorites);
    }

    pub fn message(&self, uuid: &Uuid) -> Option<&ChatMessage> {
        self.messages.get(uuid)
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.values().last()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Append a message to the end of the conversation. Scrolls to the end
    /// so the newest message is visible.
    pub fn push_message(&mut self, message: ChatMessage) -> Task<Message> {
        self.messages.insert(message.uuid(), message);
        operation::snap_to(CHAT_VIEW_SCROLLABLE_ID, RelativeOffset::END)
    }

    /// Show or hide the counterpart's typing bubble below the last message
    pub fn set_typing(&mut self, typing: bool) -> Task<Message> {
        if typing {
            self.typing_indicator.start_animation();
            operation::snap_to(CHAT_VIEW_SCROLLABLE_ID, RelativeOffset::END)
        } else {
            self.typing_indicator.stop_animation();
            Task::none()
        }
    }

    pub fn is_typing(&self) -> bool {
        self.typing_indicator.is_animating()
    }

    /// Record how far the counterpart has read into a sent message
    pub fn advance_read_progress(&mut self, uuid: &Uuid, read_progress: f32) {
        if let Some(message) = self.messages.get_mut(uuid) {
            message.advance_read_progress(read_progress);
        }
    }

    pub fn is_overlay_shown(&self) -> bool {
        self.overlay.is_shown()
    }

    /// Close the context menu, restoring the hidden bubble. Safe to call
    /// any time; does nothing when the menu is not up.
    pub fn dismiss_overlay(&mut self) -> Task<Message> {
        let events = self.overlay.dismiss();
        self.apply_overlay_events(events)
    }

    /// Cancel any interactive modes underway
    pub fn cancel_interactive(&mut self) -> Task<Message> {
        self.preparing_reply_to = None;
        self.dismiss_overlay()
    }

    /// Update the [ChatView] state based on a [ChatViewMessage]
    pub fn update(&mut self, chat_view_message: ChatViewMessage) -> Task<Message> {
        match chat_view_message {
            Input(s) => {
                if s.len() < 500 {
                    self.input = s;
                }
                Task::none()
            }
            ClearInput => {
                self.input = String::new();
                Task::none()
            }
            Send => {
                if self.input.is_empty() {
                    return Task::none();
                }
                // "image: <path>" sends the file at that path as a picture message
                let sent = match self.input.strip_prefix("image:") {
                    Some(path) => ChatMessage::new("", true)
                        .with_image(ImageConfig::single(PathBuf::from(path.trim()))),
                    None => ChatMessage::new(self.input.clone(), true),
                };
                self.input = String::new();
                self.preparing_reply_to = None;
                let uuid = sent.uuid();
                let scroll = self.push_message(sent);
                // the host drives read receipts and the counterpart's reply
                let announce = Task::perform(empty(), move |_| Message::Sent(uuid));
                Task::batch([scroll, announce])
            }
            CancelReply => {
                self.preparing_reply_to = None;
                Task::none()
            }
            Cell(uuid, cell_message) => self.cell_interaction(uuid, cell_message),
            Overlay(overlay_message) => {
                let events = self.overlay.update(overlay_message);
                self.apply_overlay_events(events)
            }
            DismissOverlay => self.dismiss_overlay(),
        }
    }

    /// Interpret a cell's raw interactions, synthesizing [CellEvent]s from
    /// press timing and the tracked frames
    fn cell_interaction(&mut self, uuid: Uuid, cell_message: CellMessage) -> Task<Message> {
        match cell_message {
            CellMessage::BubblePressed => {
                self.pressed = Some((uuid, Instant::now()));
                Task::none()
            }
            CellMessage::BubbleReleased => {
                let held_long_enough = matches!(
                    self.pressed.take(),
                    Some((pressed_uuid, at))
                        if pressed_uuid == uuid && at.elapsed() >= LONG_PRESS_THRESHOLD
                );
                if !held_long_enough {
                    return Task::none();
                }

                match self.messages.get(&uuid) {
                    Some(message) => {
                        let event = CellEvent::LongPressed {
                            snapshot: BubbleSnapshot::capture(message, &self.theme),
                            frame: self.bubble_frames.get(&uuid).copied().unwrap_or_default(),
                            text: message.text().to_string(),
                            is_user: message.is_user(),
                        };
                        self.cell_event(uuid, event)
                    }
                    None => Task::none(),
                }
            }
            CellMessage::BubbleBounds(bounds) => {
                self.bubble_frames.insert(uuid, bounds);
                Task::none()
            }
            CellMessage::ImagePressed(index) => {
                let event = CellEvent::ImageTapped {
                    index,
                    frame: self
                        .image_frames
                        .get(&(uuid, index))
                        .copied()
                        .unwrap_or_default(),
                };
                self.cell_event(uuid, event)
            }
            CellMessage::ImageBounds(index, bounds) => {
                self.image_frames.insert((uuid, index), bounds);
                Task::none()
            }
        }
    }

    fn cell_event(&mut self, uuid: Uuid, event: CellEvent) -> Task<Message> {
        match event {
            CellEvent::LongPressed {
                snapshot,
                frame,
                text,
                is_user,
            } => {
                let events = self.overlay.show(OverlayInvocation {
                    message_uuid: uuid,
                    snapshot,
                    frame,
                    text,
                    is_user,
                });
                self.apply_overlay_events(events)
            }
            CellEvent::ImageTapped { index, frame } => {
                Task::perform(empty(), move |_| Message::ImageTapped { uuid, index, frame })
            }
        }
    }

    /// Apply the overlay's requested actions in order
    fn apply_overlay_events(&mut self, events: Vec<OverlayEvent>) -> Task<Message> {
        let mut tasks = Vec::new();

        for event in events {
            match event {
                OverlayEvent::ToggleOriginalBubble { uuid, hidden } => {
                    if hidden {
                        self.hidden_bubble = Some(uuid);
                    } else if self.hidden_bubble == Some(uuid) {
                        self.hidden_bubble = None;
                    }
                }
                OverlayEvent::CopyText(copied) => {
                    tasks.push(iced::clipboard::write(copied.clone()));
                    tasks.push(Task::perform(empty(), move |_| {
                        Message::Copied(copied.clone())
                    }));
                }
                OverlayEvent::ReplyTo(uuid) => {
                    if self.messages.contains_key(&uuid) {
                        self.preparing_reply_to = Some(uuid);
                        tasks.push(operation::focus(MESSAGE_INPUT_ID));
                    }
                }
                OverlayEvent::React { uuid, emoji } => {
                    if let Some(message) = self.messages.get_mut(&uuid) {
                        message.set_reaction(emoji);
                    }
                }
            }
        }

        Task::batch(tasks)
    }

    /// Construct an Element that displays the whole chat view
    pub fn view(&self) -> Element<'_, Message> {
        let message_area: Element<'_, Message> = if self.messages.is_empty() {
            Self::empty_view()
        } else {
            let mut list = Column::new().padding(right(10));
            let mut previous_day = u32::MIN;
            let mut previous_sender: Option<bool> = None;

            for message in self.messages.values() {
                let message_day = message.time().day();

                // Add a day separator when the day of a message changes
                if message_day != previous_day {
                    list = list.push(Self::day_separator(&message.time()));
                    previous_day = message_day;
                    previous_sender = None;
                }

                let grouped = previous_sender == Some(message.is_user());
                previous_sender = Some(message.is_user());

                list = list.push(self.message_view(message, grouped));
            }

            if self.typing_indicator.is_animating() {
                list = list.push(self.typing_indicator.view());
            }

            scrollable(list)
                .direction({
                    let scrollbar = Scrollbar::new().width(10.0);
                    scrollable::Direction::Vertical(scrollbar)
                })
                .id(CHAT_VIEW_SCROLLABLE_ID)
                .style(scrollbar_style)
                .width(Fill)
                .height(Fill)
                .into()
        };

        let mut column = Column::new().padding(4).push(message_area);

        // If we are replying to a message, add a row with the original text
        if let Some(uuid) = &self.preparing_reply_to {
            column = self.replying_to(column, uuid);
        }

        // The context menu is layered above all of this by the host, so that
        // its scrim covers the whole window rather than just the chat area
        column.push(self.input_box()).into()
    }

    /// One message's cell, configured fresh each time it is laid out
    fn message_view(&self, message: &ChatMessage, grouped: bool) -> Element<'_, Message> {
        let uuid = message.uuid();

        if self.hidden_bubble == Some(uuid) {
            // Hold the bubble's place while the overlay presents its copy
            let height = self
                .bubble_frames
                .get(&uuid)
                .map(|frame| frame.height + 12.0)
                .unwrap_or(44.0);
            return Container::new(Space::new().height(height)).width(Fill).into();
        }

        let mut cell = MessageCell::new();
        cell.configure(&MessageConfig::for_message(message, &self.theme).grouped(grouped));
        cell.configure_image(message.image());
        cell.configure_time(message.time());

        cell.view()
            .map(move |cell_message| Message::Chat(Cell(uuid, cell_message)))
    }

    /// The context menu card, for the host to layer over the window.
    /// `None` while the menu is not up.
    pub fn overlay_view(&self, dark: bool) -> Option<Element<'_, Message>> {
        self.overlay
            .view(dark)
            .map(|card| card.map(|overlay_message| Message::Chat(Overlay(overlay_message))))
    }

    fn empty_view<'a>() -> Element<'a, Message> {
        Container::new(
            Column::new()
                .push(text("No messages yet.").align_x(Center).size(20))
                .push(
                    text("Use the text box at the bottom of the screen to say hello")
                        .align_x(Center)
                        .size(20),
                )
                .align_x(Center),
        )
        .padding(10)
        .width(Fill)
        .align_y(Center)
        .height(Fill)
        .align_x(Center)
        .into()
    }

    /// Add a row that explains we are replying to a prior message
    fn replying_to<'a>(&'a self, column: Column<'a, Message>, uuid: &Uuid) -> Column<'a, Message> {
        match self.messages.get(uuid) {
            Some(original) => {
                let quote = if original.text().is_empty() {
                    "(image)".to_string()
                } else {
                    format!("Replying to: {}", original.text())
                };

                let cancel_reply_button: Button<'_, Message> = button(text("⨂").size(16))
                    .on_press(Message::Chat(CancelReply))
                    .style(button_chip_style)
                    .padding(0);

                column.push(
                    container(
                        Row::new()
                            .align_y(Center)
                            .padding(2)
                            .push(Space::new().width(24))
                            .push(text(quote).font(Font {
                                style: Italic,
                                ..Default::default()
                            }))
                            .push(Space::new().width(8))
                            .push(cancel_reply_button),
                    )
                    .width(Fill)
                    .style(reply_to_style),
                )
            }
            None => column,
        }
    }

    /// Return an Element that displays a day separator
    /// If in the same week, then just the day name "Friday"
    /// If in a previous week, of the same year, then "Friday, Jul 8"
    /// If in a previous year, then "Friday, Jul 8, 2021"
    fn day_separator(datetime_local: &DateTime<Local>) -> Element<'static, Message> {
        let now_local = Local::now();

        let format_string = if datetime_local.iso_week() < now_local.iso_week() {
            if datetime_local.year() != now_local.year() {
                "%A, %b %e, %Y"
            } else {
                "%A, %b %e"
            }
        } else if datetime_local.day() == now_local.day() {
            "Today"
        } else {
            "%A"
        };

        Column::new()
            .push(
                Container::new(text(datetime_local.format(format_string).to_string()).size(16))
                    .align_x(Center)
                    .padding(Padding::from([6, 12]))
                    .style(|_| DAY_SEPARATOR_STYLE),
            )
            .width(Fill)
            .align_x(Center)
            .into()
    }

    fn send_button(&self) -> Button<'_, Message> {
        let mut send_button = button(text("Send").size(16))
            .style(button_chip_style)
            .padding(Padding::from([6, 6]));

        if !self.input.is_empty() {
            send_button = send_button.on_press(Message::Chat(Send));
        }

        send_button
    }

    fn clear_button(&self) -> Button<'_, Message> {
        let mut clear_button = button(text("⨂").size(18))
            .style(button_chip_style)
            .padding(Padding::from([6, 6]));
        if !self.input.is_empty() {
            clear_button = clear_button.on_press(Message::Chat(ClearInput));
        }

        clear_button
    }

    fn input_box(&self) -> Element<'_, Message> {
        container(
            Row::new()
                .push(Space::new().width(9.0))
                .push(
                    text_input("Type your message here", &self.input)
                        .style(text_input_style)
                        .padding([4, 4])
                        .id(MESSAGE_INPUT_ID)
                        .on_input(|s| Message::Chat(Input(s)))
                        .on_submit(Message::Chat(Send)),
                )
                .push(Space::new().width(4.0))
                .push(self.clear_button())
                .push(self.send_button())
                .push(Space::new().width(4.0))
                .align_y(Center),
        )
        .padding(Padding::from([4, 0]))
        .into()
    }
}
