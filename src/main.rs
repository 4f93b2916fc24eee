//! AurenChat is an iced GUI chat app with gradient message bubbles, typing
//! indicators, read receipts and a long-press context menu for reactions,
//! copying and replies

mod chat_view;
mod config;
mod context_menu;
mod easing;
mod emoji_picker;
mod message;
mod message_cell;
mod notification;
mod styles;
mod theme;
mod typing_indicator;
mod widgets;

use crate::Message::{
    AppError, Chat, CloseImage, Copied, CounterpartTick, Event as WindowEvent, ImageTapped,
    NewConfig, NextTheme, ReadTick, RemoveNotification, Sent, ToggleMode,
};
use crate::chat_view::{ChatView, ChatViewMessage};
use crate::config::{Config, load_config, save_config};
use crate::message::{ChatMessage, ImageAttachment};
use crate::notification::{Notification, Notifications};
use crate::styles::{button_chip_style, chat_background_style, modal_style};
use crate::theme::{ThemeConfiguration, next_theme};
use iced::keyboard::key;
use iced::widget::{
    Column, Row, Space, button, center, container, image, mouse_area, opaque, operation, stack,
    text,
};
use iced::{Center, Element, Event, Fill, Rectangle, Subscription, Task, event, keyboard, time};
use std::time::Duration;
use uuid::Uuid;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How often the simulated counterpart's typing pause ticks down
const TYPING_TICK: Duration = Duration::from_millis(600);

/// How often the counterpart "reads" more of the last sent message
const READ_TICK: Duration = Duration::from_millis(250);

/// What the simulated counterpart says, in rotation
const REPLIES: [&str; 5] = [
    "Sounds good to me!",
    "Tell me more about that",
    "I was just thinking the same thing",
    "Ha! Good one 😄",
    "Let's talk about it tomorrow",
];

/// These are the messages that AurenChat responds to
#[derive(Debug, Clone)]
pub enum Message {
    None,
    AppError(String, String),
    NewConfig(Config),
    Chat(ChatViewMessage),
    /// The user just sent the message with this id
    Sent(Uuid),
    /// Message text was placed on the clipboard
    Copied(String),
    ImageTapped {
        uuid: Uuid,
        index: usize,
        frame: Rectangle,
    },
    CloseImage,
    RemoveNotification(usize),
    Event(Event),
    ToggleMode,
    NextTheme,
    CounterpartTick,
    ReadTick,
}

struct AurenChat {
    chat_view: ChatView,
    config: Config,
    notifications: Notifications,
    /// A tapped picture being shown full size over the chat
    viewing_image: Option<ImageAttachment>,
    /// Countdown of typing ticks until the counterpart's reply lands
    typing_remaining: Option<u8>,
    /// The sent message the counterpart is currently reading
    reading: Option<Uuid>,
    next_reply: usize,
}

fn main() -> iced::Result {
    #[cfg(feature = "debug")]
    tracing_subscriber::fmt::init();

    iced::application(AurenChat::new, AurenChat::update, AurenChat::view)
        .title(AurenChat::title)
        .subscription(AurenChat::subscription)
        .resizable(true)
        .run()
}

impl Default for AurenChat {
    fn default() -> Self {
        let config = Config::default();
        Self {
            chat_view: ChatView::new(ThemeConfiguration::named(&config.theme, config.mode)),
            config,
            notifications: Notifications::default(),
            viewing_image: None,
            typing_remaining: None,
            reading: None,
            next_reply: 0,
        }
    }
}

impl AurenChat {
    /// Create a new instance of the app and load the config asynchronously
    fn new() -> (Self, Task<Message>) {
        (Self::default(), load_config())
    }

    /// Return the title of the app, which is used in the window title bar
    fn title(&self) -> String {
        if self.chat_view.is_typing() {
            format!("AurenChat {VERSION} (typing…)")
        } else {
            format!("AurenChat {VERSION}")
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::None => Task::none(),
            AppError(summary, detail) => {
                self.notifications.add(Notification::Error(summary, detail));
                Task::none()
            }
            NewConfig(config) => {
                self.chat_view
                    .set_theme(ThemeConfiguration::named(&config.theme, config.mode));
                self.chat_view
                    .set_favorite_emojis(config.favorite_emojis.clone());
                self.config = config;
                Task::none()
            }
            Chat(chat_view_message) => self.chat_view.update(chat_view_message),
            Sent(uuid) => {
                // The counterpart starts reading, then types a reply
                self.reading = Some(uuid);
                self.typing_remaining = Some(3);
                Task::none()
            }
            Copied(_) => {
                self.notifications.add(Notification::Info(
                    "Copied".to_string(),
                    "Message text copied to the clipboard".to_string(),
                ));
                Task::none()
            }
            ImageTapped { uuid, index, .. } => {
                self.viewing_image = self
                    .chat_view
                    .message(&uuid)
                    .and_then(|message| message.image())
                    .and_then(|config| config.images.get(index))
                    .cloned();
                Task::none()
            }
            CloseImage => {
                self.viewing_image = None;
                Task::none()
            }
            RemoveNotification(id) => {
                self.notifications.remove(id);
                Task::none()
            }
            WindowEvent(event) => self.process_event(event),
            ToggleMode => {
                self.config.mode = self.config.mode.toggle();
                self.chat_view
                    .set_theme(ThemeConfiguration::named(&self.config.theme, self.config.mode));
                save_config(&self.config)
            }
            NextTheme => {
                self.config.theme = next_theme(&self.config.theme).to_string();
                self.chat_view
                    .set_theme(ThemeConfiguration::named(&self.config.theme, self.config.mode));
                save_config(&self.config)
            }
            CounterpartTick => self.counterpart_tick(),
            ReadTick => {
                self.read_tick();
                Task::none()
            }
        }
    }

    /// One step of the simulated counterpart: show typing first, then reply
    fn counterpart_tick(&mut self) -> Task<Message> {
        match self.typing_remaining {
            Some(0) => {
                self.typing_remaining = None;
                let reply = REPLIES[self.next_reply % REPLIES.len()];
                self.next_reply += 1;
                let stop = self.chat_view.set_typing(false);
                let push = self.chat_view.push_message(ChatMessage::new(reply, false));
                Task::batch([stop, push])
            }
            Some(remaining) => {
                self.typing_remaining = Some(remaining - 1);
                self.chat_view.set_typing(true)
            }
            None => Task::none(),
        }
    }

    /// The counterpart reads a few more characters of the last sent message
    fn read_tick(&mut self) {
        if let Some(uuid) = self.reading {
            let done = match self.chat_view.message(&uuid) {
                Some(message) => {
                    let progress = message.read_progress() + 4.0;
                    let text_len = message.text_len() as f32;
                    self.chat_view.advance_read_progress(&uuid, progress);
                    progress >= text_len
                }
                None => true,
            };
            if done {
                self.reading = None;
            }
        }
    }

    fn process_event(&mut self, event: Event) -> Task<Message> {
        match event {
            Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(key::Named::Tab),
                modifiers,
                ..
            }) => {
                if modifiers.shift() {
                    operation::focus_previous()
                } else {
                    operation::focus_next()
                }
            }
            Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(key::Named::Escape),
                ..
            }) => {
                // Exit any interactive modes underway
                if self.viewing_image.take().is_some() {
                    Task::none()
                } else {
                    self.chat_view.cancel_interactive()
                }
            }
            _ => Task::none(),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let dark = self.config.mode.is_dark();

        let theme_button = button(text(self.config.theme.clone()).size(14))
            .style(button_chip_style)
            .on_press(NextTheme);
        let mode_button = button(text(if dark { "☀" } else { "🌙" }).size(14))
            .style(button_chip_style)
            .on_press(ToggleMode);
        let header = Row::new()
            .padding([4, 8])
            .align_y(Center)
            .push(text("AurenChat").size(18))
            .push(Space::new().width(Fill))
            .push(theme_button)
            .push(Space::new().width(6))
            .push(mode_button);

        let mut content = Column::new();
        if !self.notifications.is_empty() {
            content = content.push(self.notifications.view(RemoveNotification));
        }
        content = content.push(header).push(self.chat_view.view());

        let mut screen: Element<'_, Message> = container(content)
            .width(Fill)
            .height(Fill)
            .style(move |_theme| chat_background_style(dark))
            .into();

        if let Some(card) = self.chat_view.overlay_view(dark) {
            screen = Self::modal(screen, card, Chat(ChatViewMessage::DismissOverlay));
        }

        if let Some(attachment) = &self.viewing_image {
            let mut viewer =
                Column::new()
                    .align_x(Center)
                    .spacing(6)
                    .push(image(image::Handle::from_path(&attachment.path)).width(Fill));
            if let Some(filename) = &attachment.filename {
                viewer = viewer.push(text(filename.clone()).size(14));
            }
            screen = Self::modal(screen, viewer, CloseImage);
        }

        screen
    }

    /// Function to create a modal dialogue in the middle of the screen
    fn modal<'a, Message>(
        base: impl Into<Element<'a, Message>>,
        content: impl Into<Element<'a, Message>>,
        on_blur: Message,
    ) -> Element<'a, Message>
    where
        Message: Clone + 'a,
    {
        stack![
            base.into(),
            opaque(mouse_area(center(opaque(content)).style(modal_style)).on_press(on_blur))
        ]
        .into()
    }

    /// Subscribe to window events and, while the simulated counterpart is
    /// active, to its timers
    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![event::listen().map(WindowEvent)];

        if self.typing_remaining.is_some() {
            subscriptions.push(time::every(TYPING_TICK).map(|_| CounterpartTick));
        }
        if self.reading.is_some() {
            subscriptions.push(time::every(READ_TICK).map(|_| ReadTick));
        }

        Subscription::batch(subscriptions)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_counterpart_replies_after_typing() {
        let mut app = AurenChat::default();
        let _ = app.chat_view.update(ChatViewMessage::Input("hi".to_string()));
        let _ = app.chat_view.update(ChatViewMessage::Send);
        let uuid = app.chat_view.last_message().unwrap().uuid();
        let _ = app.update(Sent(uuid));

        // typing ticks count down, then the reply lands
        while app.typing_remaining.is_some() {
            let _ = app.update(CounterpartTick);
        }

        assert!(!app.chat_view.is_typing());
        let reply = app.chat_view.last_message().unwrap();
        assert!(!reply.is_user());
        assert_eq!(reply.text(), REPLIES[0]);
    }

    #[test]
    fn test_read_ticks_stop_at_message_end() {
        let mut app = AurenChat::default();
        let _ = app
            .chat_view
            .update(ChatViewMessage::Input("hello".to_string()));
        let _ = app.chat_view.update(ChatViewMessage::Send);
        let uuid = app.chat_view.last_message().unwrap().uuid();
        let _ = app.update(Sent(uuid));

        for _ in 0..10 {
            let _ = app.update(ReadTick);
        }

        assert_eq!(app.reading, None);
        let message = app.chat_view.message(&uuid).unwrap();
        assert!(message.read_progress() >= message.text_len() as f32);
    }

    #[test]
    fn test_theme_stepping_wraps() {
        let mut app = AurenChat::default();
        let start = app.config.theme.clone();
        for _ in 0..crate::theme::GRADIENT_THEMES.len() {
            let _ = app.update(NextTheme);
        }
        assert_eq!(app.config.theme, start);
    }

    #[test]
    fn test_mode_toggle_round_trips() {
        let mut app = AurenChat::default();
        let start = app.config.mode;
        let _ = app.update(ToggleMode);
        assert_ne!(app.config.mode, start);
        let _ = app.update(ToggleMode);
        assert_eq!(app.config.mode, start);
    }

    #[test]
    fn test_new_config_applies_favorites() {
        let mut app = AurenChat::default();
        let config = Config {
            favorite_emojis: vec!["🎈".to_string()],
            ..Config::default()
        };
        let _ = app.update(NewConfig(config));
        assert_eq!(app.config.favorite_emojis, vec!["🎈".to_string()]);
    }

    #[test]
    fn test_notifications_lifecycle() {
        let mut app = AurenChat::default();
        let _ = app.update(Copied("hello".to_string()));
        assert!(!app.notifications.is_empty());
        let _ = app.update(RemoveNotification(0));
        assert!(app.notifications.is_empty());
    }
}
