use crate::styles::{button_chip_style, error_notification_style, info_notification_style};
use iced::widget::container::Style;
use iced::widget::{Column, Container, Row, button, text};
use iced::{Element, Fill, Right, Theme};

/// A banner shown at the top of the window until acknowledged
pub enum Notification {
    Error(String, String),
    Info(String, String),
}

/// The active banners, newest first. Each carries a unique id the dismiss
/// button reports back.
#[derive(Default)]
pub struct Notifications {
    next_id: usize,
    inner: Vec<(usize, Notification)>,
}

impl Notifications {
    pub fn add(&mut self, notification: Notification) {
        self.inner.insert(0, (self.next_id, notification));
        self.next_id += 1;
    }

    pub fn remove(&mut self, id: usize) {
        self.inner.retain(|item| item.0 != id);
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Render the active banners stacked at the top of the screen
    pub fn view<'a, M: Clone + 'a>(&'a self, on_dismiss: fn(usize) -> M) -> Element<'a, M> {
        let mut banners = Column::new().padding(10).spacing(4);

        for (id, notification) in &self.inner {
            banners = banners.push(match notification {
                Notification::Error(summary, detail) => {
                    Self::banner(*id, summary, detail, error_notification_style, on_dismiss)
                }
                Notification::Info(summary, detail) => {
                    Self::banner(*id, summary, detail, info_notification_style, on_dismiss)
                }
            });
        }

        banners.into()
    }

    fn banner<'a, M: Clone + 'a>(
        id: usize,
        summary: &'a str,
        detail: &'a str,
        style: impl Fn(&Theme) -> Style + 'a,
        on_dismiss: fn(usize) -> M,
    ) -> Element<'a, M> {
        let header = Row::new().width(Fill).push(text(summary).size(20)).push(
            Column::new().width(Fill).align_x(Right).push(
                button("OK")
                    .style(button_chip_style)
                    .on_press(on_dismiss(id)),
            ),
        );

        Container::new(Column::new().push(header).push(text(detail).size(14)))
            .padding([6, 12])
            .style(style)
            .width(Fill)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut notifications = Notifications::default();
        assert!(notifications.is_empty());

        notifications.add(Notification::Info("Copied".into(), "Text copied".into()));
        notifications.add(Notification::Error("Image".into(), "Could not load".into()));
        assert!(!notifications.is_empty());

        notifications.remove(0);
        notifications.remove(1);
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_ids_are_unique_after_removal() {
        let mut notifications = Notifications::default();
        notifications.add(Notification::Info("a".into(), String::new()));
        notifications.remove(0);
        notifications.add(Notification::Info("b".into(), String::new()));
        assert_eq!(notifications.inner[0].0, 1);
    }
}
