use crate::message_cell::Side;
use crate::styles::bubble_style;
use crate::widgets::dots::Dots;
use iced::widget::{Column, Container, Row, Space};
use iced::{Color, Element, Fill, Left, Padding, Right};

/// The "is typing" bubble: three pulsing dots inside the same gradient
/// bubble a message from the same sender would use, on the same edge.
///
/// Animation state is explicit so hosts that recycle cells can start and
/// stop the pulse without rebuilding the cell. Both calls are idempotent.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingIndicatorCell {
    animating: bool,
    side: Side,
    gradient_start: Color,
    gradient_end: Color,
}

impl Default for TypingIndicatorCell {
    fn default() -> Self {
        Self {
            animating: false,
            side: Side::default(),
            gradient_start: Color::BLACK,
            gradient_end: Color::BLACK,
        }
    }
}

impl TypingIndicatorCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cell to its pristine, non-animating state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply the sender alignment and bubble gradient. Resets first, like
    /// the message cell, so recycled cells never keep a stale animation
    /// running.
    pub fn configure(&mut self, is_user: bool, gradient_start: Color, gradient_end: Color) {
        self.reset();
        self.side = Side::from_sender(is_user);
        self.gradient_start = gradient_start;
        self.gradient_end = gradient_end;
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn start_animation(&mut self) {
        self.animating = true;
    }

    pub fn stop_animation(&mut self) {
        self.animating = false;
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn view<'a, M: Clone + 'a>(&self) -> Element<'a, M> {
        let (start, end) = (self.gradient_start, self.gradient_end);
        let is_user = self.side == Side::Trailing;

        let bubble = Container::new(Dots::new().animating(self.animating))
            .padding(Padding {
                top: 12.0,
                right: 14.0,
                bottom: 12.0,
                left: 14.0,
            })
            .style(move |_theme| bubble_style(start, end, is_user));

        // Same edge-pinned row shape as a message bubble from this sender
        let column = Column::new().width(Fill);
        match self.side {
            Side::Trailing => {
                let row = Row::new()
                    .padding(6)
                    .push(Space::new().width(100.0))
                    .push(bubble);
                column.align_x(Right).push(row).into()
            }
            Side::Leading => {
                let row = Row::new()
                    .padding(6)
                    .push(bubble)
                    .push(Space::new().width(100.0));
                column.align_x(Left).push(row).into()
            }
        }
    }
}
