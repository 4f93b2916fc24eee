//! The pulsing three-dot animation shown inside a typing-indicator bubble.
use iced::advanced::layout;
use iced::advanced::renderer::{self, Quad};
use iced::advanced::widget::tree::{self, Tree};
use iced::advanced::{self, Clipboard, Layout, Shell, Widget};
use iced::mouse;
use iced::time::Instant;
use iced::window::{self};
use iced::{Background, Color, Element, Event, Length, Rectangle, Size, Theme, border};

use crate::easing::{self, Easing};

use std::time::Duration;

const DOT_COUNT: usize = 3;
// Phase offset between neighboring dots, as a fraction of the cycle
const DOT_PHASE_STEP: f32 = 0.15;
// Intensity floor so a dot at the bottom of its pulse stays visible
const REST_INTENSITY: f32 = 0.35;

#[allow(missing_debug_implementations)]
pub struct Dots<'a, Theme = iced::Theme>
where
    Theme: Catalog,
{
    dot_radius: f32,
    spacing: f32,
    animating: bool,
    easing: &'a Easing,
    cycle_duration: Duration,
    class: Theme::Class<'a>,
}

impl<'a, Theme> Dots<'a, Theme>
where
    Theme: Catalog,
{
    /// Creates a new [`Dots`] widget, initially static.
    pub fn new() -> Self {
        Dots {
            dot_radius: 4.0,
            spacing: 5.0,
            animating: false,
            easing: easing::dot_pulse(),
            cycle_duration: Duration::from_millis(900),
            class: Theme::default(),
        }
    }

    /// Sets whether the dots pulse or sit still.
    pub fn animating(mut self, animating: bool) -> Self {
        self.animating = animating;
        self
    }

    /// Sets the radius of each dot.
    pub fn dot_radius(mut self, radius: f32) -> Self {
        self.dot_radius = radius;
        self
    }

    /// Sets the style of the [`Dots`].
    #[must_use]
    pub fn style(mut self, style: impl Fn(&Theme) -> Style + 'a) -> Self
    where
        Theme::Class<'a>: From<StyleFn<'a, Theme>>,
    {
        self.class = (Box::new(style) as StyleFn<'a, Theme>).into();
        self
    }

    /// Sets the duration of one full pulse cycle.
    pub fn cycle_duration(mut self, duration: Duration) -> Self {
        self.cycle_duration = duration;
        self
    }

    fn intrinsic_size(&self) -> Size {
        let diameter = self.dot_radius * 2.0;
        Size {
            width: DOT_COUNT as f32 * diameter + (DOT_COUNT - 1) as f32 * self.spacing,
            height: diameter,
        }
    }
}

impl<Theme> Default for Dots<'_, Theme>
where
    Theme: Catalog,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Where in the pulse cycle the animation currently is
#[derive(Clone, Copy, Debug)]
struct State {
    start: Instant,
    progress: f32,
}

impl Default for State {
    fn default() -> Self {
        Self {
            start: Instant::now(),
            progress: 0.0,
        }
    }
}

impl State {
    /// Advance to the cycle progress that corresponds to `now`
    fn advanced(&self, cycle_duration: Duration, now: Instant) -> Self {
        let elapsed = now.duration_since(self.start);
        let cycles = elapsed.as_secs_f32() / cycle_duration.as_secs_f32();

        Self {
            start: self.start,
            progress: cycles.fract(),
        }
    }

    /// Return to the resting position, keeping the original start instant
    fn rewound(&self) -> Self {
        Self {
            start: self.start,
            progress: 0.0,
        }
    }
}

/// The pulse intensity of dot `index` at cycle `progress`, in [0, 1].
/// Dots trail each other by a fixed phase offset.
fn dot_intensity(progress: f32, index: usize, easing: &Easing) -> f32 {
    let phase = (progress - index as f32 * DOT_PHASE_STEP).rem_euclid(1.0);
    // Triangle wave: rise over the first half of the cycle, fall over the second
    let triangle = 1.0 - (2.0 * phase - 1.0).abs();

    REST_INTENSITY + (1.0 - REST_INTENSITY) * easing.y_at_x(triangle)
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer> for Dots<'_, Theme>
where
    Message: Clone,
    Theme: Catalog,
    Renderer: advanced::Renderer,
{
    fn size(&self) -> Size<Length> {
        let size = self.intrinsic_size();
        Size {
            width: Length::Fixed(size.width),
            height: Length::Fixed(size.height),
        }
    }

    fn layout(
        &mut self,
        _tree: &mut Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let size = self.intrinsic_size();
        layout::atomic(
            limits,
            Length::Fixed(size.width),
            Length::Fixed(size.height),
        )
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();
        let custom_style = theme.style(&self.class);
        let state = tree.state.downcast_ref::<State>();

        let diameter = self.dot_radius * 2.0;
        let center_y = bounds.y + bounds.height / 2.0;

        for index in 0..DOT_COUNT {
            let intensity = if self.animating {
                dot_intensity(state.progress, index, self.easing)
            } else {
                REST_INTENSITY
            };

            // Dots grow a little as well as brightening at the top of the pulse
            let radius = self.dot_radius * (0.8 + 0.2 * intensity);
            let center_x =
                bounds.x + self.dot_radius + index as f32 * (diameter + self.spacing);

            let color = Color {
                a: custom_style.dot_color.a * intensity,
                ..custom_style.dot_color
            };

            renderer.fill_quad(
                Quad {
                    bounds: Rectangle {
                        x: center_x - radius,
                        y: center_y - radius,
                        width: radius * 2.0,
                        height: radius * 2.0,
                    },
                    border: border::rounded(radius),
                    ..Quad::default()
                },
                Background::Color(color),
            );
        }
    }

    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &Event,
        _layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        _viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_mut::<State>();

        if let Event::Window(window::Event::RedrawRequested(now)) = event {
            if self.animating {
                *state = state.advanced(self.cycle_duration, *now);
                shell.request_redraw();
            } else if state.progress != 0.0 {
                // Stopped mid-pulse: settle at rest without scheduling more frames
                *state = state.rewound();
            }
        }
    }
}

impl<'a, Message, Theme, Renderer> From<Dots<'a, Theme>> for Element<'a, Message, Theme, Renderer>
where
    Message: Clone + 'a,
    Theme: Catalog + 'a,
    Renderer: advanced::Renderer + 'a,
{
    fn from(dots: Dots<'a, Theme>) -> Self {
        Self::new(dots)
    }
}

/// The style of the typing dots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// The [`Color`] of a dot at full pulse intensity.
    pub dot_color: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            dot_color: Color::WHITE,
        }
    }
}

/// The theme catalog of a [`Dots`] widget.
pub trait Catalog {
    /// The item class of the [`Catalog`].
    type Class<'a>;

    /// The default class produced by the [`Catalog`].
    fn default<'a>() -> Self::Class<'a>;

    /// The [`Style`] of a class.
    fn style(&self, class: &Self::Class<'_>) -> Style;
}

/// A styling function for [`Dots`].
pub type StyleFn<'a, Theme> = Box<dyn Fn(&Theme) -> Style + 'a>;

impl Catalog for Theme {
    type Class<'a> = StyleFn<'a, Self>;

    fn default<'a>() -> Self::Class<'a> {
        Box::new(default)
    }

    fn style(&self, class: &Self::Class<'_>) -> Style {
        class(self)
    }
}

/// The default typing-dot style.
pub fn default(_theme: &Theme) -> Style {
    Style::default()
}
