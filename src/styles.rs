use iced::border::Radius;
use iced::gradient::Linear;
use iced::widget::button::Status;
use iced::widget::button::Status::Hovered;
use iced::widget::container::Style;
use iced::widget::scrollable::{AutoScroll, Rail, Scroller};
use iced::widget::{button, scrollable, text_input};
use iced::{Background, Border, Color, Degrees, Gradient, Shadow, Theme};

// Basic Colors
pub const COLOR_RED: Color = Color::from_rgb(0.9, 0.2, 0.2);
pub const COLOR_YELLOW: Color = Color::from_rgb(0.95, 0.9, 0.2);

// Gray Scale
pub const COLOR_GRAY_15: Color = Color::from_rgb(0.15, 0.15, 0.15);
pub const COLOR_GRAY_20: Color = Color::from_rgb(0.2, 0.2, 0.2);
pub const COLOR_GRAY_40: Color = Color::from_rgb(0.4, 0.4, 0.4);
pub const COLOR_GRAY_60: Color = Color::from_rgb(0.6, 0.6, 0.6);
pub const COLOR_GRAY_80: Color = Color::from_rgb(0.8, 0.8, 0.8);
pub const COLOR_GRAY_95: Color = Color::from_rgb(0.95, 0.95, 0.95);

pub const NO_SHADOW: Shadow = Shadow {
    color: Color::TRANSPARENT,
    offset: iced::Vector { x: 0.0, y: 0.0 },
    blur_radius: 0.0,
};

const RADIUS_4: Radius = Radius {
    top_left: 4.0,
    top_right: 4.0,
    bottom_right: 4.0,
    bottom_left: 4.0,
};

pub const RADIUS_12: Radius = Radius {
    top_left: 12.0,
    top_right: 12.0,
    bottom_right: 12.0,
    bottom_left: 12.0,
};

/// The bubble corner radius used by message and typing-indicator bubbles
pub const RADIUS_18: Radius = Radius {
    top_left: 18.0,
    top_right: 18.0,
    bottom_right: 18.0,
    bottom_left: 18.0,
};

pub const NO_BORDER: Border = Border {
    color: Color::TRANSPARENT,
    width: 0.0,
    radius: RADIUS_4,
};

const BUBBLE_BORDER: Border = Border {
    color: Color::TRANSPARENT,
    width: 0.0,
    radius: RADIUS_18,
};

const TEXT_INPUT_R: f32 = 20.0;

const TEXT_INPUT_RADIUS: Radius = Radius {
    top_left: TEXT_INPUT_R,
    top_right: TEXT_INPUT_R,
    bottom_right: TEXT_INPUT_R,
    bottom_left: TEXT_INPUT_R,
};

pub const TEXT_INPUT_BACKGROUND: Background =
    Background::Color(Color::from_rgba(0.25, 0.25, 0.25, 1.0));

pub const TEXT_INPUT_PLACEHOLDER_COLOR: Color = Color::from_rgba(0.5, 0.5, 0.5, 1.0);

const TEXT_INPUT_BORDER: Border = Border {
    radius: TEXT_INPUT_RADIUS, // rounded corners
    width: 2.0,
    color: COLOR_GRAY_40,
};

const TEXT_INPUT_BORDER_ACTIVE: Border = Border {
    radius: TEXT_INPUT_RADIUS, // rounded corners
    width: 2.0,
    color: COLOR_GRAY_80,
};

const TEXT_INPUT_BORDER_DISABLED: Border = Border {
    radius: TEXT_INPUT_RADIUS, // rounded corners
    width: 2.0,
    color: Color::TRANSPARENT,
};

pub const TIME_TEXT_COLOR: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.7);
pub const TIME_TEXT_SIZE: f32 = 11.0;

pub const DAY_SEPARATOR_STYLE: Style = Style {
    text_color: Some(COLOR_GRAY_80),
    background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.4))),
    border: Border {
        color: Color::TRANSPARENT,
        width: 0.0,
        radius: RADIUS_12,
    },
    shadow: NO_SHADOW,
    snap: false,
};

/// The gradient background for a message or typing bubble. The gradient runs
/// between the two theme endpoint colors, angled one way for the user's own
/// bubbles and mirrored for the counterpart's.
pub fn bubble_style(start: Color, end: Color, is_user: bool) -> Style {
    let angle = if is_user {
        Degrees(135.0)
    } else {
        Degrees(225.0)
    };

    let gradient = Linear::new(angle).add_stop(0.0, start).add_stop(1.0, end);

    Style {
        text_color: Some(Color::WHITE),
        background: Some(Background::Gradient(Gradient::Linear(gradient))),
        border: BUBBLE_BORDER,
        shadow: NO_SHADOW,
        snap: false,
    }
}

/// The small rounded container holding a reaction emoji, pinned to a bubble corner
pub fn reaction_badge_style(dark: bool) -> Style {
    let (background, border_color) = if dark {
        (COLOR_GRAY_20, COLOR_GRAY_15)
    } else {
        (COLOR_GRAY_95, COLOR_GRAY_80)
    };

    Style {
        text_color: None,
        background: Some(Background::Color(background)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: RADIUS_12,
        },
        shadow: NO_SHADOW,
        snap: false,
    }
}

/// Chat background behind all the bubbles
pub fn chat_background_style(dark: bool) -> Style {
    let background = if dark {
        Color::from_rgba(0.07, 0.07, 0.08, 1.0)
    } else {
        Color::WHITE
    };

    Style {
        text_color: None,
        background: Some(Background::Color(background)),
        border: NO_BORDER,
        shadow: NO_SHADOW,
        snap: false,
    }
}

/// The rounded card that holds the overlay's action rows
pub fn overlay_card_style(dark: bool) -> Style {
    let (background, text_color) = if dark {
        (COLOR_GRAY_15, Color::WHITE)
    } else {
        (Color::WHITE, Color::BLACK)
    };

    Style {
        text_color: Some(text_color),
        background: Some(Background::Color(background)),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: RADIUS_12,
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
            offset: iced::Vector { x: 0.0, y: 2.0 },
            blur_radius: 12.0,
        },
        snap: false,
    }
}

/// An action row button inside the overlay card (reply, copy)
pub fn overlay_action_style(dark: bool, status: Status) -> button::Style {
    let text_color = if dark { Color::WHITE } else { Color::BLACK };
    let hover = if dark {
        COLOR_GRAY_20
    } else {
        COLOR_GRAY_95
    };

    let background = match status {
        Hovered | Status::Pressed => Some(Background::Color(hover)),
        _ => None,
    };

    button::Style {
        background,
        text_color,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: RADIUS_4,
        },
        shadow: NO_SHADOW,
        snap: false,
    }
}

/// A quick-reaction emoji button in the overlay's favorite row
pub fn favorite_emoji_style(dark: bool, status: Status) -> button::Style {
    let hover = if dark {
        COLOR_GRAY_40
    } else {
        COLOR_GRAY_80
    };

    let background = match status {
        Hovered | Status::Pressed => Some(Background::Color(hover)),
        _ => None,
    };

    button::Style {
        background,
        text_color: Color::WHITE,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: Radius {
                top_left: 16.0,
                top_right: 16.0,
                bottom_right: 16.0,
                bottom_left: 16.0,
            },
        },
        shadow: NO_SHADOW,
        snap: false,
    }
}

pub fn text_input_style(_theme: &Theme, status: text_input::Status) -> text_input::Style {
    let border = match status {
        text_input::Status::Focused { .. } => TEXT_INPUT_BORDER_ACTIVE,
        text_input::Status::Disabled => TEXT_INPUT_BORDER_DISABLED,
        _ => TEXT_INPUT_BORDER,
    };

    text_input::Style {
        background: TEXT_INPUT_BACKGROUND,
        border,
        icon: Color::WHITE,
        placeholder: TEXT_INPUT_PLACEHOLDER_COLOR,
        value: Color::WHITE,
        selection: Default::default(),
    }
}

pub fn button_chip_style(_theme: &Theme, status: Status) -> button::Style {
    let background = match status {
        Hovered => COLOR_GRAY_60,
        _ => COLOR_GRAY_40,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: Border {
            radius: TEXT_INPUT_RADIUS,
            width: 0.0,
            color: Color::TRANSPARENT,
        },
        shadow: NO_SHADOW,
        snap: false,
    }
}

const REPLY_TO_STYLE: Style = Style {
    text_color: Some(Color::WHITE),
    background: Some(Background::Color(COLOR_GRAY_20)),
    border: NO_BORDER,
    shadow: NO_SHADOW,
    snap: false,
};

pub fn reply_to_style(_theme: &Theme) -> Style {
    REPLY_TO_STYLE
}

pub fn error_notification_style(_theme: &Theme) -> Style {
    Style {
        text_color: Some(Color::WHITE),
        background: Some(Background::Color(COLOR_RED)),
        border: Border {
            radius: Radius::from(12.0), // rounded corners
            width: 2.0,
            color: COLOR_YELLOW,
        },
        ..Default::default()
    }
}

pub fn info_notification_style(_theme: &Theme) -> Style {
    Style {
        text_color: Some(Color::WHITE),
        background: Some(Background::Color(Color::from_rgb8(0x00, 0x00, 0x00))), // black
        border: Border {
            radius: Radius::from(12.0), // rounded corners
            width: 2.0,
            color: Color::WHITE,
        },
        ..Default::default()
    }
}

/// The dimmed backdrop behind the context menu and the image viewer
pub fn modal_style(_theme: &Theme) -> Style {
    Style {
        text_color: None,
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.7))),
        border: NO_BORDER,
        shadow: NO_SHADOW,
        snap: false,
    }
}

pub fn scrollbar_style(_theme: &Theme, status: scrollable::Status) -> scrollable::Style {
    let scrollbar_color = match status {
        scrollable::Status::Active { .. } => Background::Color(Color::TRANSPARENT),
        scrollable::Status::Hovered { .. } => Background::Color(COLOR_GRAY_60),
        scrollable::Status::Dragged { .. } => Background::Color(COLOR_GRAY_80),
    };

    let rail = Rail {
        background: Some(Background::Color(Color::TRANSPARENT)),
        border: NO_BORDER,
        scroller: Scroller {
            background: scrollbar_color,
            border: NO_BORDER,
        },
    };

    scrollable::Style {
        container: Style {
            text_color: None,
            background: Some(Background::Color(Color::TRANSPARENT)),
            border: NO_BORDER,
            shadow: NO_SHADOW,
            snap: false,
        },
        vertical_rail: rail,
        horizontal_rail: rail,
        gap: None,
        auto_scroll: AutoScroll {
            background: Background::Color(Color::TRANSPARENT),
            border: NO_BORDER,
            shadow: NO_SHADOW,
            icon: Default::default(),
        },
    }
}
