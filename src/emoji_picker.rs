use emojis::{Emoji, Group};
use iced::widget::text::Shaping::Advanced;
use iced::widget::{Column, button, container, grid, row, scrollable, text, tooltip};
use iced::{Element, Length};

/// Group tabs down the left side of the picker, in display order
const GROUPS: [(&str, Group); 9] = [
    ("😀", Group::SmileysAndEmotion),
    ("👋", Group::PeopleAndBody),
    ("🐒", Group::AnimalsAndNature),
    ("🍉", Group::FoodAndDrink),
    ("🗺️", Group::TravelAndPlaces),
    ("🎉", Group::Activities),
    ("📣", Group::Objects),
    ("🚮", Group::Symbols),
    ("🏁", Group::Flags),
];

/// A grouped emoji browser, opened from the context menu when none of the
/// favorite reactions fits. Picking any emoji applies it as the reaction
/// and closes the menu.
#[derive(Debug)]
pub struct EmojiPicker {
    group: Group,
}

#[derive(Debug, Clone)]
pub enum PickerMessage {
    Group(Group),
}

impl EmojiPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, message: PickerMessage) {
        match message {
            PickerMessage::Group(group) => {
                self.group = group;
            }
        }
    }

    /// The picker body, sized to sit inside the context-menu card
    pub fn view<'a, Message>(&self, on_press: fn(&'static Emoji) -> Message) -> Element<'a, Message>
    where
        PickerMessage: Into<Message>,
        Message: 'a + Clone,
    {
        const SPACING: u32 = 3;

        let mut group_tabs = Column::new().spacing(SPACING);
        for (icon, group) in GROUPS {
            let selected = group == self.group;
            group_tabs = group_tabs.push(
                button(text(icon).shaping(Advanced))
                    .style(move |theme, status| {
                        if selected {
                            button::primary(theme, status)
                        } else {
                            button::text(theme, status)
                        }
                    })
                    .on_press(PickerMessage::Group(group).into()),
            );
        }

        let mut items = vec![];
        for emoji in self.group.emojis() {
            items.push(Element::from(
                tooltip(
                    button(text(emoji.as_str()).center().shaping(Advanced).size(24))
                        .style(button::text)
                        .on_press(on_press(emoji)),
                    text(emoji.name()),
                    tooltip::Position::default(),
                )
                .style(|style| container::Style {
                    background: Some(style.palette().background.into()),
                    ..Default::default()
                }),
            ));
        }

        let emoji_grid = grid(items).fluid(40).spacing(SPACING);

        row![
            group_tabs,
            scrollable(emoji_grid)
                .spacing(SPACING)
                .height(Length::Fixed(260.0))
        ]
        .spacing(10)
        .into()
    }
}

impl Default for EmojiPicker {
    fn default() -> Self {
        Self {
            group: Group::SmileysAndEmotion,
        }
    }
}
