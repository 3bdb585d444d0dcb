use crate::content::{topics, TopicTag};
use crate::gui::{Message, PrepApp};
use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{Alignment, Element, Length};

pub fn view(app: &PrepApp) -> Element<'_, Message> {
    let mut content = column![
        text("Certification Topics").size(28),
        text("Exam domains grouped by area").style(text::secondary),
    ]
    .spacing(20);

    for tag in TopicTag::ALL {
        let cards: Vec<Element<'_, Message>> = topics::by_tag(&app.topics, tag)
            .into_iter()
            .map(|topic| {
                let expanded = app.selected_topic.as_deref() == Some(topic.id.as_str());
                let mut card = column![
                    row![
                        text(&topic.icon).size(22),
                        text(&topic.title).size(18),
                    ]
                    .spacing(10)
                    .align_y(Alignment::Center),
                    text(&topic.description).style(text::secondary),
                ]
                .spacing(6);

                if expanded {
                    for detail in &topic.details {
                        card = card.push(text(format!("• {}", detail)));
                    }
                }

                button(card)
                    .width(Length::Fill)
                    .padding(12)
                    .style(if expanded {
                        button::primary
                    } else {
                        button::secondary
                    })
                    .on_press(Message::TopicSelected(topic.id.clone()))
                    .into()
            })
            .collect();

        if cards.is_empty() {
            continue;
        }

        content = content.push(
            column![
                text(tag.heading()).size(22),
                Column::with_children(cards).spacing(8),
            ]
            .spacing(10),
        );
    }

    container(scrollable(content))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
