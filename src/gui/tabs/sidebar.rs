use crate::gui::{Message, PrepApp, Tab};
use iced::widget::{button, column, container, text, Space};
use iced::{Element, Length};

pub fn view(app: &PrepApp) -> Element<'_, Message> {
    let tabs = column![
        text("AEM Prep").size(22),
        Space::with_height(10),
        tab_button(app, "🎞️ Presentation", Tab::Presentation),
        tab_button(app, "🌐 Translator", Tab::Translator),
        tab_button(app, "📚 Topics", Tab::Topics),
        Space::with_height(Length::Fill),
        text(&app.status).size(12).style(text::secondary),
        text(concat!("v", env!("CARGO_PKG_VERSION")))
            .size(12)
            .style(text::secondary),
    ]
    .spacing(5)
    .padding(10);

    container(tabs)
        .width(Length::Fixed(180.0))
        .height(Length::Fill)
        .style(container::rounded_box)
        .into()
}

fn tab_button(app: &PrepApp, label: &'static str, tab: Tab) -> Element<'static, Message> {
    let is_selected = app.current_tab == tab;

    button(text(label))
        .width(Length::Fill)
        .padding(10)
        .style(if is_selected {
            button::primary
        } else {
            button::secondary
        })
        .on_press(Message::TabSelected(tab))
        .into()
}
