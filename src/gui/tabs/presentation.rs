use crate::content::CodeExample;
use crate::gui::{Message, PrepApp};
use crate::presentation::music::TRACKS;
use crate::presentation::render::{
    self, hover_text, DiagramView, Inline, ListItem, ModalBody, SectionView,
};
use crate::presentation::{Block, NavIntent};
use iced::widget::{
    button, center, column, container, mouse_area, opaque, pick_list, progress_bar, row,
    scrollable, slider, stack, text, tooltip, Column, Row, Space,
};
use iced::{Alignment, Element, Font, Length};

pub fn view(app: &PrepApp) -> Element<'_, Message> {
    let nav = &app.navigator;

    let header = column![
        row![
            text(format!(
                "Slide {} of {}",
                nav.current_slide(),
                nav.total_slides()
            ))
            .size(16),
            Space::with_width(Length::Fill),
            text(format!("~{} min left", nav.estimated_time_remaining()))
                .size(14)
                .style(text::secondary),
            button(text("☰ Overview"))
                .style(button::secondary)
                .on_press(Message::ToggleOverview),
        ]
        .spacing(15)
        .align_y(Alignment::Center),
        progress_bar(0.0..=100.0, nav.progress_percent() as f32).height(6.0),
        text(nav.location().as_str().to_string())
            .size(12)
            .style(text::secondary),
    ]
    .spacing(8);

    let blocks = render::render_slide(nav.current(), &app.slide_view.toggles);
    let body = Column::with_children(
        blocks
            .into_iter()
            .map(|block| block_view(app, block))
            .collect::<Vec<_>>(),
    )
    .spacing(16);

    let footer = row![
        button(text("← Previous"))
            .padding(10)
            .on_press_maybe(nav.can_go_previous().then_some(Message::Navigate(NavIntent::Previous))),
        Space::with_width(Length::Fill),
        music_controls(app),
        Space::with_width(Length::Fill),
        button(text("Next →"))
            .padding(10)
            .style(button::primary)
            .on_press_maybe(nav.can_go_next().then_some(Message::Navigate(NavIntent::Next))),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let mut main = row![container(scrollable(body)).width(Length::Fill).height(Length::Fill)]
        .spacing(20);
    if app.slide_view.show_overview {
        main = main.push(overview(app));
    }

    let page = column![header, main, footer].spacing(20);

    match nav.active_modal() {
        Some(modal) => stack![
            page,
            opaque(center(
                container(
                    column![
                        row![
                            text(modal.title.clone()).size(22),
                            Space::with_width(Length::Fill),
                            button(text("✕"))
                                .style(button::text)
                                .on_press(Message::CloseModal),
                        ]
                        .align_y(Alignment::Center),
                        scrollable(modal_view(render::modal_body(modal))),
                    ]
                    .spacing(15),
                )
                .padding(20)
                .max_width(800.0)
                .style(container::rounded_box),
            )),
        ]
        .into(),
        None => page.into(),
    }
}

fn block_view(app: &PrepApp, block: Block) -> Element<'_, Message> {
    match block {
        Block::Title { title, subtitle } => {
            let mut col = column![text(title).size(34)].spacing(6);
            if let Some(subtitle) = subtitle {
                col = col.push(text(subtitle).size(18).style(text::secondary));
            }
            col.into()
        }
        Block::Paragraph(inlines) => paragraph(inlines),
        Block::Section { index, title, body } => {
            let marker = if body.is_some() { "▾" } else { "▸" };
            let mut col = column![button(text(format!("{} {}", marker, title)))
                .width(Length::Fill)
                .style(button::secondary)
                .on_press(Message::ToggleSection(index))]
            .spacing(8);
            if let Some(body) = body {
                col = col.push(container(section_view(body)).padding([0, 20]));
            }
            col.into()
        }
        Block::Code { index, example } => container(
            column![
                row![
                    text(example.modal_title()).size(14),
                    Space::with_width(Length::Fill),
                    button(text("⤢ Expand"))
                        .style(button::text)
                        .on_press(Message::ExpandCode(index)),
                ]
                .align_y(Alignment::Center),
                code_text(&example),
            ]
            .spacing(8),
        )
        .padding(12)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into(),
        Block::Diagram { index, view } => diagram(app, index, view),
        Block::ModalTrigger { index, title } => button(text(format!("🔍 {}", title)))
            .style(button::secondary)
            .on_press(Message::OpenSlideModal(index))
            .into(),
    }
}

fn paragraph<'a>(inlines: Vec<Inline>) -> Element<'a, Message> {
    let pieces: Vec<Element<'a, Message>> = inlines
        .into_iter()
        .map(|inline| match inline {
            Inline::Text(s) => text(s).size(18).into(),
            Inline::Tooltip { text: label, content } => tooltip(
                text(label).size(18).style(text::primary),
                container(text(content).size(14))
                    .padding(8)
                    .max_width(320.0)
                    .style(container::rounded_box),
                tooltip::Position::Top,
            )
            .into(),
        })
        .collect();

    Row::with_children(pieces).wrap().into()
}

fn section_view<'a>(body: SectionView) -> Element<'a, Message> {
    match body {
        SectionView::Text(s) => text(s).into(),
        SectionView::List(items) => Column::with_children(
            items
                .into_iter()
                .map(|item| text(format!("• {}", link_label(item))).into())
                .collect::<Vec<Element<'a, Message>>>(),
        )
        .spacing(4)
        .into(),
        SectionView::Paragraphs(items) => Column::with_children(
            items
                .into_iter()
                .map(|item| text(link_label(item)).into())
                .collect::<Vec<Element<'a, Message>>>(),
        )
        .spacing(8)
        .into(),
    }
}

fn link_label(item: ListItem) -> String {
    match item.url {
        Some(url) => format!("{} ({})", item.text, url),
        None => item.text,
    }
}

fn code_text<'a>(example: &CodeExample) -> Element<'a, Message> {
    let listing = example
        .code
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let marker = if example.highlight_lines.contains(&(i as u32 + 1)) {
                "▌"
            } else {
                " "
            };
            format!("{} {}", marker, line)
        })
        .collect::<Vec<_>>()
        .join("\n");
    text(listing).font(Font::MONOSPACE).size(14).into()
}

fn diagram(app: &PrepApp, index: usize, view: DiagramView) -> Element<'_, Message> {
    let mut col = column![text(view.description.clone()).style(text::secondary)].spacing(10);

    if let Some(ascii) = &view.ascii {
        col = col.push(text(ascii.clone()).font(Font::MONOSPACE).size(13));
    }

    if !view.nodes.is_empty() {
        let nodes: Vec<Element<'_, Message>> = view
            .nodes
            .iter()
            .map(|node| {
                mouse_area(
                    container(text(node.label.clone()))
                        .padding(12)
                        .style(container::rounded_box),
                )
                .on_enter(Message::DiagramHover(Some((index, node.id.clone()))))
                .on_exit(Message::DiagramHover(None))
                .into()
            })
            .collect();
        col = col.push(Row::with_children(nodes).spacing(10).wrap());
    }

    for (parent, child) in &view.edges {
        col = col.push(text(format!("{} → {}", parent, child)).size(13));
    }

    if !view.columns.is_empty() {
        let columns: Vec<Element<'_, Message>> = view
            .columns
            .iter()
            .map(|(heading, items)| {
                let mut c = column![text(heading.clone()).size(18)].spacing(4);
                for item in items {
                    c = c.push(text(format!("• {}", item)));
                }
                container(c)
                    .padding(12)
                    .width(Length::FillPortion(1))
                    .style(container::rounded_box)
                    .into()
            })
            .collect();
        col = col.push(Row::with_children(columns).spacing(10));
    }

    if let Some(hovered) = app.slide_view.hovered_in(index) {
        if view.nodes.iter().any(|n| n.id == hovered) {
            col = col.push(text(hover_text(&view, hovered)).style(text::primary));
        }
    }

    container(col)
        .padding(12)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}

fn modal_view<'a>(body: ModalBody) -> Element<'a, Message> {
    match body {
        ModalBody::Code(example) => code_text(&example),
        ModalBody::Image { source, alt } => text(format!("🖼️ {} ({})", alt, source)).into(),
        ModalBody::Diagram(Some(view)) => {
            let mut col = column![text(view.description.clone())].spacing(6);
            if let Some(ascii) = view.ascii {
                col = col.push(text(ascii).font(Font::MONOSPACE));
            }
            for node in view.nodes {
                let detail = node.tooltip.unwrap_or(node.id);
                col = col.push(text(format!("• {}: {}", node.label, detail)));
            }
            col.into()
        }
        ModalBody::Diagram(None) => text("Diagram not available").style(text::secondary).into(),
        ModalBody::Text(s) => text(s).into(),
    }
}

fn overview(app: &PrepApp) -> Element<'_, Message> {
    let current = app.navigator.current_slide();
    let entries: Vec<Element<'_, Message>> = app
        .navigator
        .deck()
        .titles()
        .into_iter()
        .enumerate()
        .map(|(i, title)| {
            let id = i as u32 + 1;
            button(text(format!("{}. {}", id, title)).size(13))
                .width(Length::Fill)
                .style(if id == current {
                    button::primary
                } else {
                    button::text
                })
                .on_press(Message::Navigate(NavIntent::Jump(id)))
                .into()
        })
        .collect();

    container(scrollable(Column::with_children(entries).spacing(2)))
        .width(Length::Fixed(260.0))
        .height(Length::Fill)
        .padding(8)
        .style(container::rounded_box)
        .into()
}

fn music_controls(app: &PrepApp) -> Element<'_, Message> {
    let music = &app.music;
    let names: Vec<String> = TRACKS.iter().map(|t| t.name.to_string()).collect();

    row![
        text("🎵"),
        button(text(if music.is_muted() { "🔇" } else { "🔊" }))
            .style(button::secondary)
            .on_press(Message::MusicToggleMute),
        slider(0.0..=1.0, music.effective_volume(), Message::MusicVolumeChanged)
            .step(0.05)
            .width(Length::Fixed(120.0)),
        pick_list(
            names,
            Some(music.current_track().name.to_string()),
            |name: String| {
                Message::MusicTrackSelected(
                    TRACKS.iter().position(|t| t.name == name).unwrap_or(0),
                )
            }
        )
        .text_size(13),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}
