use crate::gui::{Message, PrepApp};
use crate::speech::{RATE_MAX, RATE_MIN, RATE_STEP};
use crate::translation::TranslationDirection;
use iced::widget::{
    button, column, container, pick_list, row, scrollable, slider, text, text_input, Space,
};
use iced::{Alignment, Element, Length};

pub fn view(app: &PrepApp) -> Element<'_, Message> {
    let translator = &app.translator;
    let speech = &app.speech;

    let (from, to) = match translator.direction() {
        TranslationDirection::EnEs => ("English", "Español"),
        TranslationDirection::EsEn => ("Español", "English"),
    };

    let direction_row = row![
        text(from).size(18),
        button(text("⇄")).on_press(Message::ToggleDirection),
        text(to).size(18),
        Space::with_width(Length::Fill),
        button(text(if translator.is_translating() {
            "Traduciendo..."
        } else {
            "🌐 Traducir"
        }))
        .padding(10)
        .style(button::primary)
        .on_press_maybe((!translator.is_translating()).then_some(Message::TranslatePressed)),
        button(text("🗑️ Limpiar"))
            .padding(10)
            .style(button::danger)
            .on_press(Message::ClearText),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let has_text = !translator.text().trim().is_empty();
    let has_translation = !translator.translated_text().is_empty();

    let original = container(
        column![
            row![
                text(format!("Texto original ({})", from)).size(16),
                Space::with_width(Length::Fill),
                button(text("🔊"))
                    .style(button::secondary)
                    .on_press_maybe(has_text.then_some(Message::SpeakOriginal)),
            ]
            .align_y(Alignment::Center),
            text_input("Escribe o pega el texto aquí...", translator.text())
                .on_input(Message::TextChanged)
                .on_submit(Message::TranslatePressed)
                .padding(10),
        ]
        .spacing(10),
    )
    .padding(15)
    .width(Length::Fill)
    .style(container::rounded_box);

    let translated_body = if has_translation {
        text(translator.translated_text()).size(16)
    } else {
        text("La traducción aparecerá aquí").style(text::secondary)
    };

    let translated = container(
        column![
            row![
                text(format!("Traducción ({})", to)).size(16),
                Space::with_width(Length::Fill),
                button(text("🔊"))
                    .style(button::secondary)
                    .on_press_maybe(has_translation.then_some(Message::SpeakTranslated)),
            ]
            .align_y(Alignment::Center),
            scrollable(translated_body).height(Length::Fixed(160.0)),
        ]
        .spacing(10),
    )
    .padding(15)
    .width(Length::Fill)
    .style(container::rounded_box);

    let voice_names: Vec<String> = speech.voices().iter().map(|v| v.name.clone()).collect();
    let selected_voice =
        (!speech.selected_voice().is_empty()).then(|| speech.selected_voice().to_string());

    let playback = row![
        button(text("⏸"))
            .style(button::secondary)
            .on_press_maybe(
                (speech.is_speaking() && !speech.is_paused()).then_some(Message::PauseSpeech)
            ),
        button(text("▶"))
            .style(button::secondary)
            .on_press_maybe(speech.is_paused().then_some(Message::ResumeSpeech)),
        button(text("⏹"))
            .style(button::secondary)
            .on_press_maybe(speech.is_speaking().then_some(Message::StopSpeech)),
        text(format!("Velocidad {:.1}x", speech.speech_rate())),
        slider(RATE_MIN..=RATE_MAX, speech.speech_rate(), Message::SpeechRateChanged)
            .step(RATE_STEP)
            .width(Length::Fixed(160.0)),
        pick_list(voice_names, selected_voice, Message::VoiceSelected)
            .placeholder("Sin voces")
            .text_size(13),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    column![
        text("Lector y Traductor").size(28),
        direction_row,
        original,
        translated,
        container(playback)
            .padding(15)
            .width(Length::Fill)
            .style(container::rounded_box),
    ]
    .spacing(15)
    .into()
}
