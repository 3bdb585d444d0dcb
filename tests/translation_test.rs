use aem_prep::translation::{
    run_request, TranslationDirection, TranslationOutcome, Translator, CONNECTION_ERROR,
    TRANSLATE_ERROR,
};

mod common;
use common::mock_translation::{MockTranslationBackend, Reply};

#[tokio::test]
async fn test_blank_text_is_a_noop() {
    let backend = MockTranslationBackend::new(Reply::Ok(200, "nada"));
    let mut translator = Translator::new("  \t ");

    translator.translate_text(&backend).await;

    assert!(backend.requests().is_empty());
    assert_eq!(translator.translated_text(), "");
    assert!(!translator.is_translating());
}

#[tokio::test]
async fn test_successful_translation() {
    let backend = MockTranslationBackend::new(Reply::Ok(200, "Hola mundo"));
    let mut translator = Translator::new("Hello world");

    translator.translate_text(&backend).await;

    assert_eq!(
        backend.requests(),
        vec![("Hello world".to_string(), "en|es".to_string())]
    );
    assert_eq!(translator.translated_text(), "Hola mundo");
    assert!(!translator.is_translating());
}

#[tokio::test]
async fn test_reverse_direction_uses_es_en() {
    let backend = MockTranslationBackend::new(Reply::Ok(200, "Good morning"));
    let mut translator = Translator::new("Buenos días");
    translator.set_translation_direction(TranslationDirection::EsEn);

    translator.translate_text(&backend).await;

    assert_eq!(backend.requests()[0].1, "es|en");
    assert_eq!(translator.translated_text(), "Good morning");
}

#[tokio::test]
async fn test_non_success_status_writes_fallback() {
    let backend = MockTranslationBackend::new(Reply::Ok(403, "QUERY LENGTH LIMIT EXCEEDED"));
    let mut translator = Translator::new("Hello");

    translator.translate_text(&backend).await;

    assert_eq!(translator.translated_text(), TRANSLATE_ERROR);
    assert!(!translator.is_translating());
}

#[tokio::test]
async fn test_missing_status_writes_fallback() {
    let backend = MockTranslationBackend::new(Reply::NoStatus);
    let mut translator = Translator::new("Hello");

    translator.translate_text(&backend).await;

    assert_eq!(translator.translated_text(), TRANSLATE_ERROR);
}

#[tokio::test]
async fn test_transport_failure_writes_connection_message() {
    let backend = MockTranslationBackend::new(Reply::TransportError);
    let mut translator = Translator::new("Hello");

    translator.translate_text(&backend).await;

    assert_eq!(translator.translated_text(), CONNECTION_ERROR);
    assert!(!translator.is_translating());
}

#[tokio::test]
async fn test_out_of_order_responses_keep_latest() {
    let backend = MockTranslationBackend::new(Reply::Ok(200, "uno"));
    let mut translator = Translator::new("one");

    let first = translator.begin().unwrap();
    let first_outcome = run_request(&backend, &first).await;

    translator.set_text("two");
    let second = translator.begin().unwrap();
    *backend.reply.lock().unwrap() = Reply::Ok(200, "dos");
    let second_outcome = run_request(&backend, &second).await;

    assert!(translator.finish(second.generation, &second_outcome));
    assert!(!translator.finish(first.generation, &first_outcome));
    assert_eq!(translator.translated_text(), "dos");
    assert!(!translator.is_translating());
    assert_eq!(first_outcome, TranslationOutcome::Translated("uno".into()));
}

#[test]
fn test_run_request_blocking() {
    let backend = MockTranslationBackend::new(Reply::TransportError);
    let mut translator = Translator::new("Hello");
    let request = translator.begin().unwrap();

    let outcome = tokio_test::block_on(run_request(&backend, &request));
    assert!(matches!(outcome, TranslationOutcome::TransportFailed(_)));
}
