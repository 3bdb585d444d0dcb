use aem_prep::content::Deck;
use aem_prep::presentation::render::{render_slide, to_plain_text};
use aem_prep::presentation::{
    KeyAction, Location, NavIntent, NavKey, Navigator, QueryLocation, SectionToggles,
};
use std::sync::Arc;

fn deck() -> Arc<Deck> {
    Arc::new(Deck::builtin().expect("bundled deck loads"))
}

fn mount_at(url: &str) -> Navigator<QueryLocation> {
    Navigator::mount(deck(), QueryLocation::parse(url).expect("valid url"))
}

#[test]
fn test_jump_then_next_updates_location() {
    let mut nav = mount_at("app://aem-prep/intro");
    assert!(nav.jump(5));
    nav.next();
    nav.next();
    nav.next();

    assert_eq!(nav.current_slide(), 8);
    assert_eq!(nav.location().slide_param().as_deref(), Some("8"));
    assert!(nav.location().as_str().contains("slide=8"));
}

#[test]
fn test_location_round_trip_for_every_slide() {
    let deck = deck();
    for k in 1..=deck.total_slides() {
        let mut nav = Navigator::mount(deck.clone(), QueryLocation::default());
        nav.jump(k);

        let reopened = Navigator::mount(
            deck.clone(),
            QueryLocation::parse(nav.location().as_str()).unwrap(),
        );
        assert_eq!(reopened.current_slide(), k);
    }
}

#[test]
fn test_out_of_range_jumps_are_ignored() {
    let mut nav = mount_at("app://aem-prep/intro?slide=4");
    assert_eq!(nav.current_slide(), 4);

    assert!(!nav.jump(0));
    assert!(!nav.jump(19));
    assert_eq!(nav.current_slide(), 4);
    assert_eq!(nav.location().slide_param().as_deref(), Some("4"));
}

#[test]
fn test_boundaries_are_idempotent() {
    let mut nav = mount_at("app://aem-prep/intro");
    assert!(!nav.previous());
    assert_eq!(nav.current_slide(), 1);

    nav.apply(NavIntent::Last);
    assert!(!nav.next());
    assert!(!nav.next());
    assert_eq!(nav.current_slide(), 18);
}

#[test]
fn test_progress_and_remaining_time() {
    let mut nav = mount_at("app://aem-prep/intro");
    assert!((nav.progress_percent() - 100.0 / 18.0).abs() < 1e-9);
    assert_eq!(nav.estimated_time_remaining(), 45 - 1);

    nav.apply(NavIntent::Last);
    assert!((nav.progress_percent() - 100.0).abs() < 1e-9);
    assert_eq!(nav.estimated_time_remaining(), 0);
}

#[test]
fn test_bad_initial_params_fall_back_to_first_slide() {
    for url in [
        "app://aem-prep/intro?slide=abc",
        "app://aem-prep/intro?slide=0",
        "app://aem-prep/intro?slide=42",
        "app://aem-prep/intro?slide=",
    ] {
        let nav = mount_at(url);
        assert_eq!(nav.current_slide(), 1, "{}", url);
        assert_eq!(nav.location().slide_param().as_deref(), Some("1"));
    }
}

#[test]
fn test_other_query_params_survive_navigation() {
    let mut nav = mount_at("app://aem-prep/intro?lang=es&slide=2");
    nav.next();
    let url = nav.location().url();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(pairs.contains(&("lang".to_string(), "es".to_string())));
    assert!(pairs.contains(&("slide".to_string(), "3".to_string())));
}

#[test]
fn test_keyboard_drives_navigation() {
    let mut nav = mount_at("app://aem-prep/intro");

    nav.handle_key(NavKey::ArrowRight);
    nav.handle_key(NavKey::ArrowDown);
    let space = nav.handle_key(NavKey::Space);
    assert!(space.prevent_default);
    assert_eq!(nav.current_slide(), 4);

    nav.handle_key(NavKey::ArrowUp);
    assert_eq!(nav.current_slide(), 3);

    nav.handle_key(NavKey::End);
    assert_eq!(nav.current_slide(), 18);
    nav.handle_key(NavKey::Home);
    assert_eq!(nav.current_slide(), 1);
}

#[test]
fn test_open_modal_blocks_navigation_keys() {
    let mut nav = mount_at("app://aem-prep/intro?slide=6");
    let example = nav
        .deck()
        .slides()
        .iter()
        .find_map(|s| s.code_examples.first().cloned())
        .expect("deck has a code example");
    nav.open_modal(aem_prep::content::ModalContent::for_code(&example));

    let outcome = nav.handle_key(NavKey::ArrowRight);
    assert!(outcome.action.is_none());
    assert_eq!(nav.current_slide(), 6);

    let outcome = nav.handle_key(NavKey::Escape);
    assert_eq!(outcome.action, Some(KeyAction::CloseModal));
    assert!(!nav.modal_open());

    nav.handle_key(NavKey::ArrowRight);
    assert_eq!(nav.current_slide(), 7);
}

#[test]
fn test_every_slide_renders() {
    let deck = deck();
    for slide in deck.slides() {
        let mut toggles = SectionToggles::default();
        toggles.expand_all(slide.expandable_sections.len());
        let text = to_plain_text(&render_slide(slide, &toggles));
        assert!(text.starts_with(&slide.title), "slide {}", slide.id);
    }
}
