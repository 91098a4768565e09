use std::sync::Once;
use std::time::Duration;

use ownlib_core::{
    update, AppState, CollectionItem, BookSnapshot, Effect, MessageKind, Msg, Phase,
    StatsSnapshot, UserSnapshot, LOGGED_OUT_MESSAGE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(ownlib_logging::initialize_for_tests);
}

fn reader() -> UserSnapshot {
    UserSnapshot {
        id: 5,
        username: "reader".to_string(),
    }
}

fn inferno() -> CollectionItem {
    CollectionItem {
        user_book_id: 3,
        status: "Want to read".to_string(),
        bookmark_position: None,
        is_local: false,
        file_path: None,
        book: BookSnapshot {
            id: 12,
            title: "Inferno".to_string(),
            author: Some("Dante Alighieri".to_string()),
            language: Some("it".to_string()),
            cover_url: None,
            gutenberg_id: Some(1001),
        },
    }
}

fn stats() -> StatsSnapshot {
    StatsSnapshot {
        total_reading_time: 90,
        total_pages_read: 120,
        completed_books: 1,
        reading_now: 2,
        want_to_read: 3,
    }
}

fn ready_state() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Init { has_credential: true });
    let (state, _) = update(state, Msg::ProfileLoaded(Ok(reader())));
    let (state, _) = update(state, Msg::CollectionLoaded(Ok(vec![inferno()])));
    let (state, _) = update(state, Msg::StatsLoaded(Ok(stats())));
    state
}

#[test]
fn init_without_credential_becomes_guest() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Init { has_credential: false });

    assert_eq!(state.phase(), Phase::Guest);
    assert_eq!(effects, vec![Effect::RegisterListeners]);
    let view = state.view();
    assert!(!view.visibility.show_auth_required);
    assert!(view.visibility.show_guest_only);
    assert_eq!(view.collection, None);
    assert_eq!(view.stats, None);
}

#[test]
fn init_with_credential_checks_profile_first() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Init { has_credential: true });

    assert_eq!(state.phase(), Phase::CheckingAuth);
    assert_eq!(effects, vec![Effect::FetchProfile]);
}

#[test]
fn second_init_is_a_no_op() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Init { has_credential: true });
    let (state, effects) = update(state, Msg::Init { has_credential: true });
    assert_eq!(state.phase(), Phase::CheckingAuth);
    assert!(effects.is_empty());

    let (state, _) = update(AppState::new(), Msg::Init { has_credential: false });
    let (state, effects) = update(state, Msg::Init { has_credential: true });
    assert_eq!(state.phase(), Phase::Guest);
    assert!(effects.is_empty());
}

#[test]
fn dashboard_loads_in_order_after_profile() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Init { has_credential: true });

    let (state, effects) = update(state, Msg::ProfileLoaded(Ok(reader())));
    assert_eq!(state.phase(), Phase::LoadingCollection);
    assert_eq!(effects, vec![Effect::RegisterListeners, Effect::LoadCollection]);
    assert_eq!(state.view().visibility.user_name.as_deref(), Some("reader"));

    let (state, effects) = update(state, Msg::CollectionLoaded(Ok(vec![inferno()])));
    assert_eq!(state.phase(), Phase::LoadingStats);
    assert_eq!(effects, vec![Effect::LoadStats]);

    let (state, effects) = update(state, Msg::StatsLoaded(Ok(stats())));
    assert_eq!(state.phase(), Phase::Ready);
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.collection.map(|cards| cards.len()), Some(1));
    assert_eq!(view.stats.map(|stats| stats.cards[0].value), Some(90));
}

#[test]
fn collection_failure_does_not_block_stats() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Init { has_credential: true });
    let (state, _) = update(state, Msg::ProfileLoaded(Ok(reader())));

    let (state, effects) = update(
        state,
        Msg::CollectionLoaded(Err("HTTP 500: Internal Server Error".to_string())),
    );
    assert_eq!(effects, vec![Effect::LoadStats]);
    assert!(state.view().messages.is_empty());

    let (state, _) = update(state, Msg::StatsLoaded(Err("boom".to_string())));
    assert_eq!(state.phase(), Phase::Ready);
    assert_eq!(state.view().collection, None);
    assert_eq!(state.view().stats, None);
}

#[test]
fn profile_failure_clears_credential_and_falls_back_to_guest() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Init { has_credential: true });
    let (state, effects) = update(
        state,
        Msg::ProfileLoaded(Err("Could not validate credentials".to_string())),
    );

    assert_eq!(state.phase(), Phase::Guest);
    assert_eq!(state.user(), None);
    assert_eq!(effects, vec![Effect::ClearCredential, Effect::RegisterListeners]);
}

#[test]
fn reload_in_ready_does_not_reload_stats() {
    init_logging();
    let state = ready_state();
    let (state, effects) = update(state, Msg::CollectionLoaded(Ok(Vec::new())));

    assert_eq!(state.phase(), Phase::Ready);
    assert!(effects.is_empty());
    assert_eq!(state.view().collection, Some(Vec::new()));
}

#[test]
fn logout_clears_session_and_redirects() {
    init_logging();
    let (mut state, effects) = update(ready_state(), Msg::LogoutClicked);
    assert!(state.consume_dirty());

    assert_eq!(state.phase(), Phase::Guest);
    assert_eq!(state.user(), None);
    let view = state.view();
    assert_eq!(view.collection, None);
    assert_eq!(view.stats, None);
    assert_eq!(view.search, None);
    assert!(view.visibility.show_guest_only);
    assert_eq!(view.visibility.user_name, None);
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].kind, MessageKind::Info);
    assert_eq!(view.messages[0].text, LOGGED_OUT_MESSAGE);

    let id = view.messages[0].id;
    assert_eq!(
        effects,
        vec![
            Effect::ClearCredential,
            Effect::ExpireMessage {
                id,
                after: Duration::from_millis(5000),
            },
            Effect::Redirect {
                url: "/static/index.html".to_string(),
                after: Duration::from_millis(1000),
            },
        ]
    );
}

#[test]
fn late_dashboard_results_after_logout_are_dropped() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Init { has_credential: true });
    let (state, _) = update(state, Msg::ProfileLoaded(Ok(reader())));
    let (state, _) = update(state, Msg::LogoutClicked);

    let (state, effects) = update(state, Msg::CollectionLoaded(Ok(vec![inferno()])));
    assert!(effects.is_empty());
    assert_eq!(state.view().collection, None);
}

#[test]
fn stale_profile_result_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Init { has_credential: false });
    let (state, effects) = update(state, Msg::ProfileLoaded(Ok(reader())));

    assert_eq!(state.phase(), Phase::Guest);
    assert_eq!(state.user(), None);
    assert!(effects.is_empty());
}
