use std::sync::Once;
use std::time::Duration;

use ownlib_core::{
    update, AppState, Effect, MessageKind, Msg, SearchHit, SearchResults, SelectedFile,
    UploadForm, UploadRequest, UserSnapshot, ADDED_MESSAGE, ENTER_QUERY_MESSAGE,
    IMPORTING_MESSAGE, REMOVED_MESSAGE, SELECT_FILE_MESSAGE, UPLOADED_MESSAGE,
    UPLOADING_MESSAGE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(ownlib_logging::initialize_for_tests);
}

const LIFETIME: Duration = Duration::from_millis(5000);

fn ready_state() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Init { has_credential: true });
    let (state, _) = update(
        state,
        Msg::ProfileLoaded(Ok(UserSnapshot {
            id: 5,
            username: "reader".to_string(),
        })),
    );
    let (state, _) = update(state, Msg::CollectionLoaded(Ok(Vec::new())));
    let (mut state, _) = update(state, Msg::StatsLoaded(Err("offline".to_string())));
    state.consume_dirty();
    state
}

fn last_message(state: &AppState) -> (MessageKind, String) {
    let view = state.view();
    let notice = view.messages.last().expect("a message");
    (notice.kind, notice.text.clone())
}

fn epub() -> SelectedFile {
    SelectedFile {
        name: "inferno.epub".to_string(),
        content_type: Some("application/epub+zip".to_string()),
        data: b"PK".to_vec(),
    }
}

fn upload_form(file: Option<SelectedFile>, language: Result<Option<String>, String>) -> UploadForm {
    UploadForm {
        file,
        title: " Inferno ".to_string(),
        author: String::new(),
        language,
    }
}

#[test]
fn upload_without_file_is_rejected_locally() {
    init_logging();
    let (state, effects) = update(
        ready_state(),
        Msg::UploadSubmitted(upload_form(None, Ok(Some("it".to_string())))),
    );

    assert_eq!(
        last_message(&state),
        (MessageKind::Error, SELECT_FILE_MESSAGE.to_string())
    );
    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], Effect::ExpireMessage { .. }));
}

#[test]
fn upload_with_bad_language_is_rejected_locally() {
    init_logging();
    let message = "The language code must consist of two lowercase Latin letters".to_string();
    let (state, effects) = update(
        ready_state(),
        Msg::UploadSubmitted(upload_form(Some(epub()), Err(message.clone()))),
    );

    assert_eq!(last_message(&state), (MessageKind::Error, message));
    assert!(!effects.iter().any(Effect::is_network));
}

#[test]
fn valid_upload_is_sent_and_reloads_on_success() {
    init_logging();
    let (state, effects) = update(
        ready_state(),
        Msg::UploadSubmitted(upload_form(Some(epub()), Ok(Some("it".to_string())))),
    );
    let id = state.view().messages[0].id;
    assert_eq!(
        last_message(&state),
        (MessageKind::Info, UPLOADING_MESSAGE.to_string())
    );
    assert_eq!(
        effects,
        vec![
            Effect::ExpireMessage { id, after: LIFETIME },
            Effect::UploadBook(UploadRequest {
                file: epub(),
                title: Some("Inferno".to_string()),
                author: None,
                language: Some("it".to_string()),
            }),
        ]
    );

    let (state, effects) = update(state, Msg::UploadFinished(Ok(())));
    assert_eq!(
        last_message(&state),
        (MessageKind::Success, UPLOADED_MESSAGE.to_string())
    );
    assert_eq!(&effects[1..], &[Effect::ResetUploadForm, Effect::LoadCollection]);
}

#[test]
fn failed_upload_surfaces_error_without_reload() {
    init_logging();
    let busy = "The upload is already in progress. Please wait a moment.".to_string();
    let (state, effects) = update(ready_state(), Msg::UploadFinished(Err(busy.clone())));

    assert_eq!(last_message(&state), (MessageKind::Error, busy));
    assert!(!effects.contains(&Effect::LoadCollection));
}

#[test]
fn empty_search_query_is_rejected() {
    init_logging();
    let (state, effects) = update(
        ready_state(),
        Msg::SearchSubmitted {
            query: "   ".to_string(),
        },
    );

    assert_eq!(
        last_message(&state),
        (MessageKind::Error, ENTER_QUERY_MESSAGE.to_string())
    );
    assert!(!effects.iter().any(Effect::is_network));
}

#[test]
fn search_results_are_stored() {
    init_logging();
    let (state, effects) = update(
        ready_state(),
        Msg::SearchSubmitted {
            query: " dante ".to_string(),
        },
    );
    assert_eq!(
        effects.last(),
        Some(&Effect::SearchBooks {
            query: "dante".to_string()
        })
    );

    let results = SearchResults {
        count: 1,
        hits: vec![SearchHit {
            gutenberg_id: 1001,
            title: "The Divine Comedy".to_string(),
            authors: vec!["Dante Alighieri".to_string()],
            languages: vec!["en".to_string()],
            cover_url: None,
        }],
    };
    let (state, effects) = update(state, Msg::SearchFinished(Ok(results)));
    assert!(effects.is_empty());
    let search = state.view().search.expect("search view");
    assert_eq!(search.count, 1);
    assert_eq!(search.hits[0].languages, "EN");
    assert_eq!(
        search.hits[0].gutenberg_url,
        "https://www.gutenberg.org/ebooks/1001"
    );
}

#[test]
fn add_to_collection_imports_then_reloads() {
    init_logging();
    let (state, effects) = update(
        ready_state(),
        Msg::AddToCollectionClicked { gutenberg_id: 1001 },
    );
    assert_eq!(
        last_message(&state),
        (MessageKind::Info, IMPORTING_MESSAGE.to_string())
    );
    assert_eq!(
        effects.last(),
        Some(&Effect::ImportAndAdd { gutenberg_id: 1001 })
    );

    let (state, effects) = update(state, Msg::AddToCollectionFinished(Ok(())));
    assert_eq!(
        last_message(&state),
        (MessageKind::Success, ADDED_MESSAGE.to_string())
    );
    assert_eq!(effects.last(), Some(&Effect::LoadCollection));
}

#[test]
fn remove_requires_confirmation() {
    init_logging();
    let state = ready_state();
    let (state, effects) = update(state, Msg::RemoveClicked { book_id: 12 });
    assert_eq!(effects, vec![Effect::ConfirmRemoval { book_id: 12 }]);

    let (state, effects) = update(
        state,
        Msg::RemoveConfirmed {
            book_id: 12,
            confirmed: false,
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().messages.is_empty());

    let (state, effects) = update(
        state,
        Msg::RemoveConfirmed {
            book_id: 12,
            confirmed: true,
        },
    );
    assert_eq!(effects, vec![Effect::RemoveFromCollection { book_id: 12 }]);

    let (state, effects) = update(state, Msg::RemoveFinished(Ok(())));
    assert_eq!(
        last_message(&state),
        (MessageKind::Success, REMOVED_MESSAGE.to_string())
    );
    assert_eq!(effects.last(), Some(&Effect::LoadCollection));
}

#[test]
fn item_navigation_targets() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::DetailsClicked { book_id: 12 });
    assert_eq!(
        effects,
        vec![Effect::Navigate {
            url: "/static/book-detail.html?id=12".to_string()
        }]
    );

    let (state, effects) = update(state, Msg::ReadOnlineClicked { gutenberg_id: 1001 });
    assert_eq!(
        effects,
        vec![Effect::OpenExternal {
            url: "https://www.gutenberg.org/ebooks/1001".to_string()
        }]
    );

    let (_state, effects) = update(
        state,
        Msg::DownloadClicked {
            file_path: "5/inferno.epub".to_string(),
            title: "Inferno".to_string(),
        },
    );
    assert_eq!(
        effects[0],
        Effect::Download {
            href: "/uploads/5/inferno.epub".to_string(),
            file_name: "Inferno".to_string(),
        }
    );
}

#[test]
fn messages_expire_by_id() {
    init_logging();
    let (state, _) = update(ready_state(), Msg::SearchSubmitted { query: String::new() });
    let (state, _) = update(state, Msg::AddToCollectionClicked { gutenberg_id: 7 });
    let view = state.view();
    assert_eq!(view.messages.len(), 2);
    let first = view.messages[0].id;

    let (mut state, effects) = update(state, Msg::MessageExpired { id: first });
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert_eq!(state.view().messages.len(), 1);
    assert_ne!(state.view().messages[0].id, first);

    let (mut state, _) = update(state, Msg::MessageExpired { id: first });
    assert!(!state.consume_dirty());
}

#[test]
fn flows_are_ignored_before_initialisation() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::SearchSubmitted {
            query: "dante".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().messages.is_empty());

    let (state, effects) = update(state, Msg::LogoutClicked);
    assert!(effects.is_empty());
    assert_eq!(state, AppState::new());
}
