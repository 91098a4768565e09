use ownlib_logging::{ownlib_debug, ownlib_info, ownlib_warn};

use crate::msg::Outcome;
use crate::view_model::{book_details_href, download_href, gutenberg_url};
use crate::{AppState, Effect, MessageKind, Msg, Phase, UploadForm, UploadRequest};

pub const LOGGED_OUT_MESSAGE: &str = "You are logged out";
pub const SELECT_FILE_MESSAGE: &str = "Select a file to upload";
pub const ENTER_QUERY_MESSAGE: &str = "Enter a search query";
pub const UPLOADING_MESSAGE: &str = "Uploading a file...";
pub const UPLOADED_MESSAGE: &str = "The file was successfully uploaded!";
pub const SEARCHING_MESSAGE: &str = "Searching...";
pub const IMPORTING_MESSAGE: &str = "Book importing...";
pub const ADDED_MESSAGE: &str = "Book successfully added to the collection!";
pub const REMOVED_MESSAGE: &str = "Book removed from the collection";
pub const DOWNLOADING_MESSAGE: &str = "Downloading started";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Init { has_credential } => {
            if state.phase() != Phase::Uninitialized {
                ownlib_debug!("Page controller already initialised");
                return (state, Vec::new());
            }
            if has_credential {
                state.set_phase(Phase::CheckingAuth);
                vec![Effect::FetchProfile]
            } else {
                state.set_phase(Phase::Guest);
                vec![Effect::RegisterListeners]
            }
        }
        Msg::ProfileLoaded(result) => {
            if state.phase() != Phase::CheckingAuth {
                return (state, Vec::new());
            }
            match result {
                Ok(user) => {
                    ownlib_info!("Authenticated as {}", user.username);
                    state.set_user(Some(user));
                    state.set_phase(Phase::LoadingCollection);
                    vec![Effect::RegisterListeners, Effect::LoadCollection]
                }
                Err(message) => {
                    ownlib_warn!("Auth check failed: {}", message);
                    state.set_user(None);
                    state.set_phase(Phase::Guest);
                    vec![Effect::ClearCredential, Effect::RegisterListeners]
                }
            }
        }
        Msg::CollectionLoaded(result) => {
            if !state.phase().is_authenticated() {
                return (state, Vec::new());
            }
            match result {
                Ok(items) => state.set_collection(items),
                Err(message) => ownlib_warn!("Error loading user books: {}", message),
            }
            // Statistics follow the first collection load whatever its outcome.
            if state.phase() == Phase::LoadingCollection {
                state.set_phase(Phase::LoadingStats);
                vec![Effect::LoadStats]
            } else {
                Vec::new()
            }
        }
        Msg::StatsLoaded(result) => {
            if !state.phase().is_authenticated() {
                return (state, Vec::new());
            }
            match result {
                Ok(stats) => state.set_stats(stats),
                Err(message) => ownlib_warn!("Error loading stats: {}", message),
            }
            if state.phase() == Phase::LoadingStats {
                state.set_phase(Phase::Ready);
                ownlib_info!("Page controller ready");
            }
            Vec::new()
        }
        Msg::LogoutClicked => {
            if !state.phase().is_authenticated() {
                return (state, Vec::new());
            }
            ownlib_info!("Logging out");
            state.set_user(None);
            state.set_phase(Phase::Guest);
            state.clear_dashboard();
            let mut effects = vec![Effect::ClearCredential];
            notify(&mut state, &mut effects, MessageKind::Info, LOGGED_OUT_MESSAGE);
            effects.push(Effect::Redirect {
                url: state.timing().landing_page.clone(),
                after: state.timing().redirect_delay,
            });
            effects
        }
        msg if !state.phase().is_initialized() => {
            ownlib_debug!("Ignoring {:?} before initialisation", msg);
            Vec::new()
        }
        Msg::UploadSubmitted(form) => {
            let mut effects = Vec::new();
            match validate_upload(form) {
                Ok(request) => {
                    notify(&mut state, &mut effects, MessageKind::Info, UPLOADING_MESSAGE);
                    effects.push(Effect::UploadBook(request));
                }
                Err(message) => notify(&mut state, &mut effects, MessageKind::Error, message),
            }
            effects
        }
        Msg::UploadFinished(result) => {
            let mut effects = Vec::new();
            if settle(&mut state, &mut effects, result, UPLOADED_MESSAGE) {
                effects.push(Effect::ResetUploadForm);
                effects.push(Effect::LoadCollection);
            }
            effects
        }
        Msg::SearchSubmitted { query } => {
            let mut effects = Vec::new();
            let query = query.trim();
            if query.is_empty() {
                notify(&mut state, &mut effects, MessageKind::Error, ENTER_QUERY_MESSAGE);
            } else {
                notify(&mut state, &mut effects, MessageKind::Info, SEARCHING_MESSAGE);
                effects.push(Effect::SearchBooks {
                    query: query.to_string(),
                });
            }
            effects
        }
        Msg::SearchFinished(result) => {
            let mut effects = Vec::new();
            match result {
                Ok(results) => {
                    ownlib_debug!("Search returned {} results", results.count);
                    state.set_search(results);
                }
                Err(message) => notify(&mut state, &mut effects, MessageKind::Error, message),
            }
            effects
        }
        Msg::AddToCollectionClicked { gutenberg_id } => {
            let mut effects = Vec::new();
            notify(&mut state, &mut effects, MessageKind::Info, IMPORTING_MESSAGE);
            effects.push(Effect::ImportAndAdd { gutenberg_id });
            effects
        }
        Msg::AddToCollectionFinished(result) => {
            let mut effects = Vec::new();
            if settle(&mut state, &mut effects, result, ADDED_MESSAGE) {
                effects.push(Effect::LoadCollection);
            }
            effects
        }
        Msg::RemoveClicked { book_id } => vec![Effect::ConfirmRemoval { book_id }],
        Msg::RemoveConfirmed { book_id, confirmed } => {
            if confirmed {
                vec![Effect::RemoveFromCollection { book_id }]
            } else {
                Vec::new()
            }
        }
        Msg::RemoveFinished(result) => {
            let mut effects = Vec::new();
            if settle(&mut state, &mut effects, result, REMOVED_MESSAGE) {
                effects.push(Effect::LoadCollection);
            }
            effects
        }
        Msg::DetailsClicked { book_id } => vec![Effect::Navigate {
            url: book_details_href(book_id),
        }],
        Msg::DownloadClicked { file_path, title } => {
            let mut effects = vec![Effect::Download {
                href: download_href(&file_path),
                file_name: title,
            }];
            notify(&mut state, &mut effects, MessageKind::Info, DOWNLOADING_MESSAGE);
            effects
        }
        Msg::ReadOnlineClicked { gutenberg_id } => vec![Effect::OpenExternal {
            url: gutenberg_url(gutenberg_id),
        }],
        Msg::MessageExpired { id } => {
            state.expire_message(id);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn notify(
    state: &mut AppState,
    effects: &mut Vec<Effect>,
    kind: MessageKind,
    text: impl Into<String>,
) {
    let id = state.push_message(kind, text);
    effects.push(Effect::ExpireMessage {
        id,
        after: state.timing().message_lifetime,
    });
}

/// Surfaces the outcome of a mutating flow; returns whether it succeeded.
fn settle(
    state: &mut AppState,
    effects: &mut Vec<Effect>,
    result: Outcome<()>,
    success: &str,
) -> bool {
    match result {
        Ok(()) => {
            notify(state, effects, MessageKind::Success, success);
            true
        }
        Err(message) => {
            notify(state, effects, MessageKind::Error, message);
            false
        }
    }
}

fn validate_upload(form: UploadForm) -> Result<UploadRequest, String> {
    let file = form
        .file
        .filter(|file| !file.name.is_empty())
        .ok_or_else(|| SELECT_FILE_MESSAGE.to_string())?;
    let language = form.language?;
    Ok(UploadRequest {
        file,
        title: non_empty(form.title),
        author: non_empty(form.author),
        language,
    })
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
