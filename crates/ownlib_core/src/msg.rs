use crate::{
    CollectionItem, MessageId, SearchResults, StatsSnapshot, UploadForm, UserSnapshot,
};

/// Failed outcomes arrive as the message to show or log.
pub type Outcome<T> = Result<T, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page finished loading; `has_credential` reports whether a session
    /// credential is present.
    Init { has_credential: bool },
    /// Result of the initial profile check.
    ProfileLoaded(Outcome<UserSnapshot>),
    CollectionLoaded(Outcome<Vec<CollectionItem>>),
    StatsLoaded(Outcome<StatsSnapshot>),
    LogoutClicked,
    UploadSubmitted(UploadForm),
    UploadFinished(Outcome<()>),
    SearchSubmitted { query: String },
    SearchFinished(Outcome<SearchResults>),
    /// User asked to add a Gutenberg title to the collection.
    AddToCollectionClicked { gutenberg_id: u64 },
    AddToCollectionFinished(Outcome<()>),
    RemoveClicked { book_id: u64 },
    /// Answer of the page surface to the removal confirmation.
    RemoveConfirmed { book_id: u64, confirmed: bool },
    RemoveFinished(Outcome<()>),
    DetailsClicked { book_id: u64 },
    DownloadClicked { file_path: String, title: String },
    ReadOnlineClicked { gutenberg_id: u64 },
    MessageExpired { id: MessageId },
    /// Fallback for placeholder wiring.
    NoOp,
}
