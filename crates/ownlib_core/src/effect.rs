use std::time::Duration;

use crate::{MessageId, UploadRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchProfile,
    RegisterListeners,
    ClearCredential,
    LoadCollection,
    LoadStats,
    UploadBook(UploadRequest),
    ResetUploadForm,
    SearchBooks { query: String },
    /// Import the Gutenberg title, then add it to the collection.
    ImportAndAdd { gutenberg_id: u64 },
    ConfirmRemoval { book_id: u64 },
    RemoveFromCollection { book_id: u64 },
    ExpireMessage { id: MessageId, after: Duration },
    Redirect { url: String, after: Duration },
    Navigate { url: String },
    OpenExternal { url: String },
    Download { href: String, file_name: String },
}

impl Effect {
    /// Effects that talk to the library service and report back with a message.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Effect::FetchProfile
                | Effect::LoadCollection
                | Effect::LoadStats
                | Effect::UploadBook(_)
                | Effect::SearchBooks { .. }
                | Effect::ImportAndAdd { .. }
                | Effect::RemoveFromCollection { .. }
        )
    }
}
