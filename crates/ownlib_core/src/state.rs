use std::time::Duration;

use crate::view_model::{self, AppViewModel};

pub type MessageId = u64;

/// Lifecycle of one page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    CheckingAuth,
    Guest,
    LoadingCollection,
    LoadingStats,
    Ready,
}

impl Phase {
    pub fn is_initialized(self) -> bool {
        !matches!(self, Phase::Uninitialized | Phase::CheckingAuth)
    }

    pub fn is_authenticated(self) -> bool {
        matches!(
            self,
            Phase::LoadingCollection | Phase::LoadingStats | Phase::Ready
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

/// Transient message shown in the messages area until it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: MessageId,
    pub kind: MessageKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSnapshot {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSnapshot {
    pub id: u64,
    pub title: String,
    pub author: Option<String>,
    pub language: Option<String>,
    pub cover_url: Option<String>,
    pub gutenberg_id: Option<u64>,
}

/// One entry of the user's collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionItem {
    pub user_book_id: u64,
    pub status: String,
    pub bookmark_position: Option<i64>,
    pub is_local: bool,
    pub file_path: Option<String>,
    pub book: BookSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub gutenberg_id: u64,
    pub title: String,
    pub authors: Vec<String>,
    pub languages: Vec<String>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub count: u64,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub total_reading_time: u64,
    pub total_pages_read: u64,
    pub completed_books: u64,
    pub reading_now: u64,
    pub want_to_read: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Submitted upload form. The language has already been run through the
/// language-code check by the shell: `Err` carries the validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub file: Option<SelectedFile>,
    pub title: String,
    pub author: String,
    pub language: Result<Option<String>, String>,
}

/// Validated upload, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: SelectedFile,
    pub title: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
}

/// Delays and destinations that shape the page lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTiming {
    pub message_lifetime: Duration,
    pub redirect_delay: Duration,
    pub landing_page: String,
}

impl Default for PageTiming {
    fn default() -> Self {
        Self {
            message_lifetime: Duration::from_millis(5000),
            redirect_delay: Duration::from_millis(1000),
            landing_page: "/static/index.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: Phase,
    timing: PageTiming,
    user: Option<UserSnapshot>,
    collection: Option<Vec<CollectionItem>>,
    stats: Option<StatsSnapshot>,
    search: Option<SearchResults>,
    messages: Vec<Notice>,
    next_message_id: MessageId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timing(timing: PageTiming) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            visibility: view_model::visibility_plan(
                self.phase.is_authenticated(),
                self.user.as_ref(),
            ),
            collection: self
                .collection
                .as_ref()
                .map(|items| items.iter().map(view_model::book_card).collect()),
            search: self.search.as_ref().map(view_model::search_view),
            stats: self.stats.as_ref().map(view_model::stats_view),
            messages: self.messages.clone(),
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn user(&self) -> Option<&UserSnapshot> {
        self.user.as_ref()
    }

    pub fn timing(&self) -> &PageTiming {
        &self.timing
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.dirty = true;
        }
    }

    pub(crate) fn set_user(&mut self, user: Option<UserSnapshot>) {
        self.user = user;
        self.dirty = true;
    }

    pub(crate) fn set_collection(&mut self, items: Vec<CollectionItem>) {
        self.collection = Some(items);
        self.dirty = true;
    }

    pub(crate) fn set_stats(&mut self, stats: StatsSnapshot) {
        self.stats = Some(stats);
        self.dirty = true;
    }

    pub(crate) fn set_search(&mut self, results: SearchResults) {
        self.search = Some(results);
        self.dirty = true;
    }

    pub(crate) fn clear_dashboard(&mut self) {
        self.collection = None;
        self.stats = None;
        self.search = None;
        self.dirty = true;
    }

    pub(crate) fn push_message(&mut self, kind: MessageKind, text: impl Into<String>) -> MessageId {
        self.next_message_id += 1;
        let id = self.next_message_id;
        self.messages.push(Notice {
            id,
            kind,
            text: text.into(),
        });
        self.dirty = true;
        id
    }

    pub(crate) fn expire_message(&mut self, id: MessageId) -> bool {
        let before = self.messages.len();
        self.messages.retain(|notice| notice.id != id);
        let removed = self.messages.len() != before;
        self.dirty |= removed;
        removed
    }
}
