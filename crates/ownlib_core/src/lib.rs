//! OwnLib core: pure page state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Msg, Outcome};
pub use state::{
    AppState, BookSnapshot, CollectionItem, MessageId, MessageKind, Notice, PageTiming, Phase,
    SearchHit, SearchResults, SelectedFile, StatsSnapshot, UploadForm, UploadRequest,
    UserSnapshot,
};
pub use update::{
    update, ADDED_MESSAGE, DOWNLOADING_MESSAGE, ENTER_QUERY_MESSAGE, IMPORTING_MESSAGE,
    LOGGED_OUT_MESSAGE, REMOVED_MESSAGE, SEARCHING_MESSAGE, SELECT_FILE_MESSAGE,
    UPLOADED_MESSAGE, UPLOADING_MESSAGE,
};
pub use view_model::{
    book_actions, book_details_href, download_href, gutenberg_url, visibility_plan,
    AppViewModel, BookAction, BookCardView, Cover, ProgressView, SearchHitView, SearchView,
    StatCard, StatsView, VisibilityPlan, PROGRESS_PAGE_SCALE, UNKNOWN_AUTHOR,
};
