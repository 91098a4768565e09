//! OwnLib client: session credential, request deduplication and typed access
//! to the library service.
mod api;
mod credential;
mod models;
mod persist;
mod registry;
mod session;
mod transport;
mod types;

pub use api::DEFAULT_HISTORY_DAYS;
pub use credential::{CredentialStore, MemoryCredentialStore, CREDENTIAL_KEY};
pub use models::{
    Book, BookFormat, BookmarkUpdate, CatalogPage, CatalogQuery, GutenbergAuthor, GutenbergBook,
    ImportStatistics, LibraryImport, MessageResponse, NewAccount, NewUserBook, ReadingHistoryEntry,
    ReadingProgress, ReadingStats, SearchPage, TokenResponse, UploadedBook, User, UserBook,
    UserBookStatus,
};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use registry::{Claim, InFlightRegistry, PendingOutcome};
pub use session::{
    ParamValue, Params, RequestOptions, SessionClient, LANGUAGE_CODE_MESSAGE, UPLOAD_BUSY_MESSAGE,
};
pub use transport::{ClientSettings, ReqwestTransport, Transport};
pub use types::{
    ApiError, FailureKind, FileUpload, FormPayload, FormValue, HttpMethod, HttpRequest,
    HttpResponse, RequestBody, RequestKey,
};
