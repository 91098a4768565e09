//! Element identifiers of the page the controller drives.

pub const CONTAINER_USER_BOOKS: &str = "user-books";
pub const CONTAINER_STATS: &str = "stats-container";
pub const CONTAINER_SEARCH: &str = "search-results";
pub const CONTAINER_MESSAGES: &str = "messages-container";

pub const BUTTON_LOGOUT: &str = "logout-btn";
pub const FORM_UPLOAD: &str = "upload-book-form";
pub const FORM_SEARCH: &str = "search-form";

/// Containers emptied when the dashboard is cleared.
pub const DASHBOARD_CONTAINERS: [&str; 3] = [CONTAINER_USER_BOOKS, CONTAINER_STATS, CONTAINER_SEARCH];
