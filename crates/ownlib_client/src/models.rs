//! Typed payloads exchanged with the library service.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookFormat {
    #[serde(default)]
    pub id: Option<u64>,
    pub format_type: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub gutenberg_id: Option<u64>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub formats: Vec<BookFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserBookStatus {
    #[serde(rename = "Want to read")]
    WantToRead,
    #[serde(rename = "reading")]
    Reading,
    #[serde(rename = "read")]
    Read,
    #[serde(rename = "dropped")]
    Dropped,
}

impl UserBookStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserBookStatus::WantToRead => "Want to read",
            UserBookStatus::Reading => "reading",
            UserBookStatus::Read => "read",
            UserBookStatus::Dropped => "dropped",
        }
    }
}

impl fmt::Display for UserBookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A book as held in the user's collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBook {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub book_id: u64,
    pub status: UserBookStatus,
    #[serde(default)]
    pub bookmark_position: Option<i64>,
    #[serde(default)]
    pub is_local: bool,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub added_at: Option<String>,
    pub book: Book,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUserBook {
    pub book_id: u64,
    pub status: UserBookStatus,
    pub is_local: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark_position: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl NewUserBook {
    pub fn want_to_read(book_id: u64) -> Self {
        Self {
            book_id,
            status: UserBookStatus::WantToRead,
            is_local: false,
            bookmark_position: None,
            file_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub books: Vec<Book>,
    pub total: u64,
    pub page: u64,
    pub pages: u64,
    pub per_page: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Filters accepted by the catalogue listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub language: Option<String>,
    pub author: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl CatalogQuery {
    pub fn to_params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("skip", self.skip.map(|v| v.to_string())),
            ("limit", self.limit.map(|v| v.to_string())),
            ("search", self.search.clone()),
            ("language", self.language.clone()),
            ("author", self.author.clone()),
            ("sort_by", self.sort_by.clone()),
            ("sort_order", self.sort_order.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GutenbergAuthor {
    pub name: String,
}

/// A catalogue entry from the external Gutenberg index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GutenbergBook {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<GutenbergAuthor>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub formats: BTreeMap<String, String>,
}

impl GutenbergBook {
    pub fn cover_url(&self) -> Option<&str> {
        self.formats.get("image/jpeg").map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<GutenbergBook>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingStats {
    #[serde(default)]
    pub total_sessions: u64,
    pub total_reading_time: u64,
    pub total_pages_read: u64,
    pub completed_books: u64,
    #[serde(default)]
    pub dropped_books: u64,
    #[serde(default)]
    pub average_reading_speed: f64,
    pub reading_now: u64,
    pub want_to_read: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingHistoryEntry {
    pub date: String,
    pub book_id: u64,
    pub book_title: String,
    pub duration_minutes: u64,
    pub pages_read: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingProgress {
    pub book_id: u64,
    pub book_title: String,
    pub current_page: u64,
    pub total_pages: u64,
    pub percentage: f64,
    pub time_spent: u64,
    #[serde(default)]
    pub status: Option<UserBookStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkUpdate {
    pub user_book_id: u64,
    pub bookmark_position: i64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedBook {
    pub book_id: u64,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub pages: Option<u64>,
    pub user_book_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportStatistics {
    pub total_books: u64,
    pub imported_books: u64,
    pub created_books: u64,
    pub skipped_books: u64,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryImport {
    pub message: String,
    #[serde(default)]
    pub statistics: ImportStatistics,
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login/registration response; unknown fields are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
