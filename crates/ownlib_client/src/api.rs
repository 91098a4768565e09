//! Typed operations of the library service, one call per logical operation.

use serde_json::json;

use crate::session::{decode_payload, ParamValue};
use crate::{
    ApiError, Book, BookmarkUpdate, CatalogPage, CatalogQuery, FileUpload, FormPayload,
    LibraryImport, MessageResponse, NewAccount, NewUserBook, ReadingHistoryEntry,
    ReadingProgress, ReadingStats, SearchPage, SessionClient, TokenResponse, UploadedBook, User,
    UserBook, UserBookStatus,
};

pub const DEFAULT_HISTORY_DAYS: u32 = 30;

impl SessionClient {
    pub async fn register(&self, account: &NewAccount) -> Result<TokenResponse, ApiError> {
        decode_payload(self.post("/auth/register", account).await?)
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<MessageResponse, ApiError> {
        decode_payload(
            self.post("/auth/forgot-password", &json!({ "email": email }))
                .await?,
        )
    }

    pub async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let body = json!({ "email": email, "new_password": new_password });
        decode_payload(self.post("/auth/reset-password", &body).await?)
    }

    /// Profile of the authenticated user. Concurrent calls share one request.
    pub async fn get_current_user(&self) -> Result<User, ApiError> {
        decode_payload(self.get("/users/me", &[]).await?)
    }

    pub async fn get_books(&self, query: &CatalogQuery) -> Result<CatalogPage, ApiError> {
        let params: Vec<_> = query
            .to_params()
            .into_iter()
            .map(|(name, value)| (name, value.map(ParamValue::from)))
            .collect();
        decode_payload(self.get("/books/", &params).await?)
    }

    pub async fn get_book(&self, book_id: u64) -> Result<Book, ApiError> {
        decode_payload(self.get(&format!("/books/{book_id}"), &[]).await?)
    }

    pub async fn search_books(
        &self,
        query: &str,
        languages: Option<&str>,
        page: u32,
    ) -> Result<SearchPage, ApiError> {
        let params = [
            ("query", Some(ParamValue::from(query))),
            ("page", Some(ParamValue::from(page))),
            ("languages", languages.map(ParamValue::from)),
        ];
        decode_payload(self.get("/books/search", &params).await?)
    }

    pub async fn get_user_books(
        &self,
        status: Option<UserBookStatus>,
    ) -> Result<Vec<UserBook>, ApiError> {
        let params = [("status", status.map(|s| ParamValue::from(s.as_str())))];
        decode_payload(self.get("/books/user-books/", &params).await?)
    }

    pub async fn add_book_to_collection(
        &self,
        book_id: u64,
        entry: &NewUserBook,
    ) -> Result<UserBook, ApiError> {
        decode_payload(
            self.post(&format!("/books/user-books/{book_id}"), entry)
                .await?,
        )
    }

    pub async fn remove_book_from_collection(&self, book_id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/books/user-books/{book_id}")).await?;
        Ok(())
    }

    /// Imports a Gutenberg title into the local catalogue and returns it.
    pub async fn import_gutenberg_book(&self, gutenberg_id: u64) -> Result<Book, ApiError> {
        decode_payload(
            self.get(&format!("/books/gutenberg/{gutenberg_id}"), &[])
                .await?,
        )
    }

    pub async fn upload_book_file(
        &self,
        file: FileUpload,
        title: Option<&str>,
        author: Option<&str>,
        language: Option<&str>,
    ) -> Result<UploadedBook, ApiError> {
        let mut form = FormPayload::new().file("file", file);
        for (name, value) in [("title", title), ("author", author), ("language", language)] {
            if let Some(value) = value.filter(|value| !value.is_empty()) {
                form = form.text(name, value);
            }
        }
        decode_payload(self.upload_file("/files/upload-book", form).await?)
    }

    pub async fn delete_book_file(&self, user_book_id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/files/books/{user_book_id}")).await?;
        Ok(())
    }

    pub async fn get_reading_stats(&self) -> Result<ReadingStats, ApiError> {
        decode_payload(self.get("/stats/reading", &[]).await?)
    }

    pub async fn get_reading_history(&self, days: u32) -> Result<Vec<ReadingHistoryEntry>, ApiError> {
        let params = [("days", Some(ParamValue::from(days)))];
        decode_payload(self.get("/stats/reading/history", &params).await?)
    }

    pub async fn get_reading_progress(&self, user_book_id: u64) -> Result<ReadingProgress, ApiError> {
        decode_payload(
            self.get(&format!("/stats/reading/progress/{user_book_id}"), &[])
                .await?,
        )
    }

    pub async fn update_bookmark(
        &self,
        user_book_id: u64,
        position: i64,
    ) -> Result<BookmarkUpdate, ApiError> {
        decode_payload(
            self.put(
                &format!("/reading/bookmark/{user_book_id}"),
                &json!({ "position": position }),
            )
            .await?,
        )
    }

    pub async fn import_library(&self, file: FileUpload) -> Result<LibraryImport, ApiError> {
        let form = FormPayload::new().file("file", file);
        decode_payload(
            self.upload_file("/import-export/import-library", form)
                .await?,
        )
    }
}
