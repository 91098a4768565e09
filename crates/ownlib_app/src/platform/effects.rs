use bytes::Bytes;
use ownlib_client::{ApiError, FileUpload, NewUserBook, SessionClient};
use ownlib_core::{Effect, Msg, UploadRequest};
use ownlib_logging::{ownlib_debug, ownlib_info, ownlib_warn};
use tokio::sync::mpsc;

use super::convert;

/// What a spawned effect reports back to the controller.
#[derive(Debug)]
pub enum Completion {
    /// Settlement of a network effect.
    Network(Msg),
    /// A timer fired.
    Timer(Msg),
    /// The redirect delay elapsed.
    Redirect(String),
}

/// Runs the asynchronous effects against the session client. Each effect is
/// one spawned task that reports a single [`Completion`].
pub struct EffectRunner {
    client: SessionClient,
    tx: mpsc::UnboundedSender<Completion>,
}

impl EffectRunner {
    pub fn new(client: SessionClient, tx: mpsc::UnboundedSender<Completion>) -> Self {
        Self { client, tx }
    }

    /// Spawns `effect`. Returns `false` for effects the runner does not own.
    pub fn spawn(&self, effect: Effect) -> bool {
        let client = self.client.clone();
        let tx = self.tx.clone();
        match effect {
            Effect::FetchProfile => {
                tokio::spawn(async move {
                    let result = client.get_current_user().await;
                    report(&tx, Msg::ProfileLoaded(outcome(result.map(convert::user_snapshot))));
                });
            }
            Effect::LoadCollection => {
                tokio::spawn(async move {
                    let result = client.get_user_books(None).await;
                    report(&tx, Msg::CollectionLoaded(outcome(result.map(convert::collection))));
                });
            }
            Effect::LoadStats => {
                tokio::spawn(async move {
                    let result = client.get_reading_stats().await;
                    report(&tx, Msg::StatsLoaded(outcome(result.map(convert::stats_snapshot))));
                });
            }
            Effect::UploadBook(request) => {
                tokio::spawn(async move {
                    let result = upload(&client, request).await;
                    report(&tx, Msg::UploadFinished(outcome(result)));
                });
            }
            Effect::SearchBooks { query } => {
                tokio::spawn(async move {
                    let result = client.search_books(&query, None, 1).await;
                    report(&tx, Msg::SearchFinished(outcome(result.map(convert::search_results))));
                });
            }
            Effect::ImportAndAdd { gutenberg_id } => {
                tokio::spawn(async move {
                    let result = import_and_add(&client, gutenberg_id).await;
                    report(&tx, Msg::AddToCollectionFinished(outcome(result)));
                });
            }
            Effect::RemoveFromCollection { book_id } => {
                tokio::spawn(async move {
                    let result = client.remove_book_from_collection(book_id).await;
                    report(&tx, Msg::RemoveFinished(outcome(result)));
                });
            }
            Effect::ExpireMessage { id, after } => {
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = tx.send(Completion::Timer(Msg::MessageExpired { id }));
                });
            }
            Effect::Redirect { url, after } => {
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = tx.send(Completion::Redirect(url));
                });
            }
            _ => return false,
        }
        true
    }
}

fn report(tx: &mpsc::UnboundedSender<Completion>, msg: Msg) {
    if tx.send(Completion::Network(msg)).is_err() {
        ownlib_debug!("Controller gone; dropping completion");
    }
}

fn outcome<T>(result: Result<T, ApiError>) -> Result<T, String> {
    result.map_err(|err| {
        ownlib_warn!("Request failed ({}): {}", err.kind, err.message);
        err.message
    })
}

async fn upload(client: &SessionClient, request: UploadRequest) -> Result<(), ApiError> {
    let UploadRequest {
        file,
        title,
        author,
        language,
    } = request;
    let mut upload = FileUpload::new(file.name, Bytes::from(file.data));
    if let Some(content_type) = file.content_type {
        upload = upload.with_content_type(content_type);
    }
    let uploaded = client
        .upload_book_file(
            upload,
            title.as_deref(),
            author.as_deref(),
            language.as_deref(),
        )
        .await?;
    ownlib_info!("Uploaded '{}' as book {}", uploaded.title, uploaded.book_id);
    Ok(())
}

/// Imports the Gutenberg title, then adds the imported book to the collection.
async fn import_and_add(client: &SessionClient, gutenberg_id: u64) -> Result<(), ApiError> {
    let book = client.import_gutenberg_book(gutenberg_id).await?;
    client
        .add_book_to_collection(book.id, &NewUserBook::want_to_read(book.id))
        .await?;
    ownlib_info!("Added '{}' to the collection", book.title);
    Ok(())
}
