//! Client payloads mapped onto the reducer's snapshot types.

use ownlib_client::{GutenbergBook, ReadingStats, SearchPage, User, UserBook};
use ownlib_core::{
    BookSnapshot, CollectionItem, SearchHit, SearchResults, StatsSnapshot, UserSnapshot,
};

pub fn user_snapshot(user: User) -> UserSnapshot {
    UserSnapshot {
        id: user.id,
        username: user.username,
    }
}

pub fn collection_item(entry: UserBook) -> CollectionItem {
    let book = entry.book;
    CollectionItem {
        user_book_id: entry.id,
        status: entry.status.to_string(),
        bookmark_position: entry.bookmark_position,
        is_local: entry.is_local,
        file_path: entry.file_path,
        book: BookSnapshot {
            id: book.id,
            title: book.title,
            author: book.author,
            language: book.language,
            cover_url: book.cover_url,
            gutenberg_id: book.gutenberg_id,
        },
    }
}

pub fn collection(entries: Vec<UserBook>) -> Vec<CollectionItem> {
    entries.into_iter().map(collection_item).collect()
}

fn search_hit(book: GutenbergBook) -> SearchHit {
    SearchHit {
        gutenberg_id: book.id,
        cover_url: book.cover_url().map(str::to_string),
        authors: book.authors.into_iter().map(|author| author.name).collect(),
        languages: book.languages,
        title: book.title,
    }
}

pub fn search_results(page: SearchPage) -> SearchResults {
    SearchResults {
        count: page.count,
        hits: page.results.into_iter().map(search_hit).collect(),
    }
}

pub fn stats_snapshot(stats: ReadingStats) -> StatsSnapshot {
    StatsSnapshot {
        total_reading_time: stats.total_reading_time,
        total_pages_read: stats.total_pages_read,
        completed_books: stats.completed_books,
        reading_now: stats.reading_now,
        want_to_read: stats.want_to_read,
    }
}
