use crate::{CollectionItem, Notice, Phase, SearchHit, SearchResults, StatsSnapshot, UserSnapshot};

pub const UNKNOWN_AUTHOR: &str = "Unknown author";
/// Page count used to scale the reading progress bar.
pub const PROGRESS_PAGE_SCALE: i64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub visibility: VisibilityPlan,
    /// `None` leaves the container empty; `Some(vec![])` shows the placeholder.
    pub collection: Option<Vec<BookCardView>>,
    pub search: Option<SearchView>,
    pub stats: Option<StatsView>,
    pub messages: Vec<Notice>,
    pub dirty: bool,
}

/// Which page regions are shown, and the name bound into user-name slots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibilityPlan {
    pub show_auth_required: bool,
    pub show_guest_only: bool,
    pub user_name: Option<String>,
}

pub fn visibility_plan(authenticated: bool, user: Option<&UserSnapshot>) -> VisibilityPlan {
    VisibilityPlan {
        show_auth_required: authenticated,
        show_guest_only: !authenticated,
        user_name: user
            .filter(|_| authenticated)
            .map(|user| user.username.clone()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cover {
    Image { src: String },
    /// First letter of the title, shown when there is no cover image.
    Initial(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookAction {
    Download { file_path: String, title: String },
    ReadOnline { gutenberg_id: u64 },
    Details { book_id: u64 },
    Remove { book_id: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub page: i64,
    pub width_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCardView {
    pub book_id: u64,
    pub title: String,
    pub author: String,
    pub language: Option<String>,
    pub status: String,
    pub status_class: String,
    pub cover: Cover,
    pub progress: Option<ProgressView>,
    pub actions: Vec<BookAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHitView {
    pub gutenberg_id: u64,
    pub title: String,
    pub authors: String,
    pub languages: String,
    pub cover: Cover,
    pub gutenberg_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub count: u64,
    pub hits: Vec<SearchHitView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub value: u64,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub cards: Vec<StatCard>,
}

/// Actions offered for a collection entry. A local file is downloadable,
/// otherwise a Gutenberg title can be read online; details and removal are
/// always present.
pub fn book_actions(item: &CollectionItem) -> Vec<BookAction> {
    let mut actions = Vec::with_capacity(3);
    match (&item.file_path, item.book.gutenberg_id) {
        (Some(file_path), _) if item.is_local && !file_path.is_empty() => {
            actions.push(BookAction::Download {
                file_path: file_path.clone(),
                title: item.book.title.clone(),
            });
        }
        (_, Some(gutenberg_id)) => actions.push(BookAction::ReadOnline { gutenberg_id }),
        _ => {}
    }
    actions.push(BookAction::Details {
        book_id: item.book.id,
    });
    actions.push(BookAction::Remove {
        book_id: item.book.id,
    });
    actions
}

pub(crate) fn book_card(item: &CollectionItem) -> BookCardView {
    let book = &item.book;
    BookCardView {
        book_id: book.id,
        title: book.title.clone(),
        author: book
            .author
            .clone()
            .filter(|author| !author.is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        language: book
            .language
            .as_deref()
            .filter(|language| !language.is_empty())
            .map(str::to_uppercase),
        status: item.status.clone(),
        status_class: item.status.to_lowercase().replace(' ', "-"),
        cover: cover(book.cover_url.as_deref(), &book.title),
        progress: item
            .bookmark_position
            .filter(|page| *page > 0)
            .map(|page| ProgressView {
                page,
                width_percent: (page.min(PROGRESS_PAGE_SCALE) * 100 / PROGRESS_PAGE_SCALE) as u32,
            }),
        actions: book_actions(item),
    }
}

pub(crate) fn search_view(results: &SearchResults) -> SearchView {
    SearchView {
        count: results.count,
        hits: results.hits.iter().map(search_hit).collect(),
    }
}

fn search_hit(hit: &SearchHit) -> SearchHitView {
    let authors = hit.authors.join(", ");
    SearchHitView {
        gutenberg_id: hit.gutenberg_id,
        title: hit.title.clone(),
        authors: if authors.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            authors
        },
        languages: hit.languages.join(", ").to_uppercase(),
        cover: cover(hit.cover_url.as_deref(), &hit.title),
        gutenberg_url: gutenberg_url(hit.gutenberg_id),
    }
}

pub(crate) fn stats_view(stats: &StatsSnapshot) -> StatsView {
    StatsView {
        cards: vec![
            StatCard {
                value: stats.total_reading_time,
                label: "Minutes of reading",
            },
            StatCard {
                value: stats.total_pages_read,
                label: "Pages read",
            },
            StatCard {
                value: stats.completed_books,
                label: "Completed books",
            },
            StatCard {
                value: stats.reading_now,
                label: "Reading now",
            },
            StatCard {
                value: stats.want_to_read,
                label: "Want to read",
            },
        ],
    }
}

fn cover(url: Option<&str>, title: &str) -> Cover {
    match url.filter(|url| !url.is_empty()) {
        Some(src) => Cover::Image {
            src: src.to_string(),
        },
        None => Cover::Initial(title.chars().next().map(String::from).unwrap_or_default()),
    }
}

pub fn book_details_href(book_id: u64) -> String {
    format!("/static/book-detail.html?id={book_id}")
}

pub fn download_href(file_path: &str) -> String {
    format!("/uploads/{file_path}")
}

pub fn gutenberg_url(gutenberg_id: u64) -> String {
    format!("https://www.gutenberg.org/ebooks/{gutenberg_id}")
}
