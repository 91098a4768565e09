//! Markup for the dashboard containers. All text taken from payloads is
//! escaped; actions are expressed as `data-action` attributes that the page
//! maps back to controller events.

use std::fmt::Write;

use ownlib_core::{
    BookAction, BookCardView, Cover, Notice, SearchHitView, SearchView, StatsView,
};

pub const EMPTY_COLLECTION_PLACEHOLDER: &str = "You don't have any books in your collection yet";
pub const NO_RESULTS_PLACEHOLDER: &str = "Nothing found";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn placeholder(text: &str) -> String {
    format!("<p class=\"text-center\">{}</p>", escape(text))
}

/// `None` clears the container.
pub fn collection_html(cards: Option<&[BookCardView]>) -> String {
    match cards {
        None => String::new(),
        Some([]) => placeholder(EMPTY_COLLECTION_PLACEHOLDER),
        Some(cards) => {
            let mut html = String::from("<div class=\"book-grid\">");
            for card in cards {
                html.push_str(&book_card(card));
            }
            html.push_str("</div>");
            html
        }
    }
}

fn book_card(card: &BookCardView) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<div class=\"book-card\" data-book-id=\"{}\">{}<div class=\"book-info\">\
         <h3 class=\"book-title\">{}</h3><p class=\"book-author\">{}</p>",
        card.book_id,
        cover(&card.cover, &card.title),
        escape(&card.title),
        escape(&card.author),
    );
    if let Some(language) = &card.language {
        let _ = write!(
            html,
            "<p class=\"book-language\">Language: {}</p>",
            escape(language)
        );
    }
    let _ = write!(
        html,
        "<div class=\"book-status {}\">{}</div><div class=\"book-actions\">",
        escape(&card.status_class),
        escape(&card.status),
    );
    for action in &card.actions {
        html.push_str(&action_button(action));
    }
    html.push_str("</div>");
    if let Some(progress) = &card.progress {
        let _ = write!(
            html,
            "<div class=\"book-progress\"><div class=\"progress-bar\">\
             <div class=\"progress-fill\" style=\"width: {}%\"></div></div>\
             <small>Page {}</small></div>",
            progress.width_percent, progress.page,
        );
    }
    html.push_str("</div></div>");
    html
}

fn action_button(action: &BookAction) -> String {
    match action {
        BookAction::Download { file_path, title } => format!(
            "<button class=\"btn btn-primary btn-sm\" data-action=\"download\" \
             data-file-path=\"{}\" data-title=\"{}\">📥 Download</button>",
            escape(file_path),
            escape(title)
        ),
        BookAction::ReadOnline { gutenberg_id } => format!(
            "<button class=\"btn btn-primary btn-sm\" data-action=\"read-online\" \
             data-gutenberg-id=\"{gutenberg_id}\">🌐 Read online</button>"
        ),
        BookAction::Details { book_id } => format!(
            "<button class=\"btn btn-secondary btn-sm\" data-action=\"details\" \
             data-book-id=\"{book_id}\">👁️ Details</button>"
        ),
        BookAction::Remove { book_id } => format!(
            "<button class=\"btn btn-danger btn-sm\" data-action=\"remove\" \
             data-book-id=\"{book_id}\">🗑️ Delete</button>"
        ),
    }
}

fn cover(cover: &Cover, title: &str) -> String {
    match cover {
        Cover::Image { src } => format!(
            "<div class=\"book-cover\"><img src=\"{}\" alt=\"{}\" class=\"book-cover\"></div>",
            escape(src),
            escape(title)
        ),
        Cover::Initial(initial) => format!(
            "<div class=\"book-cover\"><div class=\"book-cover-placeholder\">{}</div></div>",
            escape(initial)
        ),
    }
}

pub fn search_html(search: Option<&SearchView>) -> String {
    let Some(search) = search else {
        return String::new();
    };
    if search.hits.is_empty() {
        return placeholder(NO_RESULTS_PLACEHOLDER);
    }
    let mut html = format!(
        "<div class=\"search-meta\"><p>Found {} results</p></div><div class=\"book-grid\">",
        search.count
    );
    for hit in &search.hits {
        html.push_str(&search_hit(hit));
    }
    html.push_str("</div>");
    html
}

fn search_hit(hit: &SearchHitView) -> String {
    format!(
        "<div class=\"book-card\">{}<div class=\"book-info\">\
         <h3 class=\"book-title\">{}</h3><p class=\"book-author\">{}</p>\
         <p class=\"book-language\">{}</p><div class=\"book-actions\">\
         <button class=\"btn btn-primary btn-sm\" data-action=\"add-to-collection\" \
         data-gutenberg-id=\"{}\">➕ Add to collection</button>\
         <a class=\"btn btn-secondary btn-sm\" href=\"{}\" target=\"_blank\">🌐 Read on Gutenberg</a>\
         </div></div></div>",
        cover(&hit.cover, &hit.title),
        escape(&hit.title),
        escape(&hit.authors),
        escape(&hit.languages),
        hit.gutenberg_id,
        escape(&hit.gutenberg_url),
    )
}

pub fn stats_html(stats: Option<&StatsView>) -> String {
    let Some(stats) = stats else {
        return String::new();
    };
    let mut html = String::from("<div class=\"stats-grid\">");
    for card in &stats.cards {
        let _ = write!(
            html,
            "<div class=\"stats-card\"><div class=\"stats-value\">{}</div>\
             <div class=\"stats-label\">{}</div></div>",
            card.value,
            escape(card.label)
        );
    }
    html.push_str("</div>");
    html
}

pub fn messages_html(messages: &[Notice]) -> String {
    messages
        .iter()
        .map(|notice| {
            format!(
                "<div class=\"alert alert-{}\" data-message-id=\"{}\">{}</div>",
                notice.kind.as_str(),
                notice.id,
                escape(&notice.text)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn empty_regions_render_placeholders() {
        assert_eq!(collection_html(None), "");
        assert_eq!(
            collection_html(Some(&[])),
            "<p class=\"text-center\">You don&#39;t have any books in your collection yet</p>"
        );
        let empty = SearchView {
            count: 0,
            hits: Vec::new(),
        };
        assert_eq!(
            search_html(Some(&empty)),
            "<p class=\"text-center\">Nothing found</p>"
        );
        assert!(!search_html(Some(&empty)).contains("book-grid"));
    }
}
