use ownlib_core::{
    book_actions, update, visibility_plan, AppState, BookAction, BookSnapshot, CollectionItem,
    Cover, Msg, ProgressView, UserSnapshot, UNKNOWN_AUTHOR,
};
use pretty_assertions::assert_eq;

fn item(is_local: bool, file_path: Option<&str>, gutenberg_id: Option<u64>) -> CollectionItem {
    CollectionItem {
        user_book_id: 40,
        status: "Want to read".to_string(),
        bookmark_position: None,
        is_local,
        file_path: file_path.map(str::to_string),
        book: BookSnapshot {
            id: 12,
            title: "Inferno".to_string(),
            author: None,
            language: Some("it".to_string()),
            cover_url: None,
            gutenberg_id,
        },
    }
}

fn card_for(item: CollectionItem) -> ownlib_core::BookCardView {
    let (state, _) = update(AppState::new(), Msg::Init { has_credential: true });
    let (state, _) = update(
        state,
        Msg::ProfileLoaded(Ok(UserSnapshot {
            id: 1,
            username: "reader".to_string(),
        })),
    );
    let (state, _) = update(state, Msg::CollectionLoaded(Ok(vec![item])));
    state.view().collection.expect("collection").remove(0)
}

#[test]
fn local_file_offers_download() {
    assert_eq!(
        book_actions(&item(true, Some("5/inferno.epub"), Some(1001))),
        vec![
            BookAction::Download {
                file_path: "5/inferno.epub".to_string(),
                title: "Inferno".to_string(),
            },
            BookAction::Details { book_id: 12 },
            BookAction::Remove { book_id: 12 },
        ]
    );
}

#[test]
fn catalogue_book_offers_read_online() {
    assert_eq!(
        book_actions(&item(false, None, Some(1001))),
        vec![
            BookAction::ReadOnline { gutenberg_id: 1001 },
            BookAction::Details { book_id: 12 },
            BookAction::Remove { book_id: 12 },
        ]
    );
    // A local flag without a stored file falls through to the catalogue link.
    assert_eq!(
        book_actions(&item(true, Some(""), Some(1001)))[0],
        BookAction::ReadOnline { gutenberg_id: 1001 }
    );
}

#[test]
fn bare_book_only_has_details_and_remove() {
    assert_eq!(
        book_actions(&item(false, None, None)),
        vec![
            BookAction::Details { book_id: 12 },
            BookAction::Remove { book_id: 12 },
        ]
    );
}

#[test]
fn card_derives_display_fields() {
    let mut entry = item(false, None, Some(1001));
    entry.bookmark_position = Some(150);
    let card = card_for(entry);

    assert_eq!(card.author, UNKNOWN_AUTHOR);
    assert_eq!(card.language.as_deref(), Some("IT"));
    assert_eq!(card.status_class, "want-to-read");
    assert_eq!(card.cover, Cover::Initial("I".to_string()));
    assert_eq!(
        card.progress,
        Some(ProgressView {
            page: 150,
            width_percent: 50,
        })
    );
}

#[test]
fn progress_is_capped_and_hidden_at_zero() {
    let mut entry = item(false, None, None);
    entry.bookmark_position = Some(900);
    assert_eq!(card_for(entry.clone()).progress.map(|p| p.width_percent), Some(100));

    entry.bookmark_position = Some(0);
    assert_eq!(card_for(entry).progress, None);
}

#[test]
fn visibility_plan_follows_authentication() {
    let user = UserSnapshot {
        id: 1,
        username: "reader".to_string(),
    };
    let plan = visibility_plan(true, Some(&user));
    assert!(plan.show_auth_required);
    assert!(!plan.show_guest_only);
    assert_eq!(plan.user_name.as_deref(), Some("reader"));

    let plan = visibility_plan(false, Some(&user));
    assert!(!plan.show_auth_required);
    assert!(plan.show_guest_only);
    assert_eq!(plan.user_name, None);
}
