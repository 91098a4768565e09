use ownlib_core::AppViewModel;

use super::constants::*;
use super::markup;
use crate::platform::surface::{PageCommand, Region};

#[allow(clippy::vec_init_then_push)]
pub fn render(view: &AppViewModel) -> Vec<PageCommand> {
    let plan = &view.visibility;
    let mut cmds = Vec::new();

    cmds.push(PageCommand::SetVisibility {
        region: Region::AuthRequired,
        visible: plan.show_auth_required,
    });
    cmds.push(PageCommand::SetVisibility {
        region: Region::GuestOnly,
        visible: plan.show_guest_only,
    });
    if let Some(name) = &plan.user_name {
        cmds.push(PageCommand::SetUserName { name: name.clone() });
    }

    cmds.push(PageCommand::SetContainerHtml {
        id: CONTAINER_USER_BOOKS,
        html: markup::collection_html(view.collection.as_deref()),
    });
    cmds.push(PageCommand::SetContainerHtml {
        id: CONTAINER_STATS,
        html: markup::stats_html(view.stats.as_ref()),
    });
    cmds.push(PageCommand::SetContainerHtml {
        id: CONTAINER_SEARCH,
        html: markup::search_html(view.search.as_ref()),
    });
    cmds.push(PageCommand::SetContainerHtml {
        id: CONTAINER_MESSAGES,
        html: markup::messages_html(&view.messages),
    });

    cmds
}
