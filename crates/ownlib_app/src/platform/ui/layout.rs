use super::constants::*;
use crate::platform::surface::PageCommand;

/// Commands applied once when the controller attaches to a page: the
/// messages area may be missing from the markup, and every dashboard
/// container starts empty.
pub fn initial_commands() -> Vec<PageCommand> {
    let mut commands = vec![PageCommand::EnsureContainer {
        id: CONTAINER_MESSAGES,
    }];
    commands.extend(DASHBOARD_CONTAINERS.into_iter().map(|id| PageCommand::SetContainerHtml {
        id,
        html: String::new(),
    }));
    commands
}
