use ownlib_logging::{ownlib_debug, ownlib_info};

use super::ui::constants::{BUTTON_LOGOUT, FORM_SEARCH, FORM_UPLOAD};

/// Page regions toggled by authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Elements flagged as requiring an authenticated user.
    AuthRequired,
    /// Elements flagged as guest-only.
    GuestOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    EnsureContainer { id: &'static str },
    SetVisibility { region: Region, visible: bool },
    /// Fill every user-name slot.
    SetUserName { name: String },
    SetContainerHtml { id: &'static str, html: String },
    ResetForm { id: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    Click,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub element_id: &'static str,
    pub kind: ListenerKind,
}

/// Listeners attached once per page load.
pub const PAGE_LISTENERS: [Listener; 3] = [
    Listener {
        element_id: BUTTON_LOGOUT,
        kind: ListenerKind::Click,
    },
    Listener {
        element_id: FORM_UPLOAD,
        kind: ListenerKind::Submit,
    },
    Listener {
        element_id: FORM_SEARCH,
        kind: ListenerKind::Submit,
    },
];

/// The page the controller drives: it applies rendered commands and performs
/// the few interactions that need the user or the browser.
pub trait PageSurface: Send {
    fn apply(&mut self, commands: Vec<PageCommand>);
    fn register_listeners(&mut self, listeners: &[Listener]);
    fn confirm(&mut self, prompt: &str) -> bool;
    fn navigate(&mut self, url: &str);
    fn open_external(&mut self, url: &str);
    fn download(&mut self, href: &str, file_name: &str);
}

/// Surface for the headless binary: logs what a browser would do.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    assume_yes: bool,
}

impl ConsoleSurface {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl PageSurface for ConsoleSurface {
    fn apply(&mut self, commands: Vec<PageCommand>) {
        for command in commands {
            match command {
                PageCommand::SetContainerHtml { id, html } => {
                    ownlib_info!("#{} <- {} bytes of markup", id, html.len());
                    ownlib_debug!("#{}: {}", id, html);
                }
                other => ownlib_info!("{:?}", other),
            }
        }
    }

    fn register_listeners(&mut self, listeners: &[Listener]) {
        for listener in listeners {
            ownlib_debug!("Listening for {:?} on #{}", listener.kind, listener.element_id);
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        ownlib_info!("{} -> {}", prompt, if self.assume_yes { "yes" } else { "no" });
        self.assume_yes
    }

    fn navigate(&mut self, url: &str) {
        ownlib_info!("Navigate to {}", url);
    }

    fn open_external(&mut self, url: &str) {
        ownlib_info!("Open {}", url);
    }

    fn download(&mut self, href: &str, file_name: &str) {
        ownlib_info!("Download {} as {}", href, file_name);
    }
}
