//! OwnLib page shell: wires the pure page reducer to the session client and
//! to the page surface.
pub mod platform;

use ownlib_client::SessionClient;
use ownlib_core::PageTiming;
use ownlib_logging::ownlib_info;

pub use platform::app::{PageController, PageEvent, UploadSubmission, REMOVE_CONFIRMATION};
pub use platform::config::AppConfig;
pub use platform::persistence::FileCredentialStore;
pub use platform::surface::{
    ConsoleSurface, Listener, ListenerKind, PageCommand, PageSurface, Region, PAGE_LISTENERS,
};

/// Whether `path` is the landing page, which runs without a controller.
pub fn is_landing_page(path: &str) -> bool {
    path == "/" || path == "/static/" || path.ends_with("index.html")
}

/// Page-load entry point: builds and initialises the controller for `path`,
/// or returns `None` on the landing page.
pub fn page_loaded<S: PageSurface>(
    path: &str,
    client: SessionClient,
    surface: S,
    timing: PageTiming,
) -> Option<PageController<S>> {
    if is_landing_page(path) {
        ownlib_info!("Landing page {}; controller not started", path);
        return None;
    }
    ownlib_info!("Starting page controller for {}", path);
    let mut controller = PageController::new(client, surface, timing);
    controller.init();
    Some(controller)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_pages_are_recognised() {
        for path in ["/", "/static/", "/static/index.html", "/index.html"] {
            assert!(is_landing_page(path), "{path}");
        }
        for path in ["/static/dashboard.html", "/static/book-detail.html", "/static"] {
            assert!(!is_landing_page(path), "{path}");
        }
    }
}
