use ownlib_client::SessionClient;
use ownlib_core::{
    update, AppState, AppViewModel, BookAction, Effect, Msg, PageTiming, SelectedFile, UploadForm,
};
use ownlib_logging::{ownlib_debug, ownlib_info, ownlib_warn, set_flow_id};
use tokio::sync::mpsc;

use super::effects::{Completion, EffectRunner};
use super::surface::{PageCommand, PageSurface, PAGE_LISTENERS};
use super::ui;
use super::ui::constants::FORM_UPLOAD;

pub const REMOVE_CONFIRMATION: &str =
    "Are you sure you want to remove this book from the collection?";

/// Upload form as submitted by the page, before any validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadSubmission {
    pub file: Option<SelectedFile>,
    pub title: String,
    pub author: String,
    pub language: String,
}

/// Interactions the page forwards to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    LogoutClicked,
    UploadSubmitted(UploadSubmission),
    SearchSubmitted { query: String },
    AddToCollection { gutenberg_id: u64 },
    Action(BookAction),
}

/// Owns the page state for one page load and drives it: page events and
/// effect completions go through the reducer, effects are executed, and the
/// view is rendered to the surface whenever it changed.
pub struct PageController<S: PageSurface> {
    state: AppState,
    client: SessionClient,
    runner: EffectRunner,
    surface: S,
    completions: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
    next_flow: u64,
}

impl<S: PageSurface> PageController<S> {
    /// Must be called within a tokio runtime: effects are spawned as tasks.
    pub fn new(client: SessionClient, mut surface: S, timing: PageTiming) -> Self {
        let (tx, completions) = mpsc::unbounded_channel();
        surface.apply(ui::layout::initial_commands());
        Self {
            state: AppState::with_timing(timing),
            runner: EffectRunner::new(client.clone(), tx),
            client,
            surface,
            completions,
            in_flight: 0,
            next_flow: 0,
        }
    }

    /// Starts the page lifecycle. Calling it again has no effect.
    pub fn init(&mut self) {
        let has_credential = self.client.has_credential();
        self.begin_flow("init");
        self.dispatch_msg(Msg::Init { has_credential });
    }

    pub fn handle_event(&mut self, event: PageEvent) {
        let msg = match event {
            PageEvent::LogoutClicked => Msg::LogoutClicked,
            PageEvent::UploadSubmitted(submission) => Msg::UploadSubmitted(UploadForm {
                file: submission.file,
                title: submission.title,
                author: submission.author,
                language: SessionClient::validate_language_code(Some(&submission.language))
                    .map_err(|err| err.message),
            }),
            PageEvent::SearchSubmitted { query } => Msg::SearchSubmitted { query },
            PageEvent::AddToCollection { gutenberg_id } => {
                Msg::AddToCollectionClicked { gutenberg_id }
            }
            PageEvent::Action(BookAction::Download { file_path, title }) => {
                Msg::DownloadClicked { file_path, title }
            }
            PageEvent::Action(BookAction::ReadOnline { gutenberg_id }) => {
                Msg::ReadOnlineClicked { gutenberg_id }
            }
            PageEvent::Action(BookAction::Details { book_id }) => Msg::DetailsClicked { book_id },
            PageEvent::Action(BookAction::Remove { book_id }) => Msg::RemoveClicked { book_id },
        };
        self.begin_flow("event");
        self.dispatch_msg(msg);
    }

    /// Processes completions until no network effect is outstanding. Timers
    /// still pending are left for [`Self::next_completion`].
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            if !self.next_completion().await {
                break;
            }
        }
    }

    /// Waits for the next completion and applies it. Returns `false` if the
    /// completion channel has closed.
    pub async fn next_completion(&mut self) -> bool {
        let Some(completion) = self.completions.recv().await else {
            return false;
        };
        match completion {
            Completion::Network(msg) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.dispatch_msg(msg);
            }
            Completion::Timer(msg) => self.dispatch_msg(msg),
            Completion::Redirect(url) => {
                ownlib_info!("flow={} redirecting to {}", ownlib_logging::flow_id(), url);
                self.surface.navigate(&url);
            }
        }
        true
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn client(&self) -> &SessionClient {
        &self.client
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn begin_flow(&mut self, label: &str) {
        self.next_flow += 1;
        set_flow_id(self.next_flow);
        ownlib_debug!("flow={} {}", self.next_flow, label);
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.consume_dirty().then(|| state.view());
        self.state = state;

        if let Some(view) = view {
            self.surface.apply(ui::render::render(&view));
        }
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        let flow = ownlib_logging::flow_id();
        match effect {
            Effect::RegisterListeners => {
                ownlib_info!("flow={} registering page listeners", flow);
                self.surface.register_listeners(&PAGE_LISTENERS);
            }
            Effect::ClearCredential => {
                ownlib_info!("flow={} clearing session credential", flow);
                self.client.clear_credential();
            }
            Effect::ResetUploadForm => {
                self.surface
                    .apply(vec![PageCommand::ResetForm { id: FORM_UPLOAD }]);
            }
            Effect::ConfirmRemoval { book_id } => {
                let confirmed = self.surface.confirm(REMOVE_CONFIRMATION);
                self.dispatch_msg(Msg::RemoveConfirmed { book_id, confirmed });
            }
            Effect::Navigate { url } => self.surface.navigate(&url),
            Effect::OpenExternal { url } => self.surface.open_external(&url),
            Effect::Download { href, file_name } => self.surface.download(&href, &file_name),
            effect => {
                let network = effect.is_network();
                ownlib_debug!("flow={} spawning {:?}", flow, effect);
                if self.runner.spawn(effect) {
                    if network {
                        self.in_flight += 1;
                    }
                } else {
                    ownlib_warn!("flow={} effect had no runner", flow);
                }
            }
        }
    }
}
