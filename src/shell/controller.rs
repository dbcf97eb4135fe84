use url::{Origin, Url};

use super::error::ShellResult;
use super::{ExternalOpener, ShellWindow};
use crate::guard::{self, NavigationDecision, NavigationScope, PopupDecision};
use crate::server::{resolve_start_url, ServerOrigin, StartUrl};
use crate::setup::{SetupIntent, SetupView, INVALID_SERVER_MESSAGE, SETUP_PAGE_URI};
use crate::state::{ShellEvent, ShellState, StateMachine};
use crate::store::OriginStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOptions {
    /// Server forced from the command line; wins over the stored origin.
    pub force_server: Option<String>,
    pub minimise_to_tray: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// The window was hidden instead of closed.
    Hide,
    Proceed,
}

/// Owns the main window and decides what it may display.
///
/// Every method runs on the UI thread; the reference origin used by the
/// navigation guard only changes inside these calls.
pub struct ShellController<W, S, O> {
    window: W,
    store: S,
    opener: O,
    options: ShellOptions,
    machine: StateMachine,
    start_url: Option<StartUrl>,
    pending_load: Option<Url>,
    quit_requested: bool,
}

impl<W, S, O> ShellController<W, S, O>
where
    W: ShellWindow,
    S: OriginStore,
    O: ExternalOpener,
{
    pub fn new(window: W, store: S, opener: O, options: ShellOptions) -> Self {
        Self {
            window,
            store,
            opener,
            options,
            machine: StateMachine::new(),
            start_url: None,
            pending_load: None,
            quit_requested: false,
        }
    }

    pub fn state(&self) -> ShellState {
        self.machine.state()
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    pub fn start_url(&self) -> Option<&StartUrl> {
        self.start_url.as_ref()
    }

    /// First resolution after the window exists. A repeated launch only
    /// surfaces the window that is already there.
    pub fn launch(&mut self) -> ShellResult<ShellState> {
        if self.state() != ShellState::Uninitialized {
            tracing::info!(state = ?self.state(), "shell already running; surfacing window");
            self.surface();
            return Ok(self.state());
        }
        tracing::info!(
            force_server = ?self.options.force_server,
            "launching shell"
        );
        self.connect()
    }

    pub fn resolve_start_url(&self) -> ShellResult<Option<StartUrl>> {
        Ok(resolve_start_url(
            self.options.force_server.as_deref(),
            &self.store,
        )?)
    }

    fn refresh_start_url(&mut self) -> ShellResult<()> {
        self.start_url = self.resolve_start_url()?;
        Ok(())
    }

    /// Validates and stores `input` as the server origin without navigating.
    pub fn set_server(&mut self, input: &str) -> ShellResult<ServerOrigin> {
        let origin = ServerOrigin::parse(input)?;
        self.store.set(&origin)?;
        self.refresh_start_url()?;
        tracing::info!(origin = %origin, "server origin saved");
        Ok(origin)
    }

    /// Loads the resolved start URL, or the setup view when nothing resolves.
    pub fn connect(&mut self) -> ShellResult<ShellState> {
        self.refresh_start_url()?;
        match self.start_url.clone() {
            Some(start) => self.show_server(start.url().clone()),
            None => self.show_setup(SetupView::default()),
        }
    }

    /// Forgets the stored origin and loads the public server without storing it.
    pub fn connect_default(&mut self) -> ShellResult<ShellState> {
        self.store.clear()?;
        self.refresh_start_url()?;
        self.show_server(ServerOrigin::default_origin().as_url().clone())
    }

    /// Stores the public server and loads it.
    pub fn use_public(&mut self) -> ShellResult<ShellState> {
        let origin = ServerOrigin::default_origin();
        self.store.set(&origin)?;
        self.refresh_start_url()?;
        self.show_server(origin.as_url().clone())
    }

    /// Reset path: clears the stored origin and lands on the public server.
    pub fn forget_server(&mut self) -> ShellResult<ShellState> {
        tracing::info!("forgetting stored server origin");
        self.connect_default()
    }

    pub fn show_setup(&mut self, view: SetupView) -> ShellResult<ShellState> {
        let next = self.machine.transition(ShellEvent::ShowSetup)?;
        self.pending_load = Url::parse(SETUP_PAGE_URI).ok();
        self.window.load_setup_page(&view.render(), SETUP_PAGE_URI);
        Ok(next)
    }

    fn show_server(&mut self, url: Url) -> ShellResult<ShellState> {
        let next = self.machine.transition(ShellEvent::ShowServer)?;
        tracing::info!(url = %url, "loading server");
        self.window.load_url(&url);
        self.pending_load = Some(url);
        Ok(next)
    }

    /// Intents are only honored while the setup view is displayed.
    pub fn handle_setup_intent(&mut self, intent: SetupIntent) -> ShellResult<ShellState> {
        if self.state() != ShellState::ShowingSetup {
            tracing::debug!(intent = intent.name(), state = ?self.state(), "ignoring setup intent");
            return Ok(self.state());
        }
        tracing::debug!(intent = intent.name(), "handling setup intent");

        match intent {
            SetupIntent::SetServer(input) => match self.set_server(&input) {
                Ok(_) => self.connect(),
                Err(err) if err.is_invalid_url() => {
                    tracing::debug!(%err, "setup view rejected server input");
                    self.show_setup(SetupView::with_error(input, INVALID_SERVER_MESSAGE))
                }
                Err(err) => Err(err),
            },
            SetupIntent::Connect => self.connect(),
            SetupIntent::ConnectDefault => self.connect_default(),
            SetupIntent::UsePublic => self.use_public(),
        }
    }

    pub fn reference_origin(&self) -> Origin {
        guard::reference_origin(self.start_url.as_ref())
    }

    /// Decides a navigation raised by the displayed content.
    ///
    /// Loads issued by the shell itself pass once. Bridge URIs are always
    /// cancelled and only dispatched from the main frame. A redirect target is
    /// admitted as the next main-frame load.
    pub fn handle_navigation(
        &mut self,
        target: &str,
        scope: NavigationScope,
    ) -> ShellResult<NavigationDecision> {
        match scope {
            NavigationScope::MainFrame => {}
            NavigationScope::Subframe | NavigationScope::Redirect
                if SetupIntent::is_bridge_uri(target) =>
            {
                tracing::debug!(url = target, ?scope, "bridge uri outside main frame");
                return Ok(NavigationDecision::Deny);
            }
            NavigationScope::Subframe => return Ok(NavigationDecision::Allow),
            NavigationScope::Redirect => {
                self.pending_load = Url::parse(target).ok();
                return Ok(NavigationDecision::Allow);
            }
        }

        if self.take_pending_load(target) {
            return Ok(NavigationDecision::Allow);
        }

        if SetupIntent::is_bridge_uri(target) {
            if let Some(intent) = SetupIntent::from_bridge_uri(target) {
                self.handle_setup_intent(intent)?;
            }
            return Ok(NavigationDecision::Deny);
        }

        let decision = guard::allow_navigate(&self.reference_origin(), target);
        if !decision.is_allowed() {
            tracing::debug!(url = target, "navigation kept on server origin");
        }
        Ok(decision)
    }

    fn take_pending_load(&mut self, target: &str) -> bool {
        let matches = match (Url::parse(target), self.pending_load.as_ref()) {
            (Ok(target), Some(pending)) => &target == pending,
            _ => false,
        };
        if matches {
            self.pending_load = None;
        }
        matches
    }

    /// Decides a new-window request. Nothing ever opens inside the shell.
    pub fn handle_popup(&self, target: &str) -> PopupDecision {
        let decision = guard::decide_popup(target);
        match &decision {
            PopupDecision::OpenExternal(url) => {
                tracing::debug!(url = %url, "opening link externally");
                self.opener.open_external(url);
            }
            PopupDecision::Deny => {
                tracing::debug!(url = target, "popup denied");
            }
        }
        decision
    }

    /// Marks the next close as application-initiated.
    pub fn begin_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn request_close(&mut self) -> ShellResult<CloseDecision> {
        let state = self.state();
        if self.options.minimise_to_tray && !self.quit_requested && state.is_live() {
            tracing::debug!("hiding window to tray instead of closing");
            self.window.hide();
            return Ok(CloseDecision::Hide);
        }

        if state.is_live() {
            self.machine.transition(ShellEvent::Close)?;
        }
        tracing::info!("main window closing");
        Ok(CloseDecision::Proceed)
    }

    /// Brings the existing window forward, e.g. when a second instance starts.
    pub fn surface(&self) -> bool {
        if !self.state().is_live() {
            return false;
        }
        self.window.present();
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::config::AppConfig;
    use crate::server::DEFAULT_SERVER_ORIGIN;
    use crate::shell::ShellError;
    use crate::store::{MemoryOriginStore, StoreError, StoreResult};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum WindowCommand {
        LoadUrl(String),
        LoadSetup { html: String, base_uri: String },
        Hide,
        Present,
    }

    #[derive(Debug, Default)]
    struct RecordingWindow {
        commands: RefCell<Vec<WindowCommand>>,
    }

    impl RecordingWindow {
        fn commands(&self) -> Vec<WindowCommand> {
            self.commands.borrow().clone()
        }

        fn last(&self) -> Option<WindowCommand> {
            self.commands.borrow().last().cloned()
        }

        fn setup_loads(&self) -> usize {
            self.commands
                .borrow()
                .iter()
                .filter(|command| matches!(command, WindowCommand::LoadSetup { .. }))
                .count()
        }
    }

    impl ShellWindow for RecordingWindow {
        fn load_url(&self, url: &Url) {
            self.commands
                .borrow_mut()
                .push(WindowCommand::LoadUrl(url.to_string()));
        }

        fn load_setup_page(&self, html: &str, base_uri: &str) {
            self.commands.borrow_mut().push(WindowCommand::LoadSetup {
                html: html.to_string(),
                base_uri: base_uri.to_string(),
            });
        }

        fn hide(&self) {
            self.commands.borrow_mut().push(WindowCommand::Hide);
        }

        fn present(&self) {
            self.commands.borrow_mut().push(WindowCommand::Present);
        }
    }

    #[derive(Debug, Default)]
    struct RecordingOpener {
        opened: RefCell<Vec<String>>,
    }

    impl ExternalOpener for RecordingOpener {
        fn open_external(&self, url: &Url) {
            self.opened.borrow_mut().push(url.to_string());
        }
    }

    #[derive(Debug, Default)]
    struct ReadOnlyStore;

    impl OriginStore for ReadOnlyStore {
        fn get(&self) -> StoreResult<Option<ServerOrigin>> {
            Ok(None)
        }

        fn set(&mut self, _origin: &ServerOrigin) -> StoreResult<()> {
            Err(StoreError::MissingHomeDirectory)
        }

        fn clear(&mut self) -> StoreResult<()> {
            Err(StoreError::MissingHomeDirectory)
        }
    }

    type TestController<S = MemoryOriginStore> =
        ShellController<RecordingWindow, S, RecordingOpener>;

    fn controller_with(store: MemoryOriginStore, options: ShellOptions) -> TestController {
        ShellController::new(
            RecordingWindow::default(),
            store,
            RecordingOpener::default(),
            options,
        )
    }

    fn fresh_controller() -> TestController {
        controller_with(MemoryOriginStore::default(), ShellOptions::default())
    }

    fn stored_controller(origin: &str) -> TestController {
        controller_with(
            MemoryOriginStore::with_origin(ServerOrigin::parse(origin).unwrap()),
            ShellOptions::default(),
        )
    }

    fn stored_origin<S: OriginStore>(controller: &TestController<S>) -> Option<String> {
        controller
            .store()
            .get()
            .unwrap()
            .map(|origin| origin.as_str())
    }

    #[test]
    fn fresh_install_shows_setup_then_use_public_connects_to_official_server() {
        let mut controller = fresh_controller();

        assert_eq!(controller.launch().unwrap(), ShellState::ShowingSetup);
        assert!(matches!(
            controller.window().last(),
            Some(WindowCommand::LoadSetup { ref base_uri, .. }) if base_uri == SETUP_PAGE_URI
        ));

        let decision = controller
            .handle_navigation("stoat-intent:use-public", NavigationScope::MainFrame)
            .unwrap();

        assert_eq!(decision, NavigationDecision::Deny);
        assert_eq!(controller.state(), ShellState::ShowingServer);
        assert_eq!(stored_origin(&controller).as_deref(), Some(DEFAULT_SERVER_ORIGIN));
        assert_eq!(
            controller.window().last(),
            Some(WindowCommand::LoadUrl("https://beta.revolt.chat/".to_string()))
        );
    }

    #[test]
    fn stored_origin_loads_directly_without_setup() {
        let mut controller = stored_controller("https://custom.example.com");

        assert_eq!(controller.launch().unwrap(), ShellState::ShowingServer);
        assert_eq!(
            controller.window().commands(),
            vec![WindowCommand::LoadUrl("https://custom.example.com/".to_string())]
        );
        assert_eq!(controller.window().setup_loads(), 0);
    }

    #[test]
    fn set_server_then_resolve_returns_the_origin_only() {
        let mut controller = fresh_controller();

        let origin = controller
            .set_server("https://chat.example.com/channel/5?q=1#frag")
            .unwrap();
        let start = controller.resolve_start_url().unwrap().unwrap();

        assert_eq!(origin.as_str(), "https://chat.example.com");
        assert_eq!(start.url().as_str(), "https://chat.example.com/");
    }

    #[test]
    fn set_server_rejects_non_urls_and_leaves_store_unchanged() {
        let mut controller = stored_controller("https://custom.example.com");

        for input in ["", "chat.example.com", "hello world"] {
            let err = controller.set_server(input).unwrap_err();
            assert!(err.is_invalid_url(), "{input:?}");
        }
        assert_eq!(
            stored_origin(&controller).as_deref(),
            Some("https://custom.example.com")
        );
    }

    #[test]
    fn override_wins_over_stored_origin() {
        let mut controller = controller_with(
            MemoryOriginStore::with_origin(
                ServerOrigin::parse("https://custom.example.com").unwrap(),
            ),
            ShellOptions {
                force_server: Some("https://forced.example.com/app".to_string()),
                minimise_to_tray: false,
            },
        );

        assert_eq!(controller.launch().unwrap(), ShellState::ShowingServer);
        assert_eq!(
            controller.window().last(),
            Some(WindowCommand::LoadUrl("https://forced.example.com/app".to_string()))
        );
    }

    #[test]
    fn invalid_override_fails_launch_without_touching_the_window() {
        let mut controller = controller_with(
            MemoryOriginStore::default(),
            ShellOptions {
                force_server: Some("::not-a-url::".to_string()),
                minimise_to_tray: false,
            },
        );

        let err = controller.launch().unwrap_err();
        assert!(err.is_invalid_url());
        assert_eq!(controller.state(), ShellState::Uninitialized);
        assert!(controller.window().commands().is_empty());
    }

    #[test]
    fn guard_allows_same_origin_and_denies_foreign_origin() {
        let mut controller = stored_controller("https://chat.example.com");
        controller.launch().unwrap();
        assert!(controller
            .handle_navigation("https://chat.example.com/", NavigationScope::MainFrame)
            .unwrap()
            .is_allowed());

        assert_eq!(
            controller
                .handle_navigation(
                    "https://chat.example.com/channel/5",
                    NavigationScope::MainFrame
                )
                .unwrap(),
            NavigationDecision::Allow
        );
        assert_eq!(
            controller
                .handle_navigation("https://evil.example.com", NavigationScope::MainFrame)
                .unwrap(),
            NavigationDecision::Deny
        );
        assert_eq!(controller.state(), ShellState::ShowingServer);
    }

    #[test]
    fn shell_initiated_load_passes_exactly_once() {
        let mut controller = fresh_controller();
        controller.launch().unwrap();

        assert!(controller
            .handle_navigation("about:blank", NavigationScope::MainFrame)
            .unwrap()
            .is_allowed());
        assert!(!controller
            .handle_navigation("about:blank", NavigationScope::MainFrame)
            .unwrap()
            .is_allowed());
    }

    #[test]
    fn reference_origin_falls_back_to_public_server_before_any_resolution() {
        let mut controller = fresh_controller();
        controller.launch().unwrap();

        assert!(controller.start_url().is_none());
        assert!(controller
            .handle_navigation("https://beta.revolt.chat/login", NavigationScope::MainFrame)
            .unwrap()
            .is_allowed());
        assert!(!controller
            .handle_navigation("https://chat.example.com/", NavigationScope::MainFrame)
            .unwrap()
            .is_allowed());
    }

    #[test]
    fn cross_origin_subframe_loads_while_top_level_navigation_is_denied() {
        let mut controller = stored_controller("https://chat.example.com");
        controller.launch().unwrap();
        let captcha = "https://captcha.example.net/widget?site=chat";

        assert_eq!(
            controller
                .handle_navigation(captcha, NavigationScope::Subframe)
                .unwrap(),
            NavigationDecision::Allow
        );
        assert_eq!(
            controller
                .handle_navigation(captcha, NavigationScope::MainFrame)
                .unwrap(),
            NavigationDecision::Deny
        );
        assert_eq!(controller.window().commands().len(), 1);
    }

    #[test]
    fn redirect_target_is_admitted_once_as_main_frame_load() {
        let mut controller = stored_controller("https://chat.example.com");
        controller.launch().unwrap();
        let target = "https://sso.example.org/callback";

        assert!(controller
            .handle_navigation(target, NavigationScope::Redirect)
            .unwrap()
            .is_allowed());
        assert!(controller
            .handle_navigation(target, NavigationScope::MainFrame)
            .unwrap()
            .is_allowed());
        assert!(!controller
            .handle_navigation(target, NavigationScope::MainFrame)
            .unwrap()
            .is_allowed());
    }

    #[test]
    fn bridge_uris_outside_main_frame_are_denied_without_dispatch() {
        let mut controller = fresh_controller();
        controller.launch().unwrap();

        for scope in [NavigationScope::Subframe, NavigationScope::Redirect] {
            assert_eq!(
                controller
                    .handle_navigation("stoat-intent:use-public", scope)
                    .unwrap(),
                NavigationDecision::Deny
            );
        }
        assert_eq!(controller.state(), ShellState::ShowingSetup);
        assert_eq!(stored_origin(&controller), None);
        assert_eq!(controller.window().setup_loads(), 1);
    }

    #[test]
    fn popups_open_web_and_mail_links_externally_only() {
        let controller = fresh_controller();

        assert!(matches!(
            controller.handle_popup("https://x.com"),
            PopupDecision::OpenExternal(_)
        ));
        assert!(matches!(
            controller.handle_popup("mailto:a@b.com"),
            PopupDecision::OpenExternal(_)
        ));
        assert_eq!(
            controller.handle_popup("file:///etc/passwd"),
            PopupDecision::Deny
        );

        assert_eq!(
            *controller.opener().opened.borrow(),
            vec!["https://x.com/".to_string(), "mailto:a@b.com".to_string()]
        );
        assert!(controller.window().commands().is_empty());
    }

    #[test]
    fn use_public_is_idempotent() {
        let mut controller = fresh_controller();
        controller.launch().unwrap();

        controller.use_public().unwrap();
        let once = stored_origin(&controller);
        controller.use_public().unwrap();

        assert_eq!(stored_origin(&controller), once);
        assert_eq!(once.as_deref(), Some(DEFAULT_SERVER_ORIGIN));
        assert_eq!(controller.state(), ShellState::ShowingServer);
    }

    #[test]
    fn invalid_set_server_intent_rerenders_setup_with_inline_error() {
        let mut controller = fresh_controller();
        controller.launch().unwrap();

        let decision = controller
            .handle_navigation(
                "stoat-intent:set-server?url=not%20a%20url",
                NavigationScope::MainFrame,
            )
            .unwrap();

        assert_eq!(decision, NavigationDecision::Deny);
        assert_eq!(controller.state(), ShellState::ShowingSetup);
        assert_eq!(stored_origin(&controller), None);
        assert_eq!(controller.window().setup_loads(), 2);
        assert!(matches!(
            controller.window().last(),
            Some(WindowCommand::LoadSetup { ref html, .. })
                if html.contains(INVALID_SERVER_MESSAGE) && html.contains("not a url")
        ));
    }

    #[test]
    fn valid_set_server_intent_stores_origin_and_connects() {
        let mut controller = fresh_controller();
        controller.launch().unwrap();

        controller
            .handle_navigation(
                "stoat-intent:set-server?url=https%3A%2F%2Fchat.example.com%2Fx",
                NavigationScope::MainFrame,
            )
            .unwrap();

        assert_eq!(controller.state(), ShellState::ShowingServer);
        assert_eq!(
            stored_origin(&controller).as_deref(),
            Some("https://chat.example.com")
        );
        assert_eq!(
            controller.window().last(),
            Some(WindowCommand::LoadUrl("https://chat.example.com/".to_string()))
        );
    }

    #[test]
    fn setup_intents_are_ignored_while_showing_a_server() {
        let mut controller = stored_controller("https://chat.example.com");
        controller.launch().unwrap();

        let decision = controller
            .handle_navigation(
                "stoat-intent:set-server?url=https%3A%2F%2Fevil.example.com",
                NavigationScope::MainFrame,
            )
            .unwrap();

        assert_eq!(decision, NavigationDecision::Deny);
        assert_eq!(
            stored_origin(&controller).as_deref(),
            Some("https://chat.example.com")
        );
        assert_eq!(controller.window().commands().len(), 1);
    }

    #[test]
    fn connect_default_clears_store_and_loads_public_server() {
        let mut controller = stored_controller("https://custom.example.com");
        controller.launch().unwrap();

        assert_eq!(controller.connect_default().unwrap(), ShellState::ShowingServer);
        assert_eq!(stored_origin(&controller), None);
        assert_eq!(
            controller.window().last(),
            Some(WindowCommand::LoadUrl("https://beta.revolt.chat/".to_string()))
        );
        assert_eq!(
            controller.reference_origin(),
            ServerOrigin::default_origin().origin()
        );
    }

    #[test]
    fn forget_server_lands_back_on_public_server() {
        let mut controller = stored_controller("https://custom.example.com");
        controller.launch().unwrap();

        assert_eq!(controller.forget_server().unwrap(), ShellState::ShowingServer);
        assert_eq!(stored_origin(&controller), None);
        assert_eq!(controller.window().setup_loads(), 0);
    }

    #[test]
    fn show_setup_then_connect_returns_to_stored_server() {
        let mut controller = stored_controller("https://custom.example.com");
        controller.launch().unwrap();
        controller.show_setup(SetupView::default()).unwrap();

        assert_eq!(controller.state(), ShellState::ShowingSetup);
        assert_eq!(controller.connect().unwrap(), ShellState::ShowingServer);
    }

    #[test]
    fn close_hides_to_tray_until_quit_is_requested() {
        let mut controller = controller_with(
            MemoryOriginStore::default(),
            ShellOptions {
                force_server: None,
                minimise_to_tray: true,
            },
        );
        controller.launch().unwrap();

        assert_eq!(controller.request_close().unwrap(), CloseDecision::Hide);
        assert_eq!(controller.state(), ShellState::ShowingSetup);
        assert_eq!(controller.window().last(), Some(WindowCommand::Hide));

        controller.begin_quit();
        assert_eq!(controller.request_close().unwrap(), CloseDecision::Proceed);
        assert_eq!(controller.state(), ShellState::Closed);
    }

    #[test]
    fn close_without_tray_preference_proceeds() {
        let mut controller = fresh_controller();
        controller.launch().unwrap();

        assert_eq!(controller.request_close().unwrap(), CloseDecision::Proceed);
        assert_eq!(controller.state(), ShellState::Closed);
        assert!(!controller.surface());
    }

    #[test]
    fn default_config_closes_instead_of_hiding() {
        let mut controller = controller_with(
            MemoryOriginStore::default(),
            ShellOptions {
                force_server: None,
                minimise_to_tray: AppConfig::default().minimise_to_tray,
            },
        );
        controller.launch().unwrap();

        assert_eq!(controller.request_close().unwrap(), CloseDecision::Proceed);
        assert_eq!(controller.state(), ShellState::Closed);
        assert!(!controller
            .window()
            .commands()
            .contains(&WindowCommand::Hide));
    }

    #[test]
    fn second_launch_surfaces_existing_window() {
        let mut controller = stored_controller("https://chat.example.com");
        controller.launch().unwrap();
        let loads_before = controller.window().commands().len();

        assert_eq!(controller.launch().unwrap(), ShellState::ShowingServer);

        let commands = controller.window().commands();
        assert_eq!(commands.len(), loads_before + 1);
        assert_eq!(commands.last(), Some(&WindowCommand::Present));
    }

    #[test]
    fn store_failure_propagates_out_of_setup_intent() {
        let mut controller: TestController<ReadOnlyStore> = ShellController::new(
            RecordingWindow::default(),
            ReadOnlyStore,
            RecordingOpener::default(),
            ShellOptions::default(),
        );
        controller.launch().unwrap();

        let err = controller
            .handle_setup_intent(SetupIntent::UsePublic)
            .unwrap_err();

        assert!(matches!(err, ShellError::Server(_)));
        assert!(!err.is_invalid_url());
        assert_eq!(controller.state(), ShellState::ShowingSetup);
    }
}
