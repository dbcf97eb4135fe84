use std::cell::RefCell;
use std::rc::Rc;

use gtk4::gio;
use gtk4::prelude::*;
use gtk4::Application;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::shell::{CloseDecision, ShellController, ShellError, ShellOptions, ShellWindow};
use crate::state::ShellState;
use crate::store::FileOriginStore;

mod bootstrap;
mod external;
mod webview;
mod window_state;

use self::bootstrap::*;
use self::external::GioExternalOpener;
use self::webview::{connect_policy_decisions, GtkShellWindow};
use self::window_state::{persist_app_config, track_window_state};

const APP_ID: &str = "chat.stoat.desktop";
const QUIT_ACTION: &str = "quit";

type MainShell = ShellController<GtkShellWindow, FileOriginStore, GioExternalOpener>;
type SharedShell = Rc<RefCell<Option<MainShell>>>;

pub struct App {
    final_state: ShellState,
}

impl App {
    pub fn new() -> Self {
        Self {
            final_state: ShellState::Uninitialized,
        }
    }

    pub fn start(&mut self) -> AppResult<()> {
        let bootstrap = bootstrap_app_runtime();
        let store = FileOriginStore::with_default_path()?;
        tracing::info!(path = %store.path().display(), "using server settings file");

        let options = ShellOptions {
            force_server: bootstrap.startup_config.force_server.clone(),
            minimise_to_tray: bootstrap.app_config.minimise_to_tray,
        };
        let app_config = Rc::new(RefCell::new(bootstrap.app_config));
        let shell: SharedShell = Rc::new(RefCell::new(None));
        let pending_store = Rc::new(RefCell::new(Some(store)));
        let launch_error = Rc::new(RefCell::new(None::<ShellError>));

        // Default flags keep the application unique: a second launch activates
        // this process instead of starting another window.
        let application = Application::builder().application_id(APP_ID).build();
        install_quit_action(&application, shell.clone());

        {
            let shell = shell.clone();
            let app_config = app_config.clone();
            let launch_error = launch_error.clone();
            application.connect_activate(move |app| {
                if let Some(controller) = shell.borrow().as_ref() {
                    tracing::info!("second launch detected; surfacing existing window");
                    controller.surface();
                    return;
                }
                let Some(store) = pending_store.borrow_mut().take() else {
                    tracing::debug!("ignoring activate signal after shutdown");
                    return;
                };

                let window = GtkShellWindow::build(app, &app_config.borrow());
                track_window_state(window.window(), app_config.clone());
                connect_policy_decisions(&window, shell.clone());
                connect_close_request(&window, shell.clone(), app_config.clone());

                *shell.borrow_mut() = Some(ShellController::new(
                    window.clone(),
                    store,
                    GioExternalOpener,
                    options.clone(),
                ));

                let launched = shell.borrow_mut().as_mut().map(|controller| controller.launch());
                match launched {
                    Some(Ok(state)) => {
                        tracing::info!(state = ?state, "presenting main window");
                        window.present();
                    }
                    Some(Err(err)) => {
                        tracing::error!(%err, "failed to resolve start url");
                        *launch_error.borrow_mut() = Some(err);
                        app.quit();
                    }
                    None => {}
                }
            });
        }

        tracing::info!("starting gtk runtime");
        application.run_with_args(&gtk_launch_args());

        persist_app_config(&app_config);
        self.final_state = shell
            .borrow()
            .as_ref()
            .map_or(ShellState::Uninitialized, |controller| controller.state());

        if let Some(err) = launch_error.borrow_mut().take() {
            return Err(err.into());
        }
        Ok(())
    }

    pub fn final_state(&self) -> ShellState {
        self.final_state
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn install_quit_action(application: &Application, shell: SharedShell) {
    let action = gio::SimpleAction::new(QUIT_ACTION, None);
    let app = application.downgrade();
    action.connect_activate(move |_, _| {
        let window = shell.borrow_mut().as_mut().map(|controller| {
            controller.begin_quit();
            controller.window().clone()
        });
        match window {
            Some(window) => window.close(),
            None => {
                if let Some(app) = app.upgrade() {
                    app.quit();
                }
            }
        }
    });
    application.add_action(&action);
    application.set_accels_for_action(&format!("app.{QUIT_ACTION}"), &["<Primary>q"]);
}

fn connect_close_request(
    window: &GtkShellWindow,
    shell: SharedShell,
    app_config: Rc<RefCell<AppConfig>>,
) {
    window.window().connect_close_request(move |_| {
        let decision = shell
            .borrow_mut()
            .as_mut()
            .map(|controller| controller.request_close());
        persist_app_config(&app_config);
        match decision {
            Some(Ok(CloseDecision::Hide)) => gtk4::glib::Propagation::Stop,
            Some(Ok(CloseDecision::Proceed)) | None => gtk4::glib::Propagation::Proceed,
            Some(Err(err)) => {
                tracing::warn!(%err, "close request hit an invalid shell state");
                gtk4::glib::Propagation::Proceed
            }
        }
    });
}
