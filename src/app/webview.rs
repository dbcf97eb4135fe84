use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow};
use url::Url;
use webkit6::prelude::*;
use webkit6::{
    HardwareAccelerationPolicy, NavigationPolicyDecision, PolicyDecision, PolicyDecisionType,
    ResponsePolicyDecision, WebView,
};

use super::SharedShell;
use crate::config::{AppConfig, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::guard::{NavigationDecision, NavigationScope};
use crate::setup::SetupIntent;
use crate::shell::ShellWindow;

const WINDOW_TITLE: &str = "Stoat";

/// The main application window and the web view filling it.
#[derive(Clone)]
pub(crate) struct GtkShellWindow {
    window: ApplicationWindow,
    web_view: WebView,
}

impl GtkShellWindow {
    pub(super) fn build(app: &Application, config: &AppConfig) -> Self {
        let window = ApplicationWindow::new(app);
        window.set_title(Some(WINDOW_TITLE));

        let state = config.window_state;
        let geometry = state.initial_geometry();
        window.set_default_size(geometry.width, geometry.height);
        window.set_size_request(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
        if state.is_maximised {
            window.maximize();
        }
        if let Some((x, y)) = state.restored_position() {
            tracing::debug!(x, y, "window placement is left to the compositor");
        }

        let settings = webkit6::Settings::new();
        settings.set_hardware_acceleration_policy(if config.hardware_acceleration {
            HardwareAccelerationPolicy::Always
        } else {
            HardwareAccelerationPolicy::Never
        });
        let web_view = WebView::new();
        WebViewExt::set_settings(&web_view, &settings);
        window.set_child(Some(&web_view));

        Self { window, web_view }
    }

    pub(super) fn window(&self) -> &ApplicationWindow {
        &self.window
    }

    pub(super) fn close(&self) {
        self.window.close();
    }
}

impl ShellWindow for GtkShellWindow {
    fn load_url(&self, url: &Url) {
        self.web_view.load_uri(url.as_str());
    }

    fn load_setup_page(&self, html: &str, base_uri: &str) {
        self.web_view.load_html(html, Some(base_uri));
    }

    fn hide(&self) {
        self.window.set_visible(false);
    }

    fn present(&self) {
        self.window.set_visible(true);
        self.window.unminimize();
        self.window.present();
    }
}

/// Routes navigations and new-window requests through the shell controller.
///
/// A navigation action does not say which frame it targets, so plain loads are
/// judged at the response stage where the main frame is known. Redirects and
/// bridge URIs never reach that stage and are decided as actions.
pub(super) fn connect_policy_decisions(window: &GtkShellWindow, shell: SharedShell) {
    window
        .web_view
        .connect_decide_policy(move |_, decision, decision_type| match decision_type {
            PolicyDecisionType::NavigationAction => {
                let Some((target, is_redirect)) = navigation_request(decision) else {
                    return false;
                };
                let scope = if is_redirect {
                    NavigationScope::Redirect
                } else if SetupIntent::is_bridge_uri(&target) {
                    NavigationScope::MainFrame
                } else {
                    return false;
                };
                apply_navigation_verdict(&shell, decision, &target, scope)
            }
            PolicyDecisionType::Response => {
                let Some(response) = decision.downcast_ref::<ResponsePolicyDecision>() else {
                    return false;
                };
                let Some(target) = response
                    .request()
                    .and_then(|request| request.uri())
                    .map(|uri| uri.to_string())
                else {
                    return false;
                };
                let scope = if response.is_main_frame_main_resource() {
                    NavigationScope::MainFrame
                } else {
                    NavigationScope::Subframe
                };
                apply_navigation_verdict(&shell, decision, &target, scope)
            }
            PolicyDecisionType::NewWindowAction => {
                if let Some((target, _)) = navigation_request(decision) {
                    if let Some(controller) = shell.borrow().as_ref() {
                        controller.handle_popup(&target);
                    }
                }
                decision.ignore();
                true
            }
            _ => false,
        });
}

/// Cancels denied navigations; allowed ones fall through to WebKit's default handling.
fn apply_navigation_verdict(
    shell: &SharedShell,
    decision: &PolicyDecision,
    target: &str,
    scope: NavigationScope,
) -> bool {
    let verdict = match shell.borrow_mut().as_mut() {
        Some(controller) => controller.handle_navigation(target, scope),
        None => Ok(NavigationDecision::Deny),
    };
    match verdict {
        Ok(NavigationDecision::Allow) => false,
        Ok(NavigationDecision::Deny) => {
            decision.ignore();
            true
        }
        Err(err) => {
            tracing::error!(%err, url = target, "failed to handle navigation");
            decision.ignore();
            true
        }
    }
}

fn navigation_request(decision: &PolicyDecision) -> Option<(String, bool)> {
    let decision = decision.downcast_ref::<NavigationPolicyDecision>()?;
    let mut action = decision.navigation_action()?;
    let is_redirect = action.is_redirect();
    let request = action.request()?;
    request.uri().map(|uri| (uri.to_string(), is_redirect))
}
