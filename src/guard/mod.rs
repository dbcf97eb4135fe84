//! Navigation policy for content displayed in the main window.
//!
//! Main-frame navigations may only stay on the reference origin; subframes
//! and redirects of an admitted load are left alone. New-window
//! requests never open inside the shell; web and mail links are handed to the
//! user's default handler instead.

use url::{Origin, Url};

use crate::server::{ServerOrigin, StartUrl};

const EXTERNAL_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Deny,
}

impl NavigationDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Where a navigation happens. Only main-frame navigations are held to the
/// reference origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationScope {
    MainFrame,
    Subframe,
    /// Server-side redirect of a load that was already admitted.
    Redirect,
}

/// Outcome for a new-window request. The in-window popup is denied in both cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupDecision {
    OpenExternal(Url),
    Deny,
}

/// Origin of the resolved start URL, or the public server when none is resolved.
pub fn reference_origin(start_url: Option<&StartUrl>) -> Origin {
    start_url
        .map(StartUrl::origin)
        .unwrap_or_else(|| ServerOrigin::default_origin().origin())
}

pub fn allow_navigate(reference: &Origin, target: &str) -> NavigationDecision {
    let Ok(target) = Url::parse(target) else {
        return NavigationDecision::Deny;
    };
    let target = target.origin();
    // Opaque origins never compare equal, so file:/data:/about: targets fall through.
    if target.is_tuple() && &target == reference {
        NavigationDecision::Allow
    } else {
        NavigationDecision::Deny
    }
}

pub fn decide_popup(target: &str) -> PopupDecision {
    match Url::parse(target) {
        Ok(url) if EXTERNAL_SCHEMES.contains(&url.scheme()) => PopupDecision::OpenExternal(url),
        _ => PopupDecision::Deny,
    }
}
