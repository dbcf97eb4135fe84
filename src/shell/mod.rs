pub mod controller;
pub mod error;

pub use controller::{CloseDecision, ShellController, ShellOptions};
pub use error::{ShellError, ShellResult};

use url::Url;

/// The single native window the shell drives.
pub trait ShellWindow {
    fn load_url(&self, url: &Url);
    fn load_setup_page(&self, html: &str, base_uri: &str);
    fn hide(&self);
    /// Show, restore and focus.
    fn present(&self);
}

/// Hands a URL to the user's default handler outside the shell.
pub trait ExternalOpener {
    fn open_external(&self, url: &Url);
}
