use gtk4::gio;
use url::Url;

use crate::shell::ExternalOpener;

/// Opens links with the desktop's default handler on the next main-loop turn.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct GioExternalOpener;

impl ExternalOpener for GioExternalOpener {
    fn open_external(&self, url: &Url) {
        let uri = url.to_string();
        gtk4::glib::idle_add_local_once(move || {
            if let Err(err) =
                gio::AppInfo::launch_default_for_uri(&uri, None::<&gio::AppLaunchContext>)
            {
                tracing::warn!(uri = %uri, %err, "failed to open link externally");
            }
        });
    }
}
