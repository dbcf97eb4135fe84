use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::ApplicationWindow;

use crate::config::{save_app_config, AppConfig};

/// Mirrors size and maximised changes into the in-memory config.
pub(super) fn track_window_state(window: &ApplicationWindow, app_config: Rc<RefCell<AppConfig>>) {
    {
        let app_config = app_config.clone();
        window.connect_default_width_notify(move |window| {
            record_window_state(window, &app_config);
        });
    }
    {
        let app_config = app_config.clone();
        window.connect_default_height_notify(move |window| {
            record_window_state(window, &app_config);
        });
    }
    window.connect_maximized_notify(move |window| {
        record_window_state(window, &app_config);
    });
}

fn record_window_state(window: &ApplicationWindow, app_config: &RefCell<AppConfig>) {
    let (width, height) = window.default_size();
    let mut config = app_config.borrow_mut();
    config.window_state.record_size(width, height);
    config.window_state.record_maximised(window.is_maximized());
}

pub(super) fn persist_app_config(app_config: &RefCell<AppConfig>) {
    let config = app_config.borrow();
    match save_app_config(&config) {
        Ok(()) => tracing::debug!(window_state = ?config.window_state, "saved app config"),
        Err(err) => tracing::warn!(?err, "failed to save app config"),
    }
}
