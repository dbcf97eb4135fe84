use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_WIDTH: i32 = 1280;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 720;
pub const MIN_WINDOW_WIDTH: i32 = 300;
pub const MIN_WINDOW_HEIGHT: i32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width: i32,
    pub height: i32,
}

impl WindowGeometry {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Main window geometry remembered between runs. Zero means "never recorded".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowState {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub is_maximised: bool,
}

impl WindowState {
    pub fn initial_geometry(&self) -> WindowGeometry {
        if self.width > 0 && self.height > 0 {
            WindowGeometry::new(
                self.width.max(MIN_WINDOW_WIDTH),
                self.height.max(MIN_WINDOW_HEIGHT),
            )
        } else {
            WindowGeometry::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)
        }
    }

    pub fn restored_position(&self) -> Option<(i32, i32)> {
        (self.x > 0 || self.y > 0).then_some((self.x, self.y))
    }

    pub fn record_size(&mut self, width: i32, height: i32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
        }
    }

    pub fn record_maximised(&mut self, maximised: bool) {
        self.is_maximised = maximised;
    }
}
