use desktop_app_contract::ApplicationId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Window size used when an app has no descriptor-specific default.
pub const DEFAULT_WINDOW_WIDTH: i32 = 500;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 400;
/// Top-left corner of the first window; later windows cascade from here.
pub const DEFAULT_WINDOW_ORIGIN: i32 = 48;
/// Pixel step between cascaded window origins.
pub const WINDOW_CASCADE_STEP: i32 = 24;

/// Unique, never-reused identifier of an open application instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AppInstanceKey(pub u64);

impl std::fmt::Display for AppInstanceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: DEFAULT_WINDOW_ORIGIN,
            y: DEFAULT_WINDOW_ORIGIN,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// One open application instance tracked by the window manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInstance {
    pub key: AppInstanceKey,
    pub app_id: ApplicationId,
    /// Paint and focus precedence; higher is frontmost.
    pub z_index: u64,
    pub minimized: bool,
    pub maximized: bool,
    pub rect: WindowRect,
    /// App-owned snapshot mirrored through the app contract, `Null` until the app reports one.
    pub app_state: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    /// Key handed out by the next `open` call.
    pub next_instance_key: u64,
    /// Z value handed out by the next raise.
    pub next_z_index: u64,
    /// Open instances in creation order.
    pub instances: Vec<AppInstance>,
    pub wallpaper_url: String,
    pub settings_open: bool,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_instance_key: 0,
            next_z_index: 1,
            instances: Vec::new(),
            wallpaper_url: crate::persistence::DEFAULT_WALLPAPER_URL.to_string(),
            settings_open: false,
        }
    }
}

impl DesktopState {
    pub fn instance(&self, key: AppInstanceKey) -> Option<&AppInstance> {
        self.instances.iter().find(|i| i.key == key)
    }

    /// Key of the non-minimized instance with the highest z value.
    pub fn frontmost_key(&self) -> Option<AppInstanceKey> {
        crate::window_manager::frontmost(self).map(|i| i.key)
    }

    /// Whether any instance of `app_id` is tracked, minimized ones included.
    pub fn is_app_open(&self, app_id: &ApplicationId) -> bool {
        self.instances.iter().any(|i| &i.app_id == app_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub instance_key: AppInstanceKey,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub instance_key: AppInstanceKey,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}
