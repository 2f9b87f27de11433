//! Instance lifecycle and z-order transitions used by the desktop reducer.
//!
//! Keys and z values come from counters owned by [`DesktopState`], never from ambient globals, so
//! independent shells (and tests) never share numbering. Both counters only move forward: a key or
//! z value is never handed out twice, which keeps recency recoverable by plain comparison.

use desktop_app_contract::ApplicationId;
use serde_json::Value;

use crate::model::{AppInstance, AppInstanceKey, DesktopState, WindowRect};

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 220;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 140;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of [`open_instance`].
pub enum OpenOutcome {
    /// A new instance was created under this key.
    Created(AppInstanceKey),
    /// A minimized instance of the same app was restored and raised instead.
    Restored(AppInstanceKey),
}

impl OpenOutcome {
    pub fn key(self) -> AppInstanceKey {
        match self {
            Self::Created(key) | Self::Restored(key) => key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What a taskbar click on an app icon resolves to.
pub enum TaskbarTarget {
    /// Focus this already visible instance.
    Focus(AppInstanceKey),
    /// No visible instance exists; go through [`open_instance`].
    Open,
}

fn take_instance_key(state: &mut DesktopState) -> AppInstanceKey {
    let key = AppInstanceKey(state.next_instance_key);
    state.next_instance_key = state.next_instance_key.saturating_add(1);
    key
}

fn take_z_index(state: &mut DesktopState) -> u64 {
    let z = state.next_z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    z
}

/// Opens `app_id`, reusing the first minimized instance of it when one exists.
///
/// The instance key counter advances on every call, including the restore path. `rect` is only
/// used for newly created instances.
pub fn open_instance(state: &mut DesktopState, app_id: &ApplicationId, rect: WindowRect) -> OpenOutcome {
    let key = take_instance_key(state);

    if let Some(index) = state
        .instances
        .iter()
        .position(|i| &i.app_id == app_id && i.minimized)
    {
        let z_index = take_z_index(state);
        let instance = &mut state.instances[index];
        instance.minimized = false;
        instance.z_index = z_index;
        return OpenOutcome::Restored(instance.key);
    }

    let z_index = take_z_index(state);
    state.instances.push(AppInstance {
        key,
        app_id: app_id.clone(),
        z_index,
        minimized: false,
        maximized: false,
        rect: rect.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT),
        app_state: Value::Null,
    });
    OpenOutcome::Created(key)
}

/// Removes the instance. Returns `false` when `key` is not tracked.
pub fn close_instance(state: &mut DesktopState, key: AppInstanceKey) -> bool {
    let before = state.instances.len();
    state.instances.retain(|i| i.key != key);
    state.instances.len() != before
}

/// Hides the instance without touching its z value. Returns `false` when `key` is not tracked.
pub fn minimize_instance(state: &mut DesktopState, key: AppInstanceKey) -> bool {
    let Some(instance) = state.instances.iter_mut().find(|i| i.key == key) else {
        return false;
    };
    instance.minimized = true;
    true
}

/// Un-minimizes the instance and raises it above everything else, even when it is already
/// frontmost. Returns `false` when `key` is not tracked.
pub fn focus_instance(state: &mut DesktopState, key: AppInstanceKey) -> bool {
    let Some(index) = state.instances.iter().position(|i| i.key == key) else {
        return false;
    };
    let z_index = take_z_index(state);
    let instance = &mut state.instances[index];
    instance.minimized = false;
    instance.z_index = z_index;
    true
}

/// Resolves a taskbar click: the first non-minimized instance of `app_id` in creation order, or
/// [`TaskbarTarget::Open`] when every instance is minimized or none exists.
pub fn taskbar_target(state: &DesktopState, app_id: &ApplicationId) -> TaskbarTarget {
    state
        .instances
        .iter()
        .find(|i| &i.app_id == app_id && !i.minimized)
        .map_or(TaskbarTarget::Open, |i| TaskbarTarget::Focus(i.key))
}

/// Non-minimized instances in paint order (ascending z).
pub fn render_order(state: &DesktopState) -> Vec<&AppInstance> {
    let mut visible: Vec<&AppInstance> = state.instances.iter().filter(|i| !i.minimized).collect();
    visible.sort_by_key(|i| i.z_index);
    visible
}

/// The non-minimized instance with the highest z value.
pub fn frontmost(state: &DesktopState) -> Option<&AppInstance> {
    state
        .instances
        .iter()
        .filter(|i| !i.minimized)
        .max_by_key(|i| i.z_index)
}

/// Cascaded placement for a new window of the given size.
pub fn cascade_rect(state: &DesktopState, width: i32, height: i32) -> WindowRect {
    let step = (state.next_instance_key % 8) as i32 * crate::model::WINDOW_CASCADE_STEP;
    WindowRect {
        x: crate::model::DEFAULT_WINDOW_ORIGIN + step,
        y: crate::model::DEFAULT_WINDOW_ORIGIN + step,
        w: width,
        h: height,
    }
}
