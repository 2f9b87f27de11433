//! Static registry of the applications the desktop can host.

use desktop_app_contract::{AppModule, AppMountContext, ApplicationId};
use desktop_app_pomodoro::PomodoroApp;
use desktop_app_sticky_notes::StickyNotesApp;
use leptos::*;

use crate::model::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

pub const POMODORO_APP_ID: &str = "focus.pomodoro";
pub const STICKY_NOTES_APP_ID: &str = "focus.sticky-notes";

#[derive(Debug, Clone, Copy)]
pub struct AppDescriptor {
    pub app_id: &'static str,
    pub display_name: &'static str,
    /// Icon glyph shown on the taskbar button.
    pub icon: &'static str,
    pub default_width: i32,
    pub default_height: i32,
    pub module: AppModule,
}

impl AppDescriptor {
    pub fn application_id(&self) -> ApplicationId {
        ApplicationId::trusted(self.app_id)
    }
}

const APP_REGISTRY: [AppDescriptor; 2] = [
    AppDescriptor {
        app_id: POMODORO_APP_ID,
        display_name: "Pomodoro Timer",
        icon: "\u{23F1}",
        default_width: 500,
        default_height: 650,
        module: AppModule::new(mount_pomodoro_app),
    },
    AppDescriptor {
        app_id: STICKY_NOTES_APP_ID,
        display_name: "Sticky Notes",
        icon: "\u{1F5D2}",
        default_width: 600,
        default_height: 450,
        module: AppModule::new(mount_sticky_notes_app),
    },
];

pub fn app_registry() -> &'static [AppDescriptor] {
    &APP_REGISTRY
}

/// Looks up the descriptor for `app_id`. Unknown ids have none and are never rendered.
pub fn app_descriptor(app_id: &ApplicationId) -> Option<&'static AppDescriptor> {
    app_registry()
        .iter()
        .find(|entry| entry.app_id == app_id.as_str())
}

/// Default window size for `app_id`, falling back to the shell default for unknown ids.
pub fn default_window_size(app_id: &ApplicationId) -> (i32, i32) {
    app_descriptor(app_id).map_or((DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT), |d| {
        (d.default_width, d.default_height)
    })
}

fn mount_pomodoro_app(context: AppMountContext) -> View {
    view! { <PomodoroApp context=context /> }.into_view()
}

fn mount_sticky_notes_app(context: AppMountContext) -> View {
    view! { <StickyNotesApp context=context /> }.into_view()
}
