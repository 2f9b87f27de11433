//! Desktop shell runtime: instance lifecycle, reducer, host effects and Leptos shell components.

pub mod apps;
pub mod components;
pub mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use model::*;
pub use persistence::{load_wallpaper, persist_wallpaper, DEFAULT_WALLPAPER_URL};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use window_manager::{OpenOutcome, TaskbarTarget};
