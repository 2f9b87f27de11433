use leptos::{logging, SignalGetUntracked};

use crate::{host::DesktopHostContext, persistence, runtime_context::DesktopRuntimeContext};

pub(super) fn persist_wallpaper(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let url = runtime.state.get_untracked().wallpaper_url;
    if let Err(err) = persistence::persist_wallpaper(host.prefs_store().as_ref(), &url) {
        logging::warn!("persist wallpaper failed: {err}");
    }
}
