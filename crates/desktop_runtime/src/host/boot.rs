use leptos::{Callable, Callback};
use platform_host::PrefsStore;

use crate::{host::DesktopHostContext, persistence, reducer::DesktopAction};

/// Actions that restore persisted desktop preferences, in dispatch order.
pub fn boot_actions(prefs: &dyn PrefsStore) -> Vec<DesktopAction> {
    persistence::load_wallpaper(prefs)
        .map(|url| DesktopAction::HydrateWallpaper { url })
        .into_iter()
        .collect()
}

pub(super) fn install_boot_hydration(host: DesktopHostContext, dispatch: Callback<DesktopAction>) {
    for action in boot_actions(host.prefs_store().as_ref()) {
        dispatch.call(action);
    }
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryPrefsStore;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn boot_restores_stored_wallpaper_only_when_present() {
        let prefs = MemoryPrefsStore::default();
        assert_eq!(boot_actions(&prefs), Vec::new());

        persistence::persist_wallpaper(&prefs, "https://example.test/w.jpg").expect("persist");

        assert_eq!(
            boot_actions(&prefs),
            vec![DesktopAction::HydrateWallpaper {
                url: "https://example.test/w.jpg".to_string()
            }]
        );
    }
}
