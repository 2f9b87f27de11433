//! Desktop-level preferences: the wallpaper URL.
//!
//! The wallpaper is stored verbatim (not JSON encoded) so existing `localStorage` values written by
//! earlier builds of the shell keep loading.

use leptos::logging;
use platform_host::PrefsStore;

pub const DESKTOP_WALLPAPER_KEY: &str = "desktopWallpaper";
pub const DEFAULT_WALLPAPER_URL: &str = "https://cdn.wallpapersafari.com/72/31/LqMUho.jpg";

/// Loads the persisted wallpaper URL, if a usable one is stored.
///
/// Read failures and blank values are logged and treated as absent.
pub fn load_wallpaper(prefs: &dyn PrefsStore) -> Option<String> {
    match prefs.load_pref(DESKTOP_WALLPAPER_KEY) {
        Ok(Some(raw)) if !raw.trim().is_empty() => Some(raw.trim().to_string()),
        Ok(Some(_)) => {
            logging::warn!("ignoring blank persisted wallpaper");
            None
        }
        Ok(None) => None,
        Err(err) => {
            logging::warn!("wallpaper load failed: {err}");
            None
        }
    }
}

/// Persists the wallpaper URL.
///
/// # Errors
///
/// Returns the store error when the write fails.
pub fn persist_wallpaper(prefs: &dyn PrefsStore, url: &str) -> Result<(), String> {
    prefs.save_pref(DESKTOP_WALLPAPER_KEY, url)
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryPrefsStore;

    use super::*;

    #[test]
    fn wallpaper_round_trips_as_raw_string() {
        let prefs = MemoryPrefsStore::default();

        persist_wallpaper(&prefs, "https://example.test/bg.png").expect("persist");

        assert_eq!(
            prefs.load_pref(DESKTOP_WALLPAPER_KEY).expect("load"),
            Some("https://example.test/bg.png".to_string())
        );
        assert_eq!(
            load_wallpaper(&prefs),
            Some("https://example.test/bg.png".to_string())
        );
    }

    #[test]
    fn missing_or_blank_wallpaper_loads_as_none() {
        let prefs = MemoryPrefsStore::default();
        assert_eq!(load_wallpaper(&prefs), None);

        prefs.save_pref(DESKTOP_WALLPAPER_KEY, "   ").expect("save");
        assert_eq!(load_wallpaper(&prefs), None);
    }
}
