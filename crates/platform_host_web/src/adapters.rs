use std::rc::Rc;

use platform_host::{
    HostServices, HostStrategy, NoopPrefsStore, NoopSoundService, PrefsStore, SoundFuture,
    SoundService,
};

use crate::{WebPrefsStore, WebSoundService};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "headless")]
    {
        HostStrategy::Headless
    }

    #[cfg(not(feature = "headless"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete preferences backend behind [`PrefsStore`].
#[derive(Debug, Clone, Copy)]
pub enum PrefsStoreAdapter {
    /// Browser `localStorage`.
    Browser(WebPrefsStore),
    /// No-op fallback for headless builds.
    Headless(NoopPrefsStore),
}

impl PrefsStore for PrefsStoreAdapter {
    fn load_pref(&self, key: &str) -> Result<Option<String>, String> {
        match self {
            Self::Browser(store) => store.load_pref(key),
            Self::Headless(store) => store.load_pref(key),
        }
    }

    fn save_pref(&self, key: &str, raw: &str) -> Result<(), String> {
        match self {
            Self::Browser(store) => store.save_pref(key, raw),
            Self::Headless(store) => store.save_pref(key, raw),
        }
    }

    fn delete_pref(&self, key: &str) -> Result<(), String> {
        match self {
            Self::Browser(store) => store.delete_pref(key),
            Self::Headless(store) => store.delete_pref(key),
        }
    }
}

/// Adapter enum that erases the concrete audio backend behind [`SoundService`].
#[derive(Debug, Clone, Copy)]
pub enum SoundServiceAdapter {
    /// Browser `HTMLAudioElement` playback.
    Browser(WebSoundService),
    /// Silent fallback for headless builds.
    Headless(NoopSoundService),
}

impl SoundService for SoundServiceAdapter {
    fn play<'a>(&'a self, src: &'a str) -> SoundFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(service) => service.play(src),
            Self::Headless(service) => service.play(src),
        }
    }
}

/// Builds the preferences adapter for the compile-time selected host strategy.
pub fn prefs_store() -> PrefsStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => PrefsStoreAdapter::Browser(WebPrefsStore),
        HostStrategy::Headless => PrefsStoreAdapter::Headless(NoopPrefsStore),
    }
}

/// Builds the sound adapter for the compile-time selected host strategy.
pub fn sound_service() -> SoundServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => SoundServiceAdapter::Browser(WebSoundService),
        HostStrategy::Headless => SoundServiceAdapter::Headless(NoopSoundService),
    }
}

/// Assembles the [`HostServices`] bundle handed to the desktop runtime.
pub fn build_host_services() -> HostServices {
    HostServices::new(
        Rc::new(prefs_store()),
        Rc::new(sound_service()),
        selected_host_strategy(),
    )
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn host_bundle_matches_selected_strategy() {
        let services = build_host_services();

        assert_eq!(services.host_strategy, selected_host_strategy());
        assert_eq!(host_strategy_name(), services.host_strategy.as_str());
    }

    #[test]
    fn native_adapters_are_inert() {
        let prefs = prefs_store();
        prefs.save_pref("desktopWallpaper", "https://example.test/a.jpg").expect("save");
        assert_eq!(prefs.load_pref("desktopWallpaper").expect("load"), None);
        prefs.delete_pref("desktopWallpaper").expect("delete");

        assert_eq!(block_on(sound_service().play("/sounds/notification.mp3")), Ok(()));
    }
}
