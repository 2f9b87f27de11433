//! Host strategy and the capability bundle injected into the desktop runtime.

use std::rc::Rc;

use crate::{NoopPrefsStore, NoopSoundService, PrefsStore, SoundService};

/// Stable host strategy selected for the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed composition (`localStorage`, `HTMLAudioElement`).
    Browser,
    /// Placeholder composition with no-op adapters, used off-wasm and in tests.
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Runtime-selected host service bundle.
///
/// Environment-specific adapter selection happens before this bundle reaches
/// `desktop_runtime`, so the runtime and the app crates only see the capability traits.
#[derive(Clone)]
pub struct HostServices {
    /// Key/value preference store that survives reloads.
    pub prefs: Rc<dyn PrefsStore>,
    /// Fire-and-forget notification sound playback.
    pub sound: Rc<dyn SoundService>,
    /// Strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a bundle from explicit adapters.
    pub fn new(
        prefs: Rc<dyn PrefsStore>,
        sound: Rc<dyn SoundService>,
        host_strategy: HostStrategy,
    ) -> Self {
        Self {
            prefs,
            sound,
            host_strategy,
        }
    }

    /// Bundle of no-op adapters.
    pub fn headless() -> Self {
        Self::new(
            Rc::new(NoopPrefsStore),
            Rc::new(NoopSoundService),
            HostStrategy::Headless,
        )
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}
