//! Host-side runtime helpers for executing reducer effects against injected platform services.

mod boot;
mod effects;
mod persistence_effects;
mod sound_effects;

use std::rc::Rc;

use leptos::Callback;
use platform_host::{HostServices, PrefsStore, SoundService};

use crate::{reducer::DesktopAction, reducer::RuntimeEffect, runtime_context::DesktopRuntimeContext};

pub use boot::boot_actions;

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    services: HostServices,
}

impl DesktopHostContext {
    /// Creates a runtime host context from an injected service bundle.
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    /// Returns the configured preference store.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.services.prefs.clone()
    }

    /// Returns the configured sound service.
    pub fn sound_service(&self) -> Rc<dyn SoundService> {
        self.services.sound.clone()
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.services.host_strategy.as_str()
    }

    /// Hydrates desktop preferences from storage before the first paint.
    pub fn install_boot_hydration(&self, dispatch: Callback<DesktopAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        effects::run_runtime_effect(self.clone(), runtime, effect);
    }
}
