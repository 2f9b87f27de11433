//! Runtime-effect dispatch for the desktop host boundary.

use crate::{
    host::{persistence_effects, sound_effects, DesktopHostContext},
    reducer::RuntimeEffect,
    runtime_context::DesktopRuntimeContext,
};

pub(super) fn run_runtime_effect(
    host: DesktopHostContext,
    runtime: DesktopRuntimeContext,
    effect: RuntimeEffect,
) {
    match effect {
        RuntimeEffect::PersistWallpaper => persistence_effects::persist_wallpaper(host, runtime),
        RuntimeEffect::PlaySound(src) => sound_effects::play_sound(host, src),
    }
}
