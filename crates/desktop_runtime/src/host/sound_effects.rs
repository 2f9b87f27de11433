use leptos::{logging, spawn_local};

use crate::host::DesktopHostContext;

/// Plays `src` in the background. Failures (autoplay policy, missing asset) are only logged.
pub(super) fn play_sound(host: DesktopHostContext, src: String) {
    let sound = host.sound_service();
    spawn_local(async move {
        if let Err(err) = sound.play(&src).await {
            logging::warn!("error playing sound {src}: {err}");
        }
    });
}
