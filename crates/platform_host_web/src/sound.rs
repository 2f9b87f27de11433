//! Notification sound adapter backed by `HTMLAudioElement`.

use platform_host::{SoundFuture, SoundService};

#[derive(Debug, Clone, Copy, Default)]
/// Browser sound service that plays an audio asset through a detached `<audio>` element.
pub struct WebSoundService;

impl SoundService for WebSoundService {
    fn play<'a>(&'a self, src: &'a str) -> SoundFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                use wasm_bindgen::JsValue;
                use wasm_bindgen_futures::JsFuture;

                let audio = web_sys::HtmlAudioElement::new_with_src(src)
                    .map_err(|err: JsValue| format!("could not create audio element: {err:?}"))?;
                let playback = audio
                    .play()
                    .map_err(|err: JsValue| format!("audio play rejected: {err:?}"))?;
                return JsFuture::from(playback)
                    .await
                    .map(|_| ())
                    .map_err(|err| format!("error playing sound: {err:?}"));
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = src;
                Ok(())
            }
        })
    }
}
