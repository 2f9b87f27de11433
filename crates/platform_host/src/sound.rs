//! Sound playback contracts, a no-op adapter, and a recording double for tests.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`SoundService`].
pub type SoundFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for short notification sounds.
///
/// Playback is fire-and-forget from the caller's point of view: the runtime spawns the returned
/// future and only logs an error result.
pub trait SoundService {
    /// Plays the audio asset at `src` once.
    fn play<'a>(&'a self, src: &'a str) -> SoundFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op sound service for unsupported targets.
pub struct NoopSoundService;

impl SoundService for NoopSoundService {
    fn play<'a>(&'a self, _src: &'a str) -> SoundFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Sound service that records every requested source instead of playing it.
pub struct RecordingSoundService {
    played: Rc<RefCell<Vec<String>>>,
    fail_with: Option<String>,
}

impl RecordingSoundService {
    /// Creates a recorder whose playback always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            played: Rc::default(),
            fail_with: Some(message.into()),
        }
    }

    /// Returns the sources requested so far, in order.
    pub fn played(&self) -> Vec<String> {
        self.played.borrow().clone()
    }
}

impl SoundService for RecordingSoundService {
    fn play<'a>(&'a self, src: &'a str) -> SoundFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.played.borrow_mut().push(src.to_string());
            match &self.fail_with {
                Some(message) => Err(message.clone()),
                None => Ok(()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn recording_sound_service_tracks_requests_in_order() {
        let sound = RecordingSoundService::default();
        let service: &dyn SoundService = &sound;

        block_on(service.play("/sounds/a.mp3")).expect("play a");
        block_on(service.play("/sounds/b.mp3")).expect("play b");

        assert_eq!(sound.played(), vec!["/sounds/a.mp3", "/sounds/b.mp3"]);
    }

    #[test]
    fn failing_recorder_still_records_the_attempt() {
        let sound = RecordingSoundService::failing("autoplay blocked");

        let result = block_on(sound.play("/sounds/a.mp3"));

        assert_eq!(result, Err("autoplay blocked".to_string()));
        assert_eq!(sound.played().len(), 1);
    }

    #[test]
    fn noop_sound_service_succeeds() {
        assert_eq!(block_on(NoopSoundService.play("/x.mp3")), Ok(()));
    }
}
