//! Typed host-capability contracts shared by the desktop runtime, its apps, and the browser
//! adapters.
//!
//! The runtime only ever talks to storage and audio through the traits defined here. Concrete
//! browser implementations live in `platform_host_web`; the in-memory and recording doubles in
//! this crate back the unit tests of every consumer.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod host;
pub mod sound;
pub mod storage;
pub mod time;

pub use host::{HostServices, HostStrategy};
pub use sound::{NoopSoundService, RecordingSoundService, SoundFuture, SoundService};
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore,
};
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
