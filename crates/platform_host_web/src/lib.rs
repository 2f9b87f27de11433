//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Off-wasm every adapter compiles to an inert fallback so the runtime crates can be unit tested
//! natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod sound;
pub mod storage;

pub use adapters::{
    build_host_services, host_strategy_name, prefs_store, selected_host_strategy, sound_service,
    PrefsStoreAdapter, SoundServiceAdapter,
};
pub use sound::WebSoundService;
pub use storage::local_prefs::WebPrefsStore;
