//! Shared contract types between the desktop runtime and the applications it hosts.
//!
//! Apps never touch the desktop state directly. They receive an [`AppMountContext`] at mount time
//! and talk back to the runtime through the [`AppCommand`] transport wrapped by [`AppServices`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::rc::Rc;

use leptos::{Callable, Callback, View};
use platform_host::PrefsStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier for a runtime-managed application instance.
pub type WindowRuntimeId = u64;

/// Stable identifier for an app package/module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` conforms to the `segment.segment...` policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected namespaced dotted segments"
            ))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 120 {
        return false;
    }

    let mut segments = 0usize;
    for part in raw.split('.') {
        segments += 1;
        let Some(first) = part.bytes().next() else {
            return false;
        };
        if part.len() > 32 || !first.is_ascii_lowercase() || part.ends_with('-') {
            return false;
        }
        if !part
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            return false;
        }
    }

    segments >= 2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Transport commands emitted by app services to the desktop runtime.
pub enum AppCommand {
    /// Close the instance that sent the command.
    Close,
    /// Minimize the instance that sent the command.
    Minimize,
    /// Bring the instance that sent the command to the front.
    Focus,
    /// Mirror app-owned state into the instance record so a remount can resume from it.
    PersistInstanceState {
        /// Serialized app state payload.
        state: Value,
    },
    /// Play a short notification sound. Failures are logged by the runtime and never reported.
    PlaySound {
        /// Audio asset path.
        src: String,
    },
}

#[derive(Clone, Copy)]
/// Instance-scoped window controls.
pub struct WindowService {
    sender: Callback<AppCommand>,
}

impl WindowService {
    /// Requests that the runtime close this instance.
    pub fn close(&self) {
        self.sender.call(AppCommand::Close);
    }

    /// Requests that the runtime minimize this instance.
    pub fn minimize(&self) {
        self.sender.call(AppCommand::Minimize);
    }

    /// Requests that the runtime focus this instance.
    pub fn focus(&self) {
        self.sender.call(AppCommand::Focus);
    }
}

#[derive(Clone, Copy)]
/// State mirroring service for the instance record.
pub struct StateService {
    sender: Callback<AppCommand>,
}

impl StateService {
    /// Stores `state` on the instance record owned by the runtime.
    pub fn persist_instance_state(&self, state: Value) {
        self.sender.call(AppCommand::PersistInstanceState { state });
    }
}

#[derive(Clone, Copy)]
/// Fire-and-forget audio playback routed through the host sound service.
pub struct SoundService {
    sender: Callback<AppCommand>,
}

impl SoundService {
    /// Plays the audio asset at `src` once.
    pub fn play(&self, src: impl Into<String>) {
        self.sender.call(AppCommand::PlaySound { src: src.into() });
    }
}

#[derive(Clone)]
/// Injected app services bundle.
pub struct AppServices {
    /// Window control service.
    pub window: WindowService,
    /// Instance state service.
    pub state: StateService,
    /// Notification sound service.
    pub sound: SoundService,
    /// Synchronous preference storage shared by every app.
    pub prefs: Rc<dyn PrefsStore>,
}

impl AppServices {
    /// Creates service handles from the runtime command callback and the host preference store.
    pub fn new(sender: Callback<AppCommand>, prefs: Rc<dyn PrefsStore>) -> Self {
        Self {
            window: WindowService { sender },
            state: StateService { sender },
            sound: SoundService { sender },
            prefs,
        }
    }
}

#[derive(Clone)]
/// App mount context injected by the desktop runtime per instance.
pub struct AppMountContext {
    /// App id from the runtime registry.
    pub app_id: ApplicationId,
    /// Runtime instance key.
    pub instance_key: WindowRuntimeId,
    /// State previously mirrored through [`StateService::persist_instance_state`], or `Null`.
    pub restored_state: Value,
    /// Runtime service bundle.
    pub services: AppServices,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mountable app module referenced by the runtime app registry.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use platform_host::MemoryPrefsStore;

    use super::*;

    #[test]
    fn application_id_requires_dotted_namespaces() {
        assert!(ApplicationId::new("focus.pomodoro").is_ok());
        assert!(ApplicationId::new("focus.sticky-notes").is_ok());
        assert!(ApplicationId::new("pomodoro").is_err());
        assert!(ApplicationId::new("Focus.pomodoro").is_err());
        assert!(ApplicationId::new("focus..pomodoro").is_err());
        assert!(ApplicationId::new("focus.notes-").is_err());
    }

    #[test]
    fn services_route_commands_through_one_sender() {
        let _ = leptos::create_runtime();
        let sent = Rc::new(RefCell::new(Vec::new()));
        let sink = sent.clone();
        let services = AppServices::new(
            Callback::new(move |command| sink.borrow_mut().push(command)),
            Rc::new(MemoryPrefsStore::default()),
        );

        services.window.minimize();
        services
            .state
            .persist_instance_state(serde_json::json!({ "mode": "work" }));
        services.sound.play("/sounds/notification.mp3");
        services.window.close();

        assert_eq!(
            *sent.borrow(),
            vec![
                AppCommand::Minimize,
                AppCommand::PersistInstanceState {
                    state: serde_json::json!({ "mode": "work" }),
                },
                AppCommand::PlaySound {
                    src: "/sounds/notification.mp3".to_string(),
                },
                AppCommand::Close,
            ]
        );
    }
}
