//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use desktop_app_contract::{AppCommand, ApplicationId};
use serde_json::Value;
use thiserror::Error;

use crate::{
    apps,
    model::{
        AppInstance, AppInstanceKey, DesktopState, DragSession, InteractionState, PointerPosition,
        ResizeSession, WindowRect,
    },
    window_manager::{self, TaskbarTarget, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open an app, restoring its first minimized instance when there is one.
    OpenApp {
        /// App to open.
        app_id: ApplicationId,
    },
    /// Close an instance.
    CloseApp {
        /// Instance to close.
        instance_key: AppInstanceKey,
    },
    /// Minimize an instance.
    MinimizeApp {
        /// Instance to minimize.
        instance_key: AppInstanceKey,
    },
    /// Un-minimize an instance and raise it to the front.
    FocusApp {
        /// Instance to focus.
        instance_key: AppInstanceKey,
    },
    /// Taskbar icon click: focus the first visible instance of the app, else open it.
    ActivateTaskbarApp {
        /// App behind the clicked icon.
        app_id: ApplicationId,
    },
    /// Toggle between the stored rectangle and filling the desktop.
    ToggleMaximize {
        /// Instance to toggle.
        instance_key: AppInstanceKey,
    },
    /// Begin dragging a window by its title bar. Focuses the window.
    BeginMove {
        /// Instance being dragged.
        instance_key: AppInstanceKey,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window from its south-east grip. Focuses the window.
    BeginResize {
        /// Instance being resized.
        instance_key: AppInstanceKey,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndResize,
    /// Replace the app-owned state mirrored on an instance record.
    SetAppState {
        /// Instance whose state is replaced.
        instance_key: AppInstanceKey,
        /// New app state payload.
        app_state: Value,
    },
    /// Route a command sent by a mounted app through its services.
    HandleAppCommand {
        /// Instance that sent the command.
        instance_key: AppInstanceKey,
        /// The command.
        command: AppCommand,
    },
    /// Show the wallpaper settings overlay.
    OpenSettings,
    /// Hide the wallpaper settings overlay.
    CloseSettings,
    /// Apply and persist a new wallpaper URL, closing the settings overlay.
    SetWallpaper {
        /// New wallpaper URL.
        url: String,
    },
    /// Apply a wallpaper URL loaded at boot without persisting it again.
    HydrateWallpaper {
        /// Stored wallpaper URL.
        url: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Persist the current wallpaper URL.
    PersistWallpaper,
    /// Play an audio asset through the host sound service.
    PlaySound(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions.
pub enum ReducerError {
    /// The target instance key is not tracked.
    #[error("app instance {0} not found")]
    InstanceNotFound(AppInstanceKey),
    /// A wallpaper URL was blank.
    #[error("wallpaper url must not be empty")]
    InvalidWallpaperUrl,
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// Actions that fail leave `state` untouched.
///
/// # Errors
///
/// Returns [`ReducerError::InstanceNotFound`] when an action references an instance that is not
/// tracked and [`ReducerError::InvalidWallpaperUrl`] for blank wallpaper URLs.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenApp { app_id } => {
            open_app(state, &app_id);
        }
        DesktopAction::CloseApp { instance_key } => {
            close_app(state, interaction, instance_key)?;
        }
        DesktopAction::MinimizeApp { instance_key } => {
            if !window_manager::minimize_instance(state, instance_key) {
                return Err(ReducerError::InstanceNotFound(instance_key));
            }
        }
        DesktopAction::FocusApp { instance_key } => {
            focus_app(state, instance_key)?;
        }
        DesktopAction::ActivateTaskbarApp { app_id } => {
            match window_manager::taskbar_target(state, &app_id) {
                TaskbarTarget::Focus(instance_key) => focus_app(state, instance_key)?,
                TaskbarTarget::Open => open_app(state, &app_id),
            }
        }
        DesktopAction::ToggleMaximize { instance_key } => {
            let instance = find_instance_mut(state, instance_key)?;
            instance.maximized = !instance.maximized;
        }
        DesktopAction::BeginMove {
            instance_key,
            pointer,
        } => {
            focus_app(state, instance_key)?;
            let instance = find_instance_mut(state, instance_key)?;
            if !instance.maximized {
                interaction.dragging = Some(DragSession {
                    instance_key,
                    pointer_start: pointer,
                    rect_start: instance.rect,
                });
            }
        }
        DesktopAction::UpdateMove { pointer } => {
            let Some(session) = interaction.dragging.clone() else {
                return Ok(effects);
            };
            let instance = find_instance_mut(state, session.instance_key)?;
            instance.rect = session.rect_start.offset(
                pointer.x - session.pointer_start.x,
                pointer.y - session.pointer_start.y,
            );
        }
        DesktopAction::EndMove => {
            interaction.dragging = None;
        }
        DesktopAction::BeginResize {
            instance_key,
            pointer,
        } => {
            focus_app(state, instance_key)?;
            let instance = find_instance_mut(state, instance_key)?;
            if !instance.maximized {
                interaction.resizing = Some(ResizeSession {
                    instance_key,
                    pointer_start: pointer,
                    rect_start: instance.rect,
                });
            }
        }
        DesktopAction::UpdateResize { pointer } => {
            let Some(session) = interaction.resizing.clone() else {
                return Ok(effects);
            };
            let instance = find_instance_mut(state, session.instance_key)?;
            instance.rect = resize_south_east(
                session.rect_start,
                pointer.x - session.pointer_start.x,
                pointer.y - session.pointer_start.y,
            );
        }
        DesktopAction::EndResize => {
            interaction.resizing = None;
        }
        DesktopAction::SetAppState {
            instance_key,
            app_state,
        } => {
            find_instance_mut(state, instance_key)?.app_state = app_state;
        }
        DesktopAction::HandleAppCommand {
            instance_key,
            command,
        } => match command {
            AppCommand::Close => close_app(state, interaction, instance_key)?,
            AppCommand::Minimize => {
                if !window_manager::minimize_instance(state, instance_key) {
                    return Err(ReducerError::InstanceNotFound(instance_key));
                }
            }
            AppCommand::Focus => focus_app(state, instance_key)?,
            AppCommand::PersistInstanceState { state: app_state } => {
                find_instance_mut(state, instance_key)?.app_state = app_state;
            }
            AppCommand::PlaySound { src } => effects.push(RuntimeEffect::PlaySound(src)),
        },
        DesktopAction::OpenSettings => {
            state.settings_open = true;
        }
        DesktopAction::CloseSettings => {
            state.settings_open = false;
        }
        DesktopAction::SetWallpaper { url } => {
            state.wallpaper_url = validated_wallpaper_url(&url)?;
            state.settings_open = false;
            effects.push(RuntimeEffect::PersistWallpaper);
        }
        DesktopAction::HydrateWallpaper { url } => {
            state.wallpaper_url = validated_wallpaper_url(&url)?;
        }
    }

    Ok(effects)
}

fn open_app(state: &mut DesktopState, app_id: &ApplicationId) {
    let (width, height) = apps::default_window_size(app_id);
    let rect = window_manager::cascade_rect(state, width, height);
    window_manager::open_instance(state, app_id, rect);
}

fn close_app(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    instance_key: AppInstanceKey,
) -> Result<(), ReducerError> {
    if !window_manager::close_instance(state, instance_key) {
        return Err(ReducerError::InstanceNotFound(instance_key));
    }
    if interaction
        .dragging
        .as_ref()
        .is_some_and(|s| s.instance_key == instance_key)
    {
        interaction.dragging = None;
    }
    if interaction
        .resizing
        .as_ref()
        .is_some_and(|s| s.instance_key == instance_key)
    {
        interaction.resizing = None;
    }
    Ok(())
}

fn focus_app(state: &mut DesktopState, instance_key: AppInstanceKey) -> Result<(), ReducerError> {
    if window_manager::focus_instance(state, instance_key) {
        Ok(())
    } else {
        Err(ReducerError::InstanceNotFound(instance_key))
    }
}

fn find_instance_mut(
    state: &mut DesktopState,
    instance_key: AppInstanceKey,
) -> Result<&mut AppInstance, ReducerError> {
    state
        .instances
        .iter_mut()
        .find(|i| i.key == instance_key)
        .ok_or(ReducerError::InstanceNotFound(instance_key))
}

fn resize_south_east(start: WindowRect, dx: i32, dy: i32) -> WindowRect {
    WindowRect {
        w: start.w + dx,
        h: start.h + dy,
        ..start
    }
    .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
}

fn validated_wallpaper_url(url: &str) -> Result<String, ReducerError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        Err(ReducerError::InvalidWallpaperUrl)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::apps::{POMODORO_APP_ID, STICKY_NOTES_APP_ID};

    fn pomodoro() -> ApplicationId {
        ApplicationId::trusted(POMODORO_APP_ID)
    }

    fn notes() -> ApplicationId {
        ApplicationId::trusted(STICKY_NOTES_APP_ID)
    }

    fn open(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        app_id: ApplicationId,
    ) -> AppInstanceKey {
        reduce_desktop(state, interaction, DesktopAction::OpenApp { app_id }).expect("open app");
        state.frontmost_key().expect("frontmost instance")
    }

    fn instance(state: &DesktopState, key: AppInstanceKey) -> &AppInstance {
        state.instance(key).expect("tracked instance")
    }

    #[test]
    fn unregistered_app_is_tracked_with_fallback_size_but_has_no_descriptor() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let unknown = ApplicationId::trusted("focus.unknown");

        let key = open(&mut state, &mut interaction, unknown.clone());

        let tracked = instance(&state, key);
        assert_eq!(tracked.app_id, unknown);
        assert_eq!((tracked.rect.w, tracked.rect.h), (500, 400));
        assert!(apps::app_descriptor(&tracked.app_id).is_none());
    }

    #[test]
    fn open_app_uses_registry_default_size() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let timer = open(&mut state, &mut interaction, pomodoro());
        let board = open(&mut state, &mut interaction, notes());

        assert_eq!((instance(&state, timer).rect.w, instance(&state, timer).rect.h), (500, 650));
        assert_eq!((instance(&state, board).rect.w, instance(&state, board).rect.h), (600, 450));
        assert_eq!(state.frontmost_key(), Some(board));
    }

    #[test]
    fn taskbar_focuses_visible_instance_instead_of_opening() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let timer = open(&mut state, &mut interaction, pomodoro());
        let _board = open(&mut state, &mut interaction, notes());

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ActivateTaskbarApp { app_id: pomodoro() },
        )
        .expect("activate");

        assert_eq!(state.instances.len(), 2);
        assert_eq!(state.frontmost_key(), Some(timer));
    }

    #[test]
    fn taskbar_restores_minimized_instance_through_open() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let timer = open(&mut state, &mut interaction, pomodoro());
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeApp { instance_key: timer },
        )
        .expect("minimize");
        assert_eq!(state.frontmost_key(), None);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ActivateTaskbarApp { app_id: pomodoro() },
        )
        .expect("activate");

        assert_eq!(state.instances.len(), 1);
        assert!(!instance(&state, timer).minimized);
        assert_eq!(state.frontmost_key(), Some(timer));
    }

    #[test]
    fn unknown_instance_is_an_error_and_leaves_state_untouched() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let _timer = open(&mut state, &mut interaction, pomodoro());
        let before = state.clone();

        let missing = AppInstanceKey(42);
        for action in [
            DesktopAction::CloseApp { instance_key: missing },
            DesktopAction::MinimizeApp { instance_key: missing },
            DesktopAction::FocusApp { instance_key: missing },
            DesktopAction::ToggleMaximize { instance_key: missing },
        ] {
            assert_eq!(
                reduce_desktop(&mut state, &mut interaction, action),
                Err(ReducerError::InstanceNotFound(missing))
            );
        }
        assert_eq!(state, before);
    }

    #[test]
    fn moving_window_focuses_and_offsets_rect() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let timer = open(&mut state, &mut interaction, pomodoro());
        let board = open(&mut state, &mut interaction, notes());
        let original = instance(&state, timer).rect;

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                instance_key: timer,
                pointer: PointerPosition { x: 10, y: 10 },
            },
        )
        .expect("begin move");
        assert_eq!(state.frontmost_key(), Some(timer));
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: 35, y: 50 },
            },
        )
        .expect("update move");
        reduce_desktop(&mut state, &mut interaction, DesktopAction::EndMove).expect("end move");

        let moved = instance(&state, timer).rect;
        assert_eq!((moved.x, moved.y), (original.x + 25, original.y + 40));
        assert_eq!(interaction, InteractionState::default());
        assert_ne!(state.frontmost_key(), Some(board));
    }

    #[test]
    fn resize_grows_from_south_east_and_respects_minimum() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let board = open(&mut state, &mut interaction, notes());
        let start = instance(&state, board).rect;

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                instance_key: board,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .expect("begin resize");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: PointerPosition { x: 40, y: 20 },
            },
        )
        .expect("grow");
        assert_eq!(
            (instance(&state, board).rect.w, instance(&state, board).rect.h),
            (start.w + 40, start.h + 20)
        );

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: PointerPosition { x: -5000, y: -5000 },
            },
        )
        .expect("shrink");
        let rect = instance(&state, board).rect;
        assert_eq!((rect.x, rect.y), (start.x, start.y));
        assert_eq!((rect.w, rect.h), (MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
    }

    #[test]
    fn maximized_window_does_not_start_drag() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let timer = open(&mut state, &mut interaction, pomodoro());
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize { instance_key: timer },
        )
        .expect("maximize");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                instance_key: timer,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .expect("begin move");

        assert!(instance(&state, timer).maximized);
        assert_eq!(interaction.dragging, None);
    }

    #[test]
    fn app_commands_are_scoped_to_the_sending_instance() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let timer = open(&mut state, &mut interaction, pomodoro());
        let board = open(&mut state, &mut interaction, notes());

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HandleAppCommand {
                instance_key: timer,
                command: AppCommand::PersistInstanceState {
                    state: serde_json::json!({ "mode": "shortBreak" }),
                },
            },
        )
        .expect("persist state");
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HandleAppCommand {
                instance_key: timer,
                command: AppCommand::PlaySound {
                    src: "/sounds/notification.mp3".to_string(),
                },
            },
        )
        .expect("play sound");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HandleAppCommand {
                instance_key: board,
                command: AppCommand::Close,
            },
        )
        .expect("close board");

        assert_eq!(
            instance(&state, timer).app_state,
            serde_json::json!({ "mode": "shortBreak" })
        );
        assert_eq!(
            effects,
            vec![RuntimeEffect::PlaySound("/sounds/notification.mp3".to_string())]
        );
        assert_eq!(state.instance(board), None);
    }

    #[test]
    fn closing_dragged_instance_clears_interaction() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let board = open(&mut state, &mut interaction, notes());
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                instance_key: board,
                pointer: PointerPosition { x: 1, y: 1 },
            },
        )
        .expect("begin move");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseApp { instance_key: board },
        )
        .expect("close");

        assert_eq!(interaction.dragging, None);
        assert!(state.instances.is_empty());
    }

    #[test]
    fn set_wallpaper_persists_and_closes_settings() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(&mut state, &mut interaction, DesktopAction::OpenSettings)
            .expect("open settings");

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetWallpaper {
                url: " https://example.test/bg.jpg ".to_string(),
            },
        )
        .expect("set wallpaper");

        assert_eq!(effects, vec![RuntimeEffect::PersistWallpaper]);
        assert_eq!(state.wallpaper_url, "https://example.test/bg.jpg");
        assert!(!state.settings_open);
    }

    #[test]
    fn blank_wallpaper_is_rejected_and_hydration_does_not_persist() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::SetWallpaper { url: "  ".to_string() },
            ),
            Err(ReducerError::InvalidWallpaperUrl)
        );
        assert_eq!(
            state.wallpaper_url,
            crate::persistence::DEFAULT_WALLPAPER_URL
        );

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateWallpaper {
                url: "https://example.test/saved.jpg".to_string(),
            },
        )
        .expect("hydrate");
        assert!(effects.is_empty());
        assert_eq!(state.wallpaper_url, "https://example.test/saved.jpg");
    }
}
