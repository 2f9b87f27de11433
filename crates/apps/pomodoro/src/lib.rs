//! Pomodoro timer desktop app: countdown engine, session controller and the window view.

#![warn(rustdoc::broken_intra_doc_links)]

pub mod engine;
pub mod session;
pub mod settings;

use std::{f64::consts::PI, time::Duration};

use desktop_app_contract::{AppMountContext, AppServices};
use leptos::{leptos_dom::helpers::IntervalHandle, *};
use serde_json::Value;

use crate::{
    engine::{format_clock, TickGeneration, TickOutcome},
    session::{
        ModeSwitch, PendingModeSwitch, PomodoroMode, PomodoroSession, SessionCheckpoint,
        SessionEffect, MODE_SWITCH_CONFIRMATION, NOTIFICATION_SOUND_SRC,
    },
    settings::{PomodoroSettings, SettingsDraft, SettingsError, SettingsField},
};

const RING_RADIUS: f64 = 140.0;
const RING_STROKE: f64 = 12.0;

fn restore_session(restored_state: &Value, settings: PomodoroSettings) -> PomodoroSession {
    if restored_state.is_null() {
        return PomodoroSession::new(settings);
    }
    match serde_json::from_value::<PomodoroSession>(restored_state.clone()) {
        Ok(snapshot) => PomodoroSession::restore(snapshot, settings),
        Err(err) => {
            logging::warn!("discarding pomodoro instance state: {err}");
            PomodoroSession::new(settings)
        }
    }
}

fn run_session_effects(services: &AppServices, effects: Vec<SessionEffect>) {
    for effect in effects {
        match effect {
            SessionEffect::PlayCompletionSound => services.sound.play(NOTIFICATION_SOUND_SRC),
            SessionEffect::PersistSettings(settings) => {
                if let Err(err) = settings.save(services.prefs.as_ref()) {
                    logging::warn!("persist pomodoro settings failed: {err}");
                }
            }
        }
    }
}

#[component]
/// Pomodoro app window contents.
///
/// Each window owns its own [`PomodoroSession`] and interval; the session snapshot is mirrored
/// into the instance record so a remounted view resumes where it left off.
pub fn PomodoroApp(
    /// Runtime mount context for this instance.
    context: AppMountContext,
) -> impl IntoView {
    let settings = PomodoroSettings::load(context.services.prefs.as_ref());
    let session = create_rw_signal(restore_session(&context.restored_state, settings));
    let services = store_value(context.services);
    let interval = store_value(None::<IntervalHandle>);
    let pending_switch = create_rw_signal(None::<PendingModeSwitch>);
    let settings_open = create_rw_signal(false);
    let draft = create_rw_signal(SettingsDraft::default());
    let settings_error = create_rw_signal(None::<SettingsError>);
    let last_mirrored = store_value(None::<SessionCheckpoint>);

    // Remaining seconds are only mirrored at checkpoint changes, not on every tick.
    create_effect(move |_| {
        let checkpoint = session.with(PomodoroSession::checkpoint);
        if last_mirrored.with_value(|last| last.as_ref() == Some(&checkpoint)) {
            return;
        }
        let snapshot = match session.with_untracked(|s| serde_json::to_value(s)) {
            Ok(value) => value,
            Err(err) => {
                logging::warn!("pomodoro serialize failed: {err}");
                return;
            }
        };
        last_mirrored.set_value(Some(checkpoint));
        services.with_value(|s| s.state.persist_instance_state(snapshot));
    });

    let stop_interval = move || {
        if let Some(handle) = interval.get_value() {
            handle.clear();
        }
        interval.set_value(None);
    };
    on_cleanup(move || {
        if let Some(Some(handle)) = interval.try_get_value() {
            handle.clear();
        }
    });

    let run_effects =
        move |effects: Vec<SessionEffect>| services.with_value(|s| run_session_effects(s, effects));

    let on_tick = move |generation: TickGeneration| {
        let Some((outcome, effects)) = session.try_update(|s| s.tick_for(generation)) else {
            return;
        };
        if outcome == TickOutcome::Completed {
            stop_interval();
            run_effects(effects);
        }
    };

    let start = move || {
        stop_interval();
        let Some(generation) = session.try_update(|s| s.start()).flatten() else {
            return;
        };
        match set_interval_with_handle(move || on_tick(generation), Duration::from_secs(1)) {
            Ok(handle) => interval.set_value(Some(handle)),
            Err(err) => logging::warn!("pomodoro interval failed to start: {err:?}"),
        }
    };
    let pause = move || {
        stop_interval();
        session.update(|s| s.pause());
    };
    let reset = move || {
        stop_interval();
        session.update(|s| s.reset());
    };
    let skip = move || {
        stop_interval();
        if let Some(effects) = session.try_update(|s| s.skip()) {
            run_effects(effects);
        }
    };
    let switch_mode = move |mode: PomodoroMode| {
        match session.try_update(|s| s.request_mode_switch(mode)) {
            Some(ModeSwitch::NeedsConfirmation(pending)) => pending_switch.set(Some(pending)),
            Some(ModeSwitch::Applied) => stop_interval(),
            None => {}
        }
    };
    let confirm_switch = move || {
        if let Some(pending) = pending_switch.get_untracked() {
            stop_interval();
            session.update(|s| s.confirm_mode_switch(pending));
        }
        pending_switch.set(None);
    };

    let open_settings = move || {
        draft.set(session.with_untracked(|s| SettingsDraft::from_settings(s.settings())));
        settings_error.set(None);
        settings_open.set(true);
    };
    let save_settings = move || {
        let parsed = draft.with_untracked(SettingsDraft::parse);
        let applied = parsed.and_then(|settings| {
            session
                .try_update(|s| s.apply_settings(settings))
                .unwrap_or(Ok(Vec::new()))
        });
        match applied {
            Ok(effects) => {
                stop_interval();
                run_effects(effects);
                settings_open.set(false);
            }
            Err(err) => settings_error.set(Some(err)),
        }
    };

    let is_ticking = Signal::derive(move || session.with(|s| s.engine().is_ticking()));
    let clock = Signal::derive(move || session.with(|s| format_clock(s.engine().remaining_secs())));
    let progress = Signal::derive(move || session.with(|s| s.engine().progress_fraction()));
    let mode = Signal::derive(move || session.with(|s| s.mode()));

    view! {
        <div class="pomodoro-app-container">
            <header class="pomodoro-app-header">
                <h1 class="pomodoro-title">"IntelliFocus"</h1>
                <button
                    type="button"
                    class="pomodoro-icon-button settings-button"
                    aria-label="Timer settings"
                    on:click=move |_| open_settings()
                >
                    "\u{2699}"
                </button>
            </header>

            <main class="pomodoro-timer-section">
                <div class="pomodoro-mode-selector" role="group" aria-label="Timer mode">
                    {PomodoroMode::ALL
                        .into_iter()
                        .map(|target| {
                            view! {
                                <button
                                    type="button"
                                    class="pomodoro-mode-button"
                                    class:active=move || mode.get() == target
                                    on:click=move |_| switch_mode(target)
                                >
                                    {target.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <ProgressRing clock=clock progress=progress />

                <div class="pomodoro-controls">
                    <button
                        type="button"
                        class="pomodoro-icon-button secondary"
                        aria-label="Reset timer"
                        on:click=move |_| reset()
                    >
                        "\u{21BA}"
                    </button>
                    <button
                        type="button"
                        class="pomodoro-play-pause-button"
                        aria-label=move || if is_ticking.get() { "Pause timer" } else { "Start timer" }
                        on:click=move |_| {
                            if is_ticking.get_untracked() {
                                pause();
                            } else {
                                start();
                            }
                        }
                    >
                        {move || if is_ticking.get() { "\u{23F8}" } else { "\u{25B6}" }}
                    </button>
                    <button
                        type="button"
                        class="pomodoro-icon-button secondary"
                        aria-label="Skip to next session"
                        on:click=move |_| skip()
                    >
                        "\u{23ED}"
                    </button>
                </div>
            </main>

            <footer class="pomodoro-app-footer">
                <p>"Cycles completed: " {move || session.with(|s| s.displayed_cycles())}</p>
                <p>"Focus session #" {move || session.with(|s| s.focus_session_number())}</p>
            </footer>

            <Show when=move || pending_switch.get().is_some() fallback=|| ()>
                <div class="modal-overlay" on:click=move |_| pending_switch.set(None)>
                    <div
                        class="modal-content confirm-dialog"
                        role="alertdialog"
                        aria-modal="true"
                        on:click=|ev| ev.stop_propagation()
                    >
                        <p>{MODE_SWITCH_CONFIRMATION}</p>
                        <div class="modal-footer">
                            <button
                                type="button"
                                class="secondary-button"
                                on:click=move |_| pending_switch.set(None)
                            >
                                "Cancel"
                            </button>
                            <button type="button" class="save-button" on:click=move |_| confirm_switch()>
                                "Switch"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>

            <Show when=move || settings_open.get() fallback=|| ()>
                <div class="modal-overlay" on:click=move |_| settings_open.set(false)>
                    <div
                        class="modal-content"
                        role="dialog"
                        aria-modal="true"
                        on:click=|ev| ev.stop_propagation()
                    >
                        <div class="modal-header">
                            <h2>"Settings"</h2>
                            <button
                                type="button"
                                class="close-button"
                                aria-label="Close settings"
                                on:click=move |_| settings_open.set(false)
                            >
                                "\u{00D7}"
                            </button>
                        </div>
                        <div class="modal-body">
                            {SettingsField::ALL
                                .into_iter()
                                .map(|field| {
                                    let has_error = move || {
                                        settings_error.get().is_some_and(|e| e.field() == field)
                                    };
                                    view! {
                                        <div class="setting-item" class:invalid=has_error>
                                            <label for=field.key()>{field.label()}</label>
                                            <input
                                                type="number"
                                                min="1"
                                                id=field.key()
                                                name=field.key()
                                                prop:value=move || draft.with(|d| d.get(field).to_string())
                                                on:input=move |ev| {
                                                    draft.update(|d| d.set(field, event_target_value(&ev)));
                                                    settings_error.set(None);
                                                }
                                            />
                                        </div>
                                    }
                                })
                                .collect_view()}
                            <Show when=move || settings_error.get().is_some() fallback=|| ()>
                                <p class="setting-error" role="alert">
                                    {move || settings_error.get().map(|e| e.to_string()).unwrap_or_default()}
                                </p>
                            </Show>
                        </div>
                        <div class="modal-footer">
                            <button type="button" class="save-button" on:click=move |_| save_settings()>
                                "Save"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn ProgressRing(clock: Signal<String>, progress: Signal<f64>) -> impl IntoView {
    let normalized_radius = RING_RADIUS - RING_STROKE * 2.0;
    let circumference = normalized_radius * 2.0 * PI;
    let dash_offset = move || circumference - progress.get() * circumference;

    view! {
        <div class="timer-container">
            <svg
                height={RING_RADIUS * 2.0}
                width={RING_RADIUS * 2.0}
                aria-hidden="true"
            >
                <circle
                    class="progress-ring-bg"
                    stroke-width=RING_STROKE
                    r=normalized_radius
                    cx=RING_RADIUS
                    cy=RING_RADIUS
                />
                <circle
                    class="progress-ring-fg"
                    stroke-width=RING_STROKE
                    stroke-dasharray=format!("{circumference} {circumference}")
                    style=move || format!("stroke-dashoffset:{}", dash_offset())
                    r=normalized_radius
                    cx=RING_RADIUS
                    cy=RING_RADIUS
                />
            </svg>
            <div class="time-display" role="timer" aria-live="off">
                {move || clock.get()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn null_instance_state_starts_fresh_session() {
        let session = restore_session(&Value::Null, PomodoroSettings::default());
        assert_eq!(session, PomodoroSession::new(PomodoroSettings::default()));
    }

    #[test]
    fn malformed_instance_state_is_discarded() {
        let session = restore_session(
            &serde_json::json!({ "mode": "lunch" }),
            PomodoroSettings::default(),
        );
        assert_eq!(session.mode(), PomodoroMode::Work);
        assert_eq!(session.completed_work_cycles(), 0);
    }
}
