//! Pomodoro session controller: modes, cycles and the transitions around the countdown engine.

use serde::{Deserialize, Serialize};

use crate::{
    engine::{CountdownEngine, TickGeneration, TickOutcome},
    settings::{PomodoroSettings, SettingsError},
};

pub const NOTIFICATION_SOUND_SRC: &str = "/sounds/notification.mp3";
pub const MODE_SWITCH_CONFIRMATION: &str =
    "A timer is running. Are you sure you want to switch modes? This will reset the current timer.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PomodoroMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl PomodoroMode {
    pub const ALL: [Self; 3] = [Self::Work, Self::ShortBreak, Self::LongBreak];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Work => "Pomodoro",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Configured length of this mode in seconds.
    pub fn duration_secs(self, settings: &PomodoroSettings) -> u32 {
        let minutes = match self {
            Self::Work => settings.work,
            Self::ShortBreak => settings.short_break,
            Self::LongBreak => settings.long_break,
        };
        minutes.saturating_mul(60)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Work the view must carry out after a session transition, in order.
pub enum SessionEffect {
    PlayCompletionSound,
    PersistSettings(PomodoroSettings),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A manual mode switch that is waiting for the user to confirm it.
pub struct PendingModeSwitch {
    pub target: PomodoroMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSwitch {
    /// The switch happened immediately.
    Applied,
    /// A session is running; nothing changes until [`PomodoroSession::confirm_mode_switch`].
    NeedsConfirmation(PendingModeSwitch),
}

/// Coarse session state whose changes are worth mirroring to the instance record.
///
/// Remaining seconds are excluded, so per-second ticks compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCheckpoint {
    mode: PomodoroMode,
    completed_work_cycles: u32,
    settings: PomodoroSettings,
    running: bool,
    paused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSession {
    mode: PomodoroMode,
    completed_work_cycles: u32,
    settings: PomodoroSettings,
    engine: CountdownEngine,
}

impl PomodoroSession {
    /// Fresh session in work mode with zero cycles.
    pub fn new(settings: PomodoroSettings) -> Self {
        Self {
            mode: PomodoroMode::Work,
            completed_work_cycles: 0,
            settings,
            engine: CountdownEngine::new(PomodoroMode::Work.duration_secs(&settings)),
        }
    }

    /// Rebuilds a session from an instance snapshot. The stored settings win over the snapshot's
    /// copy, so edits made in another window apply on remount.
    pub fn restore(snapshot: Self, settings: PomodoroSettings) -> Self {
        let mut session = Self {
            engine: snapshot.engine.restored(),
            ..snapshot
        };
        if session.settings != settings {
            session.settings = settings;
            session.reset_engine_to_mode();
        }
        session
    }

    pub fn mode(&self) -> PomodoroMode {
        self.mode
    }

    pub fn completed_work_cycles(&self) -> u32 {
        self.completed_work_cycles
    }

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    pub fn engine(&self) -> &CountdownEngine {
        &self.engine
    }

    /// Mode, cycles, settings and run state, without the ticking remainder.
    pub fn checkpoint(&self) -> SessionCheckpoint {
        SessionCheckpoint {
            mode: self.mode,
            completed_work_cycles: self.completed_work_cycles,
            settings: self.settings,
            running: self.engine.is_running(),
            paused: self.engine.is_paused(),
        }
    }

    pub fn start(&mut self) -> Option<TickGeneration> {
        self.engine.start()
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Feeds one interval tick. Completion runs the mode transition and returns its effects.
    pub fn tick_for(&mut self, generation: TickGeneration) -> (TickOutcome, Vec<SessionEffect>) {
        let outcome = self.engine.tick_for(generation);
        let effects = if outcome == TickOutcome::Completed {
            self.complete()
        } else {
            Vec::new()
        };
        (outcome, effects)
    }

    /// Ends the current session immediately, sound included.
    pub fn skip(&mut self) -> Vec<SessionEffect> {
        self.complete()
    }

    /// Requests a manual mode change. A running session (ticking or paused) needs confirmation.
    pub fn request_mode_switch(&mut self, target: PomodoroMode) -> ModeSwitch {
        if self.engine.is_running() {
            return ModeSwitch::NeedsConfirmation(PendingModeSwitch { target });
        }
        self.apply_mode(target);
        ModeSwitch::Applied
    }

    /// Applies a switch the user confirmed.
    pub fn confirm_mode_switch(&mut self, pending: PendingModeSwitch) {
        self.apply_mode(pending.target);
    }

    /// Replaces the durations and restarts the current mode with its new length.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for non-positive fields and leaves the session unchanged.
    pub fn apply_settings(
        &mut self,
        settings: PomodoroSettings,
    ) -> Result<Vec<SessionEffect>, SettingsError> {
        settings.validate()?;
        self.settings = settings;
        self.reset_engine_to_mode();
        Ok(vec![SessionEffect::PersistSettings(settings)])
    }

    /// Focus session number shown in the footer.
    pub fn focus_session_number(&self) -> u32 {
        self.completed_work_cycles / 2 + 1
    }

    /// Completed cycles as shown in the footer, counting a work and break pair as one.
    pub fn displayed_cycles(&self) -> u32 {
        self.completed_work_cycles / 2
    }

    fn complete(&mut self) -> Vec<SessionEffect> {
        let effects = vec![SessionEffect::PlayCompletionSound];
        let next = match self.mode {
            PomodoroMode::Work => {
                self.completed_work_cycles = self.completed_work_cycles.saturating_add(1);
                if self.completed_work_cycles % self.settings.long_break_interval.max(1) == 0 {
                    PomodoroMode::LongBreak
                } else {
                    PomodoroMode::ShortBreak
                }
            }
            PomodoroMode::ShortBreak | PomodoroMode::LongBreak => PomodoroMode::Work,
        };
        self.apply_mode(next);
        effects
    }

    fn apply_mode(&mut self, mode: PomodoroMode) {
        self.mode = mode;
        self.reset_engine_to_mode();
    }

    fn reset_engine_to_mode(&mut self) {
        self.engine.configure(self.mode.duration_secs(&self.settings));
        self.engine.reset();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn session_with(mode: PomodoroMode, cycles: u32, interval: u32) -> PomodoroSession {
        let mut session = PomodoroSession::new(PomodoroSettings {
            long_break_interval: interval,
            ..PomodoroSettings::default()
        });
        session.mode = mode;
        session.completed_work_cycles = cycles;
        session.reset_engine_to_mode();
        session
    }

    #[test]
    fn fourth_work_completion_earns_long_break() {
        let mut session = session_with(PomodoroMode::Work, 3, 4);

        let effects = session.skip();

        assert_eq!(effects, vec![SessionEffect::PlayCompletionSound]);
        assert_eq!(session.mode(), PomodoroMode::LongBreak);
        assert_eq!(session.completed_work_cycles(), 4);
        assert_eq!(session.engine().remaining_secs(), 15 * 60);
    }

    #[test]
    fn other_work_completions_earn_short_break() {
        let mut session = session_with(PomodoroMode::Work, 1, 4);

        session.skip();

        assert_eq!(session.mode(), PomodoroMode::ShortBreak);
        assert_eq!(session.completed_work_cycles(), 2);
        assert_eq!(session.engine().remaining_secs(), 5 * 60);
    }

    #[test]
    fn breaks_return_to_work_without_counting() {
        for mode in [PomodoroMode::ShortBreak, PomodoroMode::LongBreak] {
            let mut session = session_with(mode, 2, 4);

            session.skip();

            assert_eq!(session.mode(), PomodoroMode::Work);
            assert_eq!(session.completed_work_cycles(), 2);
            assert!(session.engine().is_idle());
        }
    }

    #[test]
    fn countdown_completion_plays_sound_then_transitions() {
        let mut session = PomodoroSession::new(PomodoroSettings {
            work: 1,
            ..PomodoroSettings::default()
        });
        let generation = session.start().expect("start");

        let mut effects = Vec::new();
        for _ in 0..60 {
            let (_, produced) = session.tick_for(generation);
            effects.extend(produced);
        }

        assert_eq!(effects, vec![SessionEffect::PlayCompletionSound]);
        assert_eq!(session.mode(), PomodoroMode::ShortBreak);
        assert!(session.engine().is_idle());
        assert_eq!(session.tick_for(generation).0, TickOutcome::Stale);
    }

    #[test]
    fn mode_switch_needs_confirmation_while_running() {
        let mut session = PomodoroSession::new(PomodoroSettings::default());
        session.start();
        session.pause();

        let switch = session.request_mode_switch(PomodoroMode::LongBreak);

        let ModeSwitch::NeedsConfirmation(pending) = switch else {
            panic!("expected confirmation, got {switch:?}");
        };
        assert_eq!(session.mode(), PomodoroMode::Work);
        assert!(session.engine().is_running());

        session.confirm_mode_switch(pending);
        assert_eq!(session.mode(), PomodoroMode::LongBreak);
        assert!(session.engine().is_idle());
        assert_eq!(session.engine().remaining_secs(), 15 * 60);
    }

    #[test]
    fn idle_mode_switch_applies_immediately() {
        let mut session = PomodoroSession::new(PomodoroSettings::default());

        assert_eq!(
            session.request_mode_switch(PomodoroMode::ShortBreak),
            ModeSwitch::Applied
        );
        assert_eq!(session.engine().remaining_secs(), 5 * 60);
    }

    #[test]
    fn apply_settings_persists_and_resets_current_mode() {
        let mut session = PomodoroSession::new(PomodoroSettings::default());
        session.start();
        let new_settings = PomodoroSettings {
            work: 30,
            short_break: 10,
            long_break: 20,
            long_break_interval: 3,
        };

        let effects = session.apply_settings(new_settings).expect("valid settings");

        assert_eq!(effects, vec![SessionEffect::PersistSettings(new_settings)]);
        assert!(session.engine().is_idle());
        assert_eq!(session.engine().remaining_secs(), 30 * 60);
    }

    #[test]
    fn invalid_settings_change_nothing() {
        let mut session = PomodoroSession::new(PomodoroSettings::default());
        let before = session.clone();

        let result = session.apply_settings(PomodoroSettings {
            work: 0,
            ..PomodoroSettings::default()
        });

        assert!(result.is_err());
        assert_eq!(session, before);
    }

    #[test]
    fn snapshot_restores_mode_and_cycles_and_picks_up_new_settings() {
        let mut session = session_with(PomodoroMode::ShortBreak, 3, 4);
        session.start();
        let snapshot: PomodoroSession =
            serde_json::from_value(serde_json::to_value(&session).expect("serialize"))
                .expect("deserialize");

        let same = PomodoroSession::restore(snapshot.clone(), *session.settings());
        assert_eq!(same.mode(), PomodoroMode::ShortBreak);
        assert_eq!(same.completed_work_cycles(), 3);
        assert!(same.engine().is_paused());

        let changed = PomodoroSession::restore(
            snapshot,
            PomodoroSettings {
                short_break: 7,
                ..PomodoroSettings::default()
            },
        );
        assert!(changed.engine().is_idle());
        assert_eq!(changed.engine().remaining_secs(), 7 * 60);
    }

    #[test]
    fn footer_counts_follow_completed_cycles() {
        let session = session_with(PomodoroMode::Work, 5, 4);
        assert_eq!(session.displayed_cycles(), 2);
        assert_eq!(session.focus_session_number(), 3);
    }

    #[test]
    fn completion_sound_leads_the_effect_list() {
        let mut session = session_with(PomodoroMode::Work, 0, 4);
        session.apply_settings(PomodoroSettings {
            work: 1,
            ..PomodoroSettings::default()
        })
        .expect("valid settings");
        let generation = session.start().expect("start");

        let mut completion = Vec::new();
        for _ in 0..60 {
            let (outcome, effects) = session.tick_for(generation);
            if outcome == TickOutcome::Completed {
                completion = effects;
            }
        }

        assert_eq!(completion.first(), Some(&SessionEffect::PlayCompletionSound));
        assert_eq!(session.mode(), PomodoroMode::ShortBreak);
    }

    #[test]
    fn checkpoint_ignores_ticks_but_tracks_run_state() {
        let mut session = PomodoroSession::new(PomodoroSettings::default());
        let generation = session.start().expect("start");
        let ticking = session.checkpoint();

        session.tick_for(generation);
        session.tick_for(generation);
        assert_eq!(session.checkpoint(), ticking);

        session.pause();
        assert_ne!(session.checkpoint(), ticking);

        let paused = session.checkpoint();
        session.skip();
        assert_ne!(session.checkpoint(), paused);
    }
}
