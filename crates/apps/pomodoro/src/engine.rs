//! Whole-second countdown state machine.
//!
//! The engine never schedules anything itself. The view owns the interval and feeds ticks in
//! through [`CountdownEngine::tick_for`], passing the generation it captured at start. Every
//! transition that should silence an interval (`pause`, `reset`, completion) bumps the generation,
//! so a tick delivered by a handle that was cleared late is recognised as stale and dropped.

use serde::{Deserialize, Serialize};

/// Identifies the tick source that was current when ticking (re)started.
pub type TickGeneration = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of feeding one tick into the engine.
pub enum TickOutcome {
    /// The engine is idle or paused; nothing changed.
    Inactive,
    /// The tick came from an outdated tick source; nothing changed.
    Stale,
    /// One second was consumed.
    Ticked,
    /// The countdown reached its end. The engine has already reset itself to idle.
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownEngine {
    duration_secs: u32,
    remaining_secs: u32,
    running: bool,
    paused: bool,
    #[serde(skip)]
    generation: TickGeneration,
}

impl CountdownEngine {
    /// Creates an idle engine with `duration_secs` remaining.
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            running: false,
            paused: true,
            generation: 0,
        }
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Whether a session is in progress, ticking or paused.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Running and not paused.
    pub fn is_ticking(&self) -> bool {
        self.running && !self.paused
    }

    pub fn is_idle(&self) -> bool {
        !self.running
    }

    /// Generation ticks must carry to be accepted.
    pub fn generation(&self) -> TickGeneration {
        self.generation
    }

    /// Sets the target duration. An idle engine shows the new duration immediately; a running one
    /// keeps its remaining time until the next reset.
    pub fn configure(&mut self, duration_secs: u32) {
        self.duration_secs = duration_secs;
        if self.is_idle() {
            self.remaining_secs = duration_secs;
        }
    }

    /// Begins or resumes ticking. Returns the generation the caller's tick source must present,
    /// or `None` when the engine was already ticking.
    pub fn start(&mut self) -> Option<TickGeneration> {
        if self.is_ticking() {
            return None;
        }
        self.running = true;
        self.paused = false;
        self.generation = self.generation.wrapping_add(1);
        Some(self.generation)
    }

    /// Suspends ticking without losing remaining time. No-op unless ticking.
    pub fn pause(&mut self) {
        if !self.is_ticking() {
            return;
        }
        self.paused = true;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Stops ticking and restores the configured duration.
    pub fn reset(&mut self) {
        self.running = false;
        self.paused = true;
        self.remaining_secs = self.duration_secs;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Consumes one second. When the remaining time would drop below one second the engine
    /// reports [`TickOutcome::Completed`] instead and resets itself.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_ticking() {
            return TickOutcome::Inactive;
        }
        if self.remaining_secs > 1 {
            self.remaining_secs -= 1;
            TickOutcome::Ticked
        } else {
            self.reset();
            TickOutcome::Completed
        }
    }

    /// Like [`Self::tick`], but only when `generation` matches the current tick source.
    pub fn tick_for(&mut self, generation: TickGeneration) -> TickOutcome {
        if generation != self.generation {
            return TickOutcome::Stale;
        }
        self.tick()
    }

    /// Remaining share of the configured duration in `[0, 1]`. A zero duration reports `0`.
    pub fn progress_fraction(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        (f64::from(self.remaining_secs) / f64::from(self.duration_secs)).clamp(0.0, 1.0)
    }

    /// Restores a snapshot taken from a previous mount. The restored engine is never ticking:
    /// a session that was ticking comes back paused, since its tick source is gone.
    pub fn restored(mut self) -> Self {
        if self.is_ticking() {
            self.paused = true;
        }
        self.remaining_secs = self.remaining_secs.min(self.duration_secs.max(1));
        self.generation = 0;
        self
    }
}

/// Formats seconds as zero-padded `MM:SS`. Minutes are not wrapped at one hour.
pub fn format_clock(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn full_work_session_completes_exactly_once_on_last_tick() {
        let mut engine = CountdownEngine::new(0);
        engine.configure(1500);
        engine.start();

        let mut completions = Vec::new();
        for tick in 1..=1500 {
            if engine.tick() == TickOutcome::Completed {
                completions.push(tick);
            }
        }

        assert_eq!(completions, vec![1500]);
        assert!(engine.is_idle());
        assert!(engine.is_paused());
        assert_eq!(engine.remaining_secs(), 1500);
        assert_eq!(engine.tick(), TickOutcome::Inactive);
    }

    #[test]
    fn paused_engine_ignores_ticks() {
        let mut engine = CountdownEngine::new(90);
        engine.start();
        engine.tick();
        engine.pause();

        for _ in 0..50 {
            assert_eq!(engine.tick(), TickOutcome::Inactive);
        }

        assert_eq!(engine.remaining_secs(), 89);
        assert!(engine.is_running());
        assert!(engine.is_paused());
    }

    #[test]
    fn five_second_scenario() {
        let mut engine = CountdownEngine::new(5);
        engine.start();

        for _ in 0..4 {
            assert_eq!(engine.tick(), TickOutcome::Ticked);
        }
        assert_eq!(engine.remaining_secs(), 1);
        assert!(engine.is_running());

        assert_eq!(engine.tick(), TickOutcome::Completed);
        assert!(engine.is_idle());
        assert_eq!(engine.remaining_secs(), 5);
    }

    #[test]
    fn start_is_noop_while_ticking_and_resumes_from_pause() {
        let mut engine = CountdownEngine::new(10);
        let first = engine.start().expect("start from idle");
        assert_eq!(engine.start(), None);

        engine.tick_for(first);
        engine.pause();
        let resumed = engine.start().expect("resume from pause");

        assert_ne!(first, resumed);
        assert_eq!(engine.remaining_secs(), 9);
        assert!(engine.is_ticking());
    }

    #[test]
    fn pause_is_noop_when_idle() {
        let mut engine = CountdownEngine::new(10);
        let generation = engine.generation();
        engine.pause();
        assert_eq!(engine.generation(), generation);
        assert!(engine.is_idle());
    }

    #[test]
    fn stale_generation_ticks_are_dropped() {
        let mut engine = CountdownEngine::new(10);
        let old = engine.start().expect("start");
        engine.reset();
        let current = engine.start().expect("restart");

        assert_eq!(engine.tick_for(old), TickOutcome::Stale);
        assert_eq!(engine.remaining_secs(), 10);
        assert_eq!(engine.tick_for(current), TickOutcome::Ticked);
        assert_eq!(engine.remaining_secs(), 9);
    }

    #[test]
    fn configure_only_moves_remaining_when_idle() {
        let mut engine = CountdownEngine::new(60);
        engine.configure(120);
        assert_eq!(engine.remaining_secs(), 120);

        engine.start();
        engine.tick();
        engine.configure(30);
        assert_eq!(engine.remaining_secs(), 119);

        engine.reset();
        assert_eq!(engine.remaining_secs(), 30);
    }

    #[test]
    fn progress_fraction_is_bounded_and_zero_duration_safe() {
        let mut engine = CountdownEngine::new(4);
        assert_eq!(engine.progress_fraction(), 1.0);
        engine.start();
        engine.tick();
        assert_eq!(engine.progress_fraction(), 0.75);

        assert_eq!(CountdownEngine::new(0).progress_fraction(), 0.0);
    }

    #[test]
    fn restored_snapshot_is_never_ticking() {
        let mut engine = CountdownEngine::new(30);
        engine.start();
        engine.tick();

        let restored = engine.clone().restored();

        assert!(restored.is_running());
        assert!(restored.is_paused());
        assert_eq!(restored.remaining_secs(), 29);
        assert_eq!(restored.generation(), 0);
    }

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(0), "00:00");
    }
}
