//! Pomodoro durations, their validation and their `localStorage` representation.

use leptos::logging;
use platform_host::PrefsStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const POMODORO_SETTINGS_KEY: &str = "pomodoroSettings";

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;
pub const DEFAULT_LONG_BREAK_INTERVAL: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Session durations in minutes, plus how many work sessions earn a long break.
pub struct PomodoroSettings {
    pub work: u32,
    pub short_break: u32,
    pub long_break: u32,
    pub long_break_interval: u32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work: DEFAULT_WORK_MINUTES,
            short_break: DEFAULT_SHORT_BREAK_MINUTES,
            long_break: DEFAULT_LONG_BREAK_MINUTES,
            long_break_interval: DEFAULT_LONG_BREAK_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// One of the four settings fields, used to point form errors at their input.
pub enum SettingsField {
    Work,
    ShortBreak,
    LongBreak,
    LongBreakInterval,
}

impl SettingsField {
    pub const ALL: [Self; 4] = [
        Self::Work,
        Self::ShortBreak,
        Self::LongBreak,
        Self::LongBreakInterval,
    ];

    /// JSON field name, which doubles as the form input id.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::ShortBreak => "shortBreak",
            Self::LongBreak => "longBreak",
            Self::LongBreakInterval => "longBreakInterval",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Work => "Pomodoro (minutes)",
            Self::ShortBreak => "Short Break (minutes)",
            Self::LongBreak => "Long Break (minutes)",
            Self::LongBreakInterval => "Long Break Interval",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Rejected settings input.
pub enum SettingsError {
    /// The field text is not a whole number.
    #[error("{} must be a whole number", .0.label())]
    NotANumber(SettingsField),
    /// The field is zero or negative.
    #[error("{} must be at least 1", .0.label())]
    NotPositive(SettingsField),
}

impl SettingsError {
    pub fn field(&self) -> SettingsField {
        match self {
            Self::NotANumber(field) | Self::NotPositive(field) => *field,
        }
    }
}

impl PomodoroSettings {
    pub fn get(&self, field: SettingsField) -> u32 {
        match field {
            SettingsField::Work => self.work,
            SettingsField::ShortBreak => self.short_break,
            SettingsField::LongBreak => self.long_break,
            SettingsField::LongBreakInterval => self.long_break_interval,
        }
    }

    fn set(&mut self, field: SettingsField, value: u32) {
        match field {
            SettingsField::Work => self.work = value,
            SettingsField::ShortBreak => self.short_break = value,
            SettingsField::LongBreak => self.long_break = value,
            SettingsField::LongBreakInterval => self.long_break_interval = value,
        }
    }

    /// Checks that every field is at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NotPositive`] for the first zero field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        match SettingsField::ALL.into_iter().find(|f| self.get(*f) == 0) {
            Some(field) => Err(SettingsError::NotPositive(field)),
            None => Ok(()),
        }
    }

    /// Merges a stored JSON object over `self`, field by field. Missing, non-integer and
    /// non-positive fields keep their current value.
    pub fn merged_with(mut self, stored: &Map<String, Value>) -> Self {
        for field in SettingsField::ALL {
            let Some(value) = stored.get(field.key()) else {
                continue;
            };
            match value.as_u64().and_then(|v| u32::try_from(v).ok()) {
                Some(minutes) if minutes > 0 => self.set(field, minutes),
                _ => logging::warn!(
                    "ignoring stored pomodoro setting {}: {value}",
                    field.key()
                ),
            }
        }
        self
    }

    /// Loads settings from storage merged over the defaults. Missing or malformed storage yields
    /// the defaults.
    pub fn load(prefs: &dyn PrefsStore) -> Self {
        let raw = match prefs.load_pref(POMODORO_SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(err) => {
                logging::warn!("pomodoro settings load failed: {err}");
                return Self::default();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(stored)) => Self::default().merged_with(&stored),
            Ok(other) => {
                logging::warn!("ignoring stored pomodoro settings that are not an object: {other}");
                Self::default()
            }
            Err(err) => {
                logging::warn!("failed to parse pomodoro settings: {err}");
                Self::default()
            }
        }
    }

    /// Persists the full settings object.
    ///
    /// # Errors
    ///
    /// Returns the serialization or store error.
    pub fn save(&self, prefs: &dyn PrefsStore) -> Result<(), String> {
        let raw = serde_json::to_string(self).map_err(|e| e.to_string())?;
        prefs.save_pref(POMODORO_SETTINGS_KEY, &raw)
    }
}

/// Text contents of the settings form, one string per input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsDraft {
    pub work: String,
    pub short_break: String,
    pub long_break: String,
    pub long_break_interval: String,
}

impl SettingsDraft {
    pub fn from_settings(settings: &PomodoroSettings) -> Self {
        Self {
            work: settings.work.to_string(),
            short_break: settings.short_break.to_string(),
            long_break: settings.long_break.to_string(),
            long_break_interval: settings.long_break_interval.to_string(),
        }
    }

    pub fn get(&self, field: SettingsField) -> &str {
        match field {
            SettingsField::Work => &self.work,
            SettingsField::ShortBreak => &self.short_break,
            SettingsField::LongBreak => &self.long_break,
            SettingsField::LongBreakInterval => &self.long_break_interval,
        }
    }

    pub fn set(&mut self, field: SettingsField, text: String) {
        match field {
            SettingsField::Work => self.work = text,
            SettingsField::ShortBreak => self.short_break = text,
            SettingsField::LongBreak => self.long_break = text,
            SettingsField::LongBreakInterval => self.long_break_interval = text,
        }
    }

    /// Parses every field.
    ///
    /// # Errors
    ///
    /// Returns the first field that is not a whole number or is below 1.
    pub fn parse(&self) -> Result<PomodoroSettings, SettingsError> {
        let mut settings = PomodoroSettings::default();
        for field in SettingsField::ALL {
            let text = self.get(field).trim();
            let value: i64 = text
                .parse()
                .map_err(|_| SettingsError::NotANumber(field))?;
            if value < 1 {
                return Err(SettingsError::NotPositive(field));
            }
            let value = u32::try_from(value).map_err(|_| SettingsError::NotANumber(field))?;
            settings.set(field, value);
        }
        settings.validate()?;
        Ok(settings)
    }
}
