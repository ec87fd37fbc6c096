//! Configuration for one lock-picking run.

use serde::{Deserialize, Serialize};

use super::preset::LockPreset;
use super::{AUTO_CAP_MAX, AUTO_CAP_MIN, AUTO_CAP_PER_SUCCESS, HARD_ATTEMPT_CEILING};
use crate::error::{LockError, LockResult};

/// Parameters of a lock and how the attempts are run.
///
/// The builder methods normalise out-of-range input (a required success count
/// of zero or below becomes 1, negative counts become 0) instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockConfiguration {
    /// Lock quality the DC and successes came from.
    pub preset: LockPreset,
    /// Difficulty class of the lock.
    pub difficulty_class: i32,
    /// Progress needed to open the lock (at least 1).
    pub required_successes: u32,
    /// In-game minutes each attempt takes.
    pub minutes_per_attempt: u32,
    /// Attempt cap; 0 selects the automatic cap.
    pub max_attempts: u32,
    /// Stop immediately when a critical failure breaks the tools.
    pub stop_on_critical_failure: bool,
    /// The Sneaky Key grants +1 progress on the first success.
    pub sneaky_key_active: bool,
    /// Roll silently instead of through the host's dice tray.
    pub silent_mode: bool,
    /// Show the report to the roller only.
    pub whisper: bool,
}

impl Default for LockConfiguration {
    fn default() -> Self {
        Self::from_preset(LockPreset::Simple)
    }
}

impl LockConfiguration {
    /// Start from a preset's DC and required successes.
    pub fn from_preset(preset: LockPreset) -> Self {
        Self {
            preset,
            difficulty_class: preset.dc(),
            required_successes: preset.required_successes(),
            minutes_per_attempt: 1,
            max_attempts: 0,
            stop_on_critical_failure: true,
            sneaky_key_active: false,
            silent_mode: true,
            whisper: false,
        }
    }

    /// Parse a JSON document. Missing fields keep their defaults and
    /// out-of-range numbers are clamped like the builder methods do.
    pub fn from_json(json: &str) -> LockResult<Self> {
        let raw: RawLockConfiguration =
            serde_json::from_str(json).map_err(|e| LockError::InvalidConfig(e.to_string()))?;
        raw.into_config()
    }

    /// Set the difficulty class.
    pub fn with_dc(mut self, dc: i32) -> Self {
        self.difficulty_class = dc;
        self
    }

    /// Set the required successes (clamped to at least 1).
    pub fn with_required_successes(mut self, successes: i64) -> Self {
        self.required_successes = clamp_count(successes).max(1);
        self
    }

    /// Set the minutes per attempt (clamped to at least 0).
    pub fn with_minutes_per_attempt(mut self, minutes: i64) -> Self {
        self.minutes_per_attempt = clamp_count(minutes);
        self
    }

    /// Set the attempt cap (clamped to at least 0; 0 means automatic).
    pub fn with_max_attempts(mut self, attempts: i64) -> Self {
        self.max_attempts = clamp_count(attempts);
        self
    }

    /// Whether a critical failure stops the run.
    pub fn with_stop_on_critical_failure(mut self, stop: bool) -> Self {
        self.stop_on_critical_failure = stop;
        self
    }

    /// Whether the Sneaky Key is in play.
    pub fn with_sneaky_key(mut self, active: bool) -> Self {
        self.sneaky_key_active = active;
        self
    }

    /// Whether to roll silently.
    pub fn with_silent_mode(mut self, silent: bool) -> Self {
        self.silent_mode = silent;
        self
    }

    /// Whether to whisper the report to the roller.
    pub fn with_whisper(mut self, whisper: bool) -> Self {
        self.whisper = whisper;
        self
    }

    /// The attempt cap that bounds a run with this configuration.
    ///
    /// An explicit cap is used as given; 0 selects ten attempts per required
    /// success, kept between 30 and 300. Either way the hard ceiling applies.
    pub fn effective_cap(&self) -> u32 {
        let cap = if self.max_attempts == 0 {
            self.required_successes
                .max(1)
                .saturating_mul(AUTO_CAP_PER_SUCCESS)
                .clamp(AUTO_CAP_MIN, AUTO_CAP_MAX)
        } else {
            self.max_attempts
        };
        cap.min(HARD_ATTEMPT_CEILING)
    }
}

fn clamp_count(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// On-disk shape: signed numbers so negative values can be clamped. Unknown
/// keys are rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawLockConfiguration {
    preset: Option<String>,
    difficulty_class: Option<i32>,
    required_successes: Option<i64>,
    minutes_per_attempt: Option<i64>,
    max_attempts: Option<i64>,
    stop_on_critical_failure: Option<bool>,
    sneaky_key_active: Option<bool>,
    silent_mode: Option<bool>,
    whisper: Option<bool>,
}

impl RawLockConfiguration {
    fn into_config(self) -> LockResult<LockConfiguration> {
        let preset = match self.preset.as_deref() {
            Some(name) => {
                LockPreset::parse(name).ok_or_else(|| LockError::UnknownPreset(name.to_string()))?
            }
            None => LockPreset::Simple,
        };
        let mut config = LockConfiguration::from_preset(preset);

        // Presets fix DC and successes; only a custom lock takes its own.
        if !preset.is_custom()
            && (self.difficulty_class.is_some() || self.required_successes.is_some())
        {
            return Err(LockError::InvalidConfig(format!(
                "difficulty_class and required_successes only apply to a custom lock, not {preset}"
            )));
        }
        if let Some(dc) = self.difficulty_class {
            config = config.with_dc(dc);
        }
        if let Some(successes) = self.required_successes {
            config = config.with_required_successes(successes);
        }
        if let Some(minutes) = self.minutes_per_attempt {
            config = config.with_minutes_per_attempt(minutes);
        }
        if let Some(max) = self.max_attempts {
            config = config.with_max_attempts(max);
        }
        if let Some(stop) = self.stop_on_critical_failure {
            config = config.with_stop_on_critical_failure(stop);
        }
        if let Some(sneaky) = self.sneaky_key_active {
            config = config.with_sneaky_key(sneaky);
        }
        if let Some(silent) = self.silent_mode {
            config = config.with_silent_mode(silent);
        }
        if let Some(whisper) = self.whisper {
            config = config.with_whisper(whisper);
        }
        Ok(config)
    }
}
