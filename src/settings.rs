//! Game settings and rule presets
//!
//! Loaded once at startup from an optional JSON file. Nothing is ever written
//! back; settings only shape the next run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Ruleset presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameVariant {
    /// Five lethal obstacle kinds, time-based difficulty ramp
    #[default]
    Classic,
    /// Adds boost, puddles and a score-driven ramp
    Arcade,
}

impl GameVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameVariant::Classic => "Classic",
            GameVariant::Arcade => "Arcade",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameVariant::Classic),
            "arcade" => Some(GameVariant::Arcade),
            _ => None,
        }
    }

    /// Rule toggles for this preset
    pub fn rules(&self) -> Rules {
        match self {
            GameVariant::Classic => Rules::default(),
            GameVariant::Arcade => Rules {
                boost: true,
                puddles: true,
                difficulty_trigger: DifficultyTrigger::Score,
            },
        }
    }

    /// Balance for this preset
    pub fn tuning(&self) -> Tuning {
        match self {
            GameVariant::Classic => Tuning::default(),
            GameVariant::Arcade => Tuning::arcade(),
        }
    }
}

/// What the difficulty ramp counts toward its cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyTrigger {
    /// Whole seconds survived in the current run
    #[default]
    Elapsed,
    /// Obstacles recycled in the current run
    Recycles,
    /// Current run score
    Score,
}

/// Gameplay rule toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Rules {
    /// Holding boost speeds the road up briefly
    pub boost: bool,
    /// Puddles join the spawn pool (slow the rider instead of ending the run)
    pub puddles: bool,
    pub difficulty_trigger: DifficultyTrigger,
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ruleset preset
    pub variant: GameVariant,
    pub rules: Rules,
    pub tuning: Tuning,

    // === Loop ===
    /// Frames per second the loop is paced to
    pub frame_cap: u32,
    /// Fixed RNG seed (random per launch when unset)
    pub seed: Option<u64>,

    // === HUD ===
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: GameVariant::Classic,
            rules: Rules::default(),
            tuning: Tuning::default(),
            frame_cap: 60,
            seed: None,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Create settings from a preset (applies preset defaults)
    pub fn from_preset(preset: GameVariant) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a preset (overwrites rules and tuning)
    pub fn apply_preset(&mut self, preset: GameVariant) {
        self.variant = preset;
        self.rules = preset.rules();
        self.tuning = preset.tuning();
    }

    /// Parse settings from JSON, sanitizing the tuning
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let mut settings: Settings = serde_json::from_value(value.clone())?;
        // A preset named without explicit rules/tuning brings its own
        if value.get("rules").is_none() {
            settings.rules = settings.variant.rules();
        }
        if value.get("tuning").is_none() {
            settings.tuning = settings.variant.tuning();
        }
        settings.tuning.sanitize();
        if settings.frame_cap == 0 {
            log::warn!("frame_cap 0 is not allowed, using 60");
            settings.frame_cap = 60;
        }
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!(
                        "Loaded settings from {} ({} rules)",
                        path.display(),
                        settings.variant.as_str()
                    );
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
