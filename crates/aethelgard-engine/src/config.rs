//! Engine configuration.
//!
//! Session, logging and simulation tuning in one file. The simulation
//! tuning lives under the `[simulation]` table.

use aethelgard_common::ZoneError;
use aethelgard_gameplay::{SimConfig, Zone};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::store::CharacterClass;

/// Configuration file name.
const CONFIG_FILE: &str = "aethelgard.toml";

/// Environment variable overriding the config file location.
const CONFIG_ENV: &str = "AETHELGARD_CONFIG";

/// Default tracing directive.
pub const DEFAULT_LOG_FILTER: &str = "aethelgard=info";

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Session Settings ===
    /// Frames per second the clock targets
    pub target_fps: u32,
    /// Frames to run before the session ends
    pub max_frames: u64,
    /// Advance by exactly `1 / target_fps` per frame instead of wall time
    pub fixed_timestep: bool,
    /// Zone loaded at startup
    pub start_zone: String,
    /// Class whose starting stats seed the store
    pub player_class: CharacterClass,
    /// Start with the power-shot damage bonus active
    pub power_shots: bool,
    /// Respawn in the Castle on death instead of ending the session
    pub respawn_on_death: bool,

    // === Logging ===
    /// Tracing filter directive
    pub log_filter: String,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,

    // === Simulation ===
    /// Gameplay tuning
    pub simulation: SimConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Session
            target_fps: 60,
            max_frames: 3600,
            fixed_timestep: true,
            start_zone: Zone::Forest.name().to_string(),
            player_class: CharacterClass::Warrior,
            power_shots: false,
            respawn_on_death: true,

            // Logging
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            json_logs: false,

            simulation: SimConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let mut contents = String::new();
        let read = fs::File::open(path).and_then(|mut file| file.read_to_string(&mut contents));
        if let Err(e) = read {
            warn!("Failed to read config file: {e}");
            return Self::default();
        }

        match toml::from_str(&contents) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to parse config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Config file path: `$AETHELGARD_CONFIG` if set, else the working directory.
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from)
    }

    /// Clamp session values to sensible ranges.
    ///
    /// Simulation tuning is not clamped here; the scheduler rejects it
    /// outright if it is nonsensical.
    pub fn validate(&mut self) {
        self.target_fps = self.target_fps.clamp(1, 240);
        self.max_frames = self.max_frames.max(1);

        if self.log_filter.trim().is_empty() {
            self.log_filter = DEFAULT_LOG_FILTER.to_string();
        }
    }

    /// Parses `start_zone`.
    pub fn start_zone(&self) -> Result<Zone, ZoneError> {
        self.start_zone.parse()
    }
}
