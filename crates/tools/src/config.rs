//! `mansion.toml` loading. Command-line flags override file values, which
//! override the built-in defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use mansion_core::{SessionConfig, VerticalDoorPolicy};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DoorPolicy {
    /// Door toward the room above sits a fixed 15 tiles from the left edge.
    Fixed,
    /// Door toward the room above sits on the interior's center column.
    Center,
}

impl From<DoorPolicy> for VerticalDoorPolicy {
    fn from(policy: DoorPolicy) -> Self {
        match policy {
            DoorPolicy::Fixed => VerticalDoorPolicy::default(),
            DoorPolicy::Center => VerticalDoorPolicy::InteriorCenter,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSection {
    pub rooms: Option<usize>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub door_policy: Option<DoorPolicy>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    pub seed: Option<u64>,
}

/// Optional external program; `None` keeps the offline placeholders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandSection {
    pub command: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MansionConfig {
    pub layout: LayoutSection,
    pub session: SessionSection,
    pub narrative: CommandSection,
    pub interrogation: CommandSection,
}

impl MansionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise starts from an empty config.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Fills every `None` in `overrides` from the file, then the defaults.
    pub fn session_config(&self, overrides: &LayoutSection) -> SessionConfig {
        let defaults = SessionConfig::default();
        let layout = &self.layout;
        SessionConfig {
            rooms: overrides.rooms.or(layout.rooms).unwrap_or(defaults.rooms),
            width: overrides.width.or(layout.width).unwrap_or(defaults.width),
            height: overrides.height.or(layout.height).unwrap_or(defaults.height),
            vertical_door: overrides
                .door_policy
                .or(layout.door_policy)
                .map(VerticalDoorPolicy::from)
                .unwrap_or(defaults.vertical_door),
        }
    }

    pub fn seed(&self, override_seed: Option<u64>) -> Option<u64> {
        override_seed.or(self.session.seed)
    }

    pub fn narrative_command(&self, override_command: Option<String>) -> Option<String> {
        override_command.or_else(|| self.narrative.command.clone())
    }

    pub fn interrogation_command(&self, override_command: Option<String>) -> Option<String> {
        override_command.or_else(|| self.interrogation.command.clone())
    }
}
