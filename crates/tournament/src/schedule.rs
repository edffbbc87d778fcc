//! Tournament listing: engine roster, pairings, and per-match settings.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::match_runner::MatchConfig;
use crate::provision::EngineSpec;

/// A tournament description loaded from a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct TournamentSpec {
    pub name: String,
    /// The trusted legality authority, launched once per match
    pub referee: EngineSpec,
    pub engines: Vec<EngineSpec>,
    /// Explicit ordered (first, second) pairings. Empty means every
    /// ordered pair of the roster plays once.
    #[serde(default)]
    pub pairings: Vec<Pairing>,
    #[serde(default)]
    pub settings: MatchSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pairing {
    pub first: String,
    pub second: String,
}

/// Per-match knobs, all optional in the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    pub variant: String,
    pub move_time_secs: u64,
    pub grace_secs: u64,
    pub max_plies: u32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            variant: "Base+MLP".to_string(),
            move_time_secs: 5,
            grace_secs: 1,
            max_plies: 200,
        }
    }
}

impl MatchSettings {
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            variant: self.variant.clone(),
            move_time: Duration::from_secs(self.move_time_secs),
            grace: Duration::from_secs(self.grace_secs),
            max_plies: self.max_plies,
        }
    }
}

impl TournamentSpec {
    /// Load a tournament description from a TOML file
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read: {}", e))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, String> {
        let spec: TournamentSpec =
            toml::from_str(contents).map_err(|e| format!("Failed to parse: {}", e))?;
        spec.validate()?;
        Ok(spec)
    }

    fn validate(&self) -> Result<(), String> {
        for pairing in &self.pairings {
            for name in [&pairing.first, &pairing.second] {
                if self.engine(name).is_none() {
                    return Err(format!("pairing references unknown engine: {}", name));
                }
            }
        }
        if self.pairings.is_empty() && self.engines.len() < 2 {
            return Err("tournament needs at least two engines".to_string());
        }
        Ok(())
    }

    pub fn engine(&self, name: &str) -> Option<&EngineSpec> {
        self.engines.iter().find(|e| e.name == name)
    }

    /// Ordered (first mover, second mover) pairs to play.
    pub fn matchups(&self) -> Vec<(&EngineSpec, &EngineSpec)> {
        if !self.pairings.is_empty() {
            return self
                .pairings
                .iter()
                .filter_map(|p| Some((self.engine(&p.first)?, self.engine(&p.second)?)))
                .collect();
        }
        // Every ordered pair plays once, so each matchup is repeated with
        // colors swapped
        let mut pairs = Vec::new();
        for first in &self.engines {
            for second in &self.engines {
                if first.name != second.name {
                    pairs.push((first, second));
                }
            }
        }
        pairs
    }
}
