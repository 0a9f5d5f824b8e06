//! Save/load of in-progress tables.
//!
//! A [`SessionSnapshot`] is a plain copy of everything needed to resume a
//! table: round counters, the shoe in draw order, every participant, and the
//! host's narrative log. Host callbacks are never part of it.
//!
//! Files are pretty-printed JSON. Writing serializes the whole snapshot
//! before the file is opened, and reading parses the whole file before the
//! engine is touched, so a failed load leaves the table as it was.

use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::RoundEngine;
use crate::errors::SessionError;
use crate::events::TableHost;
use crate::player::Participant;
use crate::shoe::ShoeState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub round_number: u32,
    pub current_player_index: usize,
    pub shoe: ShoeState,
    pub dealer: Participant,
    pub players: Vec<Participant>,
    /// Host narrative, newest first
    #[serde(default)]
    pub narrative: Vec<String>,
    /// RFC3339 time of the save
    #[serde(default)]
    pub saved_at: Option<String>,
}

impl SessionSnapshot {
    /// Copies the engine's table state. The engine is not modified.
    pub fn capture<H: TableHost>(engine: &RoundEngine<H>, narrative: &[String]) -> Self {
        Self {
            round_number: engine.current_round(),
            current_player_index: engine.current_player_index(),
            shoe: engine.shoe().state(),
            dealer: engine.dealer().clone(),
            players: engine.players().to_vec(),
            narrative: narrative.to_vec(),
            saved_at: None,
        }
    }

    /// Serializes then overwrites `path` in one write.
    pub fn write_to(&self, path: &Path) -> Result<(), SessionError> {
        let mut snapshot = self.clone();
        if snapshot.saved_at.is_none() {
            snapshot.saved_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let body = serde_json::to_vec_pretty(&snapshot)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
        }
        fs::write(path, body).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn read_from(path: &Path) -> Result<Self, SessionError> {
        let body = fs::read(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&body).map_err(|source| SessionError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }
}
