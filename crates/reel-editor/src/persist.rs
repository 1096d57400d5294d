// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saving and loading the session's story through a config store.

use reel_app_core::config::{ConfigError, ConfigService, ConfigStore};
use reel_codec::{flatten, from_json, resolve, to_json_pretty, CodecError, StructuralError};
use thiserror::Error;
use tracing::{info, warn};

use crate::session::{EditorMode, EditorSession};

/// Save/load failure.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The store could not read or write.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The stored bytes are not a story.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result of [`EditorSession::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The story replaced the session's graph. Dropped relationships are listed.
    Loaded {
        /// Relationships that could not be restored.
        diagnostics: Vec<StructuralError>,
    },
    /// Nothing stored under the key; the session is unchanged.
    Missing,
}

impl EditorSession {
    /// Flatten the graph and write it under `key` as pretty JSON.
    pub fn save<S: ConfigStore>(
        &mut self,
        config: &ConfigService<S>,
        key: &str,
    ) -> Result<(), PersistError> {
        let persisted = flatten(&self.graph);
        let bytes = to_json_pretty(&persisted)?;
        config.save_bytes(key, &bytes)?;
        self.snapshot = Some(persisted.content_hash());
        info!(
            key,
            videos = persisted.video_nodes.len(),
            options = persisted.option_nodes.len(),
            "story saved"
        );
        Ok(())
    }

    /// Replace the graph with the story stored under `key`.
    ///
    /// Damaged relationships do not fail the load; they are dropped and
    /// returned. A clean load is the dirty baseline as loaded, so clip path
    /// and progress normalisation do not count as edits. A load that had to
    /// drop anything keeps the stored form as baseline and reports
    /// [`is_dirty`](Self::is_dirty) until saved.
    pub fn load<S: ConfigStore>(
        &mut self,
        config: &ConfigService<S>,
        key: &str,
    ) -> Result<LoadOutcome, PersistError> {
        let Some(bytes) = config.load_bytes(key)? else {
            info!(key, "no story stored");
            return Ok(LoadOutcome::Missing);
        };
        let persisted = from_json(&bytes)?;
        let resolution = resolve(&persisted);
        if !resolution.is_clean() {
            warn!(
                key,
                dropped = resolution.diagnostics.len(),
                "story loaded with dropped relationships"
            );
        }
        self.snapshot = Some(if resolution.is_clean() {
            flatten(&resolution.graph).content_hash()
        } else {
            persisted.content_hash()
        });
        self.graph = resolution.graph;
        self.mode = EditorMode::Idle;
        Ok(LoadOutcome::Loaded {
            diagnostics: resolution.diagnostics,
        })
    }

    /// Drop every node ("Clear Tree"). The cleared graph still needs saving.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.mode = EditorMode::Idle;
    }

    /// Whether the graph differs from what was last saved or loaded.
    ///
    /// A session that never saved or loaded is dirty once it has any node.
    pub fn is_dirty(&self) -> bool {
        match self.snapshot {
            Some(saved) => flatten(&self.graph).content_hash() != saved,
            None => !self.graph.is_empty(),
        }
    }
}
