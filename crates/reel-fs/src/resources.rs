// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Clip lookup on disk.

use reel_graph::ClipPath;
use reel_player::{ResourceError, ResourceStore};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions tried, in order, when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

/// Resolves `a/b` to the first existing `<root>/a/b.<ext>`.
#[derive(Debug, Clone)]
pub struct FsResourceStore {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FsResourceStore {
    /// Store probing [`DEFAULT_EXTENSIONS`] below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|&e| e.to_owned()).collect(),
        }
    }

    /// Replace the extension list (tried in the given order).
    pub fn with_extensions<I, E>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Clip root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates<'a>(&'a self, path: &'a ClipPath) -> impl Iterator<Item = PathBuf> + 'a {
        let stem = self.root.join(path.as_str());
        self.extensions.iter().map(move |ext| {
            let mut file = stem.clone().into_os_string();
            file.push(".");
            file.push(ext);
            PathBuf::from(file)
        })
    }
}

impl ResourceStore for FsResourceStore {
    type Clip = PathBuf;

    fn resolve(&self, path: &ClipPath) -> Result<PathBuf, ResourceError> {
        let found = self.candidates(path).find(|p| p.is_file());
        match found {
            Some(file) => {
                debug!(clip = %path, file = %file.display(), "clip resolved");
                Ok(file)
            }
            None => Err(ResourceError::NotFound {
                path: path.as_str().to_owned(),
            }),
        }
    }
}
