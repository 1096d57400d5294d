// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted story schema.
//!
//! Field names match the JSON written by the editor (`videoNodes`,
//! `optionChildIndices`, ...). Every field has a default so the minimal
//! runtime schema (titles, clip paths, indices) loads without geometry.

use reel_graph::{ClipPath, OptionNode, Rect, VideoNode};
use serde::{Deserialize, Serialize};

/// Sentinel for "no reference" in every index field.
pub const NO_REF: i32 = -1;

/// Both node sequences, cross-referenced by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedGraph {
    /// Video records; position = video index.
    pub video_nodes: Vec<VideoNodeRecord>,
    /// Option records; position = option index.
    pub option_nodes: Vec<OptionNodeRecord>,
}

/// Persisted video node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoNodeRecord {
    /// Left edge on the editor canvas.
    pub x: f32,
    /// Top edge on the editor canvas.
    pub y: f32,
    /// Node width.
    pub width: f32,
    /// Node height.
    pub height: f32,
    /// Display title.
    pub title: String,
    /// Resource-relative clip path without extension; empty when unassigned.
    pub video_clip_path: String,
    /// Editor preview progress.
    pub progress: f32,
    /// Option children in declaration order.
    pub option_child_indices: Vec<i32>,
}

/// Persisted option node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionNodeRecord {
    /// Left edge on the editor canvas.
    pub x: f32,
    /// Top edge on the editor canvas.
    pub y: f32,
    /// Node width.
    pub width: f32,
    /// Node height.
    pub height: f32,
    /// Internal title.
    pub title: String,
    /// Choice text shown to the viewer.
    pub choice_prompt: String,
    /// Editor selection flag.
    pub is_selected: bool,
    /// Index of the owning video, or [`NO_REF`].
    pub parent_video_index: i32,
    /// Index of the video played when chosen, or [`NO_REF`].
    pub child_video_index: i32,
}

impl Default for OptionNodeRecord {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            title: String::new(),
            choice_prompt: String::new(),
            is_selected: false,
            parent_video_index: NO_REF,
            child_video_index: NO_REF,
        }
    }
}

/// Classification of a raw persisted index against a sequence length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRef {
    /// The [`NO_REF`] sentinel.
    Absent,
    /// A usable position.
    At(usize),
    /// Anything else (`< -1` or `>= len`).
    OutOfRange,
}

impl IndexRef {
    /// Classify `raw` for a sequence of `len` elements.
    pub fn classify(raw: i32, len: usize) -> Self {
        if raw == NO_REF {
            return Self::Absent;
        }
        match usize::try_from(raw) {
            Ok(i) if i < len => Self::At(i),
            _ => Self::OutOfRange,
        }
    }
}

/// Position → persisted index; positions that do not fit become [`NO_REF`].
pub(crate) fn to_index(position: Option<usize>) -> i32 {
    position
        .and_then(|p| i32::try_from(p).ok())
        .unwrap_or(NO_REF)
}

impl VideoNodeRecord {
    /// Attribute payload as a detached graph node (no children).
    pub fn to_node(&self) -> VideoNode {
        let mut node = VideoNode::new(Rect::new(self.x, self.y, self.width, self.height));
        node.title.clone_from(&self.title);
        node.clip = ClipPath::new(&self.video_clip_path);
        node.set_progress(self.progress);
        node
    }

    pub(crate) fn from_node(node: &VideoNode, option_child_indices: Vec<i32>) -> Self {
        Self {
            x: node.rect.x,
            y: node.rect.y,
            width: node.rect.width,
            height: node.rect.height,
            title: node.title.clone(),
            video_clip_path: node
                .clip
                .as_ref()
                .map(|c| c.as_str().to_owned())
                .unwrap_or_default(),
            progress: node.progress(),
            option_child_indices,
        }
    }
}

impl OptionNodeRecord {
    /// Attribute payload as a detached graph node (no parent or child).
    pub fn to_node(&self) -> OptionNode {
        let mut node = OptionNode::new(Rect::new(self.x, self.y, self.width, self.height));
        node.title.clone_from(&self.title);
        node.prompt.clone_from(&self.choice_prompt);
        node.selected = self.is_selected;
        node
    }

    pub(crate) fn from_node(node: &OptionNode, parent: i32, child: i32) -> Self {
        Self {
            x: node.rect.x,
            y: node.rect.y,
            width: node.rect.width,
            height: node.rect.height,
            title: node.title.clone(),
            choice_prompt: node.prompt.clone(),
            is_selected: node.selected,
            parent_video_index: parent,
            child_video_index: child,
        }
    }
}

impl PersistedGraph {
    /// `true` when both sequences are empty.
    pub fn is_empty(&self) -> bool {
        self.video_nodes.is_empty() && self.option_nodes.is_empty()
    }

    /// Option record at `raw`, if it is a valid option index.
    pub fn option_at(&self, raw: i32) -> Option<&OptionNodeRecord> {
        match IndexRef::classify(raw, self.option_nodes.len()) {
            IndexRef::At(i) => self.option_nodes.get(i),
            IndexRef::Absent | IndexRef::OutOfRange => None,
        }
    }

    /// Blake3 digest over every persisted field in sequence order.
    ///
    /// Two graphs hash equal iff they would serialize to the same records, so
    /// the editor can compare against the last saved snapshot.
    pub fn content_hash(&self) -> [u8; 32] {
        let mut h = blake3::Hasher::new();
        h.update(b"reel.story.v1");
        h.update(&(self.video_nodes.len() as u64).to_le_bytes());
        for v in &self.video_nodes {
            for f in [v.x, v.y, v.width, v.height, v.progress] {
                h.update(&f.to_bits().to_le_bytes());
            }
            hash_str(&mut h, &v.title);
            hash_str(&mut h, &v.video_clip_path);
            h.update(&(v.option_child_indices.len() as u64).to_le_bytes());
            for i in &v.option_child_indices {
                h.update(&i.to_le_bytes());
            }
        }
        h.update(&(self.option_nodes.len() as u64).to_le_bytes());
        for o in &self.option_nodes {
            for f in [o.x, o.y, o.width, o.height] {
                h.update(&f.to_bits().to_le_bytes());
            }
            hash_str(&mut h, &o.title);
            hash_str(&mut h, &o.choice_prompt);
            h.update(&[u8::from(o.is_selected)]);
            h.update(&o.parent_video_index.to_le_bytes());
            h.update(&o.child_video_index.to_le_bytes());
        }
        h.finalize().into()
    }
}

fn hash_str(h: &mut blake3::Hasher, s: &str) {
    h.update(&(s.len() as u64).to_le_bytes());
    h.update(s.as_bytes());
}
