// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted records → graph.

use reel_graph::{OptionId, StoryGraph, VideoId};
use tracing::{debug, warn};

use crate::schema::{IndexRef, PersistedGraph};
use crate::{CodecError, StructuralError};

/// Result of [`resolve`]: the rebuilt graph plus whatever had to be dropped.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Rebuilt graph; always satisfies the graph invariants.
    pub graph: StoryGraph,
    /// Handle of each video record, by record position.
    pub videos: Vec<VideoId>,
    /// Handle of each option record, by record position.
    pub options: Vec<OptionId>,
    /// Relationships that were dropped, in discovery order.
    pub diagnostics: Vec<StructuralError>,
}

impl Resolution {
    /// `true` when nothing had to be dropped.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The graph, or [`CodecError::Corrupt`] if any relationship was dropped.
    pub fn into_strict(self) -> Result<StoryGraph, CodecError> {
        if self.diagnostics.is_empty() {
            Ok(self.graph)
        } else {
            Err(CodecError::Corrupt(self.diagnostics))
        }
    }
}

/// Rebuild a graph from persisted records.
///
/// Pass 1 creates every node from attributes alone. Pass 2 wires option
/// parent/child links and rebuilds each video's children. Child order follows
/// the video's `optionChildIndices` where it agrees with the options'
/// `parentVideoIndex`; options that name a parent without being listed are
/// appended in record order.
///
/// Never fails: out-of-range or contradictory indices are dropped and reported
/// in [`Resolution::diagnostics`].
pub fn resolve(persisted: &PersistedGraph) -> Resolution {
    let mut graph = StoryGraph::new();
    let mut diagnostics = Vec::new();

    // Pass 1: nodes only.
    let videos: Vec<VideoId> = persisted
        .video_nodes
        .iter()
        .map(|record| graph.insert_video(record.to_node()))
        .collect();
    let options: Vec<OptionId> = persisted
        .option_nodes
        .iter()
        .map(|record| graph.insert_option(record.to_node()))
        .collect();

    // Pass 2: relationships.
    let mut claimed_parent: Vec<Option<usize>> = Vec::with_capacity(options.len());
    for (pos, record) in persisted.option_nodes.iter().enumerate() {
        let parent = match IndexRef::classify(record.parent_video_index, videos.len()) {
            IndexRef::Absent => None,
            IndexRef::At(v) => Some(v),
            IndexRef::OutOfRange => {
                diagnostics.push(StructuralError::ParentOutOfRange {
                    option: pos,
                    index: record.parent_video_index,
                    len: videos.len(),
                });
                None
            }
        };
        claimed_parent.push(parent);

        match IndexRef::classify(record.child_video_index, videos.len()) {
            IndexRef::Absent => {}
            IndexRef::At(v) => {
                let linked = graph.connect_option_to_video(options[pos], videos[v]);
                debug_assert!(linked.is_ok(), "pass 1 created both endpoints");
            }
            IndexRef::OutOfRange => diagnostics.push(StructuralError::ChildOutOfRange {
                option: pos,
                index: record.child_video_index,
                len: videos.len(),
            }),
        }
    }

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); videos.len()];
    let mut placed = vec![false; options.len()];
    for (video_pos, record) in persisted.video_nodes.iter().enumerate() {
        for &raw in &record.option_child_indices {
            let option_pos = match IndexRef::classify(raw, options.len()) {
                IndexRef::At(o) => o,
                IndexRef::Absent | IndexRef::OutOfRange => {
                    diagnostics.push(StructuralError::OptionChildOutOfRange {
                        video: video_pos,
                        index: raw,
                        len: options.len(),
                    });
                    continue;
                }
            };
            if claimed_parent[option_pos] != Some(video_pos) {
                diagnostics.push(StructuralError::OptionChildMismatch {
                    video: video_pos,
                    option: option_pos,
                });
            } else if placed[option_pos] {
                diagnostics.push(StructuralError::DuplicateOptionChild {
                    video: video_pos,
                    option: option_pos,
                });
            } else {
                placed[option_pos] = true;
                members[video_pos].push(option_pos);
            }
        }
    }
    for (option_pos, parent) in claimed_parent.iter().enumerate() {
        if let (Some(video_pos), false) = (*parent, placed[option_pos]) {
            debug!(
                option = option_pos,
                video = video_pos,
                "option not listed by its parent; appending"
            );
            members[video_pos].push(option_pos);
        }
    }
    for (video_pos, list) in members.iter().enumerate() {
        for &option_pos in list {
            let attached = graph.connect_existing_option(videos[video_pos], options[option_pos]);
            debug_assert!(attached.is_ok(), "each option is attached once");
        }
    }

    for diagnostic in &diagnostics {
        warn!(%diagnostic, "dropped relationship while resolving story");
    }
    debug!(
        videos = videos.len(),
        options = options.len(),
        dropped = diagnostics.len(),
        "story resolved"
    );

    Resolution {
        graph,
        videos,
        options,
        diagnostics,
    }
}
