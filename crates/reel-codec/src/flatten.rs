// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Graph → persisted records.

use std::collections::HashMap;

use reel_graph::{OptionId, StoryGraph, VideoId};

use crate::schema::{to_index, OptionNodeRecord, PersistedGraph, VideoNodeRecord};

/// Flatten `graph` into index-addressed records.
///
/// Record positions follow the graph's sequence order, so flattening an
/// unmodified graph twice yields identical output. References become indices
/// into the just-assigned order; absent references become `-1`.
pub fn flatten(graph: &StoryGraph) -> PersistedGraph {
    let video_pos: HashMap<VideoId, usize> = graph
        .videos()
        .enumerate()
        .map(|(pos, (id, _))| (id, pos))
        .collect();
    let option_pos: HashMap<OptionId, usize> = graph
        .options()
        .enumerate()
        .map(|(pos, (id, _))| (id, pos))
        .collect();

    let video_nodes = graph
        .videos()
        .map(|(_, video)| {
            let children = video
                .option_children()
                .iter()
                .filter_map(|o| option_pos.get(o).copied())
                .map(|pos| to_index(Some(pos)))
                .collect();
            VideoNodeRecord::from_node(video, children)
        })
        .collect();

    let option_nodes = graph
        .options()
        .map(|(_, option)| {
            let parent = to_index(option.parent().and_then(|v| video_pos.get(&v).copied()));
            let child = to_index(option.child().and_then(|v| video_pos.get(&v).copied()));
            OptionNodeRecord::from_node(option, parent, child)
        })
        .collect();

    PersistedGraph {
        video_nodes,
        option_nodes,
    }
}
