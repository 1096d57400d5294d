// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The mutable story graph.

use thiserror::Error;
use tracing::debug;

use crate::arena::Arena;
use crate::layout::{self, OPTION_NODE_SIZE, VIDEO_NODE_SIZE};
use crate::{GraphError, OptionId, OptionNode, Rect, Vec2, VideoId, VideoNode};

/// A broken membership or reference found by [`StoryGraph::check_invariants`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The option names a parent whose children do not include it.
    #[error("{option} names {parent} as parent but is not among its children")]
    MissingMembership {
        /// Offending option.
        option: OptionId,
        /// Parent it claims.
        parent: VideoId,
    },
    /// A video lists an option whose parent is something else.
    #[error("{video} lists {option} whose parent is elsewhere")]
    ForeignMember {
        /// Video holding the entry.
        video: VideoId,
        /// Listed option.
        option: OptionId,
    },
    /// A video lists the same option more than once.
    #[error("{video} lists {option} more than once")]
    DuplicateMember {
        /// Video holding the entries.
        video: VideoId,
        /// Repeated option.
        option: OptionId,
    },
    /// A video lists an option that no longer exists.
    #[error("{video} lists deleted {option}")]
    DanglingMember {
        /// Video holding the entry.
        video: VideoId,
        /// Missing option.
        option: OptionId,
    },
    /// An option refers to a deleted video as parent.
    #[error("{option} has deleted parent {parent}")]
    DanglingParent {
        /// Offending option.
        option: OptionId,
        /// Missing video.
        parent: VideoId,
    },
    /// An option refers to a deleted video as child.
    #[error("{option} has deleted child {child}")]
    DanglingChild {
        /// Offending option.
        option: OptionId,
        /// Missing video.
        child: VideoId,
    },
}

/// Bipartite graph of video and option nodes.
///
/// Both sequences keep insertion order; that order becomes the persisted
/// index order when the graph is flattened.
#[derive(Debug, Clone, Default)]
pub struct StoryGraph {
    videos: Arena<VideoNode>,
    options: Arena<OptionNode>,
}

impl StoryGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live video nodes.
    pub fn video_count(&self) -> usize {
        self.videos.len()
    }

    /// Number of live option nodes.
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// `true` when the graph has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.videos.len() == 0 && self.options.len() == 0
    }

    /// Look up a video node.
    pub fn video(&self, id: VideoId) -> Option<&VideoNode> {
        self.videos.get(id.0)
    }

    /// Look up a video node for attribute edits.
    pub fn video_mut(&mut self, id: VideoId) -> Option<&mut VideoNode> {
        self.videos.get_mut(id.0)
    }

    /// Look up an option node.
    pub fn option(&self, id: OptionId) -> Option<&OptionNode> {
        self.options.get(id.0)
    }

    /// Look up an option node for attribute edits.
    pub fn option_mut(&mut self, id: OptionId) -> Option<&mut OptionNode> {
        self.options.get_mut(id.0)
    }

    /// Video nodes in sequence order.
    pub fn videos(&self) -> impl Iterator<Item = (VideoId, &VideoNode)> + '_ {
        self.videos.iter().map(|(h, v)| (VideoId(h), v))
    }

    /// Option nodes in sequence order.
    pub fn options(&self) -> impl Iterator<Item = (OptionId, &OptionNode)> + '_ {
        self.options.iter().map(|(h, o)| (OptionId(h), o))
    }

    /// Options with no parent, in sequence order.
    pub fn unparented_options(&self) -> impl Iterator<Item = (OptionId, &OptionNode)> + '_ {
        self.options().filter(|(_, o)| o.parent().is_none())
    }

    /// Add a video node with default size and attributes at `position`.
    pub fn create_video_node(&mut self, position: Vec2) -> VideoId {
        let id = self.insert_video(VideoNode::new(Rect::at(position, VIDEO_NODE_SIZE)));
        debug!(video = %id, "video node created");
        id
    }

    /// Add a video node from attribute data. Any option children it carries
    /// are discarded; membership is only established through the graph.
    pub fn insert_video(&mut self, mut node: VideoNode) -> VideoId {
        node.children_mut().clear();
        VideoId(self.videos.insert(node))
    }

    /// Add an option node, optionally attached to `parent`.
    ///
    /// An attached option is placed directly below its parent and appended to
    /// the parent's children; an unattached one is placed at the origin.
    pub fn create_option_node(&mut self, parent: Option<VideoId>) -> Result<OptionId, GraphError> {
        let origin = match parent {
            Some(parent) => layout::spawn_below(&self.require_video(parent)?.rect),
            None => Vec2::ZERO,
        };
        let id = self.insert_option(OptionNode::new(Rect::at(origin, OPTION_NODE_SIZE)));
        if let Some(parent) = parent {
            self.attach(parent, id);
        }
        debug!(option = %id, parent = ?parent, "option node created");
        self.debug_check();
        Ok(id)
    }

    /// Add an unattached option node from attribute data. Parent and child
    /// references it carries are discarded.
    pub fn insert_option(&mut self, mut node: OptionNode) -> OptionId {
        node.set_parent(None);
        node.set_child(None);
        OptionId(self.options.insert(node))
    }

    /// Create a video below `option` and make it the option's child target.
    ///
    /// Any previous child target is replaced (not deleted).
    pub fn create_child_video(&mut self, option: OptionId) -> Result<VideoId, GraphError> {
        let origin = layout::spawn_below(&self.require_option(option)?.rect);
        let video = self.insert_video(VideoNode::new(Rect::at(origin, VIDEO_NODE_SIZE)));
        self.connect_option_to_video(option, video)?;
        Ok(video)
    }

    /// Point `option` at `video` as the clip to play when chosen.
    ///
    /// Returns the previous child target, if any.
    pub fn connect_option_to_video(
        &mut self,
        option: OptionId,
        video: VideoId,
    ) -> Result<Option<VideoId>, GraphError> {
        self.require_video(video)?;
        let node = self
            .options
            .get_mut(option.0)
            .ok_or(GraphError::UnknownOption(option))?;
        let previous = node.set_child(Some(video));
        debug!(option = %option, video = %video, "option connected to video");
        Ok(previous)
    }

    /// Clear the child target of `option`. Returns the previous target.
    pub fn disconnect_option_child(
        &mut self,
        option: OptionId,
    ) -> Result<Option<VideoId>, GraphError> {
        let node = self
            .options
            .get_mut(option.0)
            .ok_or(GraphError::UnknownOption(option))?;
        Ok(node.set_child(None))
    }

    /// Append an unattached `option` to `video`'s children.
    ///
    /// Fails with [`GraphError::AlreadyParented`] when the option already has
    /// a parent; single-parent membership is never silently rewritten.
    pub fn connect_existing_option(
        &mut self,
        video: VideoId,
        option: OptionId,
    ) -> Result<(), GraphError> {
        self.require_video(video)?;
        if let Some(parent) = self.require_option(option)?.parent() {
            return Err(GraphError::AlreadyParented { option, parent });
        }
        self.attach(video, option);
        debug!(option = %option, video = %video, "existing option attached");
        self.debug_check();
        Ok(())
    }

    /// Remove `option` from its parent's children, leaving it unattached.
    ///
    /// Returns the former parent.
    pub fn detach_option(&mut self, option: OptionId) -> Result<Option<VideoId>, GraphError> {
        let node = self
            .options
            .get_mut(option.0)
            .ok_or(GraphError::UnknownOption(option))?;
        let parent = node.parent();
        node.set_parent(None);
        if let Some(parent) = parent {
            if let Some(video) = self.videos.get_mut(parent.0) {
                video.children_mut().retain(|&o| o != option);
            }
        }
        self.debug_check();
        Ok(parent)
    }

    /// Delete a video node.
    ///
    /// Every option that named it as parent or child has that reference
    /// cleared first; those options survive, unattached or child-less.
    pub fn delete_video_node(&mut self, video: VideoId) -> Result<VideoNode, GraphError> {
        self.require_video(video)?;
        let handles = self.options.handles();
        let mut orphaned = 0_usize;
        let mut retargeted = 0_usize;
        for handle in handles {
            if let Some(option) = self.options.get_mut(handle) {
                if option.child() == Some(video) {
                    option.set_child(None);
                    retargeted += 1;
                }
                if option.parent() == Some(video) {
                    option.set_parent(None);
                    orphaned += 1;
                }
            }
        }
        let mut node = self
            .videos
            .remove(video.0)
            .ok_or(GraphError::UnknownVideo(video))?;
        node.children_mut().clear();
        debug!(video = %video, orphaned, retargeted, "video node deleted");
        self.debug_check();
        Ok(node)
    }

    /// Delete an option node.
    ///
    /// The option leaves its parent's children. Its child video is left in
    /// place so the subtree can be re-attached later.
    pub fn delete_option_node(&mut self, option: OptionId) -> Result<OptionNode, GraphError> {
        self.detach_option(option)?;
        let mut node = self
            .options
            .remove(option.0)
            .ok_or(GraphError::UnknownOption(option))?;
        node.set_child(None);
        debug!(option = %option, "option node deleted");
        self.debug_check();
        Ok(node)
    }

    /// Remove every node. Outstanding handles stop resolving.
    pub fn clear(&mut self) {
        self.videos.clear();
        self.options.clear();
    }

    /// Verify bidirectional parent/children membership and that no reference
    /// points at a deleted node.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (video_id, video) in self.videos() {
            let children = video.option_children();
            for (i, &option_id) in children.iter().enumerate() {
                if children[..i].contains(&option_id) {
                    return Err(InvariantViolation::DuplicateMember {
                        video: video_id,
                        option: option_id,
                    });
                }
                let Some(option) = self.option(option_id) else {
                    return Err(InvariantViolation::DanglingMember {
                        video: video_id,
                        option: option_id,
                    });
                };
                if option.parent() != Some(video_id) {
                    return Err(InvariantViolation::ForeignMember {
                        video: video_id,
                        option: option_id,
                    });
                }
            }
        }
        for (option_id, option) in self.options() {
            if let Some(parent) = option.parent() {
                let Some(video) = self.video(parent) else {
                    return Err(InvariantViolation::DanglingParent {
                        option: option_id,
                        parent,
                    });
                };
                if !video.option_children().contains(&option_id) {
                    return Err(InvariantViolation::MissingMembership {
                        option: option_id,
                        parent,
                    });
                }
            }
            if let Some(child) = option.child() {
                if !self.videos.contains(child.0) {
                    return Err(InvariantViolation::DanglingChild {
                        option: option_id,
                        child,
                    });
                }
            }
        }
        Ok(())
    }

    fn require_video(&self, id: VideoId) -> Result<&VideoNode, GraphError> {
        self.video(id).ok_or(GraphError::UnknownVideo(id))
    }

    fn require_option(&self, id: OptionId) -> Result<&OptionNode, GraphError> {
        self.option(id).ok_or(GraphError::UnknownOption(id))
    }

    /// Both handles must be live and the option unattached.
    fn attach(&mut self, video: VideoId, option: OptionId) {
        if let Some(node) = self.options.get_mut(option.0) {
            node.set_parent(Some(video));
        }
        if let Some(node) = self.videos.get_mut(video.0) {
            node.children_mut().push(option);
        }
    }

    fn debug_check(&self) {
        debug_assert_eq!(self.check_invariants(), Ok(()));
    }
}
