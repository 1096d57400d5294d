// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed handles for story nodes.

use core::fmt;

use crate::arena::Handle;

/// Handle to a [`VideoNode`](crate::VideoNode) in a [`StoryGraph`](crate::StoryGraph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VideoId(pub(crate) Handle);

/// Handle to an [`OptionNode`](crate::OptionNode) in a [`StoryGraph`](crate::StoryGraph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionId(pub(crate) Handle);

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "video#{}.{}", self.0.index, self.0.generation)
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "option#{}.{}", self.0.index, self.0.generation)
    }
}

/// Either kind of story node.
///
/// Editor and presentation code match on this instead of dispatching through a
/// per-kind trait object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// A video node.
    Video(VideoId),
    /// An option node.
    Option(OptionId),
}

impl From<VideoId> for NodeRef {
    fn from(id: VideoId) -> Self {
        Self::Video(id)
    }
}

impl From<OptionId> for NodeRef {
    fn from(id: OptionId) -> Self {
        Self::Option(id)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video(id) => id.fmt(f),
            Self::Option(id) => id.fmt(f),
        }
    }
}
