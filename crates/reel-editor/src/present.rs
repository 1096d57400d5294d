// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Drawable descriptions of nodes and links, in window coordinates.

use reel_graph::{NodeRef, OptionId, Rect, Vec2, VideoId};

use crate::menu::MenuAction;
use crate::session::EditorSession;

/// Hint shown on video cards whose preview progress has reached the reveal point.
pub const RUNTIME_HINT: &str = "Options appear at runtime";

/// Everything needed to draw one node body.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeCard {
    /// Video node body.
    Video {
        /// Node.
        id: VideoId,
        /// Box in window space.
        rect: Rect,
        /// Box title.
        heading: String,
        /// Clip path field; `None` shows an empty picker.
        clip: Option<String>,
        /// Preview slider value.
        progress: f32,
        /// Show [`RUNTIME_HINT`].
        runtime_hint: bool,
    },
    /// Option node body.
    Option {
        /// Node.
        id: OptionId,
        /// Box in window space.
        rect: Rect,
        /// Box title.
        heading: String,
        /// "Parent: …" or "No Parent".
        parent_label: String,
        /// "Child: …" or "No Child".
        child_label: String,
        /// Choice text field.
        prompt: String,
        /// "Connect Video Node" button, present while the option has no child.
        connect: Option<MenuAction>,
        /// Selection highlight.
        selected: bool,
    },
}

/// What a connector line means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorKind {
    /// Video → one of its option children.
    Membership,
    /// Option → the video it leads to.
    Target,
}

/// A line from the bottom-center of one node to the top-center of another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    /// Start point (window space).
    pub from: Vec2,
    /// End point (window space).
    pub to: Vec2,
    /// Line meaning.
    pub kind: ConnectorKind,
}

impl EditorSession {
    fn to_window(&self, rect: Rect) -> Rect {
        Rect::at(rect.position() + self.pan, Vec2::new(rect.width, rect.height))
    }

    fn video_title(&self, id: Option<VideoId>) -> Option<&str> {
        id.and_then(|v| self.graph.video(v)).map(|v| v.title.as_str())
    }

    /// Card for `node`, or `None` for a stale handle.
    pub fn card(&self, node: NodeRef) -> Option<NodeCard> {
        match node {
            NodeRef::Video(id) => self.graph.video(id).map(|v| NodeCard::Video {
                id,
                rect: self.to_window(v.rect),
                heading: v.title.clone(),
                clip: v.clip.as_ref().map(|c| c.as_str().to_owned()),
                progress: v.progress(),
                runtime_hint: v.progress() >= self.reveal_hint,
            }),
            NodeRef::Option(id) => self.graph.option(id).map(|o| NodeCard::Option {
                id,
                rect: self.to_window(o.rect),
                heading: o.title.clone(),
                parent_label: self
                    .video_title(o.parent())
                    .map_or_else(|| "No Parent".to_owned(), |t| format!("Parent: {t}")),
                child_label: self
                    .video_title(o.child())
                    .map_or_else(|| "No Child".to_owned(), |t| format!("Child: {t}")),
                prompt: o.prompt.clone(),
                connect: o
                    .child()
                    .is_none()
                    .then_some(MenuAction::BeginConnection { option: id }),
                selected: o.selected,
            }),
        }
    }

    /// Cards in draw order: videos, then options, each in sequence order.
    pub fn cards(&self) -> Vec<NodeCard> {
        let videos = self.graph.videos().map(|(id, _)| NodeRef::Video(id));
        let options = self.graph.options().map(|(id, _)| NodeRef::Option(id));
        videos.chain(options).filter_map(|n| self.card(n)).collect()
    }

    /// Connector lines: every membership edge, then every child target.
    pub fn connectors(&self) -> Vec<Connector> {
        let mut lines = Vec::new();
        for (_, video) in self.graph.videos() {
            let from = video.rect.bottom_center() + self.pan;
            for &option in video.option_children() {
                if let Some(o) = self.graph.option(option) {
                    lines.push(Connector {
                        from,
                        to: o.rect.top_center() + self.pan,
                        kind: ConnectorKind::Membership,
                    });
                }
            }
        }
        for (_, option) in self.graph.options() {
            if let Some(child) = option.child().and_then(|c| self.graph.video(c)) {
                lines.push(Connector {
                    from: option.rect.bottom_center() + self.pan,
                    to: child.rect.top_center() + self.pan,
                    kind: ConnectorKind::Target,
                });
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_card_labels_follow_links() {
        let mut s = EditorSession::new();
        let v = s.graph_mut().create_video_node(Vec2::ZERO);
        s.graph_mut().video_mut(v).unwrap().title = "Door".into();
        let o = s.graph_mut().create_option_node(Some(v)).unwrap();

        let Some(NodeCard::Option {
            parent_label,
            child_label,
            connect,
            ..
        }) = s.card(NodeRef::Option(o))
        else {
            unreachable!("live option");
        };
        assert_eq!(parent_label, "Parent: Door");
        assert_eq!(child_label, "No Child");
        assert_eq!(connect, Some(MenuAction::BeginConnection { option: o }));

        s.graph_mut().connect_option_to_video(o, v).unwrap();
        let Some(NodeCard::Option {
            child_label,
            connect,
            ..
        }) = s.card(NodeRef::Option(o))
        else {
            unreachable!("live option");
        };
        assert_eq!(child_label, "Child: Door");
        assert_eq!(connect, None);
    }

    #[test]
    fn runtime_hint_tracks_reveal_point() {
        let mut s = EditorSession::new();
        let v = s.graph_mut().create_video_node(Vec2::ZERO);
        let hint = |s: &EditorSession| {
            matches!(
                s.card(NodeRef::Video(v)),
                Some(NodeCard::Video { runtime_hint: true, .. })
            )
        };
        s.graph_mut().video_mut(v).unwrap().set_progress(0.79);
        assert!(!hint(&s));
        s.graph_mut().video_mut(v).unwrap().set_progress(0.8);
        assert!(hint(&s));
    }

    #[test]
    fn cards_and_connectors_are_panned() {
        let mut s = EditorSession::new();
        let v = s.graph_mut().create_video_node(Vec2::ZERO);
        let o = s.graph_mut().create_option_node(Some(v)).unwrap();
        let child = s.graph_mut().create_child_video(o).unwrap();
        s.pan = Vec2::new(10.0, 20.0);

        let Some(NodeCard::Video { rect, .. }) = s.card(NodeRef::Video(v)) else {
            unreachable!("live video");
        };
        assert_eq!(rect.position(), Vec2::new(10.0, 20.0));

        let lines = s.connectors();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].kind, ConnectorKind::Membership);
        assert_eq!(lines[0].from, Vec2::new(120.0, 160.0));
        assert_eq!(lines[0].to, Vec2::new(135.0, 210.0));
        assert_eq!(lines[1].kind, ConnectorKind::Target);
        let child_top = s.graph().video(child).unwrap().rect.top_center() + s.pan();
        assert_eq!(lines[1].to, child_top);
        assert_eq!(s.cards().len(), 3);
        assert_eq!(s.card(NodeRef::Video(child)).map(|_| ()), Some(()));
    }
}
