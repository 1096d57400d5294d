// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tick-driven state machine over a flattened story.

use reel_app_core::prefs::PlaybackPrefs;
use reel_codec::{IndexRef, PersistedGraph, VideoNodeRecord};
use reel_graph::ClipPath;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::port::{PlaybackDriver, ResourceError, ResourceStore};
use crate::thresholds::{ThresholdError, Thresholds};

/// Where the traversal is within the current node visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing playing: before `start`, after `stop`, or halted on a clip
    /// that could not be resolved.
    Idle,
    /// Clip playing, choices hidden.
    PlayingBeforeReveal,
    /// Choices shown but not selectable yet.
    OptionsRevealedDisabled,
    /// Choices shown and selectable.
    OptionsRevealedEnabled,
    /// The current video offered no choices. Terminal.
    StoryEnded,
}

/// One entry of the choice panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Option record position; pass this to [`Traversal::select_option`].
    pub option_index: usize,
    /// Text shown on the button.
    pub prompt: String,
    /// Whether the button accepts input.
    pub enabled: bool,
}

/// Transition reported by [`Traversal`].
#[derive(Debug, Clone, PartialEq)]
pub enum TraversalEvent {
    /// Playback of `video` began.
    Started {
        /// Video record position.
        video: usize,
    },
    /// Choices became visible (all disabled).
    OptionsRevealed {
        /// Video record position.
        video: usize,
        /// Offered choices in declaration order.
        choices: Vec<Choice>,
    },
    /// Visible choices became selectable.
    OptionsEnabled {
        /// Video record position.
        video: usize,
    },
    /// `video` reached its reveal point with nothing to offer.
    StoryEnded {
        /// Video record position.
        video: usize,
    },
}

/// Traversal failure. The traversal stays in a consistent state after any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The story has no video records.
    #[error("story has no videos")]
    EmptyStory,
    /// Start index past the end of the video records.
    #[error("start index {index} outside 0..{len}")]
    StartOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of video records.
        len: usize,
    },
    /// `start` called while a node visit is in progress.
    #[error("already started ({state:?})")]
    AlreadyStarted {
        /// State at the time of the call.
        state: PlaybackState,
    },
    /// The story already ended in this traversal.
    #[error("story ended at video {video}")]
    Finished {
        /// Video record position where it ended.
        video: usize,
    },
    /// Selection attempted before choices were enabled.
    #[error("cannot select in state {state:?}")]
    NotSelectable {
        /// State at the time of the call.
        state: PlaybackState,
    },
    /// The option is not among the currently offered choices.
    #[error("option {option_index} is not offered")]
    UnknownChoice {
        /// Requested option record position.
        option_index: usize,
    },
    /// The chosen option leads nowhere valid.
    #[error("option {option_index}: childVideoIndex {index} is not a video")]
    InvalidTarget {
        /// Chosen option record position.
        option_index: usize,
        /// Raw `childVideoIndex`.
        index: i32,
    },
    /// The target video's clip could not be resolved.
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Walks a [`PersistedGraph`] one node visit at a time.
///
/// Per visit the state advances `PlayingBeforeReveal → OptionsRevealedDisabled
/// → OptionsRevealedEnabled`, each step firing at most once. A valid selection
/// makes the option's child current and begins a new visit.
#[derive(Debug)]
pub struct Traversal<D, R> {
    story: PersistedGraph,
    thresholds: Thresholds,
    driver: D,
    resources: R,
    current: usize,
    state: PlaybackState,
    offered: Vec<usize>,
}

impl<D, R> Traversal<D, R>
where
    D: PlaybackDriver,
    R: ResourceStore<Clip = D::Clip>,
{
    /// New idle traversal positioned at video 0.
    pub fn new(story: PersistedGraph, thresholds: Thresholds, driver: D, resources: R) -> Self {
        Self {
            story,
            thresholds,
            driver,
            resources,
            current: 0,
            state: PlaybackState::Idle,
            offered: Vec::new(),
        }
    }

    /// Traversal configured from playback preferences: thresholds plus the
    /// start index. The index is checked by [`start`](Self::start).
    pub fn from_prefs(
        story: PersistedGraph,
        prefs: &PlaybackPrefs,
        driver: D,
        resources: R,
    ) -> Result<Self, ThresholdError> {
        let thresholds = Thresholds::from_prefs(prefs)?;
        Ok(Self::new(story, thresholds, driver, resources).with_start(prefs.start_index))
    }

    /// Start from `index` instead of 0. Checked by [`start`](Self::start).
    pub fn with_start(mut self, index: usize) -> Self {
        self.current = index;
        self
    }

    /// Begin playing the current video.
    ///
    /// On a resource failure the traversal stays `Idle` on the same video and
    /// `start` may be retried.
    pub fn start(&mut self) -> Result<TraversalEvent, PlaybackError> {
        match self.state {
            PlaybackState::Idle => {}
            PlaybackState::StoryEnded => {
                return Err(PlaybackError::Finished {
                    video: self.current,
                });
            }
            state => return Err(PlaybackError::AlreadyStarted { state }),
        }
        let len = self.story.video_nodes.len();
        if len == 0 {
            return Err(PlaybackError::EmptyStory);
        }
        if self.current >= len {
            return Err(PlaybackError::StartOutOfRange {
                index: self.current,
                len,
            });
        }
        self.play_current()
    }

    /// Sample progress and fire any thresholds it has crossed.
    ///
    /// Returns nothing when no sample is available or nothing changed. Reveal
    /// and enable may both fire on one tick when progress jumps past both.
    pub fn tick(&mut self) -> Vec<TraversalEvent> {
        let mut events = Vec::new();
        if !matches!(
            self.state,
            PlaybackState::PlayingBeforeReveal | PlaybackState::OptionsRevealedDisabled
        ) {
            return events;
        }
        let Some(progress) = self.driver.progress() else {
            return events;
        };

        if self.state == PlaybackState::PlayingBeforeReveal
            && progress >= self.thresholds.reveal()
        {
            events.push(self.reveal());
        }
        if self.state == PlaybackState::OptionsRevealedDisabled
            && progress >= self.thresholds.enable()
        {
            self.state = PlaybackState::OptionsRevealedEnabled;
            debug!(video = self.current, progress, "choices enabled");
            events.push(TraversalEvent::OptionsEnabled {
                video: self.current,
            });
        }
        events
    }

    /// Follow an offered option to its child video.
    ///
    /// On `InvalidTarget` nothing changes. On a resource failure the child is
    /// already current and the traversal is halted in `Idle`.
    pub fn select_option(&mut self, option_index: usize) -> Result<TraversalEvent, PlaybackError> {
        if self.state != PlaybackState::OptionsRevealedEnabled {
            return Err(PlaybackError::NotSelectable { state: self.state });
        }
        if !self.offered.contains(&option_index) {
            return Err(PlaybackError::UnknownChoice { option_index });
        }
        let raw = self
            .story
            .option_nodes
            .get(option_index)
            .map_or(reel_codec::NO_REF, |o| o.child_video_index);
        let target = match IndexRef::classify(raw, self.story.video_nodes.len()) {
            IndexRef::At(target) => target,
            IndexRef::Absent | IndexRef::OutOfRange => {
                warn!(option_index, index = raw, "option has no valid child video");
                return Err(PlaybackError::InvalidTarget {
                    option_index,
                    index: raw,
                });
            }
        };
        info!(from = self.current, to = target, option_index, "choice taken");
        self.current = target;
        self.state = PlaybackState::Idle;
        self.offered.clear();
        self.play_current()
    }

    /// Pause the driver. The state machine is unaffected.
    pub fn pause(&mut self) {
        self.driver.pause();
    }

    /// Stop playback and return to `Idle` on the current video.
    ///
    /// A finished story stays `StoryEnded`; only the driver is stopped.
    /// Replaying takes a fresh traversal.
    pub fn stop(&mut self) {
        self.driver.stop();
        if self.state == PlaybackState::StoryEnded {
            return;
        }
        self.state = PlaybackState::Idle;
        self.offered.clear();
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the current video record.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Record of the current video, if the index is valid.
    pub fn current_video(&self) -> Option<&VideoNodeRecord> {
        self.story.video_nodes.get(self.current)
    }

    /// Choices currently on screen; empty before reveal.
    pub fn choices(&self) -> Vec<Choice> {
        let enabled = self.state == PlaybackState::OptionsRevealedEnabled;
        self.offered
            .iter()
            .filter_map(|&i| {
                self.story.option_nodes.get(i).map(|o| Choice {
                    option_index: i,
                    prompt: o.choice_prompt.clone(),
                    enabled,
                })
            })
            .collect()
    }

    /// Story being walked.
    pub fn story(&self) -> &PersistedGraph {
        &self.story
    }

    /// Active thresholds.
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Borrow the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutably borrow the driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn play_current(&mut self) -> Result<TraversalEvent, PlaybackError> {
        let video = self.current;
        let raw_path = self
            .story
            .video_nodes
            .get(video)
            .map_or("", |v| v.video_clip_path.as_str());
        let clip = match ClipPath::new(raw_path) {
            Some(path) => self.resources.resolve(&path),
            None => Err(ResourceError::EmptyPath { video }),
        }
        .map_err(|err| {
            warn!(video, ?err, "clip unavailable; playback halted");
            err
        })?;
        self.driver.play(&clip);
        self.state = PlaybackState::PlayingBeforeReveal;
        info!(video, clip = raw_path, "playing");
        Ok(TraversalEvent::Started { video })
    }

    fn reveal(&mut self) -> TraversalEvent {
        let video = self.current;
        let listed = self
            .story
            .video_nodes
            .get(video)
            .map(|v| v.option_child_indices.as_slice())
            .unwrap_or_default();
        let mut offered = Vec::with_capacity(listed.len());
        for &raw in listed {
            match IndexRef::classify(raw, self.story.option_nodes.len()) {
                IndexRef::At(i) if !offered.contains(&i) => offered.push(i),
                IndexRef::At(i) => warn!(video, option = i, "option listed twice; skipped"),
                IndexRef::Absent | IndexRef::OutOfRange => {
                    warn!(video, index = raw, "option index out of range; skipped");
                }
            }
        }
        self.offered = offered;

        if self.offered.is_empty() {
            info!(video, "no options available; story ended");
            self.driver.stop();
            self.state = PlaybackState::StoryEnded;
            return TraversalEvent::StoryEnded { video };
        }
        self.state = PlaybackState::OptionsRevealedDisabled;
        debug!(video, count = self.offered.len(), "choices revealed");
        TraversalEvent::OptionsRevealed {
            video,
            choices: self.choices(),
        }
    }
}
