//! Frame sequencing for the animated experiments.
//!
//! A [`Sequencer`] owns at most one [`AnimationSession`] at a time. The caller
//! drives it one [`Step`] per timer tick: `N` intermediate frames, then one
//! final outcome. Every step draws a fresh sample, so the final outcome is
//! independent of the last frame shown.

use crate::model::experiment::Experiment;
use crate::model::outcome::Outcome;
use crate::sampler::OutcomeSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSession {
    id: u64,
    experiment: Experiment,
    counter: u32,
    frames: u32,
}

impl AnimationSession {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn experiment(&self) -> Experiment {
        self.experiment
    }

    /// Intermediate frames shown so far.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn remaining_frames(&self) -> u32 {
        self.frames.saturating_sub(self.counter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Animating(AnimationSession),
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Intermediate display value; another step follows after the frame delay.
    Frame { index: u32, outcome: Outcome },
    /// Committed result; the session is over.
    Final(Outcome),
}

impl Step {
    pub fn outcome(self) -> Outcome {
        match self {
            Step::Frame { outcome, .. } | Step::Final(outcome) => outcome,
        }
    }

    pub fn is_final(self) -> bool {
        matches!(self, Step::Final(_))
    }
}

#[derive(Debug, Clone)]
pub struct Sequencer {
    experiment: Experiment,
    frames: u32,
    state: SequencerState,
    next_id: u64,
}

impl Sequencer {
    pub fn new(experiment: Experiment) -> Self {
        Self::with_frames(experiment, experiment.default_frames())
    }

    pub fn with_frames(experiment: Experiment, frames: u32) -> Self {
        Self {
            experiment,
            frames,
            state: SequencerState::Idle,
            next_id: 1,
        }
    }

    pub fn experiment(&self) -> Experiment {
        self.experiment
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        match &self.state {
            SequencerState::Animating(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, SequencerState::Animating(_))
    }

    /// Opens a new session and returns its id, or `None` while one is live.
    pub fn start(&mut self) -> Option<u64> {
        if self.is_animating() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.state = SequencerState::Animating(AnimationSession {
            id,
            experiment: self.experiment,
            counter: 0,
            frames: self.frames,
        });
        Some(id)
    }

    /// Draws the next step of the live session. Returns `None` when idle or done.
    pub fn advance<S: OutcomeSource + ?Sized>(&mut self, source: &mut S) -> Option<Step> {
        let SequencerState::Animating(mut session) = self.state else {
            return None;
        };
        let outcome = source.sample(self.experiment);
        if session.counter < session.frames {
            let index = session.counter;
            session.counter += 1;
            self.state = SequencerState::Animating(session);
            Some(Step::Frame { index, outcome })
        } else {
            self.state = SequencerState::Done;
            Some(Step::Final(outcome))
        }
    }

    /// Drops the live session without committing a result.
    pub fn abort(&mut self) {
        if self.is_animating() {
            self.state = SequencerState::Idle;
        }
    }
}
