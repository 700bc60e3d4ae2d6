use std::time::Duration;

use probsim_core::model::experiment::Experiment;
use probsim_core::model::outcome::Outcome;
use probsim_core::sampler::OutcomeSource;
use probsim_core::sequencer::{Sequencer, SequencerState, Step};
use probsim_ui::panel::{IMAGE_ERROR_TITLE, PanelDescriptor, image_error_message};
use probsim_ui::{AssetStore, Presenter, Slot};
use tracing::{debug, info, warn};

use crate::config::AnimationConfig;
use crate::scheduler::{Scheduler, TimerTask};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Run(Experiment),
    Reset,
}

/// What a button press or timer tick led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// An intermediate frame was shown and the next tick scheduled.
    Frame(Outcome),
    /// The final outcome was committed.
    Committed(Outcome),
    /// The image for this outcome could not be shown; the session ended.
    Failed(Outcome),
    /// Press ignored because the experiment is still animating.
    Busy,
    /// Tick from a session that is no longer live.
    Stale,
    Cleared,
}

pub struct SimulatorController<S> {
    source: S,
    assets: AssetStore,
    sequencers: [Sequencer; 3],
    frame_delay: Duration,
}

impl<S: OutcomeSource> SimulatorController<S> {
    pub fn new(source: S, assets: AssetStore, animation: &AnimationConfig) -> Self {
        let sequencers = Experiment::ALL.map(|experiment| {
            let frames = if experiment.is_animated() {
                animation.frames
            } else {
                0
            };
            Sequencer::with_frames(experiment, frames)
        });
        Self {
            source,
            assets,
            sequencers,
            frame_delay: animation.frame_delay(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn state(&self, experiment: Experiment) -> SequencerState {
        self.sequencers[experiment.index()].state()
    }

    pub fn is_animating(&self, experiment: Experiment) -> bool {
        self.sequencers[experiment.index()].is_animating()
    }

    pub fn handle<P, T>(&mut self, command: Command, presenter: &mut P, timers: &mut T) -> Progress
    where
        P: Presenter + ?Sized,
        T: Scheduler + ?Sized,
    {
        match command {
            Command::Run(experiment) => self.press(experiment, presenter, timers),
            Command::Reset => self.reset(presenter),
        }
    }

    /// Starts an experiment and shows its first step right away.
    pub fn press<P, T>(&mut self, experiment: Experiment, presenter: &mut P, timers: &mut T) -> Progress
    where
        P: Presenter + ?Sized,
        T: Scheduler + ?Sized,
    {
        let sequencer = &mut self.sequencers[experiment.index()];
        let Some(session) = sequencer.start() else {
            debug!(%experiment, "press ignored while animating");
            return Progress::Busy;
        };
        debug!(%experiment, session, frames = sequencer.frames(), "session started");
        self.step(experiment, session, presenter, timers)
    }

    pub fn on_timer<P, T>(&mut self, task: TimerTask, presenter: &mut P, timers: &mut T) -> Progress
    where
        P: Presenter + ?Sized,
        T: Scheduler + ?Sized,
    {
        let live = self.sequencers[task.experiment.index()]
            .session()
            .map(|session| session.id());
        if live != Some(task.session) {
            debug!(experiment = %task.experiment, session = task.session, "stale tick dropped");
            return Progress::Stale;
        }
        self.step(task.experiment, task.session, presenter, timers)
    }

    /// Clears every panel. Live animations keep running.
    pub fn reset<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Progress {
        presenter.clear_all();
        info!("results reset");
        Progress::Cleared
    }

    fn step<P, T>(&mut self, experiment: Experiment, session: u64, presenter: &mut P, timers: &mut T) -> Progress
    where
        P: Presenter + ?Sized,
        T: Scheduler + ?Sized,
    {
        let sequencer = &mut self.sequencers[experiment.index()];
        let Some(step) = sequencer.advance(&mut self.source) else {
            return Progress::Stale;
        };
        let panel = PanelDescriptor::for_experiment(experiment);

        match step {
            Step::Frame { index, outcome } => {
                presenter.show_text(experiment, Slot::Result, panel.in_progress_text());
                match self.assets.load(outcome) {
                    Ok(image) => {
                        presenter.show_image(experiment, &image);
                        timers.after(self.frame_delay, TimerTask { experiment, session });
                        debug!(%experiment, session, index, %outcome, "frame shown");
                        Progress::Frame(outcome)
                    }
                    Err(err) => {
                        sequencer.abort();
                        warn!(%experiment, session, index, error = %err, "animation aborted");
                        presenter.show_error(IMAGE_ERROR_TITLE, &image_error_message(experiment, &err));
                        Progress::Failed(outcome)
                    }
                }
            }
            Step::Final(outcome) => {
                let event = outcome.event_space();
                presenter.show_text(experiment, Slot::Result, &format!("Result: {outcome}"));
                presenter.show_text(experiment, Slot::EventSpace, &event.to_string());
                info!(%experiment, session, %outcome, %event, "result committed");
                match self.assets.load(outcome) {
                    Ok(image) => {
                        presenter.show_image(experiment, &image);
                        Progress::Committed(outcome)
                    }
                    Err(err) => {
                        warn!(%experiment, session, error = %err, "result image unavailable");
                        presenter.clear_image(experiment);
                        presenter.show_error(IMAGE_ERROR_TITLE, &image_error_message(experiment, &err));
                        Progress::Failed(outcome)
                    }
                }
            }
        }
    }
}
