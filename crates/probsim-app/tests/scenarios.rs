use std::fs;
use std::path::Path;

use probsim_app::config::AnimationConfig;
use probsim_app::{Command, Progress, SimulatorController, TimerQueue, TimerTask};
use probsim_core::model::card::Card;
use probsim_core::model::coin::Coin;
use probsim_core::model::die::DieFace;
use probsim_core::model::experiment::Experiment;
use probsim_core::model::outcome::Outcome;
use probsim_core::model::rank::Rank;
use probsim_core::model::suit::Suit;
use probsim_core::sampler::{CountingSource, FixedOutcomes, OutcomeSource};
use probsim_core::sequencer::SequencerState;
use probsim_ui::resource::AssetManifest;
use probsim_ui::{AssetStore, BoardView};
use tempfile::TempDir;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n-test-image";

fn all_outcomes() -> Vec<Outcome> {
    Coin::ALL
        .into_iter()
        .map(Outcome::Coin)
        .chain(DieFace::ALL.into_iter().map(Outcome::Die))
        .chain(Card::all().map(Outcome::Card))
        .collect()
}

fn asset_dir(skip: &[Outcome]) -> (TempDir, AssetStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = AssetStore::new(AssetManifest::placeholder()).with_root(dir.path());
    for outcome in all_outcomes() {
        if skip.contains(&outcome) {
            continue;
        }
        let path = store.resolve(outcome);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("asset dir");
        }
        fs::write(&path, PNG_BYTES).expect("write asset");
    }
    (dir, store)
}

fn controller<S: OutcomeSource>(source: S, assets: AssetStore) -> SimulatorController<S> {
    SimulatorController::new(source, assets, &AnimationConfig::default())
}

/// Fires queued ticks until the queue drains, ignoring their deadlines.
fn drain<S: OutcomeSource>(
    controller: &mut SimulatorController<S>,
    view: &mut BoardView,
    timers: &mut TimerQueue,
) -> Vec<Progress> {
    let mut seen = Vec::new();
    while let Some(task) = timers.pop_next() {
        seen.push(controller.on_timer(task, view, timers));
    }
    seen
}

fn face(value: u8) -> DieFace {
    DieFace::new(value).expect("valid die face")
}

fn file_name(view: &BoardView, experiment: Experiment) -> Option<String> {
    view.panel(experiment).image.as_ref().map(|image| image.file_name())
}

#[test]
fn flip_coin_with_heads_source() {
    let (_dir, assets) = asset_dir(&[]);
    let mut controller = controller(CountingSource::new(FixedOutcomes::default()), assets);
    let mut view = BoardView::new();
    let mut timers = TimerQueue::new();

    let first = controller.handle(Command::Run(Experiment::Coin), &mut view, &mut timers);
    assert_eq!(first, Progress::Frame(Outcome::Coin(Coin::Heads)));
    assert_eq!(view.panel(Experiment::Coin).result, "Flipping...");
    assert_eq!(timers.len(), 1);

    let rest = drain(&mut controller, &mut view, &mut timers);
    assert_eq!(rest.len(), 10);
    assert_eq!(rest.last(), Some(&Progress::Committed(Outcome::Coin(Coin::Heads))));

    let panel = view.panel(Experiment::Coin);
    assert_eq!(panel.result, "Result: Heads");
    assert_eq!(panel.event_space, "Heads");
    assert_eq!(panel.event_space_line(), "Event Space: Heads");
    assert_eq!(file_name(&view, Experiment::Coin).as_deref(), Some("coin_heads.png"));
    assert_eq!(controller.source().calls(Experiment::Coin), 11);
    assert_eq!(controller.state(Experiment::Coin), SequencerState::Done);
}

#[test]
fn roll_die_reports_parity() {
    for (value, parity) in [(4, "Even"), (3, "Odd")] {
        let (_dir, assets) = asset_dir(&[]);
        let source = FixedOutcomes::default().with_die(face(value));
        let mut controller = controller(source, assets);
        let mut view = BoardView::new();
        let mut timers = TimerQueue::new();

        controller.handle(Command::Run(Experiment::Die), &mut view, &mut timers);
        assert_eq!(view.panel(Experiment::Die).result, "Rolling...");
        drain(&mut controller, &mut view, &mut timers);

        let panel = view.panel(Experiment::Die);
        assert_eq!(panel.result, format!("Result: {value}"));
        assert_eq!(panel.event_space, parity);
        assert_eq!(
            file_name(&view, Experiment::Die),
            Some(format!("die_{value}.png"))
        );
    }
}

#[test]
fn draw_card_commits_without_animation() {
    let (_dir, assets) = asset_dir(&[]);
    let queen = Card::new(Rank::Queen, Suit::Spades);
    let source = CountingSource::new(FixedOutcomes::default().with_card(queen));
    let mut controller = controller(source, assets);
    let mut view = BoardView::new();
    let mut timers = TimerQueue::new();

    let progress = controller.handle(Command::Run(Experiment::Card), &mut view, &mut timers);
    assert_eq!(progress, Progress::Committed(Outcome::Card(queen)));
    assert!(timers.is_empty());

    let panel = view.panel(Experiment::Card);
    assert_eq!(panel.result, "Result: Queen of Spades");
    assert_eq!(panel.event_space, "Spades");
    assert_eq!(
        file_name(&view, Experiment::Card).as_deref(),
        Some("queen_of_spades.png")
    );
    assert_eq!(controller.source().total_calls(), 1);
}

#[test]
fn reset_clears_every_panel() {
    let (_dir, assets) = asset_dir(&[]);
    let mut controller = controller(FixedOutcomes::default(), assets);
    let mut view = BoardView::new();
    let mut timers = TimerQueue::new();

    for experiment in Experiment::ALL {
        controller.handle(Command::Run(experiment), &mut view, &mut timers);
    }
    drain(&mut controller, &mut view, &mut timers);
    assert!(Experiment::ALL.iter().all(|&e| !view.panel(e).is_empty()));

    let progress = controller.handle(Command::Reset, &mut view, &mut timers);
    assert_eq!(progress, Progress::Cleared);
    assert!(view.is_blank());
    for experiment in Experiment::ALL {
        let panel = view.panel(experiment);
        assert_eq!(panel.result, "");
        assert_eq!(panel.event_space, "");
        assert!(panel.image.is_none());
    }
}

#[test]
fn reset_leaves_live_animation_running() {
    let (_dir, assets) = asset_dir(&[]);
    let mut controller = controller(FixedOutcomes::default(), assets);
    let mut view = BoardView::new();
    let mut timers = TimerQueue::new();

    controller.handle(Command::Run(Experiment::Coin), &mut view, &mut timers);
    controller.handle(Command::Reset, &mut view, &mut timers);
    assert!(view.is_blank());
    assert!(controller.is_animating(Experiment::Coin));

    drain(&mut controller, &mut view, &mut timers);
    assert_eq!(view.panel(Experiment::Coin).result, "Result: Heads");
}

#[test]
fn pressing_again_while_animating_is_ignored() {
    let (_dir, assets) = asset_dir(&[]);
    let mut controller = controller(CountingSource::new(FixedOutcomes::default()), assets);
    let mut view = BoardView::new();
    let mut timers = TimerQueue::new();

    controller.handle(Command::Run(Experiment::Coin), &mut view, &mut timers);
    let again = controller.handle(Command::Run(Experiment::Coin), &mut view, &mut timers);
    assert_eq!(again, Progress::Busy);
    assert_eq!(timers.len(), 1);
    assert_eq!(controller.source().calls(Experiment::Coin), 1);

    drain(&mut controller, &mut view, &mut timers);
    assert_eq!(controller.source().calls(Experiment::Coin), 11);

    // Finished sessions can be restarted.
    let restarted = controller.handle(Command::Run(Experiment::Coin), &mut view, &mut timers);
    assert!(matches!(restarted, Progress::Frame(_)));
}

#[test]
fn coin_and_die_animate_independently() {
    let (_dir, assets) = asset_dir(&[]);
    let mut controller = controller(CountingSource::new(FixedOutcomes::default()), assets);
    let mut view = BoardView::new();
    let mut timers = TimerQueue::new();

    controller.handle(Command::Run(Experiment::Coin), &mut view, &mut timers);
    controller.handle(Command::Run(Experiment::Die), &mut view, &mut timers);
    assert_eq!(timers.len(), 2);
    drain(&mut controller, &mut view, &mut timers);

    assert_eq!(controller.source().calls(Experiment::Coin), 11);
    assert_eq!(controller.source().calls(Experiment::Die), 11);
    assert_eq!(view.panel(Experiment::Die).result, "Result: 1");
}

/// Heads for the first `heads` samples, Tails afterwards.
struct FlipsToTails {
    heads: usize,
    drawn: usize,
}

impl OutcomeSource for FlipsToTails {
    fn sample(&mut self, _experiment: Experiment) -> Outcome {
        self.drawn += 1;
        if self.drawn <= self.heads {
            Outcome::Coin(Coin::Heads)
        } else {
            Outcome::Coin(Coin::Tails)
        }
    }
}

#[test]
fn missing_image_mid_animation_aborts_remaining_frames() {
    let (_dir, assets) = asset_dir(&[Outcome::Coin(Coin::Tails)]);
    let source = FlipsToTails { heads: 3, drawn: 0 };
    let mut controller = controller(source, assets);
    let mut view = BoardView::new();
    let mut timers = TimerQueue::new();

    controller.handle(Command::Run(Experiment::Coin), &mut view, &mut timers);
    let rest = drain(&mut controller, &mut view, &mut timers);

    assert_eq!(rest.last(), Some(&Progress::Failed(Outcome::Coin(Coin::Tails))));
    assert_eq!(controller.source().drawn, 4);
    assert!(timers.is_empty());
    assert_eq!(controller.state(Experiment::Coin), SequencerState::Idle);

    let notice = view.notice().expect("error notice");
    assert_eq!(notice.title, "Image Error");
    assert!(notice.message.starts_with("Could not load coin image:"));
    assert!(notice.message.contains("coin_tails.png"));
    // Last successful frame stays on screen; no result is committed.
    assert_eq!(view.panel(Experiment::Coin).result, "Flipping...");
    assert_eq!(view.panel(Experiment::Coin).event_space, "");
}

#[test]
fn stale_ticks_are_dropped() {
    let (_dir, assets) = asset_dir(&[]);
    let mut controller = controller(CountingSource::new(FixedOutcomes::default()), assets);
    let mut view = BoardView::new();
    let mut timers = TimerQueue::new();

    let stray = TimerTask {
        experiment: Experiment::Die,
        session: 99,
    };
    assert_eq!(controller.on_timer(stray, &mut view, &mut timers), Progress::Stale);

    controller.handle(Command::Run(Experiment::Die), &mut view, &mut timers);
    let wrong_session = TimerTask {
        experiment: Experiment::Die,
        session: 99,
    };
    assert_eq!(
        controller.on_timer(wrong_session, &mut view, &mut timers),
        Progress::Stale
    );
    assert_eq!(controller.source().calls(Experiment::Die), 1);
}

#[test]
fn asset_fixture_covers_every_outcome() {
    let (dir, assets) = asset_dir(&[]);
    assert!(assets.missing().is_empty());
    assert!(Path::new(dir.path()).join("cards").is_dir());
}
