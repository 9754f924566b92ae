use std::cell::{Cell, RefCell};
use std::rc::Rc;

use clickscore_core::{
    BEST_SCORE_KEY, BestScore, BestScoreStore, COMMENTS, ClickFeedback, FUN_FACTS, FailingStore,
    ManualFrames, MemoryStore, Observer, Phase, ScriptedRandom, SeededRandom, SessionController,
    SessionSnapshot, Trigger, Verdict, comment_pool, is_known_comment, is_known_fact,
    start_analysis,
};

const FRAME_MS: f64 = 16.0;

#[derive(Default)]
struct CountingFeedback {
    tones: Cell<u32>,
    pulses: Cell<u32>,
}

impl ClickFeedback for CountingFeedback {
    fn play_tone(&self) {
        self.tones.set(self.tones.get() + 1);
    }

    fn pulse(&self) {
        self.pulses.set(self.pulses.get() + 1);
    }
}

fn recorder() -> (Observer, Rc<RefCell<Vec<SessionSnapshot>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let observer: Observer = Rc::new(move |snap: &SessionSnapshot| {
        sink.borrow_mut().push(snap.clone());
    });
    (observer, log)
}

#[test]
fn forced_97_ends_legendary_and_updates_best() {
    let store = MemoryStore::new();
    let controller = Rc::new(RefCell::new(SessionController::new(
        BestScore::load(store.clone()),
        ScriptedRandom::new().with_scores([97]).with_picks([0, 1]),
    )));
    let frames = Rc::new(ManualFrames::starting_at(5_000.0));
    let feedback = CountingFeedback::default();
    let (observer, log) = recorder();

    let trigger = start_analysis(&controller, &frames, &feedback, &observer);
    assert_eq!(trigger, Trigger::Started);
    frames.run_until_idle(FRAME_MS, 200);

    let ctl = controller.borrow();
    let result = ctl.state().result().expect("session finished");
    assert_eq!(ctl.state().phase(), Phase::Done);
    assert_eq!(result.score, 97);
    assert_eq!(result.verdict(), Some(Verdict::Legendary));
    assert_eq!(result.headline(), "Legendary click!");
    assert!(ctl.best().is_some_and(|best| best >= 97));
    assert_eq!(store.raw(BEST_SCORE_KEY).as_deref(), Some("97"));

    let last = log.borrow().last().cloned().expect("observer saw completion");
    assert_eq!(last.best, Some(97));
    assert_eq!(last.state.score(), Some(97));
}

#[test]
fn progress_rises_strictly_and_completes_once() {
    let controller = Rc::new(RefCell::new(SessionController::new(
        BestScore::load(MemoryStore::new()),
        SeededRandom::from_seed(42),
    )));
    let frames = Rc::new(ManualFrames::new());
    let (observer, log) = recorder();

    start_analysis(&controller, &frames, &CountingFeedback::default(), &observer);
    frames.run_until_idle(FRAME_MS, 200);

    let snaps = log.borrow();
    assert_eq!(snaps.first().map(|s| s.state.phase()), Some(Phase::Running));
    assert_eq!(snaps.first().map(|s| s.state.progress()), Some(0));

    let running: Vec<u8> = snaps
        .iter()
        .filter(|s| s.state.phase() == Phase::Running)
        .map(|s| s.state.progress())
        .collect();
    assert!(running.windows(2).all(|w| w[0] < w[1]), "{running:?}");
    assert!(running.iter().all(|p| *p < 100));

    let done = snaps
        .iter()
        .filter(|s| s.state.phase() == Phase::Done)
        .count();
    assert_eq!(done, 1);
    assert_eq!(snaps.last().map(|s| s.state.progress()), Some(100));
    assert!(snaps.iter().all(|s| s.state.phase() != Phase::Idle));
    assert_eq!(frames.pending(), 0);
    assert_eq!(controller.borrow().completed(), 1);
}

#[test]
fn trigger_while_running_is_a_no_op() {
    let controller = Rc::new(RefCell::new(SessionController::new(
        BestScore::load(MemoryStore::new()),
        ScriptedRandom::new().with_scores([50, 60]),
    )));
    let frames = Rc::new(ManualFrames::new());
    let feedback = CountingFeedback::default();
    let (observer, log) = recorder();

    start_analysis(&controller, &frames, &feedback, &observer);
    frames.advance(FRAME_MS);
    frames.advance(FRAME_MS);
    let state_before = controller.borrow().state().clone();
    let seen_before = log.borrow().len();

    let again = start_analysis(&controller, &frames, &feedback, &observer);
    assert_eq!(again, Trigger::Ignored);
    assert_eq!(controller.borrow().state(), &state_before);
    assert_eq!(log.borrow().len(), seen_before);
    assert_eq!(frames.pending(), 1, "no second frame loop");
    assert_eq!(feedback.tones.get(), 1);
    assert_eq!(feedback.pulses.get(), 1);

    frames.run_until_idle(FRAME_MS, 200);
    assert_eq!(controller.borrow().state().score(), Some(50));
    assert_eq!(controller.borrow().completed(), 1);

    // Once done, a new click starts a fresh session.
    assert_eq!(
        start_analysis(&controller, &frames, &feedback, &observer),
        Trigger::Started
    );
    assert!(controller.borrow().state().result().is_none());
    frames.run_until_idle(FRAME_MS, 200);
    assert_eq!(controller.borrow().state().score(), Some(60));
    assert_eq!(feedback.tones.get(), 2);
}

#[test]
fn slow_first_frame_still_passes_through_running() {
    let controller = Rc::new(RefCell::new(SessionController::new(
        BestScore::load(MemoryStore::new()),
        ScriptedRandom::new().with_scores([5]),
    )));
    let frames = Rc::new(ManualFrames::new());
    let (observer, log) = recorder();

    start_analysis(&controller, &frames, &CountingFeedback::default(), &observer);
    frames.advance(2_000.0);

    let phases: Vec<Phase> = log.borrow().iter().map(|s| s.state.phase()).collect();
    assert_eq!(phases, vec![Phase::Running, Phase::Done]);
    assert_eq!(frames.pending(), 0);
}

#[test]
fn failing_storage_never_blocks_the_session() {
    let controller = Rc::new(RefCell::new(SessionController::new(
        BestScore::load(FailingStore),
        ScriptedRandom::new().with_scores([33, 12]),
    )));
    let frames = Rc::new(ManualFrames::new());
    let (observer, _log) = recorder();
    let feedback = CountingFeedback::default();

    assert_eq!(controller.borrow().best(), None);
    start_analysis(&controller, &frames, &feedback, &observer);
    frames.run_until_idle(FRAME_MS, 200);
    assert_eq!(controller.borrow().state().score(), Some(33));
    assert_eq!(controller.borrow().best(), Some(33));

    start_analysis(&controller, &frames, &feedback, &observer);
    frames.run_until_idle(FRAME_MS, 200);
    assert_eq!(controller.borrow().state().score(), Some(12));
    assert_eq!(controller.borrow().best(), Some(33));
}

#[test]
fn best_is_running_maximum_across_sessions() {
    let scores = [12_u8, 80, 45, 80, 3, 91, 90];
    let store = MemoryStore::new();
    let mut best = BestScore::load(store.clone());
    let mut expected = None;
    for score in scores {
        expected = Some(expected.map_or(score, |prev: u8| prev.max(score)));
        best.update(score);
        assert_eq!(best.read(), expected);
    }
    let reloaded = BestScore::load(store);
    assert_eq!(reloaded.read(), Some(91));
}

#[test]
fn seeded_sessions_draw_from_fixed_pools() {
    let mut ctl = SessionController::new(
        BestScore::load(MemoryStore::new()),
        SeededRandom::from_seed(0x5EED),
    );
    for round in 0..300 {
        let start = f64::from(round) * 1_000.0;
        ctl.begin(start);
        ctl.advance(start + 750.0);
        let result = ctl.state().result().expect("completed").clone();
        assert!(result.score <= 100);
        assert!(!result.comment.is_empty());
        assert!(!result.fact.is_empty());
        assert!(comment_pool(result.score).contains(&result.comment));
        assert!(is_known_comment(result.comment));
        assert!(is_known_fact(result.fact));
    }
    assert_eq!(COMMENTS.len(), 10);
    assert_eq!(FUN_FACTS.len(), 5);
}
