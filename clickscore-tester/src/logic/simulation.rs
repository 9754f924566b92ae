//! Headless session runs against a simulated frame clock.

use clickscore_core::{
    ANALYSIS_DURATION_MS, BEST_SCORE_KEY, BestScoreStore, ClickResult, MAX_SCORE, ManualFrames,
    MemoryStore, Observer, Phase, RandomSource, SessionController, SessionSnapshot, SilentFeedback,
    Trigger, comment_pool, is_known_fact, seeded_controller, start_analysis,
};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

// Below this frame interval two frames can round to the same progress value.
const STRICT_PROGRESS_FRAME_MS: f64 = ANALYSIS_DURATION_MS / 100.0;

#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub iterations: usize,
    pub frame_ms: f64,
    pub fail_storage: bool,
    pub verbose: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            frame_ms: 16.0,
            fail_storage: false,
            verbose: false,
        }
    }
}

impl SimulationConfig {
    /// Upper bound on frames a single session may take.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn frame_budget(&self) -> usize {
        if !(self.frame_ms.is_finite() && self.frame_ms > 0.0) {
            return 0;
        }
        ((ANALYSIS_DURATION_MS / self.frame_ms).ceil() as usize).saturating_add(2)
    }
}

/// One completed session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub index: usize,
    pub score: u8,
    pub comment: &'static str,
    pub fact: &'static str,
    pub headline: &'static str,
    pub verdict: Option<&'static str>,
    pub best_after: Option<u8>,
    pub frames: usize,
}

/// Aggregate for every session run under one seed.
#[derive(Debug, Clone, Serialize)]
pub struct SeedResult {
    pub seed: u64,
    pub sessions: usize,
    pub min_score: Option<u8>,
    pub max_score: Option<u8>,
    pub mean_score: f64,
    pub best: Option<u8>,
    pub verdicts: BTreeMap<&'static str, usize>,
    pub failures: Vec<String>,
    pub passed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<SessionRecord>,
}

/// Run `config.iterations` sessions for `seed` and check every invariant.
#[must_use]
pub fn run_seed(seed: u64, config: &SimulationConfig) -> SeedResult {
    let store = MemoryStore::new();
    if config.fail_storage {
        store.set_offline(true);
    }
    let controller = Rc::new(RefCell::new(seeded_controller(store.clone(), seed)));
    let frames = Rc::new(ManualFrames::starting_at(1_000.0));
    let seen: Rc<RefCell<Vec<SessionSnapshot>>> = Rc::new(RefCell::new(Vec::new()));
    let observer: Observer = {
        let sink = Rc::clone(&seen);
        Rc::new(move |snap: &SessionSnapshot| sink.borrow_mut().push(snap.clone()))
    };

    let mut failures = Vec::new();
    let mut records = Vec::with_capacity(config.iterations);
    let mut running_max: Option<u8> = None;

    for index in 0..config.iterations {
        seen.borrow_mut().clear();
        let mut fail = |msg: String| failures.push(format!("session {index}: {msg}"));

        if start_analysis(&controller, &frames, &SilentFeedback, &observer) != Trigger::Started {
            fail("click from idle/done was ignored".into());
            continue;
        }
        if let Some(msg) = check_retrigger(&controller, &frames, &observer, config.frame_ms) {
            fail(msg);
        }

        let stepped = 1 + frames.run_until_idle(config.frame_ms, config.frame_budget());
        if frames.pending() > 0 {
            fail(format!("session still running after {stepped} frames"));
            break;
        }

        let snaps = seen.borrow().clone();
        for msg in check_snapshots(&snaps, config.frame_ms) {
            fail(msg);
        }

        let ctl = controller.borrow();
        let Some(result) = ctl.state().result().cloned() else {
            fail("controller not done after frames drained".into());
            continue;
        };
        if let Some(msg) = check_result(&result) {
            fail(msg);
        }

        running_max = Some(running_max.map_or(result.score, |m| m.max(result.score)));
        if ctl.best() != running_max {
            fail(format!(
                "best {:?} differs from running max {running_max:?}",
                ctl.best()
            ));
        }
        let persisted = store.raw(BEST_SCORE_KEY);
        let expected_raw = if config.fail_storage {
            None
        } else {
            running_max.map(|m| m.to_string())
        };
        if persisted != expected_raw {
            fail(format!("persisted {persisted:?}, expected {expected_raw:?}"));
        }

        if config.verbose {
            log::info!(
                "seed {seed} session {index}: {score}/100 {headline}",
                score = result.score,
                headline = result.headline()
            );
        }
        records.push(SessionRecord {
            index,
            score: result.score,
            comment: result.comment,
            fact: result.fact,
            headline: result.headline(),
            verdict: result.verdict().map(|v| v.label()),
            best_after: ctl.best(),
            frames: stepped,
        });
    }

    let best = controller.borrow().best();
    summarize(seed, config, best, records, failures)
}

/// Click again one frame into the run; nothing may change.
fn check_retrigger<B, R>(
    controller: &Rc<RefCell<SessionController<B, R>>>,
    frames: &Rc<ManualFrames>,
    observer: &Observer,
    frame_ms: f64,
) -> Option<String>
where
    B: BestScoreStore + 'static,
    R: RandomSource + 'static,
{
    frames.advance(frame_ms);
    if !controller.borrow().is_running() {
        return None;
    }
    let before = controller.borrow().state().clone();
    let pending = frames.pending();
    let trigger = start_analysis(controller, frames, &SilentFeedback, observer);
    if trigger != Trigger::Ignored {
        return Some("second click while running was not ignored".into());
    }
    if *controller.borrow().state() != before || frames.pending() != pending {
        return Some("ignored click changed state or scheduled frames".into());
    }
    None
}

fn check_snapshots(snaps: &[SessionSnapshot], frame_ms: f64) -> Vec<String> {
    let mut problems = Vec::new();
    if snaps.first().map(|s| s.state.phase()) != Some(Phase::Running) {
        problems.push("first observed phase was not running".into());
    }
    let progress: Vec<u8> = snaps
        .iter()
        .filter(|s| s.state.phase() == Phase::Running)
        .map(|s| s.state.progress())
        .collect();
    let ordered = if frame_ms >= STRICT_PROGRESS_FRAME_MS {
        progress.windows(2).all(|w| w[0] < w[1])
    } else {
        progress.windows(2).all(|w| w[0] <= w[1])
    };
    if !ordered {
        problems.push(format!("progress out of order: {progress:?}"));
    }
    let done = snaps
        .iter()
        .filter(|s| s.state.phase() == Phase::Done)
        .count();
    if done != 1 {
        problems.push(format!("expected one completion, saw {done}"));
    }
    if snaps.last().map(|s| s.state.phase()) != Some(Phase::Done) {
        problems.push("session did not end in done".into());
    }
    if snaps.iter().any(|s| s.state.phase() == Phase::Idle) {
        problems.push("observed idle during a session".into());
    }
    problems
}

fn check_result(result: &ClickResult) -> Option<String> {
    if result.score > MAX_SCORE {
        return Some(format!("score {} out of range", result.score));
    }
    if !comment_pool(result.score).contains(&result.comment) {
        return Some(format!("comment {:?} outside pool", result.comment));
    }
    if !is_known_fact(result.fact) {
        return Some(format!("fact {:?} outside pool", result.fact));
    }
    None
}

fn summarize(
    seed: u64,
    config: &SimulationConfig,
    best: Option<u8>,
    records: Vec<SessionRecord>,
    failures: Vec<String>,
) -> SeedResult {
    let scores: Vec<u8> = records.iter().map(|r| r.score).collect();
    #[allow(clippy::cast_precision_loss)]
    let mean_score = if scores.is_empty() {
        0.0
    } else {
        scores.iter().map(|s| f64::from(*s)).sum::<f64>() / scores.len() as f64
    };
    let mut verdicts = BTreeMap::new();
    for record in &records {
        *verdicts.entry(record.verdict.unwrap_or("none")).or_insert(0) += 1;
    }
    SeedResult {
        seed,
        sessions: records.len(),
        min_score: scores.iter().copied().min(),
        max_score: scores.iter().copied().max(),
        mean_score,
        best,
        verdicts,
        passed: failures.is_empty() && records.len() == config.iterations,
        failures,
        records: if config.verbose { records } else { Vec::new() },
    }
}
