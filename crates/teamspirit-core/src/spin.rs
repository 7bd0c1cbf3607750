//! Reveal-animation state machine for the draw.
//!
//! Before committing a winner, the host shows a slot-machine style reveal:
//! the display cycles through randomly sampled candidate names at a
//! shrinking rate, then lands on the committed winner. The machine here
//! makes two invariants explicit instead of leaving them to timer
//! bookkeeping:
//!
//! - **Exactly one spin in flight.** [`SpinMachine::begin`] rejects a new
//!   request while a spin is running; there is no queuing.
//! - **The displayed result is the recorded result.** Every cycling tick
//!   is an independent cosmetic sample, but the final display update is
//!   the commit step itself, carrying the one [`draw`] result that goes
//!   into the history.
//!
//! The machine is pure and synchronous: [`SpinMachine::advance`] computes
//! the next step, [`run_spin`] drives it on a timer. Cancellation means
//! dropping the [`run_spin`] future (each delay is a `tokio` sleep, so no
//! step can fire afterwards) and calling [`SpinMachine::cancel`] before
//! the machine is reused.
//!
//! [`draw`]: crate::draw::draw

use std::time::Duration;

use rand::Rng;
use teamspirit_types::Participant;
use tracing::debug;

use crate::config::SpinSchedule;
use crate::draw::{self, DrawError};

/// Errors that can occur while spinning.
#[derive(Debug, thiserror::Error)]
pub enum SpinError {
    /// A spin was requested while one is already in flight.
    #[error("a spin is already in progress")]
    AlreadySpinning,

    /// The machine was advanced without an active spin.
    #[error("no spin is in progress")]
    NotSpinning,

    /// Sampling from the candidate pool failed.
    #[error("draw error: {source}")]
    Draw {
        /// The underlying draw error.
        #[from]
        source: DrawError,
    },
}

/// Where the machine currently is in the reveal lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    /// No spin active; a new one may begin.
    Idle,
    /// Cycling ticks are being produced.
    Spinning {
        /// Number of cycling ticks produced so far.
        tick: u32,
    },
    /// The winner has been committed; a new spin may begin.
    Committed,
}

/// One step of the reveal, produced by [`SpinMachine::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinStep {
    /// A cosmetic cycling tick: show `display`, then wait `delay` before
    /// the next step. The sample is independent of the eventual winner.
    Cycle {
        /// The candidate to display for this tick.
        display: Participant,
        /// How long to wait before the next step.
        delay: Duration,
        /// Zero-based tick number.
        tick: u32,
    },
    /// The final step: `winner` is the committed draw result and the last
    /// value displayed.
    Commit {
        /// The committed winner.
        winner: Participant,
    },
}

/// Observer notified of each display update during a spin.
///
/// Implementations render the cycling name and the final winner; the
/// driver calls them in order, never overlapping.
pub trait SpinObserver {
    /// Called for each cosmetic cycling tick.
    fn on_cycle(&mut self, display: &Participant, tick: u32);

    /// Called once when the winner is committed.
    fn on_commit(&mut self, winner: &Participant);
}

/// A no-op observer for testing.
pub struct NoOpObserver;

impl SpinObserver for NoOpObserver {
    fn on_cycle(&mut self, _display: &Participant, _tick: u32) {}
    fn on_commit(&mut self, _winner: &Participant) {}
}

/// The reveal state machine: `Idle -> Spinning(tick) -> Committed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinMachine {
    schedule: SpinSchedule,
    phase: SpinPhase,
    /// Current tick interval; grows inside the slowdown window.
    interval_ms: u64,
    /// Cycling time accounted for so far.
    elapsed_ms: u64,
}

impl SpinMachine {
    /// Create an idle machine with the given schedule.
    pub const fn new(schedule: SpinSchedule) -> Self {
        Self {
            schedule,
            phase: SpinPhase::Idle,
            interval_ms: 0,
            elapsed_ms: 0,
        }
    }

    /// Current lifecycle phase.
    pub const fn phase(&self) -> SpinPhase {
        self.phase
    }

    /// Whether a spin is currently in flight.
    pub const fn is_spinning(&self) -> bool {
        matches!(self.phase, SpinPhase::Spinning { .. })
    }

    /// Start a new spin.
    ///
    /// Permitted from [`SpinPhase::Idle`] and [`SpinPhase::Committed`]
    /// (the machine is reusable after a commit).
    ///
    /// # Errors
    ///
    /// Returns [`SpinError::AlreadySpinning`] while a spin is in flight.
    pub fn begin(&mut self) -> Result<(), SpinError> {
        if self.is_spinning() {
            return Err(SpinError::AlreadySpinning);
        }
        // A zero interval would cycle forever without advancing elapsed
        // time; clamp to 1 ms.
        self.interval_ms = self.schedule.initial_interval_ms.max(1);
        self.elapsed_ms = 0;
        self.phase = SpinPhase::Spinning { tick: 0 };
        Ok(())
    }

    /// Abandon the current spin and return to [`SpinPhase::Idle`].
    ///
    /// Required after the driving future was dropped mid-spin; harmless
    /// otherwise.
    pub fn cancel(&mut self) {
        if self.is_spinning() {
            debug!("Spin cancelled mid-flight");
        }
        self.phase = SpinPhase::Idle;
        self.elapsed_ms = 0;
    }

    /// Compute the next step of the reveal.
    ///
    /// While accounted cycling time is below the schedule's duration this
    /// produces a [`SpinStep::Cycle`] with a fresh independent sample;
    /// afterwards it performs the one committing [`draw`](crate::draw::draw)
    /// and transitions to [`SpinPhase::Committed`].
    ///
    /// # Errors
    ///
    /// Returns [`SpinError::NotSpinning`] unless the machine is mid-spin,
    /// and propagates [`DrawError::EmptyPool`] if `eligible` is empty.
    pub fn advance(
        &mut self,
        rng: &mut impl Rng,
        eligible: &[Participant],
    ) -> Result<SpinStep, SpinError> {
        let SpinPhase::Spinning { tick } = self.phase else {
            return Err(SpinError::NotSpinning);
        };

        if self.elapsed_ms < self.schedule.duration_ms {
            let display = draw::draw(rng, eligible)?;
            let delay = Duration::from_millis(self.interval_ms);

            self.elapsed_ms = self.elapsed_ms.saturating_add(self.interval_ms);
            let slowdown_start = self
                .schedule
                .duration_ms
                .saturating_sub(self.schedule.slowdown_window_ms);
            if self.elapsed_ms > slowdown_start {
                self.interval_ms = self.interval_ms.saturating_add(self.schedule.slowdown_step_ms);
            }

            self.phase = SpinPhase::Spinning {
                tick: tick.saturating_add(1),
            };
            return Ok(SpinStep::Cycle {
                display,
                delay,
                tick,
            });
        }

        let winner = draw::draw(rng, eligible)?;
        self.phase = SpinPhase::Committed;
        debug!(ticks = tick, winner = %winner.name, "Spin committed");
        Ok(SpinStep::Commit { winner })
    }
}

/// Drive a full reveal on a timer and return the committed winner.
///
/// Steps are strictly sequential: each cycling tick is emitted to the
/// observer, then the step's delay elapses (`tokio::time::sleep`) before
/// the next step is computed. Dropping the returned future cancels any
/// pending step; the machine is then left mid-spin and must be
/// [`cancel`](SpinMachine::cancel)ed before reuse.
///
/// # Errors
///
/// Returns [`SpinError::AlreadySpinning`] if the machine is mid-spin, and
/// [`SpinError::Draw`] if the eligible pool is empty.
pub async fn run_spin(
    machine: &mut SpinMachine,
    rng: &mut impl Rng,
    eligible: &[Participant],
    observer: &mut dyn SpinObserver,
) -> Result<Participant, SpinError> {
    // Reject the request before touching machine state so an empty pool
    // does not leave the machine spinning.
    if eligible.is_empty() {
        return Err(SpinError::Draw {
            source: DrawError::EmptyPool,
        });
    }

    machine.begin()?;

    loop {
        match machine.advance(rng, eligible)? {
            SpinStep::Cycle {
                display,
                delay,
                tick,
            } => {
                observer.on_cycle(&display, tick);
                tokio::time::sleep(delay).await;
            }
            SpinStep::Commit { winner } => {
                observer.on_commit(&winner);
                return Ok(winner);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    /// A short schedule so step sequences are easy to enumerate by hand.
    const fn short_schedule() -> SpinSchedule {
        SpinSchedule {
            duration_ms: 100,
            initial_interval_ms: 25,
            slowdown_window_ms: 50,
            slowdown_step_ms: 25,
        }
    }

    fn roster_of(names: &[&str]) -> Vec<Participant> {
        names.iter().map(|name| Participant::new(*name)).collect()
    }

    /// Records every display update for assertions.
    struct RecordingObserver {
        cycles: Vec<String>,
        committed: Vec<String>,
    }

    impl RecordingObserver {
        const fn new() -> Self {
            Self {
                cycles: Vec::new(),
                committed: Vec::new(),
            }
        }
    }

    impl SpinObserver for RecordingObserver {
        fn on_cycle(&mut self, display: &Participant, _tick: u32) {
            self.cycles.push(display.name.clone());
        }
        fn on_commit(&mut self, winner: &Participant) {
            self.committed.push(winner.name.clone());
        }
    }

    #[test]
    fn begin_rejects_concurrent_spin() {
        let mut machine = SpinMachine::new(short_schedule());
        machine.begin().unwrap();
        assert!(machine.is_spinning());

        let result = machine.begin();
        assert!(matches!(result, Err(SpinError::AlreadySpinning)));
    }

    #[test]
    fn advance_requires_an_active_spin() {
        let mut machine = SpinMachine::new(short_schedule());
        let mut rng = SmallRng::seed_from_u64(1);
        let roster = roster_of(&["Alice"]);

        let result = machine.advance(&mut rng, &roster);
        assert!(matches!(result, Err(SpinError::NotSpinning)));
    }

    #[test]
    fn step_sequence_decelerates_then_commits() {
        // duration 100, interval 25, slowdown window 50, step 25:
        // cycles at 25, 25, 25 (elapsed 75 enters the window), 50, then
        // elapsed 125 >= 100 commits.
        let mut machine = SpinMachine::new(short_schedule());
        let mut rng = SmallRng::seed_from_u64(2);
        let roster = roster_of(&["Alice", "Bob", "Carol"]);

        machine.begin().unwrap();

        let mut delays = Vec::new();
        loop {
            match machine.advance(&mut rng, &roster).unwrap() {
                SpinStep::Cycle { delay, tick, .. } => {
                    assert_eq!(usize::try_from(tick).unwrap(), delays.len());
                    delays.push(delay.as_millis());
                }
                SpinStep::Commit { winner } => {
                    assert!(roster.iter().any(|p| p.id == winner.id));
                    break;
                }
            }
        }

        assert_eq!(delays, vec![25, 25, 25, 50]);
        assert_eq!(machine.phase(), SpinPhase::Committed);
    }

    #[test]
    fn machine_is_reusable_after_commit() {
        let mut machine = SpinMachine::new(short_schedule());
        let mut rng = SmallRng::seed_from_u64(3);
        let roster = roster_of(&["Alice", "Bob"]);

        machine.begin().unwrap();
        loop {
            if let SpinStep::Commit { .. } = machine.advance(&mut rng, &roster).unwrap() {
                break;
            }
        }

        // A second spin may begin from Committed.
        machine.begin().unwrap();
        assert_eq!(machine.phase(), SpinPhase::Spinning { tick: 0 });
    }

    #[test]
    fn zero_interval_is_clamped() {
        let schedule = SpinSchedule {
            duration_ms: 10,
            initial_interval_ms: 0,
            slowdown_window_ms: 0,
            slowdown_step_ms: 0,
        };
        let mut machine = SpinMachine::new(schedule);
        let mut rng = SmallRng::seed_from_u64(4);
        let roster = roster_of(&["Alice"]);

        machine.begin().unwrap();
        // With a true zero interval this loop would never terminate.
        let mut steps: u32 = 0;
        loop {
            match machine.advance(&mut rng, &roster).unwrap() {
                SpinStep::Cycle { .. } => steps = steps.saturating_add(1),
                SpinStep::Commit { .. } => break,
            }
            assert!(steps <= 10, "spin failed to terminate");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn run_spin_commits_the_last_displayed_value() {
        let mut machine = SpinMachine::new(short_schedule());
        let mut rng = SmallRng::seed_from_u64(5);
        let roster = roster_of(&["Alice", "Bob", "Carol"]);
        let mut observer = RecordingObserver::new();

        let winner = run_spin(&mut machine, &mut rng, &roster, &mut observer)
            .await
            .unwrap();

        assert!(!observer.cycles.is_empty());
        assert_eq!(observer.committed, vec![winner.name.clone()]);
        assert_eq!(machine.phase(), SpinPhase::Committed);
    }

    #[tokio::test(start_paused = true)]
    async fn run_spin_rejects_empty_pool_without_starting() {
        let mut machine = SpinMachine::new(short_schedule());
        let mut rng = SmallRng::seed_from_u64(6);
        let mut observer = NoOpObserver;

        let result = run_spin(&mut machine, &mut rng, &[], &mut observer).await;
        assert!(matches!(
            result,
            Err(SpinError::Draw {
                source: DrawError::EmptyPool
            })
        ));
        assert_eq!(machine.phase(), SpinPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn run_spin_rejects_while_another_is_in_flight() {
        let mut machine = SpinMachine::new(short_schedule());
        machine.begin().unwrap();

        let mut rng = SmallRng::seed_from_u64(7);
        let roster = roster_of(&["Alice"]);
        let mut observer = NoOpObserver;

        let result = run_spin(&mut machine, &mut rng, &roster, &mut observer).await;
        assert!(matches!(result, Err(SpinError::AlreadySpinning)));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_driver_cancels_pending_steps() {
        let mut machine = SpinMachine::new(short_schedule());
        let mut rng = SmallRng::seed_from_u64(8);
        let roster = roster_of(&["Alice", "Bob"]);
        let mut observer = RecordingObserver::new();

        // Cut the spin off partway through its 100 ms of cycling.
        let cancelled = tokio::time::timeout(
            Duration::from_millis(30),
            run_spin(&mut machine, &mut rng, &roster, &mut observer),
        )
        .await;
        assert!(cancelled.is_err(), "spin should have been cut off");

        // No commit fired, and the machine is left mid-spin until the
        // host acknowledges the teardown.
        assert!(observer.committed.is_empty());
        assert!(machine.is_spinning());

        machine.cancel();
        assert_eq!(machine.phase(), SpinPhase::Idle);

        // A fresh spin then runs to completion.
        let winner = run_spin(&mut machine, &mut rng, &roster, &mut observer)
            .await
            .unwrap();
        assert_eq!(observer.committed, vec![winner.name]);
    }
}
