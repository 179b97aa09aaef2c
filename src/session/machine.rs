//! The flip state machine.
//!
//! `FlipMachine` is the only thing that mutates a round: card visibility,
//! the session counters and the scheduled tasks. Hosts feed it activations
//! and elapsed time, then read the deck to render and drain notifications
//! to display.

use im::Vector;
use log::{debug, info};
use smallvec::SmallVec;
use std::time::Duration;

use super::notification::{Notification, NotificationSink};
use super::scheduler::{Scheduler, TaskHandle, TaskKind};
use super::state::{FlipPhase, GameSession, SessionStatus};
use crate::cards::{CardId, Palette, Visibility};
use crate::core::{ConfigError, GameConfig, GameRng};
use crate::deck::{build_deck, Deck};

/// Why an activation was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No round has been dealt.
    NoRound,
    /// The round is won or timed out.
    Finished,
    /// A mismatched pair is still showing.
    Locked,
    /// No card with this ID in the deck.
    UnknownCard,
    AlreadyMatched,
    /// The card is the pending first pick.
    AlreadySelected,
}

/// Result of an activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First pick of a pair attempt.
    Selected(CardId),
    /// Second pick matched the first.
    Matched {
        first: CardId,
        second: CardId,
        pairs_found: u32,
    },
    /// Second pick differs; both are shown until the hide task fires.
    Mismatched { first: CardId, second: CardId },
}

impl FlipOutcome {
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, FlipOutcome::Ignored(_))
    }
}

/// Deck, session and task handles of the round in progress.
#[derive(Clone, Debug)]
struct Round {
    deck: Deck,
    session: GameSession,
    tick_task: Option<TaskHandle>,
    hide_task: Option<TaskHandle>,
    history: Vector<Notification>,
}

impl Round {
    fn pair_count(&self) -> u32 {
        self.deck.pair_count() as u32
    }
}

/// Drives rounds of the memory game.
///
/// ## Example
///
/// ```
/// use memory_match::cards::CardId;
/// use memory_match::deck::Deck;
/// use memory_match::session::{FlipMachine, FlipPhase};
/// use memory_match::GameConfig;
///
/// let mut machine = FlipMachine::new(GameConfig::default().with_pair_count(2));
/// machine.start_round(Deck::from_faces(["A", "B", "A", "B"]).unwrap());
///
/// machine.activate(CardId::new(0));
/// machine.activate(CardId::new(2));
/// assert_eq!(machine.session().unwrap().pairs_found, 1);
/// assert_eq!(machine.phase(), Some(FlipPhase::Idle));
/// ```
#[derive(Clone, Debug)]
pub struct FlipMachine {
    config: GameConfig,
    scheduler: Scheduler,
    round: Option<Round>,
    pending: Vec<Notification>,
}

impl FlipMachine {
    /// Create a machine with no round in progress.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            scheduler: Scheduler::new(),
            round: None,
            pending: Vec::new(),
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // === Round Lifecycle ===

    /// Start a round with `deck`, discarding any round in progress.
    ///
    /// The round's pair count is the deck's. The countdown starts
    /// immediately.
    pub fn start_round(&mut self, deck: Deck) {
        self.cancel_round_tasks();

        if deck.pair_count() != self.config.pair_count {
            debug!(
                "Deck has {} pairs, configured pair count is {}",
                deck.pair_count(),
                self.config.pair_count
            );
        }

        let tick_task = self
            .scheduler
            .schedule_every(self.config.tick_interval(), TaskKind::Tick);

        info!("Round started with {} cards", deck.len());
        self.round = Some(Round {
            deck,
            session: GameSession::new(&self.config),
            tick_task: Some(tick_task),
            hide_task: None,
            history: Vector::new(),
        });
    }

    /// Deal a fresh deck from `palette` and start a round with it.
    pub fn deal(&mut self, palette: &Palette, rng: &mut GameRng) -> Result<(), ConfigError> {
        self.config.validate()?;
        let deck = build_deck(palette, self.config.pair_count, rng)?;
        self.start_round(deck);
        Ok(())
    }

    /// Discard the round in progress and cancel its timers.
    ///
    /// Valid in any state. A new deck must be supplied to play again.
    pub fn reset(&mut self) {
        self.cancel_round_tasks();
        if self.round.take().is_some() {
            info!("Round reset");
        }
    }

    fn cancel_round_tasks(&mut self) {
        if let Some(round) = self.round.as_mut() {
            Self::cancel_tasks(&mut self.scheduler, round);
        }
    }

    fn cancel_tasks(scheduler: &mut Scheduler, round: &mut Round) {
        if let Some(handle) = round.tick_task.take() {
            scheduler.cancel(handle);
        }
        if let Some(handle) = round.hide_task.take() {
            scheduler.cancel(handle);
        }
    }

    // === Events ===

    /// A player tries to flip `card`.
    ///
    /// Ignored when there is no round, the round is over, input is locked,
    /// the card is unknown or matched, or the card is the pending first pick.
    pub fn activate(&mut self, card: CardId) -> FlipOutcome {
        let Self {
            config,
            scheduler,
            round,
            pending,
        } = self;

        let Some(round) = round.as_mut() else {
            return FlipOutcome::Ignored(IgnoreReason::NoRound);
        };
        if !round.session.is_playing() {
            return FlipOutcome::Ignored(IgnoreReason::Finished);
        }
        if round.session.input_locked {
            return FlipOutcome::Ignored(IgnoreReason::Locked);
        }
        let Some(target) = round.deck.get(card) else {
            return FlipOutcome::Ignored(IgnoreReason::UnknownCard);
        };
        if target.visibility == Visibility::Matched {
            return FlipOutcome::Ignored(IgnoreReason::AlreadyMatched);
        }
        if round.session.selected == Some(card) {
            return FlipOutcome::Ignored(IgnoreReason::AlreadySelected);
        }

        round.deck.set_visibility(card, Visibility::Revealed);

        let Some(first) = round.session.selected else {
            debug!("Selected {card}");
            round.session.selected = Some(card);
            return FlipOutcome::Selected(card);
        };

        let is_match = match (round.deck.get(first), round.deck.get(card)) {
            (Some(a), Some(b)) => a.matches(b),
            _ => false,
        };

        if is_match {
            round.deck.set_visibility(first, Visibility::Matched);
            round.deck.set_visibility(card, Visibility::Matched);
            round.session.selected = None;
            round.session.pairs_found += 1;

            let pairs_found = round.session.pairs_found;
            let pair_count = round.pair_count();
            debug!("Matched {first} and {card} ({pairs_found}/{pair_count})");
            Self::emit(
                pending,
                round,
                Notification::PairFound {
                    pairs_found,
                    pair_count,
                },
            );

            if pairs_found >= pair_count {
                round.session.status = SessionStatus::Won;
                let elapsed_secs = round.session.ticks_elapsed;
                info!("Round won in {elapsed_secs} ticks");
                Self::cancel_tasks(scheduler, round);
                Self::emit(pending, round, Notification::SessionWon { elapsed_secs });
            }

            FlipOutcome::Matched {
                first,
                second: card,
                pairs_found,
            }
        } else {
            debug!("Mismatch {first} and {card}, locking input");
            round.session.input_locked = true;
            let handle = scheduler.schedule_once(
                config.mismatch_delay(),
                TaskKind::HideMismatch {
                    first,
                    second: card,
                },
            );
            round.hide_task = Some(handle);
            FlipOutcome::Mismatched {
                first,
                second: card,
            }
        }
    }

    /// One countdown unit elapses.
    ///
    /// Returns false if the tick was ignored (no round, or round over).
    pub fn tick(&mut self) -> bool {
        let Self {
            config,
            scheduler,
            round,
            pending,
        } = self;

        let Some(round) = round.as_mut() else {
            return false;
        };
        if !round.session.is_playing() {
            return false;
        }

        round.session.time_remaining -= 1;
        round.session.ticks_elapsed += 1;
        let remaining = round.session.time_remaining;

        if remaining == config.low_time_threshold && !round.session.low_time_announced {
            round.session.low_time_announced = true;
            Self::emit(pending, round, Notification::LowTime { remaining });
        }

        if remaining < 0 {
            round.session.status = SessionStatus::TimedOut;
            let pairs_found = round.session.pairs_found;
            info!("Time expired with {pairs_found} pairs found");
            Self::cancel_tasks(scheduler, round);
            Self::emit(pending, round, Notification::TimeExpired { pairs_found });
        }

        true
    }

    /// The mismatch reveal delay for `first`/`second` has elapsed.
    fn hide_mismatch(&mut self, first: CardId, second: CardId) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        round.hide_task = None;
        if !round.session.is_playing() {
            return;
        }
        round.deck.set_visibility(first, Visibility::Hidden);
        round.deck.set_visibility(second, Visibility::Hidden);
        round.session.selected = None;
        round.session.input_locked = false;
        debug!("Hid {first} and {second}, input unlocked");
    }

    /// Move the clock forward by `elapsed`, firing every task that falls due.
    ///
    /// Tasks fire in due order; returns what fired.
    pub fn advance(&mut self, elapsed: Duration) -> SmallVec<[TaskKind; 4]> {
        let deadline = self.scheduler.now() + elapsed;
        let mut fired = SmallVec::new();

        while let Some((_, kind)) = self.scheduler.pop_due(deadline) {
            match kind {
                TaskKind::Tick => {
                    self.tick();
                }
                TaskKind::HideMismatch { first, second } => self.hide_mismatch(first, second),
            }
            fired.push(kind);
        }

        self.scheduler.advance_clock_to(deadline);
        fired
    }

    /// Time until the next scheduled task, if any.
    #[must_use]
    pub fn until_next_task(&self) -> Option<Duration> {
        self.scheduler.until_next()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    // === Notifications ===

    fn emit(pending: &mut Vec<Notification>, round: &mut Round, notification: Notification) {
        round.history.push_back(notification.clone());
        pending.push(notification);
    }

    /// Take all queued notifications.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    /// Deliver all queued notifications to `sink`, in order.
    pub fn flush_to<S: NotificationSink + ?Sized>(&mut self, sink: &mut S) {
        for notification in self.pending.drain(..) {
            sink.notify(&notification);
        }
    }

    // === Queries ===

    /// The deck of the round in progress.
    #[must_use]
    pub fn deck(&self) -> Option<&Deck> {
        self.round.as_ref().map(|r| &r.deck)
    }

    /// The session of the round in progress.
    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.round.as_ref().map(|r| &r.session)
    }

    /// Current phase, `None` when no round is dealt.
    #[must_use]
    pub fn phase(&self) -> Option<FlipPhase> {
        self.session().map(GameSession::phase)
    }

    /// Every notification of the round in progress.
    #[must_use]
    pub fn history(&self) -> Option<&Vector<Notification>> {
        self.round.as_ref().map(|r| &r.history)
    }

    /// Is a round dealt (playing or finished but not yet reset)?
    #[must_use]
    pub fn has_round(&self) -> bool {
        self.round.is_some()
    }

    /// Number of scheduled tasks belonging to the current round.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }
}
