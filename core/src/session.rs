use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Constructed but not yet dealt; only `start` is meaningful.
    Ready,
    Running,
    /// All pairs found; the session is inert until the next `start`.
    Finished,
}

impl SessionPhase {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        Self::Ready
    }
}

/// End-of-game report handed to the UI with `GameEvent::GameOver`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub seconds_elapsed: u32,
    pub total_guesses: u32,
    pub accuracy_percent: u32,
}

/// State-change notifications for the UI layer to animate. The engine only
/// records them; rendering and transition timing stay outside.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CellRevealed { cell: Coord2, symbol: Symbol },
    CellsMatched { first: Coord2, second: Coord2 },
    CellsMismatched { first: Coord2, second: Coord2 },
    CellsReverted { first: Coord2, second: Coord2 },
    TimerTick { seconds: u32 },
    GameOver { summary: Summary },
}

/// One game of Pairs from deal to game over.
///
/// The session is a plain `&mut self` state machine driven by three external
/// events in arrival order: `select` (player input), `tick` (the host's
/// once-per-second timer), and `resolve` (the host-scheduled mismatch
/// continuations, due after `reveal_hold` and then `cover_delay`). All real
/// timers live in the host; a continuation or tick that fires after `start`
/// has reset the session lands on a guard and does nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    config: GameConfig,
    palette: Vec<Symbol>,
    grid: Option<PairGrid>,
    board: Array2<CardState>,
    selection: Selection,
    matched_count: Saturating<CellCount>,
    total_guesses: Saturating<u32>,
    seconds_elapsed: u32,
    phase: SessionPhase,
    events: VecDeque<GameEvent>,
}

impl GameSession {
    /// Misconfiguration (odd cell count, short or duplicated palette) is
    /// refused here and again at `start`; it never becomes a runtime panic.
    pub fn new(config: GameConfig, palette: Vec<Symbol>) -> Result<Self> {
        config.validate()?;
        crate::generator::validate_inputs(config.size, &palette)?;
        let (rows, cols) = config.size;
        Ok(Self {
            config,
            palette,
            grid: None,
            board: Array2::default((rows as usize, cols as usize)),
            selection: Selection::Idle,
            matched_count: Saturating(0),
            total_guesses: Saturating(0),
            seconds_elapsed: 0,
            phase: SessionPhase::Ready,
            events: VecDeque::new(),
        })
    }

    /// Deals a fresh grid and resets every counter and card.
    ///
    /// Calling this mid-game abandons the old grid: a pending mismatch revert
    /// is cancelled and queued events from the old game are dropped, so no
    /// stale continuation can touch the new deal.
    pub fn start(&mut self, seed: u64) -> Result<()> {
        self.start_with(RandomPairGenerator::new(seed, DealStrategy::Shuffle))
    }

    pub fn start_with<G: PairGenerator>(&mut self, generator: G) -> Result<()> {
        self.config.validate()?;
        let grid = generator.generate(self.config.size, &self.palette)?;
        if grid.size() != self.config.size {
            return Err(GameError::InvalidGridDimensions);
        }
        log::debug!(
            "starting {}x{} session, {} pairs",
            self.config.size.0,
            self.config.size.1,
            grid.pair_count()
        );
        self.grid = Some(grid);
        self.board.fill(CardState::Hidden);
        self.selection = Selection::Idle;
        self.matched_count = Saturating(0);
        self.total_guesses = Saturating(0);
        self.seconds_elapsed = 0;
        self.events.clear();
        self.phase = SessionPhase::Running;
        Ok(())
    }

    /// Feeds one player selection through the state machine.
    ///
    /// Selections are ignored (not errored) while a mismatch is resolving,
    /// when re-picking the pending card, and on matched cards. Every
    /// second-card comparison counts one guess, match or mismatch alike.
    pub fn select(&mut self, cell: Coord2) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        if self.phase.is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        let Some(grid) = self.grid.as_ref() else {
            return Err(GameError::NotStarted);
        };
        let cell = grid.validate_coords(cell)?;
        let symbol = grid[cell];
        let pending_symbol = self.selection.pending().map(|first| grid[first]);

        Ok(match self.selection {
            Selection::Resolving { .. } => Ignored,
            _ if self.board[cell.to_nd_index()] == CardState::Matched => Ignored,
            Selection::OnePicked(first) if first == cell => Ignored,
            Selection::Idle => {
                self.board[cell.to_nd_index()] = CardState::Revealed;
                self.selection = Selection::OnePicked(cell);
                self.events.push_back(GameEvent::CellRevealed { cell, symbol });
                Revealed
            }
            Selection::OnePicked(first) => {
                self.board[cell.to_nd_index()] = CardState::Revealed;
                self.events.push_back(GameEvent::CellRevealed { cell, symbol });
                self.total_guesses += 1;

                if pending_symbol == Some(symbol) {
                    self.board[first.to_nd_index()] = CardState::Matched;
                    self.board[cell.to_nd_index()] = CardState::Matched;
                    self.selection = Selection::Idle;
                    self.matched_count += 2;
                    self.events.push_back(GameEvent::CellsMatched {
                        first,
                        second: cell,
                    });
                    log::trace!("matched {:?} and {:?}", first, cell);

                    if self.matched_count.0 >= self.config.total_cells() {
                        self.finish();
                        Won
                    } else {
                        Matched
                    }
                } else {
                    self.selection = Selection::Resolving {
                        first,
                        second: cell,
                        phase: RevertPhase::Hold,
                    };
                    self.events.push_back(GameEvent::CellsMismatched {
                        first,
                        second: cell,
                    });
                    log::trace!("mismatched {:?} and {:?}", first, cell);
                    Mismatched
                }
            }
        })
    }

    /// Fires the next scheduled mismatch continuation.
    ///
    /// The host calls this twice per mismatch: once after `reveal_hold`
    /// (covers the cards) and once more after `cover_delay` (unblocks input).
    /// When nothing is resolving the call is a no-op, which is what makes a
    /// continuation scheduled against an abandoned game harmless.
    pub fn resolve(&mut self) -> ResolveOutcome {
        match self.selection {
            Selection::Resolving {
                first,
                second,
                phase: RevertPhase::Hold,
            } => {
                self.board[first.to_nd_index()] = CardState::Hidden;
                self.board[second.to_nd_index()] = CardState::Hidden;
                self.selection = Selection::Resolving {
                    first,
                    second,
                    phase: RevertPhase::Cover,
                };
                self.events.push_back(GameEvent::CellsReverted { first, second });
                ResolveOutcome::Reverted
            }
            Selection::Resolving {
                phase: RevertPhase::Cover,
                ..
            } => {
                self.selection = Selection::Idle;
                ResolveOutcome::Cleared
            }
            _ => ResolveOutcome::NoChange,
        }
    }

    /// The host's once-per-second timer callback. Counts only while running,
    /// so a tick arriving after game over or before the deal is dropped.
    pub fn tick(&mut self) -> Option<u32> {
        if !self.phase.is_running() {
            return None;
        }
        self.seconds_elapsed += 1;
        self.events.push_back(GameEvent::TimerTick {
            seconds: self.seconds_elapsed,
        });
        Some(self.seconds_elapsed)
    }

    fn finish(&mut self) {
        self.phase = SessionPhase::Finished;
        let summary = self.summary();
        self.events.push_back(GameEvent::GameOver { summary });
        log::debug!(
            "game over: {}s, {} guesses, {}% accuracy",
            summary.seconds_elapsed,
            summary.total_guesses,
            summary.accuracy_percent
        );
    }

    pub fn poll_event(&mut self) -> Option<GameEvent> {
        self.events.pop_front()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn pair_count(&self) -> CellCount {
        self.config.pair_count()
    }

    pub fn grid(&self) -> Option<&PairGrid> {
        self.grid.as_ref()
    }

    pub fn card_at(&self, cell: Coord2) -> CardState {
        self.board[cell.to_nd_index()]
    }

    /// Face value of a cell; `None` before the first deal.
    pub fn symbol_at(&self, cell: Coord2) -> Option<Symbol> {
        self.grid.as_ref().map(|grid| grid[cell])
    }

    pub fn pending_cell(&self) -> Option<Coord2> {
        self.selection.pending()
    }

    pub fn is_resolving(&self) -> bool {
        self.selection.is_resolving()
    }

    /// Whether a selection on this cell would currently do anything.
    pub fn can_select(&self, cell: Coord2) -> bool {
        self.phase.is_running()
            && !self.selection.is_resolving()
            && self.selection.pending() != Some(cell)
            && self.card_at(cell).is_interactive()
    }

    pub fn matched_count(&self) -> CellCount {
        self.matched_count.0
    }

    pub fn total_guesses(&self) -> u32 {
        self.total_guesses.0
    }

    pub fn seconds_elapsed(&self) -> u32 {
        self.seconds_elapsed
    }

    /// Guess accuracy as a rounded integer percentage. A session with no
    /// completed guesses reports 100 rather than dividing by zero.
    pub fn accuracy_percent(&self) -> u32 {
        let guesses = self.total_guesses.0 as u64;
        if guesses == 0 {
            return 100;
        }
        let pairs = self.config.pair_count() as u64;
        ((200 * pairs + guesses) / (2 * guesses)) as u32
    }

    pub fn summary(&self) -> Summary {
        Summary {
            seconds_elapsed: self.seconds_elapsed,
            total_guesses: self.total_guesses.0,
            accuracy_percent: self.accuracy_percent(),
        }
    }
}
