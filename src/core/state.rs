//! The mutable match snapshot.
//!
//! `GameState` owns players, tokens, the turn pointer, phase and dice
//! bookkeeping. It exposes read-only queries; all mutation flows through
//! the turn engine in `rules::turn`, which treats each entry point as an
//! all-or-nothing transaction.
//!
//! The action history uses an `im` persistent vector so cloning a state for
//! an AI snapshot stays cheap regardless of match length.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::config::{GameConfig, GameMode};
use super::player::Player;
use super::token::{Token, TokenId};
use crate::board::{self, Cell};

/// Match identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "game-{}", self.0)
    }
}

/// Top-level match status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Created, not yet started.
    Waiting,
    /// In progress.
    Playing,
    /// Suspended; resumable.
    Paused,
    /// A winner exists.
    Finished,
    /// Aborted externally.
    Cancelled,
}

/// Sub-phase of the current turn while `Playing`.
///
/// The `roll -> select -> resolved` cycle collapses the resolved step
/// immediately: committing a move (or auto-resolving an empty move set)
/// transitions straight back to `AwaitingRoll` for whoever acts next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the current player to roll.
    AwaitingRoll,
    /// Dice rolled; waiting for a token selection.
    AwaitingMove,
}

/// What happened in one recorded step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// A dice roll.
    Rolled { value: u8 },
    /// A committed token move.
    Moved {
        token: TokenId,
        from: Option<u8>,
        to: u8,
    },
    /// Turn lost to a third consecutive six.
    TurnForfeited,
    /// Turn auto-resolved with no legal moves.
    TurnSkipped,
}

/// A history entry, sufficient to replay a match alongside the RNG seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Acting player.
    pub color: Color,
    /// What happened.
    pub action: ActionKind,
    /// Turn counter at the time.
    pub turn: u32,
}

/// Complete match state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    id: GameId,
    mode: GameMode,
    players: Vec<Player>,
    pub(crate) current: usize,
    pub(crate) status: GameStatus,
    pub(crate) phase: TurnPhase,
    pub(crate) last_dice: Option<u8>,
    pub(crate) consecutive_sixes: u8,
    pub(crate) winner: Option<Color>,
    pub(crate) turn_number: u32,
    pub(crate) history: Vector<ActionRecord>,
}

impl GameState {
    /// Create a fresh match in `Waiting` status from an immutable config.
    #[must_use]
    pub fn new(id: GameId, config: &GameConfig) -> Self {
        let players = config
            .seats()
            .iter()
            .enumerate()
            .map(|(seat, s)| Player::new(seat as u8, s.color, s.controller))
            .collect();

        Self {
            id,
            mode: config.mode(),
            players,
            current: 0,
            status: GameStatus::Waiting,
            phase: TurnPhase::AwaitingRoll,
            last_dice: None,
            consecutive_sixes: 0,
            winner: None,
            turn_number: 1,
            history: Vector::new(),
        }
    }

    // === Identity and status ===

    /// Match identifier.
    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Match mode.
    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Top-level status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Current turn sub-phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Last rolled dice value, if any.
    #[must_use]
    pub fn last_dice(&self) -> Option<u8> {
        self.last_dice
    }

    /// Consecutive sixes rolled by the current player (capped at 3).
    #[must_use]
    pub fn consecutive_sixes(&self) -> u8 {
        self.consecutive_sixes
    }

    /// Winner, once the match is `Finished`.
    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Turn counter, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    // === Players ===

    /// Players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of players (2-4, fixed at creation).
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Seat index of the player to act.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The player to act.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Color of the player to act.
    #[must_use]
    pub fn current_color(&self) -> Color {
        self.players[self.current].color()
    }

    /// Player seated for a color, if that color is in the match.
    #[must_use]
    pub fn player_by_color(&self, color: Color) -> Option<&Player> {
        self.players.iter().find(|p| p.color() == color)
    }

    pub(crate) fn player_by_color_mut(&mut self, color: Color) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.color() == color)
    }

    // === Tokens ===

    /// Look up a token by id. `None` if its color has no seat.
    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<Token> {
        self.player_by_color(id.color()).map(|p| p.token(id.slot()))
    }

    pub(crate) fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.player_by_color_mut(id.color())
            .map(|p| p.token_mut(id.slot()))
    }

    /// All tokens currently occupying a cell, in ascending id order.
    #[must_use]
    pub fn tokens_on_cell(&self, cell: Cell) -> Vec<Token> {
        self.players
            .iter()
            .flat_map(|p| p.tokens().iter().copied())
            .filter(|t| t.cell() == Some(cell))
            .collect()
    }

    /// Whether an opponent of `mover` holds a blockade (two or more tokens
    /// of one color) on `cell`.
    ///
    /// Only ring cells can host opponent blockades; home-stretch cells are
    /// color-exclusive.
    #[must_use]
    pub fn opponent_blockade_on(&self, cell: Cell, mover: Color) -> bool {
        if !matches!(cell, Cell::Ring(_)) {
            return false;
        }
        self.players
            .iter()
            .filter(|p| p.color() != mover)
            .any(|p| {
                p.tokens()
                    .iter()
                    .filter(|t| t.cell() == Some(cell))
                    .count()
                    >= 2
            })
    }

    // === Standings ===

    /// Final (or provisional) ranking: ascending count of unfinished
    /// tokens, seat order as tie-break. The winner, having zero unfinished
    /// tokens, ranks first.
    #[must_use]
    pub fn standings(&self) -> Vec<Color> {
        let mut order: Vec<&Player> = self.players.iter().collect();
        order.sort_by_key(|p| (p.unfinished_count(), p.seat()));
        order.into_iter().map(|p| p.color()).collect()
    }

    // === Scenario setup ===

    /// Directly place a token, bypassing the turn machine.
    ///
    /// For scenario construction (tests, puzzles, debugging); normal play
    /// mutates only through the turn engine. No-op if the color has no
    /// seat. Panics on a path index above 57.
    pub fn place_token(&mut self, id: TokenId, path_index: Option<u8>) {
        if let Some(p) = path_index {
            assert!(p <= board::TRACK_LENGTH, "path index {} out of range", p);
        }
        if let Some(token) = self.token_mut(id) {
            match path_index {
                Some(p) => token.set_path_index(p),
                None => token.send_home(),
            }
        }
    }

    /// Set the player to act. No-op if the color has no seat.
    ///
    /// Scenario setup; normal turn advancement is the turn engine's job.
    pub fn set_turn(&mut self, color: Color) {
        if let Some(idx) = self.players.iter().position(|p| p.color() == color) {
            self.current = idx;
        }
    }

    // === History ===

    /// Ordered action history.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    pub(crate) fn record(&mut self, color: Color, action: ActionKind) {
        let turn = self.turn_number;
        self.history.push_back(ActionRecord {
            color,
            action,
            turn,
        });
    }
}
