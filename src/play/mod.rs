use log::debug;
use rand::Rng;

use crate::{
    algo::QTableAgent,
    decay::Decay,
    error::Result,
    gym::{Outcome, Player, TicTacToe},
};

#[cfg(feature = "cli")]
mod terminal;

#[cfg(feature = "cli")]
pub use terminal::Terminal;

/// The message shown whenever the human enters something that is not a legal move
pub const INVALID_MOVE: &str = "Invalid move! Try again.";

/// The human side of an interactive game
pub trait Console {
    /// Display the board
    fn show_board(&mut self, game: &TicTacToe) -> Result<()>;

    /// Ask for a move until a legal one is given
    ///
    /// Implementations re-prompt with [`INVALID_MOVE`] on anything that is not one of
    /// `game.available_moves()`, whether it failed to parse or named a taken cell.
    fn read_move(&mut self, game: &TicTacToe) -> Result<usize>;

    fn announce_agent_move(&mut self, action: usize) -> Result<()>;

    fn announce_outcome(&mut self, outcome: Outcome) -> Result<()>;

    /// Whether another round should be played
    fn play_again(&mut self) -> Result<bool>;
}

/// The line announcing how a game ended, from the human's point of view
pub fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win(Player::X) => "Congratulations! You win!",
        Outcome::Win(Player::O) => "AI wins!",
        Outcome::Draw => "It's a draw!",
    }
}

/// Whether an answer to the replay prompt asks for another game
///
/// Only `yes` continues, in any case and ignoring surrounding whitespace.
pub fn wants_another(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// A human (X, moving first) against a trained agent (O)
///
/// The agent only picks moves here; nothing it sees during play is learned.
pub struct Session<D, R, C>
where
    D: Decay,
    R: Rng,
    C: Console,
{
    agent: QTableAgent<TicTacToe, D, R>,
    console: C,
    game: TicTacToe,
}

impl<D, R, C> Session<D, R, C>
where
    D: Decay,
    R: Rng,
    C: Console,
{
    pub fn new(agent: QTableAgent<TicTacToe, D, R>, console: C) -> Self {
        Self {
            agent,
            console,
            game: TicTacToe::new(),
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Play a single game from an empty board
    pub fn play_round(&mut self) -> Result<Outcome> {
        self.game.reset();
        self.console.show_board(&self.game)?;

        let outcome = loop {
            if let Some(outcome) = self.game.outcome() {
                break outcome;
            }

            let action = match self.game.current_player() {
                Player::X => self.console.read_move(&self.game)?,
                Player::O => {
                    let action = self.agent.observe(&self.game).action;
                    self.console.announce_agent_move(action)?;
                    action
                }
            };
            debug!("{} plays {action}", self.game.current_player());
            self.game.try_apply_move(action)?;
            self.console.show_board(&self.game)?;
        };

        self.console.announce_outcome(outcome)?;
        Ok(outcome)
    }

    /// Play rounds until the human declines another
    pub fn run(&mut self) -> Result<()> {
        loop {
            let outcome = self.play_round()?;
            debug!("round finished: {outcome:?}");
            if !self.console.play_again()? {
                return Ok(());
            }
        }
    }
}
