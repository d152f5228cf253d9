use dialoguer::Input;

use crate::{
    error::{Error, Result},
    gym::{Outcome, TicTacToe},
};

use super::{outcome_message, wants_another, Console, INVALID_MOVE};

/// A [`Console`] on the user's terminal
#[derive(Debug, Default)]
pub struct Terminal;

impl Console for Terminal {
    fn show_board(&mut self, game: &TicTacToe) -> Result<()> {
        print!("{game}");
        Ok(())
    }

    fn read_move(&mut self, game: &TicTacToe) -> Result<usize> {
        let available = game.available_moves();
        let input = Input::<String>::new()
            .with_prompt("Enter your move (0-8)")
            .validate_with(|i: &String| -> std::result::Result<(), &str> {
                match i.trim().parse::<usize>() {
                    Ok(m) if available.contains(&m) => Ok(()),
                    _ => Err(INVALID_MOVE),
                }
            })
            .interact_text()?;
        let parsed = input.trim().parse::<usize>();
        parsed.map_err(|_| Error::InvalidInput { input })
    }

    fn announce_agent_move(&mut self, action: usize) -> Result<()> {
        println!("AI's move: {action}");
        Ok(())
    }

    fn announce_outcome(&mut self, outcome: Outcome) -> Result<()> {
        println!("{}", outcome_message(outcome));
        Ok(())
    }

    fn play_again(&mut self) -> Result<bool> {
        let answer = Input::<String>::new()
            .with_prompt("Play again? (yes/no)")
            .allow_empty(true)
            .interact_text()?;
        Ok(wants_another(&answer))
    }
}
