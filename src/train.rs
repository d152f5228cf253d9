use std::fmt;

use log::{info, trace};
use rand::Rng;

use crate::{
    algo::QTableAgent,
    decay::Decay,
    gym::{Outcome, Player, TicTacToe},
};

/// Rewards handed to the agent after each move, always from X's point of view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rewards {
    /// **Default**: `1.0`
    pub x_win: f32,
    /// **Default**: `-1.0`
    pub o_win: f32,
    /// **Default**: `0.5`
    pub draw: f32,
    /// Any move that does not end the game
    ///
    /// **Default**: `0.0`
    pub step: f32,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            x_win: 1.0,
            o_win: -1.0,
            draw: 0.5,
            step: 0.0,
        }
    }
}

impl Rewards {
    /// Score the board as it stands after the move that was just made
    pub fn evaluate(&self, env: &TicTacToe) -> f32 {
        match env.outcome() {
            Some(Outcome::Win(Player::X)) => self.x_win,
            Some(Outcome::Win(Player::O)) => self.o_win,
            Some(Outcome::Draw) => self.draw,
            None => self.step,
        }
    }
}

/// Play one game of the agent against itself, learning after every move
///
/// Both sides share the same table. Each move is scored on the board it produced and
/// bootstraps from that board, so the move that sets up the opponent's win only
/// learns about the loss through later updates.
pub fn play_episode<D, R>(
    agent: &mut QTableAgent<TicTacToe, D, R>,
    env: &mut TicTacToe,
    rewards: &Rewards,
) -> Outcome
where
    D: Decay,
    R: Rng,
{
    agent.go(env, |env| rewards.evaluate(env));
    env.outcome()
        .expect("An episode only ends once the game is over")
}

/// Counts gathered over a training run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainingSummary {
    pub episodes: u32,
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
    /// Number of state-action pairs in the table
    pub entries: usize,
}

impl TrainingSummary {
    fn record(&mut self, outcome: Outcome) {
        self.episodes += 1;
        match outcome {
            Outcome::Win(Player::X) => self.x_wins += 1,
            Outcome::Win(Player::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }
}

impl fmt::Display for TrainingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} episodes: X won {}, O won {}, {} draws; {} state-action values learned",
            self.episodes, self.x_wins, self.o_wins, self.draws, self.entries
        )
    }
}

/// Runs a fixed number of self-play episodes
#[derive(Debug, Clone)]
pub struct Trainer {
    /// **Default**: `10000`
    pub episodes: u32,
    pub rewards: Rewards,
    /// Log progress every this many episodes, `0` to disable
    ///
    /// **Default**: `1000`
    pub log_every: u32,
}

impl Default for Trainer {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            rewards: Rewards::default(),
            log_every: 1000,
        }
    }
}

impl Trainer {
    pub fn run<D, R>(
        &self,
        agent: &mut QTableAgent<TicTacToe, D, R>,
        env: &mut TicTacToe,
    ) -> TrainingSummary
    where
        D: Decay,
        R: Rng,
    {
        let mut summary = TrainingSummary::default();
        for i in 1..=self.episodes {
            let outcome = play_episode(agent, env, &self.rewards);
            trace!("episode {i}: {outcome:?}");
            summary.record(outcome);

            if self.log_every > 0 && i % self.log_every == 0 {
                info!(
                    "episode {i}/{}: epsilon {:.3}, {} entries, X {} / O {} / draw {}",
                    self.episodes,
                    agent.epsilon(),
                    agent.q_table().len(),
                    summary.x_wins,
                    summary.o_wins,
                    summary.draws,
                );
            }
        }
        summary.entries = agent.q_table().len();
        info!("{summary}");
        summary
    }
}

#[cfg(test)]
mod tests {
    use crate::{algo::QTableAgentConfig, env::Environment, memory::Decision};

    use super::*;

    fn play(moves: &[usize]) -> TicTacToe {
        let mut game = TicTacToe::new();
        for &m in moves {
            game.apply_move(m);
        }
        game
    }

    #[test]
    fn reward_scheme() {
        let rewards = Rewards::default();
        assert_eq!(rewards.evaluate(&TicTacToe::new()), 0.0, "Open board");
        assert_eq!(rewards.evaluate(&play(&[0, 4])), 0.0, "Game in progress");
        assert_eq!(rewards.evaluate(&play(&[0, 4, 1, 5, 2])), 1.0, "X wins");
        assert_eq!(rewards.evaluate(&play(&[0, 3, 1, 4, 8, 5])), -1.0, "O wins");
        assert_eq!(
            rewards.evaluate(&play(&[0, 1, 2, 4, 3, 5, 7, 6, 8])),
            0.5,
            "Draw"
        );
    }

    #[test]
    fn short_training_run_is_finite() {
        let mut env = TicTacToe::new();
        let mut agent = QTableAgent::<TicTacToe>::seeded(QTableAgentConfig::default(), 42);
        let trainer = Trainer {
            episodes: 50,
            ..Default::default()
        };
        let summary = trainer.run(&mut agent, &mut env);

        assert_eq!(summary.episodes, 50);
        assert_eq!(summary.x_wins + summary.o_wins + summary.draws, 50, "Every episode ends");
        assert_eq!(agent.episode(), 50);
        assert!(!agent.q_table().is_empty(), "Table is populated");
        assert_eq!(summary.entries, agent.q_table().len());
        assert!(
            agent.q_table().values().all(|v| v.is_finite()),
            "All values finite"
        );
    }

    #[test]
    fn same_seed_learns_same_table() {
        let run = |seed| {
            let mut env = TicTacToe::new();
            let mut agent = QTableAgent::<TicTacToe>::seeded(QTableAgentConfig::default(), seed);
            let trainer = Trainer {
                episodes: 50,
                ..Default::default()
            };
            let summary = trainer.run(&mut agent, &mut env);
            (summary, agent.q_table().clone())
        };
        assert_eq!(run(9), run(9), "Training is reproducible");
    }

    #[test]
    fn winning_move_is_rewarded_and_losing_setup_is_not() {
        let mut agent = QTableAgent::<TicTacToe>::seeded(QTableAgentConfig::default(), 0);
        let rewards = Rewards::default();
        let mut env = TicTacToe::new();
        for &m in &[0, 3, 1, 4, 8] {
            env.apply_move(m);
        }

        // O completes the middle row
        let before = env.state();
        let decision = Decision { state: before, action: 5 };
        env.apply_move(5);
        agent.update(decision, rewards.evaluate(&env), env.state());
        assert_eq!(agent.value_of(&before, &5), -0.5, "Terminal move gets the reward");

        // X's previous move, which allowed it, was scored 0 on its own transition
        let mut setup = play(&[0, 3, 1, 4]);
        let setup_state = setup.state();
        setup.apply_move(8);
        let r = rewards.evaluate(&setup);
        assert_eq!(r, 0.0, "No direct penalty for the losing setup");
        agent.update(Decision { state: setup_state, action: 8 }, r, setup.state());
        assert_eq!(agent.value_of(&setup_state, &8), 0.0, "Max over 0..9 hides the loss");
    }

    #[test]
    fn summary_line() {
        let summary = TrainingSummary {
            episodes: 10,
            x_wins: 6,
            o_wins: 3,
            draws: 1,
            entries: 42,
        };
        assert_eq!(
            summary.to_string(),
            "10 episodes: X won 6, O won 3, 1 draws; 42 state-action values learned"
        );
    }
}
