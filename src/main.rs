use std::error::Error;

use clap::{Parser, ValueEnum};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use tictactoe_rl::{
    algo::{Bootstrap, QTableAgent, QTableAgentConfig},
    check_interval,
    decay::{self, Schedule},
    exploration::EpsilonGreedy,
    gym::TicTacToe,
    play::{Session, Terminal},
    train::Trainer,
};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ScheduleArg {
    Constant,
    Exponential,
    Linear,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BootstrapArg {
    /// Max over all nine cells, occupied ones included
    ActionSpace,
    /// Max over the cells still open in the next state
    Legal,
}

impl From<BootstrapArg> for Bootstrap {
    fn from(arg: BootstrapArg) -> Self {
        match arg {
            BootstrapArg::ActionSpace => Bootstrap::ActionSpace,
            BootstrapArg::Legal => Bootstrap::Legal,
        }
    }
}

/// Train a Q-learning agent at tic-tac-toe through self-play, then play against it
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of self-play episodes
    #[arg(long, default_value_t = 10_000)]
    episodes: u32,

    /// Exploration rate (the starting rate for decaying schedules)
    #[arg(long, default_value_t = 0.1)]
    epsilon: f32,

    /// How the exploration rate changes over episodes
    #[arg(long, value_enum, default_value_t = ScheduleArg::Constant)]
    schedule: ScheduleArg,

    /// Final exploration rate for decaying schedules
    #[arg(long, default_value_t = 0.01)]
    epsilon_final: f32,

    /// Decay rate per episode for decaying schedules
    #[arg(long, default_value_t = 1e-3)]
    decay_rate: f32,

    /// Learning rate
    #[arg(long, default_value_t = 0.5)]
    alpha: f32,

    /// Discount factor
    #[arg(long, default_value_t = 1.0)]
    gamma: f32,

    /// Which next-state actions the update maximises over
    #[arg(long, value_enum, default_value_t = BootstrapArg::ActionSpace)]
    bootstrap: BootstrapArg,

    /// Seed for exploration and tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// Log training progress every this many episodes, 0 to disable
    #[arg(long, default_value_t = 1000)]
    log_every: u32,

    /// Exit after training instead of starting a game
    #[arg(long)]
    no_play: bool,
}

impl Args {
    fn schedule(&self) -> Result<Schedule, tictactoe_rl::Error> {
        let (rate, vi, vf) = (self.decay_rate, self.epsilon, self.epsilon_final);
        check_interval("epsilon", vi, 0.0, 1.0)?;
        if !matches!(self.schedule, ScheduleArg::Constant) {
            check_interval("epsilon-final", vf, 0.0, 1.0)?;
        }
        Ok(match self.schedule {
            ScheduleArg::Constant => Schedule::Constant(decay::Constant::new(vi)),
            ScheduleArg::Exponential => Schedule::Exponential(decay::Exponential::new(rate, vi, vf)?),
            ScheduleArg::Linear => Schedule::Linear(decay::Linear::new(rate, vi, vf)?),
        })
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = QTableAgentConfig {
        exploration: EpsilonGreedy::new(args.schedule()?),
        alpha: args.alpha,
        gamma: args.gamma,
        bootstrap: args.bootstrap.into(),
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut agent = QTableAgent::<TicTacToe, _, _>::try_new(config, rng)?;

    let mut env = TicTacToe::new();
    let trainer = Trainer {
        episodes: args.episodes,
        log_every: args.log_every,
        ..Default::default()
    };
    info!("training for {} episodes", trainer.episodes);
    let summary = trainer.run(&mut agent, &mut env);

    println!("Training completed!");
    println!("{summary}");

    if args.no_play {
        return Ok(());
    }

    Session::new(agent, Terminal).run()?;
    Ok(())
}
