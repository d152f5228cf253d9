use std::collections::HashMap;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    assert_interval,
    decay::{self, Decay},
    env::{DiscreteActionSpace, Environment},
    error::Result,
    exploration::{Choice, EpsilonGreedy},
    memory::{Decision, Exp},
    util::check_interval,
};

use super::Hashable;

/// Which actions the max over the next state ranges over in the update rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Bootstrap {
    /// Every action in [`DiscreteActionSpace::action_space`], legal or not.
    /// Unvisited and illegal actions contribute their default value of 0.0.
    #[default]
    ActionSpace,
    /// Only the legal actions of the next state; a terminal next state is worth 0.0
    Legal,
}

/// Configuration for the [`QTableAgent`]
#[derive(Debug, Clone)]
pub struct QTableAgentConfig<D: Decay> {
    /// Exploration policy
    ///
    /// **Default**: a [`Constant`](decay::Constant) epsilon of `0.1`
    pub exploration: EpsilonGreedy<D>,
    /// Learning rate, in `[0, 1]`
    ///
    /// **Default**: `0.5`
    pub alpha: f32,
    /// Discount factor, in `[0, 1]`
    ///
    /// **Default**: `1.0`
    pub gamma: f32,
    /// **Default**: [`Bootstrap::ActionSpace`]
    pub bootstrap: Bootstrap,
}

impl Default for QTableAgentConfig<decay::Constant> {
    fn default() -> Self {
        Self {
            exploration: EpsilonGreedy::default(),
            alpha: 0.5,
            gamma: 1.0,
            bootstrap: Bootstrap::default(),
        }
    }
}

/// A simple Q-learning agent that utilizes a Q-table to learn its environment
///
/// Values are updated with
///
/// Q(s,a) ← (1 − α)·Q(s,a) + α·(r + γ·max<sub>a'</sub> Q(s',a'))
///
/// ### Generics
/// - `E` - The [`Environment`] in which the agent will learn
///     - The environment's state and action spaces must both be discrete because a Q value will be recorded for each state action pair
///     - For the same reason, the state and action types must be [`Hashable`] to be used as keys in a [`HashMap`]
/// - `D` - The [`Decay`] strategy of the exploration rate
/// - `R` - The random source used for exploration and tie-breaking
pub struct QTableAgent<E, D = decay::Constant, R = StdRng>
where
    E: Environment + DiscreteActionSpace,
    E::State: Hashable,
    E::Action: Hashable,
    D: Decay,
    R: Rng,
{
    q_table: HashMap<(E::State, E::Action), f32>,
    exploration: EpsilonGreedy<D>,
    alpha: f32, // learning rate
    gamma: f32, // discount factor
    bootstrap: Bootstrap,
    episode: u32, // current episode
    rng: R,
}

impl<E, D> QTableAgent<E, D, StdRng>
where
    E: Environment + DiscreteActionSpace,
    E::State: Hashable,
    E::Action: Hashable,
    D: Decay,
{
    /// Initialize a new agent whose random source is seeded with `seed`
    pub fn seeded(config: QTableAgentConfig<D>, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<E, D, R> QTableAgent<E, D, R>
where
    E: Environment + DiscreteActionSpace,
    E::State: Hashable,
    E::Action: Hashable,
    D: Decay,
    R: Rng,
{
    /// Initialize a new `QTableAgent`
    ///
    /// **Panics** if `alpha` or `gamma` is not in the interval `[0,1]`
    pub fn new(config: QTableAgentConfig<D>, rng: R) -> Self {
        assert_interval!(config.alpha, 0.0, 1.0);
        assert_interval!(config.gamma, 0.0, 1.0);
        Self {
            q_table: HashMap::new(),
            exploration: config.exploration,
            alpha: config.alpha,
            gamma: config.gamma,
            bootstrap: config.bootstrap,
            episode: 0,
            rng,
        }
    }

    /// Like [`new`](Self::new), but reports invalid hyperparameters as an error
    pub fn try_new(config: QTableAgentConfig<D>, rng: R) -> Result<Self> {
        check_interval("alpha", config.alpha, 0.0, 1.0)?;
        check_interval("gamma", config.gamma, 0.0, 1.0)?;
        check_interval("epsilon", config.exploration.epsilon(0), 0.0, 1.0)?;
        Ok(Self::new(config, rng))
    }

    pub fn q_table(&self) -> &HashMap<(E::State, E::Action), f32> {
        &self.q_table
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// The exploration probability at the current episode
    pub fn epsilon(&self) -> f32 {
        self.exploration.epsilon(self.episode)
    }

    /// The current estimate for a state-action pair, `0.0` if it was never updated
    pub fn value_of(&self, state: &E::State, action: &E::Action) -> f32 {
        self.q_table
            .get(&(*state, *action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Choose among `actions` with the epsilon greedy policy
    ///
    /// Greedy choices are broken uniformly at random among all actions tied at the
    /// highest value.
    ///
    /// **Panics** if `actions` is empty
    pub fn select_action(&mut self, state: &E::State, actions: &[E::Action]) -> E::Action {
        assert!(!actions.is_empty(), "There is always at least one action available");
        match self.exploration.choose(self.episode, &mut self.rng) {
            Choice::Explore => *actions
                .choose(&mut self.rng)
                .expect("`actions` is not empty"),
            Choice::Exploit => {
                let values: Vec<f32> = actions.iter().map(|a| self.value_of(state, a)).collect();
                let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                let best: Vec<E::Action> = actions
                    .iter()
                    .zip(&values)
                    .filter(|&(_, &v)| v == max)
                    .map(|(&a, _)| a)
                    .collect();
                *best.choose(&mut self.rng).expect("The maximum is always attained")
            }
        }
    }

    /// Commit to an action in the environment's current state
    ///
    /// The returned [`Decision`] must be handed back to [`update`](Self::update) once
    /// the outcome of the action is known.
    pub fn observe(&mut self, env: &E) -> Decision<E> {
        let state = env.state();
        let action = self.select_action(&state, &env.actions());
        Decision { state, action }
    }

    /// Learn from the result of a previous [`observe`](Self::observe)
    pub fn update(&mut self, decision: Decision<E>, reward: f32, next_state: E::State) {
        self.learn(decision.resolve(reward, next_state));
    }

    /// Learn from a given experience and update the table
    pub fn learn(&mut self, experience: Exp<E>) {
        let Exp {
            state,
            action,
            reward,
            next_state,
        } = experience;

        let next_actions = match self.bootstrap {
            Bootstrap::ActionSpace => E::action_space(),
            Bootstrap::Legal => E::legal_actions(&next_state),
        };
        let max_next_q = next_actions
            .iter()
            .map(|a| self.value_of(&next_state, a))
            .reduce(f32::max)
            .unwrap_or(0.0);

        let q_value = self.value_of(&state, &action);
        let new_q_value = reward + self.gamma * max_next_q;
        let weighted_q_value = (1.0 - self.alpha) * q_value + self.alpha * new_q_value;

        self.q_table.insert((state, action), weighted_q_value);
    }

    /// Mark the end of an episode, advancing the exploration schedule
    pub fn end_episode(&mut self) {
        self.episode += 1;
    }

    /// Run one episode in the given environment, scoring every step with `reward`
    ///
    /// The reward is computed from the environment after the step has been applied.
    pub fn go(&mut self, env: &mut E, mut reward: impl FnMut(&E) -> f32) {
        env.reset();
        while env.is_active() {
            let decision = self.observe(env);
            env.step(decision.action);
            let r = reward(env);
            self.update(decision, r, env.state());
        }

        self.end_episode();
    }
}
