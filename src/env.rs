/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// Rewards are not part of the environment: whoever drives the episode decides how
/// an outcome is scored, which lets the same game be trained with different reward
/// schemes.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Get the current state
    fn state(&self) -> Self::State;

    /// Determine if the state is active or terminal
    fn is_active(&self) -> bool;

    /// Update the environment in response to an action taken by an agent
    ///
    /// The action must be one of [`DiscreteActionSpace::actions`].
    fn step(&mut self, action: Self::Action);

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;
}

/// An environment with a finite, enumerable set of actions
pub trait DiscreteActionSpace: Environment {
    /// Get the available actions for the current state
    fn actions(&self) -> Vec<Self::Action>;

    /// Every action the environment knows about, legal or not
    fn action_space() -> Vec<Self::Action>;

    /// The actions that would be legal in an arbitrary `state`, empty if it is terminal
    fn legal_actions(state: &Self::State) -> Vec<Self::Action>;
}
