use crate::env::Environment;

/// Represents a single experience or transition in the environment
pub struct Exp<E: Environment> {
    /// The state of the environment before taking the action
    pub state: E::State,
    /// The action taken in the given state
    pub action: E::Action,
    /// The reward received after taking the action
    pub reward: f32,
    /// The state of the environment after the action is taken, terminal or not
    pub next_state: E::State,
}

/// A state-action pair an agent has committed to but not yet been rewarded for
///
/// Returned by the agent when it picks an action and handed back once the
/// environment has reacted, so the pending pair is never hidden inside the agent.
pub struct Decision<E: Environment> {
    /// The state the action was chosen in
    pub state: E::State,
    /// The chosen action
    pub action: E::Action,
}

impl<E: Environment> Decision<E> {
    /// Complete the transition with the reward and the resulting state
    pub fn resolve(self, reward: f32, next_state: E::State) -> Exp<E> {
        Exp {
            state: self.state,
            action: self.action,
            reward,
            next_state,
        }
    }
}

impl<E: Environment> Clone for Decision<E>
where
    E::State: Clone,
    E::Action: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            action: self.action.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::gym::{Cell, TicTacToe};

    use super::*;

    #[test]
    fn decision_resolves_into_exp() {
        let empty = [Cell::Empty; 9];
        let mut next = empty;
        next[4] = Cell::X;

        let decision = Decision::<TicTacToe> {
            state: empty,
            action: 4,
        };
        let exp = decision.clone().resolve(0.5, next);

        assert_eq!(exp.state, empty, "State carried over");
        assert_eq!(exp.action, 4, "Action carried over");
        assert_eq!(exp.reward, 0.5, "Reward attached");
        assert_eq!(exp.next_state, next, "Next state attached");
    }
}
