use rand::Rng;

use crate::decay::{self, Decay};

use super::Choice;

/// Epsilon greedy exploration policy with time-decaying epsilon threshold
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// The exploration probability for a given episode
    pub fn epsilon(&self, episode: u32) -> f32 {
        self.epsilon.evaluate(episode as f32)
    }

    /// Invoke epsilon greedy policy for current episode
    pub fn choose<R: Rng>(&self, episode: u32, rng: &mut R) -> Choice {
        if rng.gen::<f32>() < self.epsilon(episode) {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

impl Default for EpsilonGreedy<decay::Constant> {
    fn default() -> Self {
        Self::new(decay::Constant::new(0.1))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn extremes_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        let never = EpsilonGreedy::new(decay::Constant::new(0.0));
        let always = EpsilonGreedy::new(decay::Constant::new(1.0));
        for episode in 0..100 {
            assert_eq!(never.choose(episode, &mut rng), Choice::Exploit, "Epsilon 0 never explores");
            assert_eq!(always.choose(episode, &mut rng), Choice::Explore, "Epsilon 1 always explores");
        }
    }

    #[test]
    fn explore_rate_tracks_epsilon() {
        let mut rng = StdRng::seed_from_u64(11);
        let policy = EpsilonGreedy::default();
        let explored = (0..10_000)
            .filter(|_| policy.choose(0, &mut rng) == Choice::Explore)
            .count();
        assert!((800..1200).contains(&explored), "Explored {explored} times out of 10000");
    }

    #[test]
    fn epsilon_follows_schedule() {
        let policy = EpsilonGreedy::new(decay::Linear::new(0.1, 1.0, 0.2).unwrap());
        assert_eq!(policy.epsilon(0), 1.0);
        assert_eq!(policy.epsilon(100), 0.2);
    }
}
