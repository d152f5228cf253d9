pub mod tabular;

pub use tabular::q_table::{Bootstrap, QTableAgent, QTableAgentConfig};
