pub mod session;
pub mod bootstrap;
pub mod cli;

pub use session::{ChainStatus, VoteReceipt, VotingSession};
pub use bootstrap::{Registry, RegistryEntry, SimulationConfig};
pub use cli::run_cli;
