/// Pairwise spin models.
pub mod ising;
/// Ways to build starting states.
pub mod init;

pub use init::*;
pub use ising::*;
