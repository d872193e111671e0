//! Bundled games.
//!
//! Each game implements `RuleSet` and exercises a different part of the
//! engine:
//! - `amazons`: relocation plus placement, line-of-sight checks
//! - `connect_four`: gravity placement, configurable board size
//! - `ultimate_tic_tac_toe`: auxiliary state carried in the state string

pub mod amazons;
pub mod connect_four;
pub mod registry;
pub mod ultimate_tic_tac_toe;

pub use amazons::{Amazons, AmazonsBuilder};
pub use connect_four::{ConnectFour, ConnectFourBuilder};
pub use registry::{BoxedRuleSet, GameFactory, GameRegistry};
pub use ultimate_tic_tac_toe::{UltimateTicTacToe, UltimateTicTacToeBuilder};
