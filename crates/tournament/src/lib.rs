//! Tournament Runner for UHP engines
//!
//! This crate provides infrastructure for:
//! - Playing refereed matches between two engine processes over the UHP
//!   stdin/stdout protocol
//! - Recording outcomes and tracking Elo ratings across engines
//! - Driving a whole tournament from a TOML description
//!
//! # Usage
//!
//! ```bash
//! # Play every pairing in a tournament file
//! cargo run -p tournament -- run tournament.toml --results results.json
//!
//! # Show the current leaderboard
//! cargo run -p tournament -- leaderboard
//! ```

mod elo;
mod match_runner;
mod outcome;
mod provision;
mod results;
mod schedule;

pub use elo::*;
pub use match_runner::*;
pub use outcome::*;
pub use provision::*;
pub use results::*;
pub use schedule::*;
