//! Lineup Core - Formation parsing and roster selection
//!
//! This crate provides the team-building logic for Lineup:
//! - Positions and player records read from CSV
//! - Formation parsing and validation ("4-3-3", "4-2-3-1")
//! - Sort options (skill, age, random)
//! - Per-position roster selection

pub mod error;
pub mod position;
pub mod player;
pub mod formation;
pub mod sorting;
pub mod roster;

// Re-exports for convenient access
pub use error::{LineupError, Result};
pub use position::Position;
pub use player::{PlayerPool, PlayerRecord, REQUIRED_COLUMNS};
pub use formation::{parse_formation, Formation, Orientation, OrientationResolver, Quotas};
pub use sorting::{AgeDirection, AgeDirectionResolver, SortChoice, SortMode};
pub use roster::{Roster, RosterEntry, RosterSelector};
