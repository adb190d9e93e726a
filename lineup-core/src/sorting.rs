//! Sort options
//!
//! The menu choice ([`SortChoice`]) is what the user picks; the resolved
//! [`SortMode`] carries the age direction only when sorting by age.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LineupError, Result};

/// Sort option as picked from the menu (1, 2 or 3)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortChoice {
    Skill,
    Age,
    Random,
}

impl SortChoice {
    /// Menu code for this choice
    pub const fn code(self) -> u8 {
        match self {
            SortChoice::Skill => 1,
            SortChoice::Age => 2,
            SortChoice::Random => 3,
        }
    }
}

impl FromStr for SortChoice {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<u8>() {
            Ok(1) => Ok(SortChoice::Skill),
            Ok(2) => Ok(SortChoice::Age),
            Ok(3) => Ok(SortChoice::Random),
            _ => Err(LineupError::InvalidSortOption(s.to_string())),
        }
    }
}

/// Which end of the age range to favour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeDirection {
    /// Youngest first
    Young,
    /// Oldest first
    Old,
}

impl FromStr for AgeDirection {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<u8>() {
            Ok(1) => Ok(AgeDirection::Young),
            Ok(2) => Ok(AgeDirection::Old),
            _ => Err(LineupError::InvalidAgeOption(s.to_string())),
        }
    }
}

/// Supplies an age direction when sorting by age
pub trait AgeDirectionResolver {
    fn resolve_age_direction(&mut self) -> Result<AgeDirection>;
}

impl<F> AgeDirectionResolver for F
where
    F: FnMut() -> Result<AgeDirection>,
{
    fn resolve_age_direction(&mut self) -> Result<AgeDirection> {
        self()
    }
}

/// Fully resolved ranking strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMode {
    /// Highest skill first
    BySkillDesc,
    /// By age in the given direction
    ByAge(AgeDirection),
    /// Uniform sample without replacement
    Random,
}

impl SortMode {
    /// Resolve a menu choice, asking for the age direction only when needed
    pub fn resolve<R: AgeDirectionResolver + ?Sized>(
        choice: SortChoice,
        age_resolver: &mut R,
    ) -> Result<Self> {
        Ok(match choice {
            SortChoice::Skill => SortMode::BySkillDesc,
            SortChoice::Age => SortMode::ByAge(age_resolver.resolve_age_direction()?),
            SortChoice::Random => SortMode::Random,
        })
    }

    pub fn choice(self) -> SortChoice {
        match self {
            SortMode::BySkillDesc => SortChoice::Skill,
            SortMode::ByAge(_) => SortChoice::Age,
            SortMode::Random => SortChoice::Random,
        }
    }
}
