//! Formation parsing
//!
//! A formation lists outfield players from the back, e.g. "4-3-3" or
//! "4-2-3-1". It is validated in two steps:
//! - format: 3 to 5 dash-separated digits, each between 1 and 5
//! - quota: ten outfield players, at least three defenders
//!
//! Formations with more than three lines are ambiguous and need an
//! [`Orientation`] to fold the extra lines into midfield or attack.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LineupError, Result};
use crate::position::Position;

const MIN_LINES: usize = 3;
const MAX_LINES: usize = 5;
const MIN_LINE_SIZE: u8 = 1;
const MAX_LINE_SIZE: u8 = 5;
const OUTFIELD_PLAYERS: u8 = 10;
const MIN_DEFENDERS: u8 = 3;
const GOALKEEPERS: u8 = 1;

/// How the extra lines of a 4 or 5 line formation are counted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Everything after the second line counts as forwards
    Forward,
    /// Everything between the first and last line counts as midfield
    Midfielder,
}

impl FromStr for Orientation {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<u8>() {
            Ok(1) => Ok(Orientation::Forward),
            Ok(2) => Ok(Orientation::Midfielder),
            _ => Err(LineupError::InvalidOrientation(s.to_string())),
        }
    }
}

/// Supplies an orientation when a formation needs one
pub trait OrientationResolver {
    fn resolve_orientation(&mut self) -> Result<Orientation>;
}

impl<F> OrientationResolver for F
where
    F: FnMut() -> Result<Orientation>,
{
    fn resolve_orientation(&mut self) -> Result<Orientation> {
        self()
    }
}

/// Players to select per position, in roster order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotas([u8; 4]);

impl Quotas {
    /// Quotas for one goalkeeper plus the given outfield lines
    ///
    /// Unchecked: any counts are accepted. Use [`Quotas::checked`] for
    /// counts that must form a full eleven.
    pub fn new(defenders: u8, midfielders: u8, forwards: u8) -> Self {
        Self([GOALKEEPERS, defenders, midfielders, forwards])
    }

    /// Quotas for a full eleven: ten outfield players, at least three defenders
    pub fn checked(defenders: u8, midfielders: u8, forwards: u8) -> Result<Self> {
        let outfield = [defenders, midfielders, forwards];
        let label = format!("{}-{}-{}", defenders, midfielders, forwards);
        if outfield.iter().map(|&n| n as u16).sum::<u16>() != OUTFIELD_PLAYERS as u16
            || defenders < MIN_DEFENDERS
        {
            return Err(LineupError::InvalidQuota(label));
        }
        Ok(Self::new(defenders, midfielders, forwards))
    }

    pub fn get(&self, position: Position) -> usize {
        self.0[position.index()] as usize
    }

    /// Total players including the goalkeeper
    pub fn total(&self) -> usize {
        self.0.iter().map(|&n| n as usize).sum()
    }

    pub fn as_array(&self) -> [u8; 4] {
        self.0
    }
}

impl Index<Position> for Quotas {
    type Output = u8;

    fn index(&self, position: Position) -> &u8 {
        &self.0[position.index()]
    }
}

/// A validated formation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formation {
    lines: Vec<u8>,
}

impl Formation {
    pub fn lines(&self) -> &[u8] {
        &self.lines
    }

    /// Whether an orientation is needed to collapse this formation
    pub fn needs_orientation(&self) -> bool {
        self.lines.len() > MIN_LINES
    }

    /// Collapse into per-position quotas
    ///
    /// The resolver is only consulted for formations with 4 or 5 lines.
    pub fn quotas<R: OrientationResolver + ?Sized>(&self, resolver: &mut R) -> Result<Quotas> {
        let orientation = if self.needs_orientation() {
            resolver.resolve_orientation()?
        } else {
            // Both orientations agree on three lines
            Orientation::Midfielder
        };
        Ok(self.quotas_with(orientation))
    }

    /// Collapse with a known orientation
    pub fn quotas_with(&self, orientation: Orientation) -> Quotas {
        let lines = &self.lines;
        let last = lines.len() - 1;
        let defenders = lines[0];

        match orientation {
            Orientation::Forward => {
                Quotas::new(defenders, lines[1], lines[2..].iter().sum())
            }
            Orientation::Midfielder => {
                Quotas::new(defenders, lines[1..last].iter().sum(), lines[last])
            }
        }
    }
}

impl FromStr for Formation {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self> {
        let lines = check_format(s)?;
        check_quota(s, &lines)?;
        Ok(Self { lines })
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.lines.iter().map(|n| n.to_string()).collect();
        f.write_str(&parts.join("-"))
    }
}

/// Parse and validate a formation string into quotas
pub fn parse_formation<R: OrientationResolver + ?Sized>(
    formation: &str,
    resolver: &mut R,
) -> Result<Quotas> {
    formation.parse::<Formation>()?.quotas(resolver)
}

/// Check the X-X-X[-X][-X] shape and return the line sizes
pub fn check_format(formation: &str) -> Result<Vec<u8>> {
    let invalid = || LineupError::InvalidFormat(formation.to_string());

    let lines = formation
        .split('-')
        .map(|part| match part.as_bytes() {
            [d @ b'0'..=b'9'] => Some(d - b'0'),
            _ => None,
        })
        .map(|n| n.filter(|n| (MIN_LINE_SIZE..=MAX_LINE_SIZE).contains(n)))
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(invalid)?;

    if !(MIN_LINES..=MAX_LINES).contains(&lines.len()) {
        return Err(invalid());
    }
    Ok(lines)
}

/// Check that the lines add up to ten with enough defenders
pub fn check_quota(formation: &str, lines: &[u8]) -> Result<()> {
    let total: u8 = lines.iter().sum();
    let defenders = lines.first().copied().unwrap_or(0);

    if total != OUTFIELD_PLAYERS || defenders < MIN_DEFENDERS {
        return Err(LineupError::InvalidQuota(formation.to_string()));
    }
    Ok(())
}
