//! Player records and CSV ingestion
//!
//! Records keep every column as a string. `Age` and `Skill` are parsed
//! on demand when a ranking needs them.

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::error::{LineupError, Result};
use crate::position::Position;

pub const PLAYER: &str = "Player";
pub const POSITION: &str = "Position";
pub const AGE: &str = "Age";
pub const SKILL: &str = "Skill";

/// Columns every player table must carry
pub const REQUIRED_COLUMNS: [&str; 4] = [PLAYER, POSITION, AGE, SKILL];

/// One row of the player table, keyed by column name
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerRecord {
    fields: FxHashMap<String, String>,
}

impl PlayerRecord {
    /// Build a record from (column, value) pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw value of a column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Player name, empty if the column is absent
    pub fn name(&self) -> &str {
        self.get(PLAYER).unwrap_or("")
    }

    /// Raw `Position` value
    pub fn position_name(&self) -> Option<&str> {
        self.get(POSITION)
    }

    /// `Position` as a canonical position, if it is one
    pub fn position(&self) -> Option<Position> {
        self.position_name().and_then(|p| p.parse().ok())
    }

    /// Whether this player plays the given position (exact name match)
    pub fn plays(&self, position: Position) -> bool {
        self.position_name() == Some(position.as_str())
    }

    pub fn age(&self) -> Result<i64> {
        self.numeric(AGE)
    }

    pub fn skill(&self) -> Result<i64> {
        self.numeric(SKILL)
    }

    fn numeric(&self, column: &str) -> Result<i64> {
        let raw = self.get(column);
        raw.and_then(|v| v.trim().parse::<i64>().ok())
            .ok_or_else(|| LineupError::MalformedPlayerRecord {
                player: self.name().to_string(),
                field: column.to_string(),
                value: raw.unwrap_or_default().to_string(),
            })
    }
}

/// All candidate players, with the column order of the source table
#[derive(Clone, Debug, Default)]
pub struct PlayerPool {
    headers: Vec<String>,
    players: Vec<PlayerRecord>,
}

impl PlayerPool {
    /// Build a pool from already parsed records
    ///
    /// Fails if a required column is missing from `headers`.
    pub fn new(headers: Vec<String>, players: Vec<PlayerRecord>) -> Result<Self> {
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(LineupError::MissingColumn(column.to_string()));
            }
        }

        for player in &players {
            if player.position().is_none() {
                tracing::warn!(
                    "Player '{}' has unknown position '{}' and will never be selected",
                    player.name(),
                    player.position_name().unwrap_or_default()
                );
            }
        }

        Ok(Self { headers, players })
    }

    /// Read a CSV table with a header row
    ///
    /// Rows may be shorter or longer than the header: missing trailing
    /// columns are absent from the record, extra values are dropped.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut players = Vec::new();
        for row in reader.records() {
            let row = row?;
            players.push(PlayerRecord::from_pairs(
                headers.iter().cloned().zip(row.iter().map(str::to_string)),
            ));
        }

        Self::new(headers, players)
    }

    /// Load a CSV file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let pool = Self::from_reader(file)?;
        tracing::info!("Loaded {} players from {}", pool.len(), path.display());
        Ok(pool)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
