//! Roster selection
//!
//! Players are picked position by position in roster order
//! (Goalkeeper, Defender, Midfielder, Forward). Within a position the
//! active [`SortMode`] ranks the candidates and the quota caps how many
//! are kept. A short supply is not an error: every available player is
//! taken.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::Result;
use crate::formation::Quotas;
use crate::player::PlayerRecord;
use crate::position::Position;
use crate::sorting::{AgeDirection, AgeDirectionResolver, SortChoice, SortMode};

/// A selected player and the slot it fills
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RosterEntry<'a> {
    pub position: Position,
    pub player: &'a PlayerRecord,
}

/// Selected team, grouped by position in roster order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster<'a> {
    mode: SortMode,
    entries: Vec<RosterEntry<'a>>,
}

impl<'a> Roster<'a> {
    /// Ranking used to pick the players
    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn entries(&self) -> &[RosterEntry<'a>] {
        &self.entries
    }

    /// Selected players in roster order
    pub fn players(&self) -> impl Iterator<Item = &'a PlayerRecord> + '_ {
        self.entries.iter().map(|e| e.player)
    }

    /// Selected players for one position
    pub fn at(&self, position: Position) -> impl Iterator<Item = &'a PlayerRecord> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.position == position)
            .map(|e| e.player)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Picks players for each position
pub struct RosterSelector<R: Rng = ChaCha8Rng> {
    rng: R,
}

impl RosterSelector<ChaCha8Rng> {
    /// Selector with a seeded RNG, or entropy when no seed is given
    pub fn seeded(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> RosterSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Select a roster from a menu choice
    ///
    /// The age direction is requested once, and only when sorting by age.
    pub fn select<'a, A: AgeDirectionResolver + ?Sized>(
        &mut self,
        players: &'a [PlayerRecord],
        quotas: &Quotas,
        choice: SortChoice,
        age_resolver: &mut A,
    ) -> Result<Roster<'a>> {
        let mode = SortMode::resolve(choice, age_resolver)?;
        self.select_with_mode(players, quotas, mode)
    }

    /// Select a roster with an already resolved sort mode
    pub fn select_with_mode<'a>(
        &mut self,
        players: &'a [PlayerRecord],
        quotas: &Quotas,
        mode: SortMode,
    ) -> Result<Roster<'a>> {
        let mut entries = Vec::with_capacity(quotas.total());

        for position in Position::ALL {
            let candidates: Vec<&PlayerRecord> =
                players.iter().filter(|p| p.plays(position)).collect();
            let wanted = quotas.get(position);
            let available = candidates.len();

            let picked = self.pick(candidates, wanted, mode)?;

            tracing::debug!(
                "{}: picked {} of {} (wanted {}, {:?})",
                position,
                picked.len(),
                available,
                wanted,
                mode
            );
            if picked.len() < wanted {
                tracing::warn!(
                    "Only {} {}(s) available, {} requested",
                    available,
                    position,
                    wanted
                );
            }

            entries.extend(picked.into_iter().map(|player| RosterEntry { position, player }));
        }

        Ok(Roster { mode, entries })
    }

    fn pick<'a>(
        &mut self,
        candidates: Vec<&'a PlayerRecord>,
        count: usize,
        mode: SortMode,
    ) -> Result<Vec<&'a PlayerRecord>> {
        match mode {
            SortMode::BySkillDesc => top_by_skill(candidates, count),
            SortMode::ByAge(direction) => top_by_age(candidates, count, direction),
            SortMode::Random => Ok(random_sample(&candidates, count, &mut self.rng)),
        }
    }
}

/// Highest skill first, ties in input order
pub fn top_by_skill(candidates: Vec<&PlayerRecord>, count: usize) -> Result<Vec<&PlayerRecord>> {
    let mut keyed = keyed_by(candidates, PlayerRecord::skill)?;
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(take(keyed, count))
}

/// Youngest or oldest first, ties in input order
pub fn top_by_age(
    candidates: Vec<&PlayerRecord>,
    count: usize,
    direction: AgeDirection,
) -> Result<Vec<&PlayerRecord>> {
    let mut keyed = keyed_by(candidates, PlayerRecord::age)?;
    match direction {
        AgeDirection::Young => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
        AgeDirection::Old => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
    }
    Ok(take(keyed, count))
}

/// Uniform sample without replacement, at most `candidates.len()` players
pub fn random_sample<'a, R: Rng + ?Sized>(
    candidates: &[&'a PlayerRecord],
    count: usize,
    rng: &mut R,
) -> Vec<&'a PlayerRecord> {
    let count = count.min(candidates.len());
    candidates.choose_multiple(rng, count).copied().collect()
}

fn keyed_by<'a>(
    candidates: Vec<&'a PlayerRecord>,
    key: fn(&PlayerRecord) -> Result<i64>,
) -> Result<Vec<(i64, &'a PlayerRecord)>> {
    candidates
        .into_iter()
        .map(|p| key(p).map(|k| (k, p)))
        .collect()
}

fn take<'a>(keyed: Vec<(i64, &'a PlayerRecord)>, count: usize) -> Vec<&'a PlayerRecord> {
    keyed.into_iter().take(count).map(|(_, p)| p).collect()
}
