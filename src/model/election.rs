use crate::error::{ApportionmentError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Eligibility category of a committee, tagged once at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Coalition,
    Minority,
    Standard,
}

impl Default for Category {
    fn default() -> Self {
        Category::Standard
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Coalition => write!(f, "coalition"),
            Category::Minority => write!(f, "minority"),
            Category::Standard => write!(f, "standard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstituencyId(pub u32);

impl fmt::Display for ConstituencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Votes per committee within one constituency.
pub type ConstituencyVotes = BTreeMap<String, u64>;

/// Seats per committee within one constituency.
pub type ConstituencySeats = BTreeMap<String, u32>;

pub type SeatAllocation = BTreeMap<ConstituencyId, ConstituencySeats>;

/// Nationwide vote sum per committee.
pub type NationalTotals = BTreeMap<String, u64>;

/// Nationwide seat sum per committee.
pub type NationalSeats = BTreeMap<String, u32>;

/// Raw vote counts keyed by constituency, together with the category of
/// every committee that appears in them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTable {
    committees: BTreeMap<String, Category>,
    constituencies: BTreeMap<ConstituencyId, ConstituencyVotes>,
}

impl VoteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a committee under a category. Registering the same name
    /// twice is fine as long as the category agrees.
    pub fn register_committee(&mut self, name: &str, category: Category) -> Result<()> {
        match self.committees.get(name) {
            Some(existing) if *existing != category => Err(ApportionmentError::InconsistentCategory {
                committee: name.to_string(),
                existing: *existing,
                requested: category,
            }),
            Some(_) => Ok(()),
            None => {
                self.committees.insert(name.to_string(), category);
                Ok(())
            }
        }
    }

    /// Record a committee's votes in a constituency, replacing any earlier
    /// count for the same pair.
    pub fn record_votes(
        &mut self,
        constituency: ConstituencyId,
        committee: &str,
        votes: u64,
    ) -> Result<()> {
        if !self.committees.contains_key(committee) {
            return Err(ApportionmentError::UnknownCommittee {
                committee: committee.to_string(),
            });
        }

        self.constituencies
            .entry(constituency)
            .or_default()
            .insert(committee.to_string(), votes);
        Ok(())
    }

    /// Make sure a constituency is present even if no committee ran there.
    pub fn ensure_constituency(&mut self, constituency: ConstituencyId) {
        self.constituencies.entry(constituency).or_default();
    }

    pub fn category(&self, committee: &str) -> Option<Category> {
        self.committees.get(committee).copied()
    }

    pub fn committees(&self) -> impl Iterator<Item = (&str, Category)> + '_ {
        self.committees.iter().map(|(name, category)| (name.as_str(), *category))
    }

    pub fn constituency(&self, id: ConstituencyId) -> Option<&ConstituencyVotes> {
        self.constituencies.get(&id)
    }

    pub fn constituencies(&self) -> impl Iterator<Item = (ConstituencyId, &ConstituencyVotes)> + '_ {
        self.constituencies.iter().map(|(id, votes)| (*id, votes))
    }

    pub fn constituency_ids(&self) -> impl Iterator<Item = ConstituencyId> + '_ {
        self.constituencies.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.constituencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constituencies.is_empty()
    }

    /// Sum of each committee's votes across every constituency.
    pub fn national_totals(&self) -> NationalTotals {
        self.constituencies
            .values()
            .flat_map(|votes| votes.iter())
            .fold(NationalTotals::new(), |mut totals, (committee, votes)| {
                *totals.entry(committee.clone()).or_insert(0) += votes;
                totals
            })
    }

    pub fn total_votes(&self) -> u64 {
        self.constituencies
            .values()
            .flat_map(|votes| votes.values())
            .sum()
    }

    /// Copy of the table keeping only committees for which `keep` holds.
    /// Dropped committees disappear from the registry as well.
    pub fn retain_committees<F>(&self, mut keep: F) -> VoteTable
    where
        F: FnMut(&str) -> bool,
    {
        let committees: BTreeMap<String, Category> = self
            .committees
            .iter()
            .filter(|(name, _)| keep(name))
            .map(|(name, category)| (name.clone(), *category))
            .collect();

        let constituencies = self
            .constituencies
            .iter()
            .map(|(id, votes)| {
                let kept = votes
                    .iter()
                    .filter(|(name, _)| committees.contains_key(name.as_str()))
                    .map(|(name, count)| (name.clone(), *count))
                    .collect();
                (*id, kept)
            })
            .collect();

        VoteTable {
            committees,
            constituencies,
        }
    }
}

/// Seats available per constituency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatTable {
    seats: BTreeMap<ConstituencyId, u32>,
}

impl SeatTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, constituency: ConstituencyId, seats: u32) {
        self.seats.insert(constituency, seats);
    }

    pub fn get(&self, constituency: ConstituencyId) -> Option<u32> {
        self.seats.get(&constituency).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConstituencyId, u32)> + '_ {
        self.seats.iter().map(|(id, seats)| (*id, *seats))
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn total_seats(&self) -> u64 {
        self.seats.values().map(|seats| u64::from(*seats)).sum()
    }
}

impl std::iter::FromIterator<(ConstituencyId, u32)> for SeatTable {
    fn from_iter<I: IntoIterator<Item = (ConstituencyId, u32)>>(iter: I) -> Self {
        SeatTable {
            seats: iter.into_iter().collect(),
        }
    }
}

/// Everything an ingestion collaborator hands to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Election {
    pub votes: VoteTable,
    pub seats: SeatTable,
}
