//! The election file read by the `apportion` and `info` commands.
//!
//! ```json
//! {
//!   "committees": { "Lewica": "coalition" },
//!   "constituencies": {
//!     "1": { "seats": 12, "votes": { "Lewica": 5012, "Trzecia Droga": 4410 } }
//!   }
//! }
//! ```
//!
//! Committees missing from `committees` are standard committees.

use super::{LoadError, LoadResult};
use crate::error::ApportionmentError;
use crate::model::election::{Category, ConstituencyId, Election, SeatTable, VoteTable};
use crate::util::write_serialized;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ElectionFile {
    #[serde(default)]
    pub committees: BTreeMap<String, Category>,
    pub constituencies: BTreeMap<i64, ConstituencyRecord>,
}

/// Counts are signed so that negative values reach validation instead of
/// failing as parse errors.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConstituencyRecord {
    pub seats: i64,
    #[serde(default)]
    pub votes: BTreeMap<String, i64>,
}

impl ElectionFile {
    pub fn from_election(election: &Election) -> LoadResult<Self> {
        let committees = election
            .votes
            .committees()
            .map(|(name, category)| (name.to_string(), category))
            .collect();

        let mut constituencies = BTreeMap::new();
        for (id, seats) in election.seats.iter() {
            let mut votes = BTreeMap::new();
            if let Some(counts) = election.votes.constituency(id) {
                for (name, count) in counts {
                    let signed = i64::try_from(*count).map_err(|_| LoadError::CountOutOfRange {
                        constituency: id,
                        committee: name.clone(),
                        votes: *count,
                    })?;
                    votes.insert(name.clone(), signed);
                }
            }
            constituencies.insert(
                i64::from(id.0),
                ConstituencyRecord {
                    seats: i64::from(seats),
                    votes,
                },
            );
        }

        Ok(ElectionFile {
            committees,
            constituencies,
        })
    }

    pub fn into_election(self, path: &str) -> LoadResult<Election> {
        let mut votes = VoteTable::new();
        let mut seats = SeatTable::new();

        for (name, category) in &self.committees {
            votes.register_committee(name, *category)?;
        }

        for (raw_id, record) in self.constituencies {
            let id = match u32::try_from(raw_id) {
                Ok(id) if id > 0 => ConstituencyId(id),
                _ => {
                    return Err(LoadError::InvalidConstituencyId {
                        path: path.to_string(),
                        id: raw_id,
                    })
                }
            };

            let seat_count = match u32::try_from(record.seats) {
                Ok(count) if count > 0 => count,
                _ => {
                    return Err(ApportionmentError::NegativeOrMissingSeats {
                        constituency: id,
                        seats: record.seats,
                    }
                    .into())
                }
            };
            seats.insert(id, seat_count);
            votes.ensure_constituency(id);

            for (committee, count) in record.votes {
                if count < 0 {
                    return Err(ApportionmentError::MalformedVoteCount {
                        constituency: id,
                        committee,
                        votes: count,
                    }
                    .into());
                }
                let category = self.committees.get(&committee).copied().unwrap_or_default();
                votes.register_committee(&committee, category)?;
                votes.record_votes(id, &committee, count as u64)?;
            }
        }

        Ok(Election { votes, seats })
    }
}

pub fn read_election(path: &Path) -> LoadResult<Election> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;

    let file: ElectionFile =
        serde_json::from_str(contents.trim_start_matches('\u{feff}')).map_err(|source| {
            LoadError::Json {
                path: display.clone(),
                source,
            }
        })?;

    file.into_election(&display)
}

pub fn write_election(path: &Path, election: &Election) -> LoadResult<()> {
    let file = ElectionFile::from_election(election)?;
    write_serialized(path, &file).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}
