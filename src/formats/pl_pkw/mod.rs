//! Polish electoral commission (PKW) exports: a `constituencies.csv` with
//! seat counts and a `votes.csv` with one column per committee, both
//! semicolon separated.

use crate::error::ApportionmentError;
use crate::formats::{LoadError, LoadResult};
use crate::model::election::{Category, ConstituencyId, Election, SeatTable, VoteTable};
use std::convert::TryFrom;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

pub const SEATS_FILE: &str = "constituencies.csv";
pub const VOTES_FILE: &str = "votes.csv";

const SEATS_CONSTITUENCY_COLUMN: &str = "Numer okręgu";
const SEATS_COLUMN: &str = "Liczba mandatów";
const VOTES_CONSTITUENCY_COLUMN: &str = "Nr okręgu";

const COALITION_PREFIX: &str = "KOALICYJNY KOMITET WYBORCZY ";
const COMMITTEE_PREFIX: &str = "KOMITET WYBORCZY ";

/// Committees whose category is not implied by their legal form, matched
/// by exact display name.
#[derive(Debug, Clone, Default)]
pub struct CategoryOverrides {
    pub coalition: Vec<String>,
    pub minority: Vec<String>,
}

impl CategoryOverrides {
    fn resolve(&self, display_name: &str, legal_form: Category) -> Category {
        if self.minority.iter().any(|name| name == display_name) {
            Category::Minority
        } else if self.coalition.iter().any(|name| name == display_name) {
            Category::Coalition
        } else {
            legal_form
        }
    }

    /// Override names that match no committee in `votes`.
    pub fn unmatched<'a>(&'a self, votes: &VoteTable) -> Vec<&'a str> {
        self.coalition
            .iter()
            .chain(self.minority.iter())
            .map(String::as_str)
            .filter(|name| votes.category(name).is_none())
            .collect()
    }
}

pub fn read_election(dir: &Path, overrides: &CategoryOverrides) -> LoadResult<Election> {
    let seats_path = dir.join(SEATS_FILE);
    let votes_path = dir.join(VOTES_FILE);

    let seats = read_seats_from_reader(open(&seats_path)?, &seats_path.display().to_string())?;
    let votes = read_votes_from_reader(
        open(&votes_path)?,
        &votes_path.display().to_string(),
        overrides,
    )?;

    Ok(Election { votes, seats })
}

fn open(path: &Path) -> LoadResult<File> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Display name and legal-form category for a `votes.csv` header, or
/// `None` if the column does not hold a committee's votes.
pub fn committee_column(header: &str) -> Option<(String, Category)> {
    if let Some(rest) = header.strip_prefix(COALITION_PREFIX) {
        Some((title_case(rest.trim()), Category::Coalition))
    } else if let Some(rest) = header.strip_prefix(COMMITTEE_PREFIX) {
        Some((title_case(rest.trim()), Category::Standard))
    } else if header.starts_with("KOMITET") {
        Some((title_case(header.trim()), Category::Standard))
    } else {
        None
    }
}

/// Capitalise the first letter of every run of letters and lower-case the
/// rest.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }
    result
}

fn csv_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(rdr)
}

fn headers<R: Read>(reader: &mut csv::Reader<R>, path: &str) -> LoadResult<Vec<String>> {
    let headers = reader.headers().map_err(|source| LoadError::Csv {
        path: path.to_string(),
        source,
    })?;
    Ok(headers
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect())
}

fn column(headers: &[String], name: &str, path: &str) -> LoadResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LoadError::MissingColumn {
            path: path.to_string(),
            column: name.to_string(),
        })
}

fn parse_number(value: &str, path: &str, row: usize, column: &str) -> LoadResult<i64> {
    value.trim().parse().map_err(|_| LoadError::InvalidNumber {
        path: path.to_string(),
        row,
        column: column.to_string(),
        value: value.to_string(),
    })
}

fn constituency_id(raw: i64, path: &str) -> LoadResult<ConstituencyId> {
    match u32::try_from(raw) {
        Ok(id) if id > 0 => Ok(ConstituencyId(id)),
        _ => Err(LoadError::InvalidConstituencyId {
            path: path.to_string(),
            id: raw,
        }),
    }
}

fn read_seats_from_reader<R: Read>(rdr: R, path: &str) -> LoadResult<SeatTable> {
    let mut reader = csv_reader(rdr);
    let headers = headers(&mut reader, path)?;
    let id_column = column(&headers, SEATS_CONSTITUENCY_COLUMN, path)?;
    let seats_column = column(&headers, SEATS_COLUMN, path)?;

    let mut seats = SeatTable::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 2;
        let record = record.map_err(|source| LoadError::Csv {
            path: path.to_string(),
            source,
        })?;

        let raw_id = record.get(id_column).unwrap_or("");
        let id = constituency_id(parse_number(raw_id, path, row, SEATS_CONSTITUENCY_COLUMN)?, path)?;
        let raw_seats = record.get(seats_column).unwrap_or("");
        let count = parse_number(raw_seats, path, row, SEATS_COLUMN)?;

        match u32::try_from(count) {
            Ok(count) if count > 0 => seats.insert(id, count),
            _ => {
                return Err(ApportionmentError::NegativeOrMissingSeats {
                    constituency: id,
                    seats: count,
                }
                .into())
            }
        }
    }

    debug!(constituencies = seats.len(), path, "seat counts read");
    Ok(seats)
}

fn read_votes_from_reader<R: Read>(
    rdr: R,
    path: &str,
    overrides: &CategoryOverrides,
) -> LoadResult<VoteTable> {
    let mut reader = csv_reader(rdr);
    let headers = headers(&mut reader, path)?;
    let id_column = column(&headers, VOTES_CONSTITUENCY_COLUMN, path)?;

    let mut votes = VoteTable::new();
    let mut committees = Vec::new();
    for (index, header) in headers.iter().enumerate() {
        if let Some((name, legal_form)) = committee_column(header) {
            let category = overrides.resolve(&name, legal_form);
            votes.register_committee(&name, category)?;
            committees.push((index, header.as_str(), name));
        }
    }
    if committees.is_empty() {
        warn!(path, "no committee columns found");
    }
    for name in overrides.unmatched(&votes) {
        warn!(committee = name, path, "category override matches no committee");
    }

    for (index, record) in reader.records().enumerate() {
        let row = index + 2;
        let record = record.map_err(|source| LoadError::Csv {
            path: path.to_string(),
            source,
        })?;

        let raw_id = record.get(id_column).unwrap_or("");
        let id = constituency_id(parse_number(raw_id, path, row, VOTES_CONSTITUENCY_COLUMN)?, path)?;
        votes.ensure_constituency(id);

        for (column_index, header, name) in &committees {
            let raw = record.get(*column_index).unwrap_or("").trim();
            let count = if raw.is_empty() {
                0
            } else {
                parse_number(raw, path, row, header)?
            };
            if count < 0 {
                return Err(ApportionmentError::MalformedVoteCount {
                    constituency: id,
                    committee: name.clone(),
                    votes: count,
                }
                .into());
            }

            // Repeated rows and columns for one committee accumulate.
            let existing = votes
                .constituency(id)
                .and_then(|counts| counts.get(name))
                .copied()
                .unwrap_or(0);
            votes.record_votes(id, name, existing + count as u64)?;
        }
    }

    debug!(
        constituencies = votes.len(),
        committees = committees.len(),
        path,
        "vote counts read"
    );
    Ok(votes)
}
