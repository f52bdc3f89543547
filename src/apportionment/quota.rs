//! Largest-remainder apportionment.

use crate::error::{ApportionmentError, Result};
use crate::model::election::{ConstituencyId, ConstituencySeats, ConstituencyVotes};
use itertools::Itertools;
use std::convert::TryFrom;

/// Quota formula of a largest-remainder method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuotaFormula {
    /// `total / seats`
    Hare,
    /// `floor(total / (seats + 1)) + 1`
    Droop,
    /// `total / (seats + 1)`
    HagenbachBischoff,
    /// `total / (seats + 2)`
    Imperiali,
}

/// A quota as the fraction `numerator / denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub numerator: u128,
    pub denominator: u128,
}

impl Quota {
    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Whole quotas contained in `votes`, and the leftover as a numerator
    /// over the quota's own numerator.
    fn divide(&self, votes: u64) -> (u128, u128) {
        let scaled = u128::from(votes) * self.denominator;
        (scaled / self.numerator, scaled % self.numerator)
    }
}

impl QuotaFormula {
    pub fn quota(&self, total_votes: u64, seats: u32) -> f64 {
        self.exact(total_votes, seats).value()
    }

    pub fn exact(&self, total_votes: u64, seats: u32) -> Quota {
        let total = u128::from(total_votes);
        let seats = u128::from(seats);
        let (numerator, denominator) = match self {
            QuotaFormula::Hare => (total, seats),
            QuotaFormula::Droop => (total / (seats + 1) + 1, 1),
            QuotaFormula::HagenbachBischoff => (total, seats + 1),
            QuotaFormula::Imperiali => (total, seats + 2),
        };
        Quota {
            numerator,
            denominator,
        }
    }
}

/// Award automatic seats by whole quotas, then the leftover seats to the
/// committees with the largest remainders. Equal remainders go to the
/// committee whose name sorts first; committees without votes are never
/// awarded a leftover seat.
pub fn allocate(
    constituency: ConstituencyId,
    votes: &ConstituencyVotes,
    seats: u32,
    formula: QuotaFormula,
) -> Result<ConstituencySeats> {
    let total: u64 = votes.values().sum();
    if total == 0 {
        return Err(ApportionmentError::ZeroConstituencyVotes { constituency });
    }

    let quota = formula.exact(total, seats);
    let divided: Vec<(&String, u64, u128, u128)> = votes
        .iter()
        .map(|(committee, &count)| {
            let (automatic, remainder) = quota.divide(count);
            (committee, count, automatic, remainder)
        })
        .collect();

    let automatic: u128 = divided.iter().map(|(_, _, automatic, _)| *automatic).sum();
    if automatic > u128::from(seats) {
        return Err(ApportionmentError::QuotaOverflow {
            constituency,
            automatic: u64::try_from(automatic).unwrap_or(u64::MAX),
            seats,
        });
    }
    let remaining = (u128::from(seats) - automatic) as usize;

    let ranked: Vec<&String> = divided
        .iter()
        .filter(|(_, count, _, _)| *count > 0)
        .sorted_by(|a, b| b.3.cmp(&a.3).then_with(|| a.0.cmp(b.0)))
        .map(|(committee, _, _, _)| *committee)
        .collect();
    if remaining > ranked.len() {
        return Err(ApportionmentError::QuotaShortfall {
            constituency,
            remaining: remaining as u64,
            eligible: ranked.len(),
        });
    }

    // Automatic seats are bounded by `seats` here, so they fit in u32.
    let mut won: ConstituencySeats = divided
        .iter()
        .map(|(committee, _, automatic, _)| ((*committee).clone(), *automatic as u32))
        .collect();
    for committee in ranked.into_iter().take(remaining) {
        if let Some(count) = won.get_mut(committee) {
            *count += 1;
        }
    }

    Ok(won)
}
