//! Highest-averages apportionment.

use crate::error::{ApportionmentError, Result};
use crate::model::election::{ConstituencyId, ConstituencySeats, ConstituencyVotes};
use std::cmp::Ordering;

/// Quotient formula of a divisor method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuotientFormula {
    /// `votes / (seats + 1)`
    DHondt,
    /// `votes / (2 * seats + 1)`
    SainteLague,
}

impl QuotientFormula {
    pub fn quotient(&self, votes: u64, seats: u32) -> f64 {
        votes as f64 / self.divisor(seats) as f64
    }

    /// Denominator of the quotient after `seats` seats have been won.
    pub fn divisor(&self, seats: u32) -> u64 {
        let seats = u64::from(seats);
        match self {
            QuotientFormula::DHondt => seats + 1,
            QuotientFormula::SainteLague => 2 * seats + 1,
        }
    }
}

/// A quotient held as an exact fraction so that comparisons, and ties in
/// particular, are not subject to floating point rounding.
#[derive(Debug, Clone, Copy)]
struct Quotient {
    votes: u64,
    divisor: u64,
}

impl Quotient {
    fn cmp_exact(&self, other: &Quotient) -> Ordering {
        let lhs = u128::from(self.votes) * u128::from(other.divisor);
        let rhs = u128::from(other.votes) * u128::from(self.divisor);
        lhs.cmp(&rhs)
    }
}

/// Award `seats` seats one at a time to the committee with the highest
/// quotient. Committees without votes never win a seat. Equal quotients go
/// to the committee whose name sorts first.
pub fn allocate(
    constituency: ConstituencyId,
    votes: &ConstituencyVotes,
    seats: u32,
    formula: QuotientFormula,
) -> Result<ConstituencySeats> {
    let mut won: ConstituencySeats = votes.keys().map(|name| (name.clone(), 0)).collect();

    for _ in 0..seats {
        let mut best: Option<(&String, Quotient)> = None;

        // BTreeMap order is ascending by name, so only a strictly larger
        // quotient may displace the current leader.
        for (committee, &count) in votes.iter().filter(|&(_, &count)| count > 0) {
            let quotient = Quotient {
                votes: count,
                divisor: formula.divisor(won[committee]),
            };
            let replace = match &best {
                None => true,
                Some((leader, leading)) => match quotient.cmp_exact(leading) {
                    Ordering::Greater => true,
                    Ordering::Equal => committee < *leader,
                    Ordering::Less => false,
                },
            };
            if replace {
                best = Some((committee, quotient));
            }
        }

        let winner = match best {
            Some((committee, _)) => committee,
            None => return Err(ApportionmentError::ZeroConstituencyVotes { constituency }),
        };
        if let Some(count) = won.get_mut(winner) {
            *count += 1;
        }
    }

    Ok(won)
}
