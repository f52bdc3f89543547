use crate::model::election::{Category, ConstituencyId};
use std::fmt;

/// Which of the three national thresholds a value was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdKind {
    Base,
    Coalition,
    Minority,
}

impl fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdKind::Base => write!(f, "base"),
            ThresholdKind::Coalition => write!(f, "coalition"),
            ThresholdKind::Minority => write!(f, "minority"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Votes,
    Seats,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Votes => write!(f, "votes"),
            TableKind::Seats => write!(f, "seats"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApportionmentError {
    #[error("{which} threshold {value} is outside [0, 1]")]
    InvalidThreshold { which: ThresholdKind, value: f64 },
    #[error("no votes were cast nationally, thresholds cannot be applied")]
    ZeroNationalVotes,
    #[error("constituency {constituency} is missing from the {missing_from} table")]
    MissingConstituency {
        constituency: ConstituencyId,
        missing_from: TableKind,
    },
    #[error("constituency {constituency} has {seats} seats, expected a positive count")]
    NegativeOrMissingSeats {
        constituency: ConstituencyId,
        seats: i64,
    },
    #[error("constituency {constituency}: {automatic} automatic seats exceed the {seats} available")]
    QuotaOverflow {
        constituency: ConstituencyId,
        automatic: u64,
        seats: u32,
    },
    #[error("constituency {constituency}: {remaining} remainder seats left but only {eligible} committees received votes")]
    QuotaShortfall {
        constituency: ConstituencyId,
        remaining: u64,
        eligible: usize,
    },
    #[error("constituency {constituency}: committee '{committee}' has malformed vote count {votes}")]
    MalformedVoteCount {
        constituency: ConstituencyId,
        committee: String,
        votes: i64,
    },
    #[error("constituency {constituency} has no votes left to apportion")]
    ZeroConstituencyVotes { constituency: ConstituencyId },
    #[error("committee '{committee}' is registered as {existing}, cannot re-register as {requested}")]
    InconsistentCategory {
        committee: String,
        existing: Category,
        requested: Category,
    },
    #[error("committee '{committee}' has not been registered")]
    UnknownCommittee { committee: String },
    #[error("apportionment task failed: {0}")]
    TaskFailed(String),
}

pub type Result<T> = std::result::Result<T, ApportionmentError>;
