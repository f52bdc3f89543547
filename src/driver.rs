use crate::aggregate::aggregate;
use crate::apportionment::ApportionmentMethod;
use crate::error::{ApportionmentError, Result, TableKind};
use crate::model::election::{NationalSeats, SeatAllocation, SeatTable, VoteTable};
use crate::threshold::{ThresholdAssessment, ThresholdFilter, Thresholds};
use instant::Instant;
use std::sync::Arc;
use tracing::{debug, info};

/// An apportionment method together with the label its results are
/// reported under.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMethod {
    pub name: String,
    pub method: ApportionmentMethod,
}

impl NamedMethod {
    pub fn new(name: &str, method: ApportionmentMethod) -> Self {
        Self {
            name: name.to_string(),
            method,
        }
    }

    pub fn standard_set() -> Vec<NamedMethod> {
        ApportionmentMethod::standard_set()
            .into_iter()
            .map(NamedMethod::from)
            .collect()
    }
}

impl From<ApportionmentMethod> for NamedMethod {
    fn from(method: ApportionmentMethod) -> Self {
        NamedMethod::new(method.display_name(), method)
    }
}

/// Result of one method over the whole election.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodOutcome {
    pub name: String,
    pub method: ApportionmentMethod,
    pub allocation: SeatAllocation,
    pub national: NationalSeats,
}

/// Votes after the national threshold has been applied, shared read-only by
/// every method.
#[derive(Debug, Clone)]
pub struct FilteredElection {
    pub votes: VoteTable,
    pub seats: SeatTable,
    pub assessments: Vec<ThresholdAssessment>,
}

pub struct Driver {
    filter: ThresholdFilter,
    methods: Vec<NamedMethod>,
}

impl Driver {
    pub fn new(thresholds: Thresholds, methods: Vec<NamedMethod>) -> Result<Self> {
        Ok(Self {
            filter: ThresholdFilter::new(thresholds)?,
            methods,
        })
    }

    pub fn methods(&self) -> &[NamedMethod] {
        &self.methods
    }

    pub fn thresholds(&self) -> &Thresholds {
        self.filter.thresholds()
    }

    /// Check that both tables describe the same constituencies and that
    /// every constituency has seats to fill.
    pub fn validate(votes: &VoteTable, seats: &SeatTable) -> Result<()> {
        for constituency in votes.constituency_ids() {
            if seats.get(constituency).is_none() {
                return Err(ApportionmentError::MissingConstituency {
                    constituency,
                    missing_from: TableKind::Seats,
                });
            }
        }

        for (constituency, count) in seats.iter() {
            if votes.constituency(constituency).is_none() {
                return Err(ApportionmentError::MissingConstituency {
                    constituency,
                    missing_from: TableKind::Votes,
                });
            }
            if count == 0 {
                return Err(ApportionmentError::NegativeOrMissingSeats {
                    constituency,
                    seats: 0,
                });
            }
        }

        Ok(())
    }

    /// Validate the input and apply the national threshold once.
    pub fn prepare(&self, votes: &VoteTable, seats: &SeatTable) -> Result<FilteredElection> {
        Self::validate(votes, seats)?;

        let assessments = self.filter.assess(votes)?;
        let filtered = self.filter.apply(votes, &assessments);

        for (constituency, remaining) in filtered.constituencies() {
            if remaining.values().all(|count| *count == 0) {
                return Err(ApportionmentError::ZeroConstituencyVotes { constituency });
            }
        }

        info!(
            constituencies = filtered.len(),
            committees = filtered.committees().count(),
            "election prepared"
        );

        Ok(FilteredElection {
            votes: filtered,
            seats: seats.clone(),
            assessments,
        })
    }

    /// Run every configured method in order.
    pub fn run(&self, votes: &VoteTable, seats: &SeatTable) -> Result<Vec<MethodOutcome>> {
        let election = self.prepare(votes, seats)?;
        self.methods
            .iter()
            .map(|named| apportion(&election, named))
            .collect()
    }

    /// Run every configured method on its own blocking task. Results come
    /// back in configured order; the first failure fails the whole run.
    pub async fn run_concurrent(
        &self,
        votes: &VoteTable,
        seats: &SeatTable,
    ) -> Result<Vec<MethodOutcome>> {
        let election = Arc::new(self.prepare(votes, seats)?);
        self.apportion_concurrent(election).await
    }

    /// Concurrent run over an election that has already been prepared.
    pub async fn apportion_concurrent(
        &self,
        election: Arc<FilteredElection>,
    ) -> Result<Vec<MethodOutcome>> {
        let handles: Vec<_> = self
            .methods
            .iter()
            .cloned()
            .map(|named| {
                let election = Arc::clone(&election);
                tokio::task::spawn_blocking(move || apportion(&election, &named))
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            let outcome = handle
                .await
                .map_err(|e| ApportionmentError::TaskFailed(e.to_string()))??;
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}

/// Apply one method to every constituency and total the seats nationally.
pub fn apportion(election: &FilteredElection, named: &NamedMethod) -> Result<MethodOutcome> {
    let started = Instant::now();

    let mut allocation = SeatAllocation::new();
    for (constituency, votes) in election.votes.constituencies() {
        let seats = election
            .seats
            .get(constituency)
            .ok_or(ApportionmentError::MissingConstituency {
                constituency,
                missing_from: TableKind::Seats,
            })?;
        allocation.insert(constituency, named.method.allocate(constituency, votes, seats)?);
    }
    let national = aggregate(&allocation);

    debug!(
        method = %named.name,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "method applied"
    );

    Ok(MethodOutcome {
        name: named.name.clone(),
        method: named.method,
        allocation,
        national,
    })
}
