use crate::error::{ApportionmentError, Result, ThresholdKind};
use crate::model::election::{Category, VoteTable};
use serde::Serialize;
use tracing::{debug, info};

/// Thresholds are compared exactly, as whole parts per million.
const PARTS_PER_MILLION: u64 = 1_000_000;

/// National eligibility thresholds, as fractions of all votes cast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub base: f64,
    pub coalition: f64,
    pub minority: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            base: 0.05,
            coalition: 0.08,
            minority: 0.0,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (ThresholdKind::Base, self.base),
            (ThresholdKind::Coalition, self.coalition),
            (ThresholdKind::Minority, self.minority),
        ];
        for (which, value) in checks.iter() {
            // NaN fails the range check as well.
            if !(0.0..=1.0).contains(value) {
                return Err(ApportionmentError::InvalidThreshold {
                    which: *which,
                    value: *value,
                });
            }
        }
        Ok(())
    }

    pub fn for_category(&self, category: Category) -> f64 {
        match category {
            Category::Coalition => self.coalition,
            Category::Minority => self.minority,
            Category::Standard => self.base,
        }
    }

    /// The category's threshold rounded to the nearest part per million.
    /// Only meaningful once `validate` has passed.
    pub fn parts_per_million(&self, category: Category) -> u64 {
        (self.for_category(category) * PARTS_PER_MILLION as f64).round() as u64
    }
}

/// `national / total > ppm / 1_000_000`, without rounding.
fn exceeds(national_votes: u64, total_votes: u64, ppm: u64) -> bool {
    u128::from(national_votes) * u128::from(PARTS_PER_MILLION)
        > u128::from(ppm) * u128::from(total_votes)
}

/// How one committee fared against its national threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdAssessment {
    pub committee: String,
    pub category: Category,
    pub national_votes: u64,
    pub share: f64,
    pub threshold: f64,
    pub retained: bool,
}

pub struct ThresholdFilter {
    thresholds: Thresholds,
}

impl ThresholdFilter {
    pub fn new(thresholds: Thresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Judge every registered committee by its nationwide vote total.
    /// A committee is retained only if its total strictly exceeds its
    /// threshold times all votes cast.
    pub fn assess(&self, votes: &VoteTable) -> Result<Vec<ThresholdAssessment>> {
        let totals = votes.national_totals();
        let total_votes = votes.total_votes();
        if total_votes == 0 {
            return Err(ApportionmentError::ZeroNationalVotes);
        }

        let assessments = votes
            .committees()
            .map(|(committee, category)| {
                let national_votes = totals.get(committee).copied().unwrap_or(0);
                let threshold = self.thresholds.for_category(category);
                let ppm = self.thresholds.parts_per_million(category);
                ThresholdAssessment {
                    committee: committee.to_string(),
                    category,
                    national_votes,
                    share: national_votes as f64 / total_votes as f64,
                    threshold,
                    retained: exceeds(national_votes, total_votes, ppm),
                }
            })
            .collect();

        Ok(assessments)
    }

    /// Drop every committee that fails its threshold from every
    /// constituency. Retained committees keep their per-constituency counts.
    pub fn filter(&self, votes: &VoteTable) -> Result<VoteTable> {
        let assessments = self.assess(votes)?;
        Ok(self.apply(votes, &assessments))
    }

    /// Filter with assessments already computed by `assess` on the same
    /// table.
    pub fn apply(&self, votes: &VoteTable, assessments: &[ThresholdAssessment]) -> VoteTable {
        for assessment in assessments.iter().filter(|a| !a.retained) {
            info!(
                committee = %assessment.committee,
                category = %assessment.category,
                share = assessment.share,
                threshold = assessment.threshold,
                "committee below national threshold"
            );
        }

        let filtered = votes.retain_committees(|committee| {
            assessments
                .iter()
                .any(|a| a.retained && a.committee == committee)
        });
        debug!(
            retained = filtered.committees().count(),
            assessed = assessments.len(),
            "threshold filter applied"
        );

        filtered
    }
}
