use crate::driver::MethodOutcome;
use crate::model::election::{ConstituencyId, ConstituencySeats, NationalSeats};
use crate::threshold::{ThresholdAssessment, Thresholds};
use serde::Serialize;
use std::collections::BTreeMap;

pub mod text;

/// Full apportionment report, as printed with `--format json`.
#[derive(Debug, Serialize)]
pub struct ElectionReport {
    pub thresholds: Thresholds,
    #[serde(rename = "totalSeats")]
    pub total_seats: u64,
    pub committees: Vec<ThresholdAssessment>,
    pub methods: Vec<MethodReport>,
}

/// Seats won under one method.
#[derive(Debug, Serialize)]
pub struct MethodReport {
    pub method: String,
    pub seats: NationalSeats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constituencies: Option<BTreeMap<ConstituencyId, ConstituencySeats>>,
}

impl MethodReport {
    pub fn from_outcome(outcome: &MethodOutcome, per_constituency: bool) -> Self {
        Self {
            method: outcome.name.clone(),
            seats: outcome.national.clone(),
            constituencies: if per_constituency {
                Some(outcome.allocation.clone())
            } else {
                None
            },
        }
    }
}

impl ElectionReport {
    pub fn new(
        thresholds: Thresholds,
        total_seats: u64,
        committees: Vec<ThresholdAssessment>,
        outcomes: &[MethodOutcome],
        per_constituency: bool,
    ) -> Self {
        Self {
            thresholds,
            total_seats,
            committees,
            methods: outcomes
                .iter()
                .map(|outcome| MethodReport::from_outcome(outcome, per_constituency))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apportionment::ApportionmentMethod;
    use crate::model::election::SeatAllocation;

    fn outcome() -> MethodOutcome {
        let mut allocation = SeatAllocation::new();
        allocation.insert(
            ConstituencyId(7),
            vec![("A".to_string(), 2), ("B".to_string(), 1)].into_iter().collect(),
        );
        MethodOutcome {
            name: "D'Hondt".to_string(),
            method: ApportionmentMethod::D_HONDT,
            national: allocation[&ConstituencyId(7)].clone(),
            allocation,
        }
    }

    #[test]
    fn per_constituency_detail_is_optional() {
        let outcomes = vec![outcome()];

        let brief = ElectionReport::new(Thresholds::default(), 3, Vec::new(), &outcomes, false);
        let json = serde_json::to_value(&brief).unwrap();
        assert_eq!(json["methods"][0]["method"], "D'Hondt");
        assert_eq!(json["methods"][0]["seats"]["A"], 2);
        assert!(json["methods"][0].get("constituencies").is_none());

        let detailed = ElectionReport::new(Thresholds::default(), 3, Vec::new(), &outcomes, true);
        let json = serde_json::to_value(&detailed).unwrap();
        assert_eq!(json["methods"][0]["constituencies"]["7"]["B"], 1);
        assert_eq!(json["totalSeats"], 3);
    }
}
