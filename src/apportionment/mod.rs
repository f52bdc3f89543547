// Seat apportionment methods for a single constituency.

pub mod divisor;
pub mod quota;

pub use divisor::QuotientFormula;
pub use quota::{Quota, QuotaFormula};

use crate::error::Result;
use crate::model::election::{ConstituencyId, ConstituencySeats, ConstituencyVotes};

/// Apportionment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApportionmentMethod {
    /// Highest averages
    Divisor(QuotientFormula),
    /// Largest remainder
    Quota(QuotaFormula),
}

impl ApportionmentMethod {
    pub const D_HONDT: ApportionmentMethod = ApportionmentMethod::Divisor(QuotientFormula::DHondt);
    pub const SAINTE_LAGUE: ApportionmentMethod =
        ApportionmentMethod::Divisor(QuotientFormula::SainteLague);
    pub const HARE: ApportionmentMethod = ApportionmentMethod::Quota(QuotaFormula::Hare);
    pub const DROOP: ApportionmentMethod = ApportionmentMethod::Quota(QuotaFormula::Droop);
    pub const HAGENBACH_BISCHOFF: ApportionmentMethod =
        ApportionmentMethod::Quota(QuotaFormula::HagenbachBischoff);
    pub const IMPERIALI: ApportionmentMethod = ApportionmentMethod::Quota(QuotaFormula::Imperiali);

    /// Every supported method, in the order results are usually reported.
    pub fn standard_set() -> Vec<ApportionmentMethod> {
        vec![
            Self::D_HONDT,
            Self::SAINTE_LAGUE,
            Self::HARE,
            Self::DROOP,
            Self::HAGENBACH_BISCHOFF,
            Self::IMPERIALI,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ApportionmentMethod::Divisor(QuotientFormula::DHondt) => "D'Hondt",
            ApportionmentMethod::Divisor(QuotientFormula::SainteLague) => "Sainte-Laguë",
            ApportionmentMethod::Quota(QuotaFormula::Hare) => "Hare",
            ApportionmentMethod::Quota(QuotaFormula::Droop) => "Droop",
            ApportionmentMethod::Quota(QuotaFormula::HagenbachBischoff) => "Hagenbach-Bischoff",
            ApportionmentMethod::Quota(QuotaFormula::Imperiali) => "Imperiali",
        }
    }

    /// Distribute `seats` among the committees of one constituency.
    pub fn allocate(
        &self,
        constituency: ConstituencyId,
        votes: &ConstituencyVotes,
        seats: u32,
    ) -> Result<ConstituencySeats> {
        match self {
            ApportionmentMethod::Divisor(formula) => divisor::allocate(constituency, votes, seats, *formula),
            ApportionmentMethod::Quota(formula) => quota::allocate(constituency, votes, seats, *formula),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn votes() -> ConstituencyVotes {
        vec![("A", 100u64), ("B", 80), ("C", 20)]
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect()
    }

    #[test]
    fn standard_set_names() {
        let names: Vec<_> = ApportionmentMethod::standard_set()
            .iter()
            .map(|m| m.display_name())
            .collect();
        assert_eq!(
            names,
            vec!["D'Hondt", "Sainte-Laguë", "Hare", "Droop", "Hagenbach-Bischoff", "Imperiali"]
        );
    }

    #[test]
    fn every_method_conserves_seats() {
        let votes = votes();
        for method in ApportionmentMethod::standard_set() {
            // Imperiali overflows at 4 seats with this distribution, 5 fits exactly.
            let seats = if method == ApportionmentMethod::IMPERIALI { 5 } else { 4 };
            let result = method.allocate(ConstituencyId(1), &votes, seats).unwrap();
            assert_eq!(result.values().sum::<u32>(), seats, "{}", method.display_name());
        }
    }
}
