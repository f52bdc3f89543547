// Plain-text rendering of national seat totals.

use crate::driver::MethodOutcome;
use itertools::Itertools;

/// Width of the committee column: the longest committee name over all
/// outcomes.
pub fn name_width(outcomes: &[MethodOutcome]) -> usize {
    outcomes
        .iter()
        .flat_map(|outcome| outcome.national.keys())
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0)
}

/// Method name centred in a line of dashes.
pub fn header(method: &str, name_width: usize) -> String {
    format!("{:-^width$}", method, width = name_width + 6)
}

pub fn seat_line(committee: &str, seats: u32, name_width: usize) -> String {
    format!("{:<width$} - {:>3}", committee, seats, width = name_width)
}

/// Committees ordered by seats won, most first, then by name.
pub fn ranked(outcome: &MethodOutcome) -> Vec<(&str, u32)> {
    outcome
        .national
        .iter()
        .map(|(name, seats)| (name.as_str(), *seats))
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apportionment::ApportionmentMethod;
    use crate::model::election::SeatAllocation;

    fn outcome(name: &str, seats: &[(&str, u32)]) -> MethodOutcome {
        MethodOutcome {
            name: name.to_string(),
            method: ApportionmentMethod::HARE,
            allocation: SeatAllocation::new(),
            national: seats.iter().map(|(n, s)| (n.to_string(), *s)).collect(),
        }
    }

    #[test]
    fn header_is_centred() {
        assert_eq!(header("Hare", 4), "---Hare---");
    }

    #[test]
    fn lines_are_padded() {
        assert_eq!(seat_line("Lewica", 26, 10), "Lewica     -  26");
    }

    #[test]
    fn ranks_by_seats_then_name() {
        let outcomes = vec![outcome("Hare", &[("Bb", 2), ("Aaaa", 2), ("C", 5)])];
        assert_eq!(name_width(&outcomes), 4);
        assert_eq!(ranked(&outcomes[0]), vec![("C", 5), ("Aaaa", 2), ("Bb", 2)]);
    }
}
