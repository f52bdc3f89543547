use crate::model::election::{NationalSeats, SeatAllocation};

/// Sum each committee's seats over all constituencies. A committee missing
/// from a constituency simply contributes nothing there.
pub fn aggregate(allocation: &SeatAllocation) -> NationalSeats {
    allocation
        .values()
        .flat_map(|seats| seats.iter())
        .fold(NationalSeats::new(), |mut national, (committee, seats)| {
            *national.entry(committee.clone()).or_insert(0) += seats;
            national
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::election::{ConstituencyId, ConstituencySeats};

    fn seats(entries: &[(&str, u32)]) -> ConstituencySeats {
        entries.iter().map(|(name, count)| (name.to_string(), *count)).collect()
    }

    #[test]
    fn sums_across_constituencies() {
        let mut allocation = SeatAllocation::new();
        allocation.insert(ConstituencyId(1), seats(&[("A", 3), ("B", 1)]));
        allocation.insert(ConstituencyId(2), seats(&[("A", 2), ("C", 4)]));
        allocation.insert(ConstituencyId(3), seats(&[("B", 0)]));

        let national = aggregate(&allocation);
        assert_eq!(national.get("A"), Some(&5));
        assert_eq!(national.get("B"), Some(&1));
        assert_eq!(national.get("C"), Some(&4));
        assert_eq!(national.values().sum::<u32>(), 10);
    }

    #[test]
    fn empty_allocation() {
        assert!(aggregate(&SeatAllocation::new()).is_empty());
    }
}
