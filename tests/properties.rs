use seat_apportionment::aggregate::aggregate;
use seat_apportionment::apportionment::{ApportionmentMethod, QuotientFormula};
use seat_apportionment::driver::NamedMethod;
use seat_apportionment::model::election::ConstituencyVotes;
use seat_apportionment::{
    ApportionmentError, Category, ConstituencyId, Driver, SeatTable, ThresholdFilter, Thresholds,
    VoteTable,
};

fn constituency(entries: &[(&str, u64)]) -> ConstituencyVotes {
    entries.iter().map(|(name, count)| (name.to_string(), *count)).collect()
}

/// Four constituencies, five committees, one of them a coalition.
fn sample_election() -> (VoteTable, SeatTable) {
    let rows: Vec<(u32, u32, Vec<(&str, u64)>)> = vec![
        (1, 12, vec![("Alfa", 41_200), ("Beta", 30_950), ("Gamma", 12_400), ("Delta", 6_100), ("Sojusz", 9_800)]),
        (2, 8, vec![("Alfa", 22_000), ("Beta", 25_500), ("Gamma", 4_300), ("Delta", 2_000), ("Sojusz", 7_100)]),
        (3, 15, vec![("Alfa", 61_000), ("Beta", 40_100), ("Gamma", 9_900), ("Delta", 3_300), ("Sojusz", 9_000)]),
        (4, 5, vec![("Alfa", 9_100), ("Beta", 11_700), ("Gamma", 3_000), ("Sojusz", 2_900)]),
    ];

    let mut votes = VoteTable::new();
    for name in ["Alfa", "Beta", "Gamma", "Delta"].iter() {
        votes.register_committee(name, Category::Standard).unwrap();
    }
    votes.register_committee("Sojusz", Category::Coalition).unwrap();

    let mut seats = SeatTable::new();
    for (id, seat_count, entries) in rows {
        seats.insert(ConstituencyId(id), seat_count);
        for (name, count) in entries {
            votes.record_votes(ConstituencyId(id), name, count).unwrap();
        }
    }
    (votes, seats)
}

fn driver() -> Driver {
    Driver::new(Thresholds::default(), NamedMethod::standard_set()).unwrap()
}

#[test]
fn seats_are_conserved_in_every_constituency() {
    let (votes, seats) = sample_election();
    for outcome in driver().run(&votes, &seats).unwrap() {
        for (id, allocation) in &outcome.allocation {
            assert_eq!(
                allocation.values().sum::<u32>(),
                seats.get(*id).unwrap(),
                "{} in constituency {}",
                outcome.name,
                id
            );
        }
        assert_eq!(
            outcome.national.values().map(|s| u64::from(*s)).sum::<u64>(),
            seats.total_seats()
        );
    }
}

#[test]
fn national_totals_match_constituency_sums() {
    let (votes, seats) = sample_election();
    for outcome in driver().run(&votes, &seats).unwrap() {
        assert_eq!(aggregate(&outcome.allocation), outcome.national);
        for (committee, national) in &outcome.national {
            let summed: u32 = outcome
                .allocation
                .values()
                .map(|seats| seats.get(committee).copied().unwrap_or(0))
                .sum();
            assert_eq!(summed, *national);
        }
    }
}

#[test]
fn below_threshold_committee_wins_nothing() {
    let (votes, seats) = sample_election();
    // Delta has about 3.7% of the national vote.
    for outcome in driver().run(&votes, &seats).unwrap() {
        assert!(outcome.national.get("Delta").is_none(), "{}", outcome.name);
        assert!(outcome.national["Sojusz"] > 0, "{}", outcome.name);
    }
}

#[test]
fn coalition_threshold_applies_to_coalitions() {
    let (votes, seats) = sample_election();
    // Sojusz has about 9.3%, above 8% but not above 10%.
    let strict = Thresholds {
        coalition: 0.10,
        ..Thresholds::default()
    };
    let outcomes = Driver::new(strict, vec![NamedMethod::from(ApportionmentMethod::D_HONDT)])
        .unwrap()
        .run(&votes, &seats)
        .unwrap();
    assert!(outcomes[0].national.get("Sojusz").is_none());
}

#[test]
fn repeated_runs_are_identical() {
    let (votes, seats) = sample_election();
    let first = driver().run(&votes, &seats).unwrap();
    for _ in 0..5 {
        assert_eq!(driver().run(&votes, &seats).unwrap(), first);
    }
}

#[test]
fn divisor_methods_are_monotonic() {
    let base = constituency(&[("A", 4_000), ("B", 2_900), ("C", 1_700), ("D", 650)]);
    let methods = [
        ApportionmentMethod::Divisor(QuotientFormula::DHondt),
        ApportionmentMethod::Divisor(QuotientFormula::SainteLague),
    ];

    for method in methods.iter() {
        for seats in 1..=12 {
            for committee in ["A", "B", "C", "D"].iter() {
                let mut previous = 0;
                for extra in (0..3_000).step_by(50) {
                    let mut votes = base.clone();
                    *votes.get_mut(*committee).unwrap() += extra;
                    let won = method.allocate(ConstituencyId(1), &votes, seats).unwrap()[*committee];
                    assert!(
                        won >= previous,
                        "{} lost seats for {} at +{} votes with {} seats",
                        method.display_name(),
                        committee,
                        extra,
                        seats
                    );
                    previous = won;
                }
            }
        }
    }
}

#[test]
fn filtering_twice_changes_nothing() {
    let (votes, _) = sample_election();
    let filter = ThresholdFilter::new(Thresholds::default()).unwrap();
    let once = filter.filter(&votes).unwrap();
    assert_eq!(filter.filter(&once).unwrap(), once);
}

#[test]
fn dhondt_scenario() {
    let votes = constituency(&[("A", 100), ("B", 80), ("C", 20)]);
    let seats = ApportionmentMethod::D_HONDT.allocate(ConstituencyId(1), &votes, 4).unwrap();
    assert_eq!((seats["A"], seats["B"], seats["C"]), (2, 2, 0));
}

#[test]
fn hare_scenario() {
    let votes = constituency(&[("A", 100), ("B", 80), ("C", 20)]);
    let seats = ApportionmentMethod::HARE.allocate(ConstituencyId(1), &votes, 4).unwrap();
    assert_eq!((seats["A"], seats["B"], seats["C"]), (2, 2, 0));
}

#[test]
fn threshold_scenario() {
    let mut votes = VoteTable::new();
    for (name, count) in [("X", 600), ("Y", 50), ("Z", 350)].iter() {
        votes.register_committee(name, Category::Standard).unwrap();
        votes.record_votes(ConstituencyId(1), name, *count).unwrap();
    }
    let filtered = ThresholdFilter::new(Thresholds::default())
        .unwrap()
        .filter(&votes)
        .unwrap();
    let kept: Vec<&str> = filtered.committees().map(|(name, _)| name).collect();
    assert_eq!(kept, vec!["X", "Z"]);
}

#[test]
fn zero_vote_committee_scenario() {
    let votes = constituency(&[("A", 7), ("B", 3), ("Zero", 0)]);
    for seats in 1..=6 {
        for method in [ApportionmentMethod::D_HONDT, ApportionmentMethod::SAINTE_LAGUE].iter() {
            let result = method.allocate(ConstituencyId(1), &votes, seats).unwrap();
            assert_eq!(result["Zero"], 0);
        }
    }
}

#[test]
fn imperiali_overflow_fails_the_whole_run() {
    let mut votes = VoteTable::new();
    votes.register_committee("A", Category::Standard).unwrap();
    votes.register_committee("B", Category::Standard).unwrap();
    votes.record_votes(ConstituencyId(1), "A", 100).unwrap();
    votes.record_votes(ConstituencyId(1), "B", 80).unwrap();
    let seats: SeatTable = vec![(ConstituencyId(1), 1)].into_iter().collect();

    let err = driver().run(&votes, &seats).unwrap_err();
    assert!(matches!(
        err,
        ApportionmentError::QuotaOverflow {
            constituency: ConstituencyId(1),
            ..
        }
    ));
}
