use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seat_apportionment::{ApportionmentMethod, Category, ConstituencyId, Driver, NamedMethod, SeatTable, Thresholds, VoteTable};

/// A Sejm-sized election: 41 constituencies, 460 seats, 8 committees.
fn synthetic_election() -> (VoteTable, SeatTable) {
    let committees = [
        ("Alfa", Category::Standard, 350_000u64),
        ("Beta", Category::Coalition, 300_000),
        ("Gamma", Category::Standard, 140_000),
        ("Delta", Category::Coalition, 130_000),
        ("Epsilon", Category::Standard, 70_000),
        ("Zeta", Category::Standard, 40_000),
        ("Eta", Category::Minority, 5_000),
        ("Theta", Category::Standard, 12_000),
    ];

    let mut votes = VoteTable::new();
    for (name, category, _) in committees.iter() {
        votes.register_committee(name, *category).unwrap();
    }

    let mut seats = SeatTable::new();
    let mut assigned = 0;
    for id in 1..=41u32 {
        let seat_count = if id == 41 { 460 - assigned } else { 5 + id % 10 };
        assigned += seat_count;
        seats.insert(ConstituencyId(id), seat_count);

        for (index, (name, _, base)) in committees.iter().enumerate() {
            let skew = u64::from((id * 7 + index as u32 * 13) % 17);
            votes
                .record_votes(ConstituencyId(id), name, base / 10 * (10 + skew) / 10)
                .unwrap();
        }
    }

    (votes, seats)
}

fn bench_methods(c: &mut Criterion) {
    let (votes, seats) = synthetic_election();
    let mut group = c.benchmark_group("apportion");

    for method in ApportionmentMethod::standard_set() {
        let driver = Driver::new(Thresholds::default(), vec![NamedMethod::from(method)]).unwrap();
        let election = driver.prepare(&votes, &seats).unwrap();
        let named = NamedMethod::from(method);
        group.bench_function(method.display_name(), |b| {
            b.iter(|| seat_apportionment::driver::apportion(black_box(&election), &named))
        });
    }

    group.finish();
}

fn bench_threshold(c: &mut Criterion) {
    let (votes, _) = synthetic_election();
    let filter = seat_apportionment::ThresholdFilter::new(Thresholds::default()).unwrap();
    c.bench_function("threshold filter", |b| b.iter(|| filter.filter(black_box(&votes))));
}

criterion_group!(benches, bench_methods, bench_threshold);
criterion_main!(benches);
