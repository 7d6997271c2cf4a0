//! Differential tests: the indexed query path must return exactly the same
//! result set as the linear scan for every predicate kind and booking
//! population.

use hourgrid::prelude::*;

/// Deterministic xorshift64 so failures reproduce without a rand dependency.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }
}

fn random_population(seed: u64, entities: usize, horizon: usize) -> Result<AvailabilityIndex> {
    let mut rng = XorShift(seed);
    let mut index = AvailabilityIndex::with_bit_index();
    for i in 0..entities {
        let name = format!("entity-{i}");
        index.register(name.as_str(), horizon)?;
        for _ in 0..rng.below(6) {
            let start = rng.below(horizon);
            let end = start + 1 + rng.below(horizon - start);
            index.book(&name, start, end)?;
        }
        // Occasionally punch a hole back out
        if rng.next() % 3 == 0 {
            let start = rng.below(horizon);
            let end = start + 1 + rng.below(horizon - start);
            index.unbook(&name, start, end)?;
        }
    }
    Ok(index)
}

fn sorted(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut names: Vec<String> = names.collect();
    names.sort_unstable();
    names
}

#[test]
fn test_indexed_query_equals_scan_for_random_populations() -> Result<()> {
    for seed in [1u64, 42, 0xDEADBEEF, 987654321] {
        let horizon = 240;
        let index = random_population(seed, 50, horizon)?;
        let mut rng = XorShift(seed.wrapping_mul(0x9E3779B97F4A7C15));

        for _ in 0..40 {
            let count = 1 + rng.below(8);
            let positions: Vec<usize> = (0..count).map(|_| rng.below(horizon)).collect();
            for kind in [
                PredicateKind::AllSet,
                PredicateKind::AllClear,
                PredicateKind::AnySet,
                PredicateKind::AnyClear,
            ] {
                let pred = Predicate::new(kind, positions.iter().copied())?;
                let indexed = sorted(index.query(&pred).map(str::to_string));
                let scanned = sorted(index.scan_query(&pred).map(str::to_string));
                assert_eq!(
                    indexed, scanned,
                    "seed {seed}, kind {kind:?}, positions {positions:?}"
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_unbook_and_deregister_keep_postings_consistent() -> Result<()> {
    let mut index = random_population(7, 30, 120)?;
    index.deregister("entity-3")?;
    index.deregister("entity-17")?;
    index.unbook("entity-0", 0, 120)?;

    for kind in [PredicateKind::AnySet, PredicateKind::AllSet] {
        let pred = Predicate::new(kind, [0, 10, 60, 119])?;
        let indexed = sorted(index.query(&pred).map(str::to_string));
        let scanned = sorted(index.scan_query(&pred).map(str::to_string));
        assert_eq!(indexed, scanned);
    }
    Ok(())
}

#[cfg(feature = "parallel")]
#[test]
fn test_par_query_equals_scan() -> Result<()> {
    let index = random_population(99, 200, 480)?;
    let pred = Predicate::any_set([5, 100, 250, 400])?;
    let parallel = sorted(index.par_query(&pred).into_iter().map(str::to_string));
    let scanned = sorted(index.scan_query(&pred).map(str::to_string));
    assert_eq!(parallel, scanned);
    Ok(())
}
