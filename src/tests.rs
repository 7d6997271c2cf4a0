// Copyright 2025 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Unit tests for bitsets, predicates and the availability index

#[cfg(test)]
mod tests {
    #![allow(clippy::module_inception)]
    use crate::{AvailabilityIndex, BitSet, GridError, Predicate, PredicateKind, Result};

    #[test]
    fn test_bitset_rejects_zero_length() {
        assert_eq!(BitSet::new(0).unwrap_err(), GridError::InvalidLength);
    }

    #[test]
    fn test_bitset_set_get_clear() -> Result<()> {
        let mut bits = BitSet::new(128)?;
        assert!(!bits.get(70)?);
        bits.set(70)?;
        assert!(bits.get(70)?);
        bits.clear(70)?;
        assert!(!bits.get(70)?);
        Ok(())
    }

    #[test]
    fn test_bitset_get_out_of_range() -> Result<()> {
        let bits = BitSet::new(24)?;
        assert!(matches!(
            bits.get(24),
            Err(GridError::OutOfRange { len: 24, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_set_range_crosses_word_boundaries() -> Result<()> {
        let mut bits = BitSet::new(200)?;
        let flipped = bits.set_range(60, 140)?;
        assert_eq!(flipped, 80);
        assert_eq!(bits.count_ones(), 80);
        assert!(!bits.get(59)?);
        assert!(bits.get(60)?);
        assert!(bits.get(139)?);
        assert!(!bits.get(140)?);
        Ok(())
    }

    #[test]
    fn test_clear_range_restores_zero_state() -> Result<()> {
        let mut bits = BitSet::new(8760)?;
        bits.set_range(100, 3000)?;
        let flipped = bits.clear_range(100, 3000)?;
        assert_eq!(flipped, 2900);
        assert_eq!(bits.count_ones(), 0);
        assert_eq!(bits, BitSet::new(8760)?);
        Ok(())
    }

    #[test]
    fn test_set_range_counts_only_newly_set_bits() -> Result<()> {
        let mut bits = BitSet::new(64)?;
        bits.set_range(0, 10)?;
        let flipped = bits.set_range(5, 15)?;
        assert_eq!(flipped, 5);
        Ok(())
    }

    #[test]
    fn test_empty_range_is_a_noop() -> Result<()> {
        let mut bits = BitSet::new(24)?;
        assert_eq!(bits.set_range(10, 10)?, 0);
        assert_eq!(bits.count_ones(), 0);
        Ok(())
    }

    #[test]
    fn test_invalid_range_leaves_bitset_unchanged() -> Result<()> {
        let mut bits = BitSet::new(24)?;
        bits.set_range(0, 8)?;
        let before = bits.clone();

        assert!(bits.set_range(10, 30).is_err());
        assert!(bits.set_range(12, 10).is_err());
        assert!(bits.clear_range(0, 25).is_err());
        assert_eq!(bits, before);
        Ok(())
    }

    #[test]
    fn test_extreme_positions_error_instead_of_overflowing() -> Result<()> {
        let mut bits = BitSet::new(24)?;
        assert!(matches!(
            bits.set(usize::MAX),
            Err(GridError::OutOfRange { len: 24, .. })
        ));
        assert!(matches!(
            bits.clear(usize::MAX),
            Err(GridError::OutOfRange { len: 24, .. })
        ));
        assert!(matches!(
            bits.get(usize::MAX),
            Err(GridError::OutOfRange { len: 24, .. })
        ));

        let pred = Predicate::any_set([usize::MAX])?;
        assert!(matches!(
            bits.evaluate(&pred),
            Err(GridError::OutOfRange { .. })
        ));
        // Clipped evaluation reads the position as clear instead
        assert!(!bits.matches(&pred));
        Ok(())
    }

    #[test]
    fn test_predicate_dedups_positions() -> Result<()> {
        let pred = Predicate::all_set([7, 3, 7, 3, 1])?;
        assert_eq!(pred.positions(), &[1, 3, 7]);
        assert_eq!(pred.kind(), PredicateKind::AllSet);
        Ok(())
    }

    #[test]
    fn test_empty_predicate_rejected() {
        assert_eq!(
            Predicate::any_set(std::iter::empty()).unwrap_err(),
            GridError::InvalidPredicate
        );
    }

    #[test]
    fn test_predicate_truth_table() -> Result<()> {
        let mut bits = BitSet::new(24)?;
        bits.set_range(0, 8)?;

        // bit 7 set, bit 8 clear
        assert!(bits.evaluate(&Predicate::all_set([0, 7])?)?);
        assert!(!bits.evaluate(&Predicate::all_set([7, 8])?)?);
        assert!(bits.evaluate(&Predicate::all_clear([8])?)?);
        assert!(!bits.evaluate(&Predicate::all_clear([7, 8])?)?);
        assert!(bits.evaluate(&Predicate::any_set([7, 8])?)?);
        assert!(!bits.evaluate(&Predicate::any_set([8, 9])?)?);
        assert!(bits.evaluate(&Predicate::any_clear([7, 8])?)?);
        assert!(!bits.evaluate(&Predicate::any_clear([0, 7])?)?);
        Ok(())
    }

    #[test]
    fn test_evaluate_matches_per_bit_conjunction() -> Result<()> {
        let mut bits = BitSet::new(64)?;
        bits.set_range(10, 40)?;
        let positions = [3usize, 11, 25, 39, 40, 63];

        let all_set = positions.iter().all(|&p| bits.get(p).unwrap());
        let all_clear = positions.iter().all(|&p| !bits.get(p).unwrap());
        let any_set = positions.iter().any(|&p| bits.get(p).unwrap());
        let any_clear = positions.iter().any(|&p| !bits.get(p).unwrap());

        assert_eq!(bits.evaluate(&Predicate::all_set(positions)?)?, all_set);
        assert_eq!(bits.evaluate(&Predicate::all_clear(positions)?)?, all_clear);
        assert_eq!(bits.evaluate(&Predicate::any_set(positions)?)?, any_set);
        assert_eq!(bits.evaluate(&Predicate::any_clear(positions)?)?, any_clear);
        Ok(())
    }

    #[test]
    fn test_evaluate_rejects_out_of_horizon_position() -> Result<()> {
        let bits = BitSet::new(24)?;
        let pred = Predicate::all_clear([23, 24])?;
        assert!(matches!(
            bits.evaluate(&pred),
            Err(GridError::OutOfRange { .. })
        ));
        // matches() clips instead: position 24 reads as clear
        assert!(bits.matches(&pred));
        Ok(())
    }

    #[test]
    fn test_ones_iterator() -> Result<()> {
        let mut bits = BitSet::new(200)?;
        bits.set(0)?;
        bits.set(63)?;
        bits.set(64)?;
        bits.set(199)?;
        let ones: Vec<usize> = bits.ones().collect();
        assert_eq!(ones, vec![0, 63, 64, 199]);
        Ok(())
    }

    #[test]
    fn test_runs() -> Result<()> {
        let mut bits = BitSet::new(24)?;
        bits.set_range(0, 8)?;
        bits.set_range(20, 24)?;
        assert_eq!(bits.runs(true), vec![(0, 8), (20, 24)]);
        assert_eq!(bits.runs(false), vec![(8, 20)]);
        Ok(())
    }

    #[test]
    fn test_register_duplicate() -> Result<()> {
        let mut index = AvailabilityIndex::new();
        index.register("Val", 24)?;
        assert_eq!(
            index.register("Val", 24).unwrap_err(),
            GridError::DuplicateEntity("Val".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_register_zero_horizon() {
        let mut index = AvailabilityIndex::new();
        assert_eq!(
            index.register("Val", 0).unwrap_err(),
            GridError::InvalidLength
        );
        assert!(!index.contains("Val"));
    }

    #[test]
    fn test_book_unbook_lifecycle() -> Result<()> {
        let mut index = AvailabilityIndex::new();
        index.register("Val", 24)?;

        assert_eq!(index.book("Val", 0, 8)?, 8);
        assert_eq!(index.book("Val", 4, 12)?, 4); // hours 4..8 already booked
        assert_eq!(index.booked_ranges("Val")?, vec![(0, 12)]);
        assert_eq!(index.unbook("Val", 0, 24)?, 12);
        assert_eq!(index.free_ranges("Val")?, vec![(0, 24)]);

        index.deregister("Val")?;
        assert_eq!(
            index.book("Val", 0, 1).unwrap_err(),
            GridError::NotFound("Val".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_book_propagates_out_of_range_without_mutation() -> Result<()> {
        let mut index = AvailabilityIndex::new();
        index.register("Val", 24)?;
        index.book("Val", 0, 8)?;

        assert!(matches!(
            index.book("Val", 20, 30),
            Err(GridError::OutOfRange { .. })
        ));
        assert_eq!(index.get("Val")?.count_ones(), 8);
        Ok(())
    }

    #[test]
    fn test_deregister_missing() {
        let mut index = AvailabilityIndex::new();
        assert_eq!(
            index.deregister("ghost").unwrap_err(),
            GridError::NotFound("ghost".to_string())
        );
    }

    #[test]
    fn test_clear_releases_all_hours() -> Result<()> {
        let mut index = AvailabilityIndex::with_bit_index();
        index.register("Val", 48)?;
        index.book("Val", 3, 17)?;
        assert_eq!(index.clear("Val")?, 14);
        assert_eq!(index.get("Val")?.count_ones(), 0);
        Ok(())
    }

    #[cfg(feature = "profiling")]
    #[test]
    fn test_profiling_init_installs_subscriber_once() -> Result<()> {
        let _ = crate::profiling::init();
        // Second install must report the existing global subscriber
        assert!(!crate::profiling::init());

        // Spans from the instrumented operations must not disturb results
        let mut index = AvailabilityIndex::with_bit_index();
        index.register("Val", 24)?;
        index.book("Val", 0, 8)?;
        let matched: Vec<&str> = index.query(&Predicate::any_set([0])?).collect();
        assert_eq!(matched, vec!["Val"]);
        Ok(())
    }
}
