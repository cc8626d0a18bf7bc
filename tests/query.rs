use rstest::rstest;
use sequin::{Error, Sequence};

#[test]
fn test_filter_keeps_matching_in_order() {
    let result = Sequence::from(vec![1, 2, 3, 4, 5])
        .filter(|&value| value % 2 == 1)
        .to_vec();
    assert_eq!(result, vec![1, 3, 5]);
}

#[test]
fn test_map_preserves_length_and_order() {
    let source = vec![3, 1, 2];
    let result = Sequence::from(source.clone())
        .map(|value| value * 10)
        .to_vec();
    assert_eq!(result, vec![30, 10, 20]);
    assert_eq!(result.len(), source.len());
}

#[test]
fn test_filter_then_map_composes() {
    let result = Sequence::from(1..=6)
        .filter(|&value| value > 3)
        .map(|value| value * value)
        .to_vec();
    assert_eq!(result, vec![16, 25, 36]);
}

#[test]
fn test_distinct_first_occurrence_order() {
    let result = Sequence::from(vec![3, 1, 2, 1]).distinct().to_vec();
    assert_eq!(result, vec![3, 1, 2]);
}

#[test]
fn test_distinct_is_idempotent() {
    let once = Sequence::from(vec![3, 1, 2, 1, 3]).distinct().to_vec();
    let twice = Sequence::from(vec![3, 1, 2, 1, 3])
        .distinct()
        .distinct()
        .to_vec();
    assert_eq!(once, twice);
}

#[test]
fn test_except_removes_members() {
    let result = Sequence::from(vec![3, 1, 2, 1]).except(vec![1]).to_vec();
    assert_eq!(result, vec![3, 2]);
}

#[test]
fn test_except_empty_other_is_identity() {
    let result = Sequence::from(vec![3, 1, 2, 1]).except(vec![]).to_vec();
    assert_eq!(result, vec![3, 1, 2, 1]);
}

#[test]
fn test_intersect_keeps_members_with_duplicates() {
    let result = Sequence::from(vec![3, 1, 2, 1])
        .intersect(vec![1, 2])
        .to_vec();
    assert_eq!(result, vec![1, 2, 1]);
}

#[test]
fn test_intersect_empty_other_produces_nothing() {
    let result = Sequence::from(vec![3, 1, 2, 1]).intersect(vec![]).to_vec();
    assert_eq!(result, Vec::<i32>::new());
}

// except and intersect against the same membership partition the source:
// every source element lands in exactly one of the two results
#[rstest]
#[case(vec![3, 1, 2, 1], vec![1])]
#[case(vec![3, 1, 2, 1], vec![1, 2])]
#[case(vec![5, 5, 5], vec![5])]
#[case(vec![1, 2, 3], vec![])]
fn test_set_operations_partition_the_source(#[case] source: Vec<i32>, #[case] other: Vec<i32>) {
    let excepted = Sequence::from(source.clone())
        .except(other.clone())
        .count();
    let intersected = Sequence::from(source.clone()).intersect(other).count();
    assert_eq!(excepted + intersected, source.len());
}

#[test]
fn test_concat_preserves_both_orders() {
    let result = Sequence::from(vec![1, 2])
        .concat(Sequence::from(vec![3, 4]))
        .to_vec();
    assert_eq!(result, vec![1, 2, 3, 4]);
}

#[test]
fn test_reversed() {
    let result = Sequence::from(vec![1, 2, 3]).reversed().to_vec();
    assert_eq!(result, vec![3, 2, 1]);
}

#[rstest]
#[case(vec![], 0)]
#[case(vec![7], 1)]
#[case(vec![3, 1, 2, 1], 4)]
fn test_count_equals_materialized_length(#[case] source: Vec<i32>, #[case] expected: usize) {
    assert_eq!(Sequence::from(source.clone()).count(), expected);
    assert_eq!(Sequence::from(source).to_vec().len(), expected);
}

#[test]
fn test_count_where_equals_filter_count() {
    let source = vec![3, 1, 2, 1];
    let counted = Sequence::from(source.clone()).count_where(|&value| value > 1);
    let filtered = Sequence::from(source).filter(|&value| value > 1).count();
    assert_eq!(counted, 2);
    assert_eq!(counted, filtered);
}

#[test]
fn test_first_and_last() {
    assert_eq!(Sequence::from(vec![3, 1, 2]).first(), Some(3));
    assert_eq!(Sequence::from(vec![3, 1, 2]).last(), Some(2));
    assert_eq!(
        Sequence::from(vec![3, 1, 2]).last(),
        Sequence::from(vec![3, 1, 2]).to_vec().last().copied()
    );
}

#[test]
fn test_first_where_and_last_where() {
    assert_eq!(
        Sequence::from(vec![3, 1, 2, 1]).first_where(|&value| value < 3),
        Some(1)
    );
    assert_eq!(
        Sequence::from(vec![3, 1, 2, 1]).last_where(|&value| value > 1),
        Some(2)
    );
    assert_eq!(
        Sequence::from(vec![3, 1, 2, 1]).first_where(|&value| value > 9),
        None
    );
}

#[test]
fn test_single() {
    assert_eq!(Sequence::from(vec![42]).single(), Ok(42));
    assert_eq!(Sequence::<i32>::empty().single(), Err(Error::NoElements));
    assert_eq!(
        Sequence::from(vec![1, 2]).single(),
        Err(Error::MultipleElements)
    );
    assert_eq!(
        Sequence::from(vec![3, 1, 2, 1]).single_where(|&value| value == 2),
        Ok(2)
    );
    assert_eq!(
        Sequence::from(vec![3, 1, 2, 1]).single_where(|&value| value == 1),
        Err(Error::MultipleElements)
    );
}

#[test]
fn test_for_each_in_order() {
    let mut seen = Vec::new();
    Sequence::from(vec![3, 1, 2]).for_each(|value| seen.push(value));
    assert_eq!(seen, vec![3, 1, 2]);
}

#[test]
fn test_for_each_rev_in_reverse_order() {
    let mut seen = Vec::new();
    Sequence::from(vec![3, 1, 2]).for_each_rev(|value| seen.push(value));
    assert_eq!(seen, vec![2, 1, 3]);
}

#[test]
fn test_to_map_later_keys_overwrite() {
    // key 1 is produced by both 1s; the final one wins
    let map = Sequence::from(vec![3, 1, 2, 1]).to_map(|&value| value % 2);
    assert_eq!(map.len(), 2);
    assert_eq!(map[&1], 1);
    assert_eq!(map[&0], 2);
}

#[test]
fn test_empty_source_edge_cases() {
    assert!(!Sequence::<i32>::empty().any(|_| true));
    assert!(Sequence::<i32>::empty().all(|_| true));
    assert_eq!(Sequence::<i32>::empty().first(), None);
    assert_eq!(Sequence::<i32>::empty().last(), None);
    assert_eq!(Sequence::<i32>::empty().count(), 0);
    assert_eq!(Sequence::<i32>::empty().to_vec(), Vec::<i32>::new());
    assert!(Sequence::<i32>::empty().to_map(|&value| value).is_empty());
    assert!(Sequence::<i32>::empty().is_empty());
}

#[test]
fn test_any_and_all() {
    assert!(Sequence::from(vec![1, 2, 3]).any(|&value| value == 2));
    assert!(!Sequence::from(vec![1, 2, 3]).any(|&value| value == 9));
    assert!(Sequence::from(vec![2, 4, 6]).all(|&value| value % 2 == 0));
    assert!(!Sequence::from(vec![2, 3, 6]).all(|&value| value % 2 == 0));
}

#[test]
fn test_pipeline_over_borrowed_source() {
    let words = vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()];
    let lengths = Sequence::from(words.iter())
        .filter(|word| word.starts_with(|c| c == 'a' || c == 'g'))
        .map(|word| word.len())
        .to_vec();
    assert_eq!(lengths, vec![5, 5]);
    assert_eq!(words.len(), 3);
}

#[test]
fn test_sequence_is_iterable() {
    let mut collected = Vec::new();
    for value in Sequence::from(vec![1, 2, 3]).map(|value| value + 1) {
        collected.push(value);
    }
    assert_eq!(collected, vec![2, 3, 4]);
}
