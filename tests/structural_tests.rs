//! Integration tests for the structural units.
//!
//! Covers `traverse`, `permutations`, `sort`, `reverse` and `groupby`.

use std::cell::Cell;

use pipette::prelude::*;
use pipette::value;
use rstest::rstest;

// =============================================================================
// traverse
// =============================================================================

#[rstest]
fn traverse_flattens_arbitrary_depth() {
    let leaves = value![[1, 2], [[[3], [[4]]], [5]]]
        .pipe(traverse())
        .pipe(as_list());
    assert_eq!(leaves, vec![value!(1), value!(2), value!(3), value!(4), value!(5)]);
}

#[rstest]
fn traverse_keeps_text_whole() {
    let leaves = value!["ab", ["cd", ["e"]]].pipe(traverse()).pipe(concat());
    assert_eq!(leaves, "ab, cd, e");
}

#[rstest]
fn traverse_of_top_level_text_is_one_leaf() {
    let leaves = value!("word").pipe(traverse()).pipe(as_list());
    assert_eq!(leaves, vec![value!("word")]);
}

#[rstest]
fn traverse_of_scalar_is_one_leaf() {
    let leaves = value!(3.5).pipe(traverse()).pipe(as_list());
    assert_eq!(leaves, vec![value!(3.5)]);
}

#[rstest]
fn traverse_skips_empty_sequences() {
    let leaves = value![[], [[]], 1, [[], 2]].pipe(traverse()).pipe(concat());
    assert_eq!(leaves, "1, 2");
}

#[rstest]
fn traverse_of_mapping_yields_keys() {
    let mapping = value![["a", 1], ["b", 2]].pipe(as_dict()).unwrap();
    let keys = mapping.pipe(traverse()).pipe(concat());
    assert_eq!(keys, "a, b");
}

#[rstest]
fn traverse_typed_items() {
    let leaves = vec![value![1, [2]], value!(3)].pipe(traverse()).pipe(concat());
    assert_eq!(leaves, "1, 2, 3");
}

#[rstest]
fn traverse_unsigned_and_index_items() {
    let sizes: Vec<usize> = vec![3, 1, 4];
    assert_eq!(sizes.pipe(traverse()).pipe(concat()), "3, 1, 4");
    let counters = vec![u64::MAX, 1];
    let leaves = counters.pipe(traverse()).pipe(as_list());
    assert!(matches!(leaves[0], Value::Float(_)));
    assert_eq!(leaves[1], Value::Int(1));
}

#[rstest]
fn traverse_is_lazy_over_infinite_input() {
    let pulled = Cell::new(0);
    let source = (0..)
        .inspect(|_| pulled.set(pulled.get() + 1))
        .map(|number: i32| value![number, [number]]);
    let head = source.pipe(traverse()).pipe(take(3)).pipe(concat());
    assert_eq!(head, "0, 0, 1");
    assert_eq!(pulled.get(), 2);
}

// =============================================================================
// permutations
// =============================================================================

#[rstest]
fn permutations_full_length_in_lexicographic_order() {
    let orderings = vec![1, 2, 3].pipe(permutations()).pipe(as_list());
    assert_eq!(
        orderings,
        vec![
            vec![1, 2, 3],
            vec![1, 3, 2],
            vec![2, 1, 3],
            vec![2, 3, 1],
            vec![3, 1, 2],
            vec![3, 2, 1],
        ]
    );
}

#[rstest]
fn permutations_of_length_two() {
    let orderings = "ABC"
        .chars()
        .pipe(permutations().length(2))
        .pipe(select(|ordering: Vec<char>| ordering.into_iter().collect::<String>()))
        .pipe(concat().separator(" "));
    assert_eq!(orderings, "AB AC BA BC CA CB");
}

#[rstest]
#[case(0, 1)]
#[case(1, 4)]
#[case(2, 12)]
#[case(4, 24)]
#[case(5, 0)]
fn permutations_count(#[case] length: usize, #[case] expected: usize) {
    let orderings = (0..4).pipe(permutations().length(length)).pipe(count());
    assert_eq!(orderings, expected);
}

#[rstest]
fn permutations_of_empty_input_yields_one_empty_ordering() {
    let orderings = Vec::<u8>::new().pipe(permutations()).pipe(as_list());
    assert_eq!(orderings, vec![Vec::<u8>::new()]);
}

#[rstest]
fn permutations_treat_equal_items_as_distinct() {
    let orderings = vec!['a', 'a'].pipe(permutations()).pipe(count());
    assert_eq!(orderings, 2);
}

// =============================================================================
// sort / reverse
// =============================================================================

#[rstest]
fn sort_natural_order() {
    let sorted = vec!["pear", "apple", "fig"].pipe(sort()).pipe(as_list());
    assert_eq!(sorted, vec!["apple", "fig", "pear"]);
}

#[rstest]
fn sort_descending() {
    let sorted = vec![2, 9, 4].pipe(sort().descending()).pipe(as_list());
    assert_eq!(sorted, vec![9, 4, 2]);
}

#[rstest]
fn sort_by_key_is_stable() {
    let sorted = vec![(1, 'b'), (0, 'a'), (1, 'a'), (0, 'b')]
        .pipe(sort().by_key(|pair: &(i32, char)| pair.0))
        .pipe(as_list());
    assert_eq!(sorted, vec![(0, 'a'), (0, 'b'), (1, 'b'), (1, 'a')]);
}

#[rstest]
fn sort_descending_by_key_is_stable() {
    let sorted = vec![(1, 'b'), (0, 'a'), (1, 'a'), (0, 'b')]
        .pipe(sort().by_key(|pair: &(i32, char)| pair.0).descending())
        .pipe(as_list());
    assert_eq!(sorted, vec![(1, 'b'), (1, 'a'), (0, 'a'), (0, 'b')]);
}

#[rstest]
fn sort_values_mixing_integers_and_floats() {
    let sorted = value![3, 1.5, 2].pipe(traverse()).pipe(sort()).pipe(concat());
    assert_eq!(sorted, "1.5, 2, 3");
}

#[rstest]
fn sort_values_beyond_float_precision() {
    let exact = 1_i64 << 53;
    let sorted = vec![
        Value::Int(exact + 1),
        Value::Float(9_007_199_254_740_992.0),
        Value::Int(exact - 1),
    ]
    .pipe(sort())
    .pipe(as_list());
    assert!(matches!(sorted[0], Value::Int(number) if number == exact - 1));
    assert!(matches!(sorted[1], Value::Float(_)));
    assert!(matches!(sorted[2], Value::Int(number) if number == exact + 1));
}

#[rstest]
fn reverse_yields_last_to_first() {
    let backwards = "abc".chars().pipe(reverse()).collect::<String>();
    assert_eq!(backwards, "cba");
}

#[rstest]
fn reverse_of_empty_input() {
    assert_eq!(Vec::<i32>::new().pipe(reverse()).count(), 0);
}

// =============================================================================
// groupby
// =============================================================================

#[rstest]
fn groupby_sorts_before_grouping() {
    let groups = vec![3, 1, 2, 5, 4, 6]
        .pipe(groupby(|value: &i32| value % 3))
        .pipe(as_list());
    assert_eq!(
        groups,
        vec![(0, vec![3, 6]), (1, vec![1, 4]), (2, vec![2, 5])]
    );
}

#[rstest]
fn groupby_parity_report() {
    let report = (1..10)
        .pipe(groupby(|value: &i32| if value % 2 == 0 { "Even" } else { "Odd" }))
        .pipe(select(|(_, members): (&str, Vec<i32>)| members.pipe(concat())))
        .pipe(as_list());
    assert_eq!(report, vec!["2, 4, 6, 8", "1, 3, 5, 7, 9"]);
}

#[rstest]
fn groupby_values_keeps_large_integers_apart() {
    let exact = 1_i64 << 53;
    let groups = vec![
        Value::Int(exact + 1),
        Value::Float(9_007_199_254_740_992.0),
        Value::Int(exact),
    ]
    .pipe(groupby(|value: &Value| value.clone()))
    .pipe(as_list());
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, Value::Int(exact));
    assert_eq!(groups[0].1.len(), 2);
    assert!(matches!(groups[1].0, Value::Int(number) if number == exact + 1));
    assert_eq!(groups[1].1, vec![Value::Int(exact + 1)]);
}

#[rstest]
fn groupby_of_empty_input_yields_no_groups() {
    let groups = Vec::<i32>::new()
        .pipe(groupby(|value: &i32| *value))
        .pipe(count());
    assert_eq!(groups, 0);
}

#[rstest]
fn groupby_single_key_collects_everything() {
    let groups = vec!["x", "y", "z"]
        .pipe(groupby(|_: &&str| ()))
        .pipe(as_list());
    assert_eq!(groups, vec![((), vec!["x", "y", "z"])]);
}
