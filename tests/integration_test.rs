//! End-to-end pipelines mixing units from every group.

use pipette::prelude::*;
use pipette::value;

// =============================================================================
// Project Euler
// =============================================================================

#[test]
fn test_euler_problem_1() {
    let total = (1..1000)
        .pipe(where_(|value: &u32| value % 3 == 0 || value % 5 == 0))
        .pipe(sum());
    assert_eq!(total, 233_168);
}

#[test]
fn test_euler_problem_2() {
    let fibonacci = std::iter::successors(Some((1_u64, 2_u64)), |&(a, b)| Some((b, a + b)))
        .pipe(select(|(a, _): (u64, u64)| a));
    let total = fibonacci
        .pipe(where_(|value: &u64| value % 2 == 0))
        .pipe(take_while(|value: &u64| *value < 4_000_000))
        .pipe(sum());
    assert_eq!(total, 4_613_732);
}

#[test]
fn test_euler_problem_6() {
    let square = |value: u64| value * value;
    let square_of_sum = square((1..=100_u64).pipe(sum()));
    let sum_of_squares = (1..=100_u64).pipe(select(square)).pipe(sum());
    assert_eq!(square_of_sum - sum_of_squares, 25_164_150);
}

// =============================================================================
// Mixed pipelines
// =============================================================================

#[test]
fn test_product_of_first_nine() {
    let product = (1..=9)
        .pipe(aggregate(|left: u32, right: u32| left * right))
        .unwrap();
    assert_eq!(product, 362_880);
}

#[test]
fn test_groupby_parity_report() {
    let report = (1..10)
        .pipe(groupby(|value: &i32| if value % 2 == 0 { "Even" } else { "Odd" }))
        .pipe(select(|(label, members): (&str, Vec<i32>)| {
            format!("{label}: {}", members.pipe(concat()))
        }))
        .pipe(as_list());
    assert_eq!(report, vec!["Even: 2, 4, 6, 8", "Odd: 1, 3, 5, 7, 9"]);
}

#[test]
fn test_traverse_nested_then_concat() {
    let flat = value![[1, 2], [[[3], [[4]]], [5]]]
        .pipe(traverse())
        .pipe(as_list());
    assert_eq!(flat, vec![value!(1), value!(2), value!(3), value!(4), value!(5)]);
    assert_eq!(flat.pipe(concat().separator("#")), "1#2#3#4#5");
}

#[test]
fn test_concat_with_hash_separator() {
    assert_eq!((1..=4).pipe(concat().separator("#")), "1#2#3#4");
}

#[test]
fn test_word_frequencies() {
    let text = "the cat and the hat and the bat";
    let frequencies = text
        .split(' ')
        .pipe(groupby(|word: &&'static str| *word))
        .pipe(select(|(word, members): (&'static str, Vec<&str>)| {
            (members.len(), word)
        }))
        .pipe(sort().descending())
        .pipe(take(2))
        .pipe(as_list());
    assert_eq!(frequencies, vec![(3, "the"), (2, "and")]);
}

#[test]
fn test_longest_line_after_strip() {
    let lines = ["  short ", "a much longer line   ", "mid length"];
    let longest = lines
        .iter()
        .pipe(select(|line: &&str| line.pipe(strip())))
        .pipe(max().by_key(String::len))
        .unwrap();
    assert_eq!(longest, "a much longer line");
}

#[test]
fn test_sliding_tail_of_infinite_prefix() {
    let last = (1..)
        .pipe(take_while(|value: &u32| *value <= 100))
        .pipe(where_(|value: &u32| value % 7 == 0))
        .pipe(tail(3));
    assert_eq!(last, vec![84, 91, 98]);
}

#[test]
fn test_value_pipeline_into_mapping() {
    let mapping = value![["a", 1], ["b", [2, 3]]].pipe(as_dict()).unwrap();
    let keys = mapping.clone().pipe(traverse()).pipe(concat());
    assert_eq!(keys, "a, b");
    assert_eq!(mapping.pipe(length()).unwrap(), 2);
}

#[test]
fn test_zip_then_dict_then_index() {
    let names = vec!["ann", "bob", "cid"];
    let table = names.clone().pipe(izip(1..)).pipe(as_dict());
    assert_eq!(table["bob"], 2);
    assert_eq!(names.pipe(index("cid")).unwrap(), 2);
}

#[test]
fn test_average_of_filtered_squares() {
    let mean = (1..=10)
        .pipe(select(|value: i32| value * value))
        .pipe(where_(|square: &i32| square % 2 == 1))
        .pipe(average())
        .unwrap();
    assert!((mean - 33.0).abs() < f64::EPSILON);
}
