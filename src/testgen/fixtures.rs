//! testgen/fixtures.rs
//!
//! The static case catalogue plus seeded random inputs.
//! Same seed, same cases: benchmark numbers stay comparable between runs.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::state::{CaseInput, SuiteMode, TestCase};

#[derive(Debug, Clone)]
pub struct Suite {
    pub name: String,
    pub mode: SuiteMode,
    pub cases: Vec<TestCase>,
}

impl Suite {
    fn new(name: &str, mode: SuiteMode, cases: Vec<TestCase>) -> Self {
        Self {
            name: name.to_string(),
            mode,
            cases,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixtureSettings {
    pub seed: u64,
    pub max_test_size: usize,
    pub test_count: usize,
}

const RANDOM_SIZES: [usize; 10] = [1, 2, 3, 5, 10, 25, 50, 100, 250, 500];
const BENCH_ROUNDS: usize = 10;

/* ============================================================
   Public API
   ============================================================ */

/// Every suite, in the order they are run.
pub fn all_suites(settings: &FixtureSettings) -> Vec<Suite> {
    let mut rng = StdRng::seed_from_u64(settings.seed);

    vec![
        Suite::new("Error Handling", SuiteMode::Error, error_handling()),
        Suite::new("Edge Cases", SuiteMode::Standard, edge_cases()),
        Suite::new("Almost Sorted", SuiteMode::Standard, almost_sorted()),
        Suite::new("Descending Order", SuiteMode::Standard, descending_order()),
        Suite::new(
            "Random Order",
            SuiteMode::Standard,
            random_order(&mut rng, settings.max_test_size, settings.test_count),
        ),
        Suite::new("Benchmarks: 3", SuiteMode::Standard, permutations_of_three()),
        Suite::new("Benchmarks: 5", SuiteMode::Standard, benchmark(&mut rng, 5, BENCH_ROUNDS)),
        Suite::new("Benchmarks: 100", SuiteMode::Standard, benchmark(&mut rng, 100, BENCH_ROUNDS)),
        Suite::new("Benchmarks: 500", SuiteMode::Standard, benchmark(&mut rng, 500, BENCH_ROUNDS)),
    ]
}

/// Keeps suites whose name contains any of `filters` (case-insensitive).
/// No filters keeps everything.
pub fn select(suites: Vec<Suite>, filters: &[String]) -> Vec<Suite> {
    if filters.is_empty() {
        return suites;
    }
    let wanted: Vec<String> = filters.iter().map(|f| f.to_lowercase()).collect();
    suites
        .into_iter()
        .filter(|s| {
            let name = s.name.to_lowercase();
            wanted.iter().any(|w| name.contains(w.as_str()))
        })
        .collect()
}

/* ============================================================
   Static suites
   ============================================================ */

pub fn error_handling() -> Vec<TestCase> {
    let raw = |name: &str, input: &str, expects_error: bool| {
        TestCase::error(name, CaseInput::Raw(input.into()), expects_error)
    };
    let quoted = |name: &str, input: &str, expects_error: bool| {
        TestCase::error(name, CaseInput::Quoted(input.into()), expects_error)
    };

    vec![
        raw("No arguments", "", false),
        raw("Single number", "42", false),
        raw("Already sorted", "1 2 3", false),
        raw("Limits", "-2147483648 2147483647", false),
        raw("Letters", "abc", true),
        raw("Letter among numbers", "3 2 x 1", true),
        raw("Trailing garbage", "1 2 3a", true),
        raw("Duplicate", "1 2 1", true),
        raw("Duplicate at limits", "2147483647 -1 2147483647", true),
        raw("INT_MAX + 1", "2147483648", true),
        raw("INT_MIN - 1", "-2147483649", true),
        raw("Huge number", "99999999999999999999", true),
        raw("Lone minus", "-", true),
        raw("Lone plus", "+", true),
        raw("Double sign", "--5", true),
        raw("Sign after digits", "5-", true),
        quoted("Quoted list with letter", "4 2 b", true),
        quoted("Quoted duplicate", "7 7", true),
        quoted("Quoted valid list", "3 1 2", false),
    ]
}

pub fn edge_cases() -> Vec<TestCase> {
    let nums = |name: &str, values: &[i32]| TestCase::standard(name, CaseInput::Numbers(values.to_vec()));

    vec![
        nums("Single value", &[42]),
        nums("Two sorted", &[1, 2]),
        nums("Two reversed", &[2, 1]),
        nums("Three sorted", &[1, 2, 3]),
        nums("Negative values", &[-3, -1, -2]),
        nums("Limits", &[i32::MAX, i32::MIN, 0]),
        nums("Five sorted", &[1, 2, 3, 4, 5]),
        nums("Zero in the middle", &[5, -5, 0, 10, -10]),
        TestCase::standard("Quoted list", CaseInput::Quoted("3 1 2".into())),
        TestCase::standard("Extra whitespace", CaseInput::Raw("  5   4\t3 ".into())),
    ]
}

pub fn almost_sorted() -> Vec<TestCase> {
    let mut cases = Vec::new();
    for n in [5, 10, 50, 100] {
        let mut swapped: Vec<i32> = (1..=n).collect();
        swapped.swap(0, 1);
        cases.push(TestCase::standard(
            format!("{} values, first pair swapped", n),
            CaseInput::Numbers(swapped),
        ));

        let mut rotated: Vec<i32> = (1..=n).collect();
        rotated.rotate_right(1);
        cases.push(TestCase::standard(
            format!("{} values, last moved to front", n),
            CaseInput::Numbers(rotated),
        ));
    }
    cases
}

pub fn descending_order() -> Vec<TestCase> {
    [3, 5, 10, 50, 100, 500]
        .into_iter()
        .map(|n: i32| {
            TestCase::standard(
                format!("{} values descending", n),
                CaseInput::Numbers((1..=n).rev().collect()),
            )
        })
        .collect()
}

pub fn permutations_of_three() -> Vec<TestCase> {
    let perms: [[i32; 3]; 6] = [
        [1, 2, 3],
        [1, 3, 2],
        [2, 1, 3],
        [2, 3, 1],
        [3, 1, 2],
        [3, 2, 1],
    ];
    perms
        .iter()
        .map(|p| {
            TestCase::standard(
                format!("3 values {} {} {}", p[0], p[1], p[2]),
                CaseInput::Numbers(p.to_vec()),
            )
        })
        .collect()
}

/* ============================================================
   Generated suites
   ============================================================ */

pub fn random_order(rng: &mut StdRng, max_size: usize, per_size: usize) -> Vec<TestCase> {
    let mut cases = Vec::new();
    for size in RANDOM_SIZES.into_iter().filter(|s| *s <= max_size) {
        for round in 1..=per_size {
            let mut values = distinct(rng, size, |rng| rng.gen::<i32>());
            values.shuffle(rng);
            cases.push(TestCase::standard(
                format!("{} random values #{}", size, round),
                CaseInput::Numbers(values),
            ));
        }
    }
    cases
}

/// Mostly small values with the occasional full-range one, all distinct.
pub fn benchmark(rng: &mut StdRng, size: usize, rounds: usize) -> Vec<TestCase> {
    (1..=rounds)
        .map(|round| {
            let values = distinct(rng, size, |rng| {
                if rng.gen_bool(0.7) {
                    rng.gen_range(-1000..=1000)
                } else {
                    rng.gen::<i32>()
                }
            });
            TestCase::standard(
                format!("{} values #{}", size, round),
                CaseInput::Numbers(values),
            )
        })
        .collect()
}

fn distinct(rng: &mut StdRng, size: usize, mut draw: impl FnMut(&mut StdRng) -> i32) -> Vec<i32> {
    let mut seen = HashSet::with_capacity(size);
    let mut values = Vec::with_capacity(size);
    while values.len() < size {
        let v = draw(rng);
        if seen.insert(v) {
            values.push(v);
        }
    }
    values
}
