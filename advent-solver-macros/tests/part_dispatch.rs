//! Tests for `#[derive(AocSolver)]` part dispatch

use advent_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct SumProduct;

impl AocParser for SumProduct {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(|line| {
                line.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("expected integer: {line}")))
            })
            .collect()
    }
}

impl PartSolver<1> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i64>().to_string())
    }
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 3)]
struct Borrowing;

impl AocParser for Borrowing {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.split(',').collect())
    }
}

impl PartSolver<1> for Borrowing {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for Borrowing {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.sort_unstable();
        Ok(shared.join(","))
    }
}

impl PartSolver<3> for Borrowing {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .first()
            .map(|s| s.to_string())
            .ok_or_else(|| SolveError::failed("no items"))
    }
}

#[test]
fn test_parts_constant_matches_attribute() {
    assert_eq!(<SumProduct as Solver>::PARTS, 2);
    assert_eq!(<Borrowing as Solver>::PARTS, 3);
}

#[test]
fn test_dispatch_reaches_each_part() {
    let mut shared = SumProduct::parse("2\n3\n4").unwrap();
    assert_eq!(SumProduct::solve_part(&mut shared, 1).unwrap(), "9");
    assert_eq!(SumProduct::solve_part(&mut shared, 2).unwrap(), "24");
}

#[test]
fn test_unknown_part_is_not_implemented() {
    let mut shared = SumProduct::parse("1").unwrap();
    assert!(matches!(
        SumProduct::solve_part(&mut shared, 3),
        Err(SolveError::PartNotImplemented(3))
    ));
    assert!(matches!(
        SumProduct::solve_part(&mut shared, 0),
        Err(SolveError::PartNotImplemented(0))
    ));
    assert!(matches!(
        SumProduct::solve_checked(&mut shared, 3),
        Err(SolveError::PartOutOfRange(3))
    ));
}

#[test]
fn test_mutation_carries_between_parts() {
    let mut shared = Borrowing::parse("pear,apple,fig").unwrap();
    assert_eq!(Borrowing::solve_part(&mut shared, 1).unwrap(), "3");
    assert_eq!(Borrowing::solve_part(&mut shared, 2).unwrap(), "apple,fig,pear");
    assert_eq!(Borrowing::solve_part(&mut shared, 3).unwrap(), "apple");
}
