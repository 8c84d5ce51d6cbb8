//! Tests for `#[derive(AutoRegisterSolver)]` plugin submission

use advent_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError, SolverError,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 4, tags = ["macro-test", "words"])]
struct WordCount;

impl AocParser for WordCount {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let words: Vec<&str> = input.split_whitespace().collect();
        if words.is_empty() {
            return Err(ParseError::MissingData("no words".into()));
        }
        Ok(words)
    }
}

impl PartSolver<1> for WordCount {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for WordCount {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .max_by_key(|w| w.len())
            .map(|w| w.to_string())
            .ok_or_else(|| SolveError::failed("no words"))
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2016, day = 5, tags = ["macro-test"])]
struct Untagged;

impl AocParser for Untagged {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl PartSolver<1> for Untagged {
    fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok("ok".into())
    }
}

#[test]
fn test_plugins_are_discovered() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"macro-test"))
        .unwrap()
        .build();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.info(2016, 4).map(|info| info.parts), Some(2));
    assert_eq!(registry.info(2016, 5).map(|info| info.parts), Some(1));

    let mut solver = registry
        .create_solver(2016, 4, "the quick red fox")
        .unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "4");
    assert_eq!(solver.solve(2).unwrap().answer, "quick");
}

#[test]
fn test_tag_filter_excludes_plugins() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"words"))
        .unwrap()
        .build();

    assert!(registry.contains(2016, 4));
    assert!(!registry.contains(2016, 5));
    assert!(matches!(
        registry.create_solver(2016, 5, ""),
        Err(SolverError::NotFound(2016, 5))
    ));
}

#[test]
fn test_register_all_plugins_includes_every_submission() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    assert!(registry.contains(2016, 4));
    assert!(registry.contains(2016, 5));
    assert!(matches!(
        registry.create_solver(2016, 4, "   "),
        Err(SolverError::ParseError(ParseError::MissingData(_)))
    ));
}
