//! Executor resolving work items and running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input::{InputStore, InputVariant};
use advent_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Result from a single part execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Time spent parsing; `None` when the input never reached the parser
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// A solver to run for some of its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: Vec<u8>,
}

/// Executor running solvers sequentially or on a rayon pool
pub struct Executor {
    context: ExecutionContext,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker needs to run a work item
struct ExecutionContext {
    registry: SolverRegistry,
    store: InputStore,
    variant: InputVariant,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    days: Vec<u8>,
    parts: Vec<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: ExecutionContext {
                registry,
                store: InputStore::new(config.input_dir.clone()),
                variant: config.variant,
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                days: config.days.clone(),
                parts: config.parts.clone(),
            },
            thread_pool,
        })
    }

    /// Resolve the work items selected by the filters, in (year, day) order
    ///
    /// Fails when an explicitly requested year or day has no registered solver.
    pub fn collect_work_items(&self) -> Result<Vec<WorkItem>, ArcExecutorError> {
        self.context.collect_work_items()
    }

    /// Execute all work items and send results to channel
    pub fn execute(
        &self,
        work_items: Vec<WorkItem>,
        tx: Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let context = &self.context;

        match context.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in &work_items {
                    if let Err(e) = context.run_work_item(work, &tx) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year
                        .into_par_iter()
                        .map(|items| {
                            items.iter().fold(None, |err, work| {
                                merge_errors(err, context.run_work_item(work, &tx).err())
                            })
                        })
                        .reduce(|| None, merge_errors)
                        .map_or(Ok(()), Err)
                })
            }
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .par_iter()
                    .map(|work| context.run_work_item(work, &tx).err())
                    .reduce(|| None, merge_errors)
                    .map_or(Ok(()), Err)
            }),
        }
    }
}

impl ExecutionContext {
    fn collect_work_items(&self) -> Result<Vec<WorkItem>, ArcExecutorError> {
        let in_year = |year: u16| self.year_filter.is_none_or(|y| year == y);

        let mut missing: Option<ArcExecutorError> = None;
        if let Some(year) = self.year_filter
            && !self.registry.years().contains(&year)
        {
            missing = Some(ExecutorError::YearNotRegistered(year).into());
        } else {
            for &day in &self.days {
                let registered = self
                    .registry
                    .iter_info()
                    .any(|info| info.day == day && in_year(info.year));
                if !registered {
                    let err = ExecutorError::NotRegistered {
                        year: self.year_filter,
                        day,
                    };
                    missing = Some(ArcExecutorError::combine_opt(missing, err.into()));
                }
            }
        }
        if let Some(err) = missing {
            return Err(err);
        }

        let items: Vec<WorkItem> = self
            .registry
            .iter_info()
            .filter(|info| in_year(info.year))
            .filter(|info| self.days.is_empty() || self.days.contains(&info.day))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.select_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect();

        debug!(count = items.len(), "resolved work items");
        Ok(items)
    }

    /// Requested parts the solver actually has, or all of them
    fn select_parts(&self, max_parts: u8) -> Vec<u8> {
        if self.parts.is_empty() {
            (1..=max_parts).collect()
        } else {
            self.parts
                .iter()
                .copied()
                .filter(|&p| p <= max_parts)
                .collect()
        }
    }

    /// Load input, parse, and run the selected parts of one work item
    ///
    /// Input and parse failures become an error result for each part. Only a
    /// closed result channel is returned as an error.
    fn run_work_item(
        &self,
        work: &WorkItem,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let (year, day) = (work.year, work.day);
        debug!(
            year,
            day,
            path = %self.store.path(year, day, self.variant).display(),
            "loading input"
        );

        let input = match self.store.read(year, day, self.variant) {
            Ok(input) => input,
            Err(e) => {
                warn!(year, day, error = %e, "input unavailable");
                return self.fail_all(work, ExecutorError::from(e).into(), tx);
            }
        };

        if matches!(self.parallelize_by, ParallelizeBy::Part) {
            return work
                .parts
                .par_iter()
                .map(|&part| {
                    let result = match self.registry.create_solver(year, day, &input) {
                        Ok(mut solver) => solve_part(&mut *solver, part),
                        Err(e) => SolverResult::failed(year, day, part, ExecutorError::from(e).into()),
                    };
                    send(tx, result).err()
                })
                .reduce(|| None, merge_errors)
                .map_or(Ok(()), Err);
        }

        let mut solver = match self.registry.create_solver(year, day, &input) {
            Ok(solver) => solver,
            Err(e) => {
                warn!(year, day, error = %e, "solver creation failed");
                return self.fail_all(work, ExecutorError::from(e).into(), tx);
            }
        };
        debug!(
            year,
            day,
            micros = solver.parse_duration().num_microseconds(),
            "parsed input"
        );

        for &part in &work.parts {
            send(tx, solve_part(&mut *solver, part))?;
        }
        Ok(())
    }

    fn fail_all(
        &self,
        work: &WorkItem,
        error: ArcExecutorError,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        for &part in &work.parts {
            send(tx, SolverResult::failed(work.year, work.day, part, error.clone()))?;
        }
        Ok(())
    }
}

/// Run one part on an already parsed solver
fn solve_part(solver: &mut dyn DynSolver, part: u8) -> SolverResult {
    let (year, day) = (solver.year(), solver.day());
    let parse_duration = Some(solver.parse_duration());

    match solver.solve(part) {
        Ok(result) => {
            let solve_duration = result.duration;
            debug!(
                year,
                day,
                part,
                micros = solve_duration.num_microseconds(),
                "solved"
            );
            SolverResult {
                year,
                day,
                part,
                answer: Ok(result.answer),
                parse_duration,
                solve_duration,
            }
        }
        Err(e) => {
            warn!(year, day, part, error = %e, "part failed");
            let error = ExecutorError::Solver(e.into()).into();
            SolverResult {
                parse_duration,
                ..SolverResult::failed(year, day, part, error)
            }
        }
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

fn merge_errors(
    first: Option<ArcExecutorError>,
    second: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match (first, second) {
        (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
    use std::fs;
    use std::path::Path;
    use std::sync::mpsc;
    use tempfile::TempDir;

    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Sum;

    impl AocParser for Sum {
        type SharedData<'a> = Vec<i64>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .lines()
                .map(|l| {
                    l.parse()
                        .map_err(|_| ParseError::InvalidFormat(l.to_string()))
                })
                .collect()
        }
    }

    impl PartSolver<1> for Sum {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().sum::<i64>().to_string())
        }
    }

    impl PartSolver<2> for Sum {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            shared
                .iter()
                .max()
                .map(i64::to_string)
                .ok_or_else(|| SolveError::failed("no numbers"))
        }
    }

    fn registry() -> SolverRegistry {
        SolverRegistryBuilder::new()
            .register_solver::<Sum>(2024, 1)
            .unwrap()
            .register_solver::<Sum>(2024, 2)
            .unwrap()
            .register_solver::<Sum>(2025, 1)
            .unwrap()
            .build()
    }

    fn config(dir: &Path, year: Option<u16>, days: Vec<u8>, mode: ParallelizeBy) -> Config {
        Config {
            year_filter: year,
            days,
            parts: Vec::new(),
            variant: InputVariant::Full,
            tags: Vec::new(),
            input_dir: dir.to_path_buf(),
            thread_count: 2,
            parallelize_by: mode,
            quiet: true,
            verbose: false,
        }
    }

    fn write_input(dir: &Path, year: u16, day: u8, content: &str) {
        let year_dir = dir.join(year.to_string());
        fs::create_dir_all(&year_dir).unwrap();
        fs::write(year_dir.join(format!("{day:02}.in")), content).unwrap();
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let items = executor.collect_work_items().unwrap();
        let (tx, rx) = mpsc::channel();
        executor.execute(items, tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    #[test]
    fn test_collect_all_and_filtered() {
        let temp = TempDir::new().unwrap();
        let executor = Executor::new(
            registry(),
            &config(temp.path(), None, vec![], ParallelizeBy::Sequential),
        )
        .unwrap();
        let items = executor.collect_work_items().unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|w| w.parts == vec![1, 2]));

        let mut cfg = config(temp.path(), Some(2024), vec![2], ParallelizeBy::Sequential);
        cfg.parts = vec![2];
        let executor = Executor::new(registry(), &cfg).unwrap();
        assert_eq!(
            executor.collect_work_items().unwrap(),
            vec![WorkItem {
                year: 2024,
                day: 2,
                parts: vec![2]
            }]
        );
    }

    #[test]
    fn test_unregistered_day_is_fatal() {
        let temp = TempDir::new().unwrap();
        let executor = Executor::new(
            registry(),
            &config(temp.path(), Some(2025), vec![1, 2], ParallelizeBy::Sequential),
        )
        .unwrap();
        let err = executor.collect_work_items().unwrap_err();
        assert!(matches!(
            err.inner(),
            ExecutorError::NotRegistered {
                year: Some(2025),
                day: 2
            }
        ));
    }

    #[test]
    fn test_unregistered_year_is_fatal() {
        let temp = TempDir::new().unwrap();
        let executor = Executor::new(
            registry(),
            &config(temp.path(), Some(2019), vec![], ParallelizeBy::Sequential),
        )
        .unwrap();
        let err = executor.collect_work_items().unwrap_err();
        assert!(matches!(err.inner(), ExecutorError::YearNotRegistered(2019)));
    }

    #[test]
    fn test_runs_parts_and_reports_failures() {
        let temp = TempDir::new().unwrap();
        write_input(temp.path(), 2024, 1, "1\n2\n3\n");
        write_input(temp.path(), 2024, 2, "1\nx\n");

        for mode in [
            ParallelizeBy::Sequential,
            ParallelizeBy::Year,
            ParallelizeBy::Day,
            ParallelizeBy::Part,
        ] {
            let executor =
                Executor::new(registry(), &config(temp.path(), Some(2024), vec![], mode)).unwrap();
            let results = run(&executor);
            assert_eq!(results.len(), 4, "{mode:?}");

            assert_eq!(results[0].answer.as_ref().unwrap(), "6");
            assert_eq!(results[1].answer.as_ref().unwrap(), "3");
            assert!(results[0].parse_duration.is_some());

            // Day 2 input does not parse
            assert!(results[2..].iter().all(|r| r.answer.is_err()));
        }
    }

    #[test]
    fn test_missing_input_fails_each_part() {
        let temp = TempDir::new().unwrap();
        let executor = Executor::new(
            registry(),
            &config(temp.path(), Some(2025), vec![1], ParallelizeBy::Sequential),
        )
        .unwrap();
        let results = run(&executor);
        assert_eq!(results.len(), 2);
        for result in &results {
            let err = result.answer.as_ref().unwrap_err();
            assert!(matches!(err.inner(), ExecutorError::Input(_)));
            assert!(result.parse_duration.is_none());
        }
    }

    #[test]
    fn test_solve_failure_keeps_parse_time() {
        let temp = TempDir::new().unwrap();
        write_input(temp.path(), 2025, 1, "");
        let executor = Executor::new(
            registry(),
            &config(temp.path(), Some(2025), vec![1], ParallelizeBy::Sequential),
        )
        .unwrap();
        let results = run(&executor);
        assert_eq!(results[0].answer.as_ref().unwrap(), "0");
        assert!(results[1].answer.is_err());
        assert!(results[1].parse_duration.is_some());
    }
}
