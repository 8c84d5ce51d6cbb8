//! Ordered printing of solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::collections::{BTreeMap, VecDeque};
use std::io::{self, Write};
use std::time::Instant;
use tracing::warn;

/// Position of a result in the printed report
pub type ResultKey = (u16, u8, u8);

/// Running totals for the closing summary
#[derive(Debug)]
struct Tally {
    solved: usize,
    failed: usize,
    parse: TimeDelta,
    solve: TimeDelta,
}

impl Tally {
    fn new() -> Self {
        Self {
            solved: 0,
            failed: 0,
            parse: TimeDelta::zero(),
            solve: TimeDelta::zero(),
        }
    }
}

/// Prints results in (year, day, part) order as they arrive
///
/// Results can come in any order. Each one is held back until every result
/// ahead of it in `expected` has been printed.
pub struct Printer<W: Write> {
    out: W,
    quiet: bool,
    started: Instant,
    expected: VecDeque<ResultKey>,
    held: BTreeMap<ResultKey, SolverResult>,
    current_day: Option<(u16, u8)>,
    tally: Tally,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, quiet: bool, expected: impl IntoIterator<Item = ResultKey>) -> Self {
        let mut expected: Vec<ResultKey> = expected.into_iter().collect();
        expected.sort_unstable();
        Self {
            out,
            quiet,
            started: Instant::now(),
            expected: expected.into(),
            held: BTreeMap::new(),
            current_day: None,
            tally: Tally::new(),
        }
    }

    /// Take one result and print everything that is now in order
    pub fn accept(&mut self, result: SolverResult) -> io::Result<()> {
        self.held.insert((result.year, result.day, result.part), result);
        while let Some(next) = self.expected.front() {
            let Some(result) = self.held.remove(next) else {
                break;
            };
            self.expected.pop_front();
            self.emit(&result)?;
        }
        Ok(())
    }

    /// Print anything still held back plus the summary
    ///
    /// Returns whether every expected part arrived and succeeded.
    pub fn finish(mut self) -> io::Result<bool> {
        let missing = self.expected.len();
        if missing > 0 {
            warn!(missing, "some results never arrived");
        }
        for (_, result) in std::mem::take(&mut self.held) {
            self.emit(&result)?;
        }
        self.summary()?;
        self.out.flush()?;
        Ok(missing == 0 && self.tally.failed == 0)
    }

    fn emit(&mut self, result: &SolverResult) -> io::Result<()> {
        let day = (result.year, result.day);
        let first_of_day = self.current_day != Some(day);
        self.current_day = Some(day);

        match &result.answer {
            Ok(_) => {
                self.tally.solved += 1;
                self.tally.solve += result.solve_duration;
            }
            Err(_) => self.tally.failed += 1,
        }
        // Parts of a day share one parse
        if first_of_day {
            self.tally.parse += result.parse_duration.unwrap_or(TimeDelta::zero());
        }

        if self.quiet {
            return match &result.answer {
                Ok(answer) => writeln!(self.out, "{answer}"),
                Err(e) => writeln!(self.out, "error: {e}"),
            };
        }

        if first_of_day {
            match result.parse_duration {
                Some(parse) => writeln!(
                    self.out,
                    "Running day {} of {}, parsed in {}.",
                    result.day,
                    result.year,
                    seconds(parse)
                )?,
                None => writeln!(self.out, "Running day {} of {}.", result.day, result.year)?,
            }
        }
        match &result.answer {
            // Multi-line answers start on their own line
            Ok(answer) if answer.contains('\n') => writeln!(
                self.out,
                "Part {}, took {}:\n{answer}",
                result.part,
                seconds(result.solve_duration)
            ),
            Ok(answer) => writeln!(
                self.out,
                "Part {}: {answer}, took {}",
                result.part,
                seconds(result.solve_duration)
            ),
            Err(e) => writeln!(self.out, "Part {} failed: {e}", result.part),
        }
    }

    fn summary(&mut self) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let Tally {
            solved,
            failed,
            parse,
            solve,
        } = self.tally;
        let wall = TimeDelta::from_std(self.started.elapsed()).unwrap_or(TimeDelta::MAX);

        writeln!(self.out)?;
        writeln!(self.out, "{solved} part(s) solved, {failed} failed.")?;
        writeln!(
            self.out,
            "Parsing took {}, solving took {}, wall clock {}.",
            seconds(parse),
            seconds(solve),
            seconds(wall)
        )?;
        if let (Some(busy), Some(elapsed)) = (
            (parse + solve).num_microseconds(),
            wall.num_microseconds().filter(|&us| us > 0),
        ) {
            writeln!(self.out, "Speedup {:.2}x.", busy as f64 / elapsed as f64)?;
        }
        Ok(())
    }
}

/// Seconds with five decimals, e.g. `0.00123 s`
fn seconds(d: TimeDelta) -> String {
    match d.num_microseconds() {
        Some(us) => format!("{:.5} s", us as f64 / 1e6),
        None => format!("{} s", d.num_seconds()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArcExecutorError, ExecutorError};

    fn solved(year: u16, day: u8, part: u8, answer: &str) -> SolverResult {
        SolverResult {
            year,
            day,
            part,
            answer: Ok(answer.to_string()),
            parse_duration: Some(TimeDelta::microseconds(500)),
            solve_duration: TimeDelta::microseconds(1250),
        }
    }

    fn failed(year: u16, day: u8, part: u8) -> SolverResult {
        let error: ArcExecutorError = ExecutorError::ChannelSend.into();
        SolverResult {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }

    #[test]
    fn test_seconds_format() {
        assert_eq!(seconds(TimeDelta::microseconds(1250)), "0.00125 s");
        assert_eq!(seconds(TimeDelta::milliseconds(2500)), "2.50000 s");
        assert_eq!(seconds(TimeDelta::zero()), "0.00000 s");
    }

    #[test]
    fn test_out_of_order_results_print_in_order() {
        let expected = [(2022, 1, 1), (2022, 1, 2), (2025, 3, 1)];
        let mut printer = Printer::new(Vec::new(), false, expected);
        printer.accept(solved(2025, 3, 1, "c")).unwrap();
        assert!(printer.out.is_empty());
        printer.accept(solved(2022, 1, 2, "b")).unwrap();
        assert!(printer.out.is_empty());
        printer.accept(solved(2022, 1, 1, "a")).unwrap();

        let text = String::from_utf8(printer.out.clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Running day 1 of 2022, parsed in 0.00050 s.",
                "Part 1: a, took 0.00125 s",
                "Part 2: b, took 0.00125 s",
                "Running day 3 of 2025, parsed in 0.00050 s.",
                "Part 1: c, took 0.00125 s",
            ]
        );
        assert!(printer.finish().unwrap());
    }

    #[test]
    fn test_failure_line_and_outcome() {
        let mut printer = Printer::new(Vec::new(), false, [(2022, 2, 1), (2022, 2, 2)]);
        printer.accept(failed(2022, 2, 1)).unwrap();
        printer.accept(solved(2022, 2, 2, "ok")).unwrap();
        let text = String::from_utf8(printer.out.clone()).unwrap();
        assert!(text.starts_with("Running day 2 of 2022.\nPart 1 failed: Channel send error\n"));
        assert!(!printer.finish().unwrap());
    }

    #[test]
    fn test_quiet_prints_answers_only() {
        let mut printer = Printer::new(Vec::new(), true, [(2025, 1, 1), (2025, 1, 2)]);
        printer.accept(solved(2025, 1, 2, "two")).unwrap();
        printer.accept(solved(2025, 1, 1, "one")).unwrap();
        assert_eq!(String::from_utf8(printer.out.clone()).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_missing_result_fails_run() {
        let mut out = Vec::new();
        let mut printer = Printer::new(&mut out, true, [(2025, 1, 1), (2025, 1, 2)]);
        printer.accept(solved(2025, 1, 2, "two")).unwrap();
        // Held until the end since part 1 never arrives
        assert!(printer.out.is_empty());
        assert!(!printer.finish().unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "two\n");
    }

    #[test]
    fn test_multiline_answer_and_summary() {
        let mut out = Vec::new();
        let mut printer = Printer::new(&mut out, false, [(2022, 10, 2)]);
        printer.accept(solved(2022, 10, 2, "#.\n.#")).unwrap();
        assert!(printer.finish().unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Part 2, took 0.00125 s:\n#.\n.#\n"), "{text}");
        assert!(text.contains("1 part(s) solved, 0 failed."), "{text}");
    }
}
