//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all solvers one after another (default)
    #[default]
    Sequential,
    /// Parallelize across years; days and parts run sequentially within each year
    Year,
    /// Parallelize across year/day combinations; parts run sequentially
    Day,
    /// Parallelize across all year/day/part combinations
    Part,
}

/// Yearly puzzle solver runner
#[derive(Parser, Debug)]
#[command(name = "advent", about = "Run yearly puzzle solvers", version)]
pub struct Args {
    /// Days to run (runs every registered day if omitted)
    #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
    pub days: Vec<u8>,

    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Parts to run, comma-separated (runs all parts if omitted)
    #[arg(
        short,
        long,
        value_delimiter = ',',
        value_parser = clap::value_parser!(u8).range(1..=2)
    )]
    pub part: Vec<u8>,

    /// Use the small example input (`DD_test.in`) instead of the full one
    #[arg(short, long)]
    pub test: bool,

    /// Only run solvers carrying all of these tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Root directory of input files [env: ADVENT_INPUT_DIR] [default: in]
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "sequential")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["advent"]).unwrap();
        assert!(args.days.is_empty());
        assert!(args.part.is_empty());
        assert!(!args.test);
        assert_eq!(args.parallelize_by, ParallelizeBy::Sequential);
    }

    #[test]
    fn test_days_parts_and_flags() {
        let args =
            Args::try_parse_from(["advent", "3", "7", "-y", "2025", "-p", "1,2", "-t"]).unwrap();
        assert_eq!(args.days, vec![3, 7]);
        assert_eq!(args.year, Some(2025));
        assert_eq!(args.part, vec![1, 2]);
        assert!(args.test);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(Args::try_parse_from(["advent", "26"]).is_err());
        assert!(Args::try_parse_from(["advent", "1", "-p", "3"]).is_err());
    }
}
