//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use crate::input::InputVariant;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable overriding the default input directory
pub const INPUT_DIR_ENV: &str = "ADVENT_INPUT_DIR";

/// Input directory used when neither the flag nor the environment set one
pub const DEFAULT_INPUT_DIR: &str = "in";

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Requested days (empty = all registered days)
    pub days: Vec<u8>,
    /// Requested parts (empty = all parts)
    pub parts: Vec<u8>,
    /// Which input file to load for each day
    pub variant: InputVariant,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Root directory of input files
    pub input_dir: PathBuf,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
    /// Debug logging
    pub verbose: bool,
}

impl Config {
    /// Build config from CLI args and the environment
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let input_dir = resolve_input_dir(args.input_dir, std::env::var_os(INPUT_DIR_ENV));

        let thread_count = match args.threads {
            Some(0) => {
                return Err(CliError::Config(
                    "--threads must be at least 1".to_string(),
                ));
            }
            Some(n) => n,
            None => num_cpus(),
        };

        let mut days = args.days;
        days.sort_unstable();
        days.dedup();
        let mut parts = args.part;
        parts.sort_unstable();
        parts.dedup();

        Ok(Config {
            year_filter: args.year,
            days,
            parts,
            variant: if args.test {
                InputVariant::Test
            } else {
                InputVariant::Full
            },
            tags: args.tags,
            input_dir,
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }
}

/// Pick the input directory: explicit flag, then environment, then the default
fn resolve_input_dir(flag: Option<PathBuf>, env: Option<OsString>) -> PathBuf {
    let dir = flag
        .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
    expand_tilde(&dir)
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_input_dir_precedence() {
        assert_eq!(resolve_input_dir(None, None), PathBuf::from("in"));
        assert_eq!(
            resolve_input_dir(None, Some(OsString::from("puzzles"))),
            PathBuf::from("puzzles")
        );
        assert_eq!(
            resolve_input_dir(Some(PathBuf::from("data")), Some(OsString::from("puzzles"))),
            PathBuf::from("data")
        );
        assert_eq!(
            resolve_input_dir(None, Some(OsString::new())),
            PathBuf::from("in")
        );
    }

    #[test]
    fn test_expand_tilde() {
        let plain = PathBuf::from("inputs/2025");
        assert_eq!(expand_tilde(&plain), plain);
        assert_eq!(expand_tilde(Path::new("~user")), PathBuf::from("~user"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/aoc")), home.join("aoc"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
    }

    #[test]
    fn test_from_args_normalises_lists() {
        let args = Args::try_parse_from([
            "advent", "3", "1", "3", "-y", "2025", "-p", "2,1,2", "-t", "--input-dir", "data",
            "--threads", "2",
        ])
        .unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.days, vec![1, 3]);
        assert_eq!(config.parts, vec![1, 2]);
        assert_eq!(config.year_filter, Some(2025));
        assert_eq!(config.variant, InputVariant::Test);
        assert_eq!(config.input_dir, PathBuf::from("data"));
        assert_eq!(config.thread_count, 2);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let args = Args::try_parse_from(["advent", "--threads", "0"]).unwrap();
        assert!(matches!(Config::from_args(args), Err(CliError::Config(_))));
    }
}
