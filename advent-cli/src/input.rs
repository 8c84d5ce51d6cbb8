//! Puzzle input files on disk

use crate::error::InputError;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Which input file of a day to read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputVariant {
    /// The personal puzzle input
    #[default]
    Full,
    /// The small example from the puzzle text
    Test,
}

/// File-based store of puzzle inputs
///
/// Directory structure: `{root}/{year}/{day:02}.in`, with `{day:02}_test.in`
/// next to it for the example input.
#[derive(Debug, Clone)]
pub struct InputStore {
    root: PathBuf,
}

impl InputStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the file path for a specific year/day
    pub fn path(&self, year: u16, day: u8, variant: InputVariant) -> PathBuf {
        let suffix = match variant {
            InputVariant::Full => "",
            InputVariant::Test => "_test",
        };
        self.root
            .join(year.to_string())
            .join(format!("{day:02}{suffix}.in"))
    }

    /// Read the input file as ordered lines without their terminators
    pub fn read_lines(
        &self,
        year: u16,
        day: u8,
        variant: InputVariant,
    ) -> Result<Vec<String>, InputError> {
        let path = self.path(year, day, variant);
        let content = fs::read_to_string(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => InputError::Missing { path: path.clone() },
            _ => InputError::Read {
                path: path.clone(),
                source,
            },
        })?;
        Ok(content.lines().map(str::to_owned).collect())
    }

    /// Read the input file with line endings normalised to `\n`
    pub fn read(&self, year: u16, day: u8, variant: InputVariant) -> Result<String, InputError> {
        self.read_lines(year, day, variant).map(|lines| lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(file: &str, content: &[u8]) -> (TempDir, InputStore) {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("2025");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), content).unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        (temp, store)
    }

    #[test]
    fn test_path_format() {
        let store = InputStore::new(PathBuf::from("in"));
        assert_eq!(
            store.path(2025, 3, InputVariant::Full),
            PathBuf::from("in/2025/03.in")
        );
        assert_eq!(
            store.path(2022, 12, InputVariant::Test),
            PathBuf::from("in/2022/12_test.in")
        );
    }

    #[test]
    fn test_read_lines_returns_file_lines_in_order() {
        let (_temp, store) = store_with("01.in", b"L68\nL30\n\nR48\n");
        let lines = store.read_lines(2025, 1, InputVariant::Full).unwrap();
        assert_eq!(lines, vec!["L68", "L30", "", "R48"]);
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let (_temp, store) = store_with("02_test.in", b"a b\r\n  c\r\nd");
        let lines = store.read_lines(2025, 2, InputVariant::Test).unwrap();
        assert_eq!(lines, vec!["a b", "  c", "d"]);
        assert_eq!(store.read(2025, 2, InputVariant::Test).unwrap(), "a b\n  c\nd");
    }

    #[test]
    fn test_variants_are_separate_files() {
        let (_temp, store) = store_with("05_test.in", b"example\n");
        assert!(store.read(2025, 5, InputVariant::Test).is_ok());
        assert!(matches!(
            store.read(2025, 5, InputVariant::Full),
            Err(InputError::Missing { .. })
        ));
    }

    #[test]
    fn test_missing_file_names_path() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        let err = store.read_lines(2025, 9, InputVariant::Full).unwrap_err();
        let expected = temp.path().join("2025").join("09.in");
        match &err {
            InputError::Missing { path } => assert_eq!(path, &expected),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().contains("09.in"));
    }
}
