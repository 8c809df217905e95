//! Turns `--input` arguments into the list of JSONL files to tag
//!
//! An argument naming an existing file is taken literally, even if it
//! contains glob metacharacters. A directory contributes every `.jsonl`
//! file below it. Anything else is a glob pattern.

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::Pattern;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Extension of the files picked up from directories
pub const JSONL_EXTENSION: &str = "jsonl";

/// How one `--input` argument is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource<'a> {
    /// An existing file
    File(&'a Path),
    /// An existing directory, searched recursively
    Directory(&'a Path),
    /// A glob pattern
    Pattern(&'a str),
}

impl<'a> InputSource<'a> {
    /// Classify `arg` against the filesystem
    pub fn classify(arg: &'a str) -> Self {
        let path = Path::new(arg);
        if path.is_file() {
            InputSource::File(path)
        } else if path.is_dir() {
            InputSource::Directory(path)
        } else {
            InputSource::Pattern(arg)
        }
    }
}

fn collect_matches(pattern: &str, arg: &str, files: &mut BTreeSet<PathBuf>) -> Result<()> {
    let entries =
        glob::glob(pattern).map_err(|_| CliError::InvalidPattern(arg.to_string()))?;

    for entry in entries {
        let path = entry.with_context(|| format!("Error reading a match of {arg}"))?;
        if path.is_file() {
            files.insert(path);
        }
    }
    Ok(())
}

/// Resolve every argument, returning sorted, de-duplicated file paths.
///
/// Fails when the arguments match no file at all. A single argument
/// matching nothing only logs a warning.
pub fn resolve_inputs(args: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for arg in args {
        let before = files.len();
        match InputSource::classify(arg) {
            InputSource::File(path) => {
                files.insert(path.to_path_buf());
            }
            InputSource::Directory(dir) => {
                let pattern = format!(
                    "{}/**/*.{JSONL_EXTENSION}",
                    Pattern::escape(&dir.to_string_lossy())
                );
                collect_matches(&pattern, arg, &mut files)?;
            }
            InputSource::Pattern(pattern) => collect_matches(pattern, arg, &mut files)?,
        }

        if files.len() == before {
            log::warn!("Input {arg} added no new files");
        }
    }

    if files.is_empty() {
        return Err(CliError::NoInputFiles(args.to_vec()).into());
    }
    Ok(files.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_patterns_are_sorted_and_unique() {
        let dir = TempDir::new().unwrap();
        for name in ["b.jsonl", "a.jsonl", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let pattern = format!("{}/*.jsonl", dir.path().display());
        let explicit = dir.path().join("b.jsonl").display().to_string();

        let files = resolve_inputs(&[pattern, explicit]).unwrap();
        assert_eq!(names(&files), vec!["a.jsonl", "b.jsonl"]);
    }

    #[test]
    fn test_directory_is_searched_recursively() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("shard-0");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("top.jsonl"), "").unwrap();
        fs::write(nested.join("deep.jsonl"), "").unwrap();
        fs::write(nested.join("skip.json"), "").unwrap();

        let files = resolve_inputs(&[dir.path().display().to_string()]).unwrap();
        assert_eq!(names(&files), vec!["deep.jsonl", "top.jsonl"]);
    }

    #[test]
    fn test_existing_file_is_taken_literally() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("[part].jsonl");
        fs::write(&path, "").unwrap();

        let arg = path.display().to_string();
        assert_eq!(InputSource::classify(&arg), InputSource::File(path.as_path()));
        assert_eq!(resolve_inputs(&[arg]).unwrap(), vec![path]);
    }

    #[test]
    fn test_no_match_is_an_error() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.jsonl", dir.path().display());
        let error = resolve_inputs(&[pattern]).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CliError>(),
            Some(CliError::NoInputFiles(_))
        ));

        // An empty directory matches nothing either.
        let error = resolve_inputs(&[dir.path().display().to_string()]).unwrap_err();
        assert!(error.to_string().starts_with("No files found"));
    }

    #[test]
    fn test_invalid_pattern() {
        let error = resolve_inputs(&["[".to_string()]).unwrap_err();
        assert!(error.to_string().contains("Invalid file pattern"));
    }
}
