//! Command-line interface module.
//!
//! Parses the command line and renders the organizer's event stream for the
//! terminal: one line per folder created or removed, a progress bar while
//! files move, and a per-category summary table at the end. All styling goes
//! through [`OutputFormatter`] so the organizer itself stays free of
//! presentation concerns.

use crate::category::CategoryTable;
use crate::organizer::{OrganizeEvent, OrganizeResult, Organizer};
use crate::output::OutputFormatter;
use clap::Parser;
use indicatif::ProgressBar;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Sort a directory's files into category subfolders by extension.
#[derive(Debug, Parser)]
#[command(name = "sortdir", version, about)]
pub struct Args {
    /// The directory to organize.
    #[arg(value_name = "DIRECTORY")]
    pub path: PathBuf,
}

/// Runs a full organization over `root`, printing progress as it happens.
///
/// Returns the number of files moved. On failure the events printed so far
/// stay on screen, so the user can see how far the run got before the error.
///
/// # Examples
///
/// ```no_run
/// use sortdir::cli::run_cli;
/// use std::path::Path;
///
/// match run_cli(Path::new("/home/user/Downloads")) {
///     Ok(moved) => println!("moved {} files", moved),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(root: &Path) -> OrganizeResult<usize> {
    OutputFormatter::info(&format!("Organizing contents of: {}", root.display()));

    let organizer = Organizer::new(CategoryTable::default());
    let mut bar: Option<ProgressBar> = None;
    let mut per_category: HashMap<String, usize> = HashMap::new();

    let moved = organizer.organize_with(root, |event| match &event {
        OrganizeEvent::CategoryCreated { .. } => OutputFormatter::plain(&event.to_string()),
        OrganizeEvent::ScanCompleted { files } => {
            OutputFormatter::plain(&event.to_string());
            if *files > 0 {
                bar = Some(OutputFormatter::create_progress_bar(*files as u64));
            }
        }
        OrganizeEvent::FileMoved { destination, .. } => {
            if let Some(category) = destination
                .parent()
                .and_then(|dir| dir.file_name())
                .and_then(|name| name.to_str())
            {
                *per_category.entry(category.to_string()).or_insert(0) += 1;
            }
            match &bar {
                Some(pb) => {
                    pb.println(event.to_string());
                    pb.inc(1);
                }
                None => OutputFormatter::plain(&event.to_string()),
            }
        }
        OrganizeEvent::DirectoryRemoved { .. } => {
            if let Some(pb) = bar.take() {
                pb.finish_and_clear();
            }
            OutputFormatter::plain(&event.to_string());
        }
        OrganizeEvent::Summary { .. } => {
            if let Some(pb) = bar.take() {
                pb.finish_and_clear();
            }
        }
    })?;

    if moved > 0 {
        OutputFormatter::summary_table(&per_category, moved);
    }
    OutputFormatter::success(&OrganizeEvent::Summary { moved }.to_string());

    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_args_parse_directory() {
        let args = Args::parse_from(["sortdir", "/tmp/downloads"]);
        assert_eq!(args.path, PathBuf::from("/tmp/downloads"));
    }

    #[test]
    fn test_run_cli_reports_moved_count() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.txt"), "text").expect("Failed to write file");
        fs::write(temp_dir.path().join("b.jpg"), "image").expect("Failed to write file");

        let moved = run_cli(temp_dir.path()).expect("run_cli failed");
        assert_eq!(moved, 2);
        assert!(temp_dir.path().join("DOCUMENTS/a.txt").is_file());
        assert!(temp_dir.path().join("IMAGES/b.jpg").is_file());
    }

    #[test]
    fn test_run_cli_invalid_root() {
        let result = run_cli(Path::new("/non/existent/path"));
        assert!(result.is_err());
    }
}
