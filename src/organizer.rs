/// File organization pipeline for moving files into category directories.
///
/// This module provides the [`Organizer`], which runs a single-pass batch
/// operation over a root directory: category folders are created, files are
/// discovered recursively, each file is classified by extension and moved
/// into its category folder (renaming on collision), and directories left
/// empty afterwards are pruned. Progress is reported as a stream of
/// [`OrganizeEvent`] values that any caller can render or discard.
use crate::category::CategoryTable;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A progress event produced while organizing a directory.
///
/// Events carry structured data and render as human-readable lines through
/// `Display`, so presentation layers can either format them themselves or
/// print them as-is.
#[derive(Debug, Clone)]
pub enum OrganizeEvent {
    /// A category folder was created under the root. Emitted only for
    /// folders that did not already exist.
    CategoryCreated {
        /// The category name, which is also the folder name.
        name: String,
    },
    /// Discovery finished; `files` is the number of files queued for moving.
    ScanCompleted { files: usize },
    /// A file was moved into its category folder.
    FileMoved {
        /// The path the file was discovered at.
        source: PathBuf,
        /// The final destination, possibly renamed to avoid a collision.
        destination: PathBuf,
    },
    /// An empty non-category directory was deleted during cleanup.
    DirectoryRemoved { path: PathBuf },
    /// The run finished; `moved` is the total number of files moved.
    Summary { moved: usize },
}

impl fmt::Display for OrganizeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CategoryCreated { name } => write!(f, "Created folder: {name}"),
            Self::ScanCompleted { files } => {
                let noun = if *files == 1 { "file" } else { "files" };
                write!(f, "Found {files} {noun} to organize")
            }
            Self::FileMoved {
                source,
                destination,
            } => {
                let file = source
                    .file_name()
                    .unwrap_or(source.as_os_str())
                    .to_string_lossy();
                let folder = destination
                    .parent()
                    .and_then(|dir| dir.file_name())
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_default();
                let renamed = destination
                    .file_name()
                    .unwrap_or(destination.as_os_str())
                    .to_string_lossy();
                write!(f, "Moved: {file} -> {folder}/{renamed}")
            }
            Self::DirectoryRemoved { path } => {
                write!(f, "Removed empty folder: {}", path.display())
            }
            Self::Summary { moved } => {
                let noun = if *moved == 1 { "file" } else { "files" };
                write!(f, "Done! Organized {moved} {noun}")
            }
        }
    }
}

/// Errors that can occur while organizing a directory.
#[derive(Debug)]
pub enum OrganizeError {
    /// The root path does not exist or is not a directory.
    InvalidRoot { path: PathBuf },
    /// A filesystem operation failed. The run aborts at the first failure;
    /// files already moved stay where they are.
    Io {
        /// The operation that failed, e.g. `"move"` or `"create directory"`.
        action: &'static str,
        /// The path the operation was applied to.
        path: PathBuf,
        source: io::Error,
    },
}

impl fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRoot { path } => {
                write!(f, "Invalid root {}: not an existing directory", path.display())
            }
            Self::Io {
                action,
                path,
                source,
            } => {
                write!(f, "Failed to {} {}: {}", action, path.display(), source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidRoot { .. } => None,
        }
    }
}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// The collected outcome of a successful organization run.
#[derive(Debug)]
pub struct OrganizeReport {
    /// Total number of files moved.
    pub moved: usize,
    /// Every event the run produced, in order, ending with
    /// [`OrganizeEvent::Summary`].
    pub events: Vec<OrganizeEvent>,
}

/// Organizes the files under a root directory into category subfolders.
///
/// The organizer owns its [`CategoryTable`]; the same instance can be run
/// against any number of roots.
///
/// # Examples
///
/// ```no_run
/// use sortdir::category::CategoryTable;
/// use sortdir::organizer::Organizer;
/// use std::path::Path;
///
/// let organizer = Organizer::new(CategoryTable::default());
/// match organizer.organize(Path::new("/home/user/Downloads")) {
///     Ok(report) => println!("moved {} files", report.moved),
///     Err(e) => eprintln!("organization failed: {}", e),
/// }
/// ```
pub struct Organizer {
    table: CategoryTable,
}

impl Organizer {
    /// Creates an organizer using the given category table.
    pub fn new(table: CategoryTable) -> Self {
        Self { table }
    }

    /// Returns the category table this organizer classifies with.
    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    /// Organizes `root`, collecting all events into the returned report.
    ///
    /// On failure the collected events are discarded with the partial run;
    /// callers that need the event stream up to the point of failure should
    /// use [`Organizer::organize_with`], which delivers each event before
    /// the operation that might fail next.
    pub fn organize(&self, root: &Path) -> OrganizeResult<OrganizeReport> {
        let mut events = Vec::new();
        let moved = self.organize_with(root, |event| events.push(event))?;
        Ok(OrganizeReport { moved, events })
    }

    /// Organizes `root`, streaming progress events to `observer`.
    ///
    /// Runs the full pipeline: category provisioning, recursive discovery
    /// (pruning category folders), classification and collision-safe moves,
    /// and empty-folder cleanup. Returns the number of files moved.
    ///
    /// The first I/O failure aborts the remaining steps; everything moved up
    /// to that point stays moved, and the observer has already received the
    /// corresponding events.
    pub fn organize_with<F>(&self, root: &Path, mut observer: F) -> OrganizeResult<usize>
    where
        F: FnMut(OrganizeEvent),
    {
        if !root.is_dir() {
            return Err(OrganizeError::InvalidRoot {
                path: root.to_path_buf(),
            });
        }

        self.provision_categories(root, &mut observer)?;

        let files = self.discover_files(root)?;
        observer(OrganizeEvent::ScanCompleted {
            files: files.len(),
        });

        let mut moved = 0usize;
        for file in files {
            let file_name = match file.file_name() {
                Some(name) => name.to_os_string(),
                None => {
                    return Err(OrganizeError::Io {
                        action: "move",
                        path: file,
                        source: io::Error::new(
                            io::ErrorKind::InvalidInput,
                            "file has no name component",
                        ),
                    });
                }
            };

            let category = self.table.classify(&file_name.to_string_lossy());
            let destination = resolve_destination(&root.join(category), &file_name);

            fs::rename(&file, &destination).map_err(|source| OrganizeError::Io {
                action: "move",
                path: file.clone(),
                source,
            })?;
            moved += 1;
            observer(OrganizeEvent::FileMoved {
                source: file,
                destination,
            });
        }

        self.remove_empty_directories(root, &mut observer)?;

        observer(OrganizeEvent::Summary { moved });
        Ok(moved)
    }

    /// Ensures every category folder exists directly under the root.
    ///
    /// Emits one [`OrganizeEvent::CategoryCreated`] per folder actually
    /// created; folders that already exist are left alone silently.
    fn provision_categories<F>(&self, root: &Path, observer: &mut F) -> OrganizeResult<()>
    where
        F: FnMut(OrganizeEvent),
    {
        for name in self.table.names() {
            let dir = root.join(name);
            if !dir.exists() {
                fs::create_dir(&dir).map_err(|source| OrganizeError::Io {
                    action: "create directory",
                    path: dir.clone(),
                    source,
                })?;
                observer(OrganizeEvent::CategoryCreated {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Walks the root recursively and collects every file to organize.
    ///
    /// Descent into any directory below the root whose name equals a
    /// category name is pruned entirely, so files already organized are
    /// never picked up again. The prune applies at any depth, which also
    /// skips user directories that happen to share a category's name.
    /// Entries are visited in file-name order so a run's move order is
    /// deterministic. Symlinks are not followed.
    fn discover_files(&self, root: &Path) -> OrganizeResult<Vec<PathBuf>> {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                match entry.file_name().to_str() {
                    Some(name) => !self.table.contains_name(name),
                    None => true,
                }
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|err| {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                OrganizeError::Io {
                    action: "scan",
                    path,
                    source: err.into(),
                }
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Deletes directories left empty by the move step, children before
    /// parents, so chains of nested empty folders collapse in one pass.
    ///
    /// Category folders are never deleted, even when empty.
    fn remove_empty_directories<F>(&self, root: &Path, observer: &mut F) -> OrganizeResult<()>
    where
        F: FnMut(OrganizeEvent),
    {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .contents_first(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|err| {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                OrganizeError::Io {
                    action: "scan",
                    path,
                    source: err.into(),
                }
            })?;
            if !entry.file_type().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str()
                && self.table.contains_name(name)
            {
                continue;
            }

            let path = entry.path();
            let mut children = fs::read_dir(path).map_err(|source| OrganizeError::Io {
                action: "read directory",
                path: path.to_path_buf(),
                source,
            })?;
            if children.next().is_none() {
                fs::remove_dir(path).map_err(|source| OrganizeError::Io {
                    action: "remove directory",
                    path: path.to_path_buf(),
                    source,
                })?;
                observer(OrganizeEvent::DirectoryRemoved {
                    path: entry.into_path(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Organizer {
    fn default() -> Self {
        Self::new(CategoryTable::default())
    }
}

/// Picks a destination path in `dir` for `file_name` that does not collide
/// with an existing file.
///
/// The direct name is used when free; otherwise `<stem>_<n><ext>` is tried
/// for n = 1, 2, ... until a free name is found. The counter strictly
/// increases, so the search terminates even when the file's own directory is
/// the destination.
fn resolve_destination(dir: &Path, file_name: &OsStr) -> PathBuf {
    let direct = dir.join(file_name);
    if !direct.exists() {
        return direct;
    }

    let name = file_name.to_string_lossy();
    let (stem, ext) = split_name(&name);
    let mut counter = 1u32;
    loop {
        let candidate = dir.join(format!("{stem}_{counter}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Splits a file name at the last dot into stem and extension (dot kept with
/// the extension). Names without an extension, including bare dotfiles,
/// yield an empty extension.
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) if index > 0 => name.split_at(index),
        _ => (name, ""),
    }
}
