//! sortdir - sort a directory's files into category subfolders
//!
//! This library classifies files by extension into a fixed set of categories,
//! moves each file into a matching subfolder under a chosen root directory,
//! renames on collision, and prunes folders left empty afterward. Progress is
//! reported as a typed event stream that any frontend can render.

pub mod category;
pub mod cli;
pub mod organizer;
pub mod output;

pub use category::CategoryTable;
pub use organizer::{OrganizeError, OrganizeEvent, OrganizeReport, OrganizeResult, Organizer};
pub use output::OutputFormatter;

pub use cli::{Args, run_cli};
