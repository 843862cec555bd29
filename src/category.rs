/// File categorization by extension.
///
/// This module provides an ordered mapping from category names to the file
/// extensions they cover, used to decide which subfolder a file belongs in.
///
/// # Examples
///
/// ```
/// use sortdir::category::CategoryTable;
///
/// let table = CategoryTable::default();
/// assert_eq!(table.classify("report.pdf"), "DOCUMENTS");
/// assert_eq!(table.classify("Photo.JPG"), "IMAGES");
/// assert_eq!(table.classify("notes"), "OTHER");
/// ```
use std::collections::HashSet;
use std::path::Path;

/// Extracts the extension of a file name, lowercased and with the leading dot.
///
/// Returns the empty string for names without an extension, including bare
/// dotfiles such as `.gitignore`.
///
/// # Examples
///
/// ```
/// use sortdir::category::extension_of;
///
/// assert_eq!(extension_of("Photo.JPG"), ".jpg");
/// assert_eq!(extension_of("archive.tar.gz"), ".gz");
/// assert_eq!(extension_of("README"), "");
/// assert_eq!(extension_of(".gitignore"), "");
/// ```
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// An ordered mapping from category name to a set of file extensions.
///
/// Each category owns a set of lowercase extensions (leading dot included).
/// Classification picks the first category, in insertion order, whose set
/// contains a file's extension; files matching no category fall back to the
/// designated fallback category, which owns no extensions of its own.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    rules: Vec<(String, HashSet<String>)>,
    fallback: String,
}

impl CategoryTable {
    /// Creates an empty table with the given fallback category name.
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            fallback: fallback.into(),
        }
    }

    /// Appends a category with its extensions.
    ///
    /// Extensions are normalized to lowercase with a leading dot, so
    /// `"pdf"` and `".PDF"` register the same entry. Insertion order is the
    /// tie-break when an extension would match more than one category.
    pub fn add_category(&mut self, name: impl Into<String>, extensions: &[&str]) {
        let set = extensions
            .iter()
            .map(|ext| {
                let ext = ext.to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        self.rules.push((name.into(), set));
    }

    /// Returns all category names in table order, fallback last.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .map(|(name, _)| name.as_str())
            .chain(std::iter::once(self.fallback.as_str()))
    }

    /// Returns the fallback category name.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Returns true if `name` exactly matches a category name.
    ///
    /// The match is case-sensitive: a directory named `audio` is not the
    /// `AUDIO` category.
    pub fn contains_name(&self, name: &str) -> bool {
        name == self.fallback || self.rules.iter().any(|(rule_name, _)| rule_name == name)
    }

    /// Classifies a file name into a category.
    ///
    /// The file's extension is matched against each category's set in table
    /// order; the first hit wins. Files without an extension, or with an
    /// extension no category covers, classify as the fallback.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortdir::category::CategoryTable;
    ///
    /// let table = CategoryTable::default();
    /// assert_eq!(table.classify("song.mp3"), "AUDIO");
    /// assert_eq!(table.classify("data.xyz"), "OTHER");
    /// ```
    pub fn classify(&self, file_name: &str) -> &str {
        let extension = extension_of(file_name);
        for (name, extensions) in &self.rules {
            if extensions.contains(&extension) {
                return name;
            }
        }
        &self.fallback
    }
}

impl Default for CategoryTable {
    /// The standard table: eight extension categories plus the `OTHER`
    /// fallback.
    fn default() -> Self {
        let mut table = Self::new("OTHER");
        table.add_category("DOCUMENTS", &["pdf", "doc", "docx", "txt", "rtf", "odt"]);
        table.add_category("IMAGES", &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"]);
        table.add_category("AUDIO", &["mp3", "wav", "flac", "m4a", "aac"]);
        table.add_category("VIDEO", &["mp4", "avi", "mkv", "mov", "wmv"]);
        table.add_category("ARCHIVES", &["zip", "rar", "7z", "tar", "gz"]);
        table.add_category("EXECUTABLES", &["exe", "msi"]);
        table.add_category("CODE", &["py", "java", "cpp", "c", "html", "css", "js"]);
        table.add_category("SPREADSHEETS", &["csv", "xls", "xlsx", "ods"]);
        table
    }
}
