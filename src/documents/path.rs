use std::path::{Path, PathBuf, is_separator};

use crate::core::models::DocumentLocation;

/// Maps a record's owner and title to where its PDF lives on disk.
///
/// Layout is `<root>/<owner_key>/<title>.pdf`. Both parts are used exactly as
/// stored, so the title must match the filename byte for byte. The result
/// always stays under the root: leading separators on either part are
/// dropped instead of letting an absolute component replace it.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Existence is not checked here; the extractor reports a missing file.
    #[must_use]
    pub fn resolve(&self, owner_key: &str, title: &str) -> PathBuf {
        let owner_key = owner_key.trim_start_matches(is_separator);
        let title = title.trim_start_matches(is_separator);
        // Appended rather than `set_extension`, which would eat a dot in the title.
        self.root.join(format!("{owner_key}/{title}.pdf"))
    }

    #[must_use]
    pub fn resolve_location(&self, location: &DocumentLocation) -> PathBuf {
        self.resolve(&location.owner_key, &location.title)
    }
}
