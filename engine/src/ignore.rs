//! Directory names excluded from the walk.
//!
//! Matching is exact equality on a directory's base name: `node_modules`
//! is skipped, `my-node_modules-archive` is not. There are no patterns.

use std::collections::HashSet;
use std::ffi::OsStr;

/// Build outputs, caches, dependency trees, coverage and temp directories.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "out",
    ".next",
    ".nuxt",
    ".svelte-kit",
    ".output",
    ".cache",
    ".turbo",
    ".vite",
    ".parcel-cache",
    ".eslintcache",
    ".angular",
    ".sass-cache",
    ".vercel",
    "coverage",
    ".nyc_output",
    ".tmp",
    "tmp",
    "temp",
];

/// Immutable set of directory base names to skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    names: HashSet<String>,
}

impl IgnoreSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        IgnoreSet {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// A set that ignores nothing.
    pub fn empty() -> Self {
        IgnoreSet {
            names: HashSet::new(),
        }
    }

    /// A new set holding these names plus `extra`.
    pub fn with_extra<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = self.names.clone();
        names.extend(extra.into_iter().map(Into::into));
        IgnoreSet { names }
    }

    /// Exact base-name match. Names that are not valid UTF-8 never match.
    pub fn contains(&self, name: &OsStr) -> bool {
        name.to_str().is_some_and(|n| self.names.contains(n))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order, for display.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        IgnoreSet::new(DEFAULT_IGNORED_DIRS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_has_every_name() {
        let set = IgnoreSet::default();
        assert_eq!(set.len(), 21);
        for name in DEFAULT_IGNORED_DIRS {
            assert!(set.contains(OsStr::new(name)), "{name} should be ignored");
        }
    }

    #[test]
    fn test_match_is_exact() {
        let set = IgnoreSet::default();
        assert!(set.contains(OsStr::new("node_modules")));
        assert!(!set.contains(OsStr::new("my-node_modules-archive")));
        assert!(!set.contains(OsStr::new("Node_Modules")));
        assert!(!set.contains(OsStr::new("dist2")));
        assert!(!set.contains(OsStr::new("src/dist")));
    }

    #[test]
    fn test_with_extra_leaves_original_untouched() {
        let base = IgnoreSet::default();
        let extended = base.with_extra(["vendor"]);
        assert!(extended.contains(OsStr::new("vendor")));
        assert!(extended.contains(OsStr::new("dist")));
        assert!(!base.contains(OsStr::new("vendor")));
    }

    #[test]
    fn test_empty_set_ignores_nothing() {
        let set = IgnoreSet::empty();
        assert!(set.is_empty());
        assert!(!set.contains(OsStr::new("node_modules")));
    }

    #[test]
    fn test_sorted_names() {
        let set = IgnoreSet::new(["tmp", ".cache", "dist"]);
        assert_eq!(set.sorted_names(), vec![".cache", "dist", "tmp"]);
    }
}
