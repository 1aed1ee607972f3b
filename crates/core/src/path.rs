//! Path parsing and resolution
//!
//! The shell's position is a [`WorkingPath`]: the root marker followed by an
//! optional bucket and a chain of key segments. User input is folded onto a
//! working path left to right, understanding `~` and `..`.
//!
//! Resolution is purely lexical; whether the result exists is decided by the
//! [`NamespaceInspector`](crate::inspect::NamespaceInspector).

use std::fmt;

use crate::error::{Error, Result};

/// First segment of every working path
pub const ROOT_MARKER: &str = "root:";

/// Token that resets resolution to the root
pub const HOME: &str = "~";

/// Token that climbs one level
pub const PARENT: &str = "..";

/// Key separator; also marks folder objects
pub const SEPARATOR: char = '/';

/// The shell's position in the emulated tree
///
/// Never empty and always starts with [`ROOT_MARKER`]. Length 1 is the root,
/// length 2 is a bucket, anything longer names a key inside that bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingPath {
    segments: Vec<String>,
}

/// Where a working path points, by depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location<'a> {
    /// The list of buckets
    Root,
    /// Top level of a bucket
    Bucket(&'a str),
    /// A key inside a bucket; folder or leaf is decided by the store
    Object { bucket: &'a str, key: &'a [String] },
}

impl WorkingPath {
    /// The root path
    pub fn root() -> Self {
        Self {
            segments: vec![ROOT_MARKER.to_string()],
        }
    }

    /// Build a working path from already-split segments
    pub fn from_segments(segments: Vec<String>) -> Result<Self> {
        match segments.first() {
            None => Err(Error::InvalidPath("path resolved to nothing".into())),
            Some(first) if first != ROOT_MARKER => Err(Error::InvalidPath(format!(
                "path must start at '{ROOT_MARKER}', found '{first}'"
            ))),
            Some(_) => Ok(Self { segments }),
        }
    }

    /// True iff this is the root
    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// Classify by depth
    pub fn location(&self) -> Location<'_> {
        match self.segments.as_slice() {
            [_] => Location::Root,
            [_, bucket] => Location::Bucket(bucket),
            [_, bucket, key @ ..] => Location::Object { bucket, key },
            [] => unreachable!("working path is never empty"),
        }
    }

    /// Bucket name, if below the root
    pub fn bucket(&self) -> Option<&str> {
        self.segments.get(1).map(String::as_str)
    }

    /// Object key (segments after the bucket joined by `/`), if below a bucket
    pub fn key(&self) -> Option<String> {
        if self.segments.len() < 3 {
            return None;
        }
        Some(self.segments[2..].join("/"))
    }

    /// Key of the folder marker for this path (`key/`), if below a bucket
    pub fn folder_key(&self) -> Option<String> {
        self.key().map(|k| format!("{k}{SEPARATOR}"))
    }

    /// Prefix that lists this location's contents: empty at bucket level
    pub fn listing_prefix(&self) -> String {
        self.folder_key().unwrap_or_default()
    }

    /// Bucket and key of this path as a store address
    pub fn object_path(&self) -> Option<ObjectPath> {
        match (self.bucket(), self.key()) {
            (Some(bucket), Some(key)) => Some(ObjectPath::new(bucket, key)),
            _ => None,
        }
    }

    /// Parent path; the root is its own parent
    pub fn parent(&self) -> Self {
        let mut parent = self.clone();
        if !parent.is_root() {
            parent.segments.pop();
        }
        parent
    }

    /// True if `self` equals `other` or lies underneath it
    pub fn starts_with(&self, other: &WorkingPath) -> bool {
        self.segments.starts_with(&other.segments)
    }

    /// Resolve user input against this path
    pub fn resolve(&self, input: &str) -> Result<Self> {
        resolve(self, input)
    }
}

impl Default for WorkingPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for WorkingPath {
    /// `root:/` at the root, otherwise `root:/bucket/a/b`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "{ROOT_MARKER}{SEPARATOR}");
        }
        f.write_str(ROOT_MARKER)?;
        for segment in &self.segments[1..] {
            write!(f, "{SEPARATOR}{segment}")?;
        }
        Ok(())
    }
}

/// Resolve `input` against `working`
///
/// Input whose first `/`-delimited token is the root marker or `~` is
/// absolute; anything else starts from a copy of `working`. Empty tokens are
/// dropped, then tokens fold left to right: `~` resets to the root, `..`
/// drops the last segment unless already at the root, and any
/// other token is appended.
pub fn resolve(working: &WorkingPath, input: &str) -> Result<WorkingPath> {
    let absolute = is_absolute(input);
    let mut acc: Vec<String> = if absolute {
        Vec::new()
    } else {
        working.segments.clone()
    };

    for token in input.split(SEPARATOR).filter(|t| !t.is_empty()) {
        match token {
            HOME => acc = vec![ROOT_MARKER.to_string()],
            PARENT => {
                if acc.len() > 1 {
                    acc.pop();
                }
            }
            other => acc.push(other.to_string()),
        }
    }

    WorkingPath::from_segments(acc)
}

/// True if `input` names a location from the root
pub fn is_absolute(input: &str) -> bool {
    matches!(input.split(SEPARATOR).next(), Some(HOME | ROOT_MARKER))
}

/// A bucket plus an exact object key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectPath {
    /// Bucket name
    pub bucket: String,
    /// Object key; folder markers end with `/`
    pub key: String,
}

impl ObjectPath {
    /// Create a new ObjectPath
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Whether the key denotes a folder marker
    pub fn is_folder_marker(&self) -> bool {
        self.key.ends_with(SEPARATOR)
    }

    /// The same address with a trailing separator
    pub fn as_folder(&self) -> Self {
        if self.is_folder_marker() {
            self.clone()
        } else {
            Self::new(&self.bucket, format!("{}{SEPARATOR}", self.key))
        }
    }

    /// Last component of the key, ignoring a trailing separator
    pub fn file_name(&self) -> &str {
        let key = self.key.trim_end_matches(SEPARATOR);
        key.rsplit(SEPARATOR).next().unwrap_or(key)
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ROOT_MARKER}{SEPARATOR}{}{SEPARATOR}{}", self.bucket, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> WorkingPath {
        let mut all = vec![ROOT_MARKER.to_string()];
        all.extend(segments.iter().map(|s| s.to_string()));
        WorkingPath::from_segments(all).unwrap()
    }

    #[test]
    fn test_root_display() {
        assert_eq!(WorkingPath::root().to_string(), "root:/");
        assert_eq!(path(&["photos", "2024"]).to_string(), "root:/photos/2024");
    }

    #[test]
    fn test_location_by_depth() {
        assert_eq!(WorkingPath::root().location(), Location::Root);
        assert_eq!(path(&["b"]).location(), Location::Bucket("b"));
        match path(&["b", "x", "y"]).location() {
            Location::Object { bucket, key } => {
                assert_eq!(bucket, "b");
                assert_eq!(key, ["x".to_string(), "y".to_string()]);
            }
            other => panic!("unexpected location {other:?}"),
        }
    }

    #[test]
    fn test_key_and_folder_key() {
        let p = path(&["b", "docs", "a.txt"]);
        assert_eq!(p.bucket(), Some("b"));
        assert_eq!(p.key().as_deref(), Some("docs/a.txt"));
        assert_eq!(p.folder_key().as_deref(), Some("docs/a.txt/"));

        assert_eq!(path(&["b"]).key(), None);
        assert_eq!(path(&["b"]).listing_prefix(), "");
        assert_eq!(path(&["b", "docs"]).listing_prefix(), "docs/");
    }

    #[test]
    fn test_parent_at_root_is_root() {
        let root = WorkingPath::root();
        assert_eq!(root.parent(), root);
        assert_eq!(path(&["b", "x"]).parent(), path(&["b"]));
    }

    #[test]
    fn test_resolve_relative() {
        let cwd = path(&["x"]);
        assert_eq!(resolve(&cwd, "a/../b").unwrap(), path(&["x", "b"]));
        assert_eq!(resolve(&cwd, "docs").unwrap(), path(&["x", "docs"]));
    }

    #[test]
    fn test_resolve_parent_at_root_is_noop() {
        let root = WorkingPath::root();
        assert_eq!(resolve(&root, "..").unwrap(), root);
        assert_eq!(resolve(&root, "../../..").unwrap(), root);
    }

    #[test]
    fn test_resolve_child_then_parent_round_trips() {
        for cwd in [WorkingPath::root(), path(&["b"]), path(&["b", "d1", "d2"])] {
            let child = resolve(&cwd, "x").unwrap();
            assert_eq!(resolve(&child, "..").unwrap(), cwd);
        }
    }

    #[test]
    fn test_resolve_is_left_fold() {
        let cwd = path(&["b", "docs"]);
        for (a, b) in [("a", "b"), ("..", "c"), ("~", "z"), ("a", ".."), (".", "q")] {
            let joined = resolve(&cwd, &format!("{a}/{b}")).unwrap();
            let stepped = resolve(&resolve(&cwd, a).unwrap(), b).unwrap();
            assert_eq!(joined, stepped, "{a}/{b}");
        }
    }

    #[test]
    fn test_resolve_absolute_forms() {
        let cwd = path(&["b", "docs"]);
        assert_eq!(resolve(&cwd, "~").unwrap(), WorkingPath::root());
        assert_eq!(resolve(&cwd, "~/other/x").unwrap(), path(&["other", "x"]));
        assert_eq!(resolve(&cwd, "root:/other").unwrap(), path(&["other"]));
        assert_eq!(resolve(&cwd, "root:").unwrap(), WorkingPath::root());
    }

    #[test]
    fn test_resolve_tilde_midway_resets() {
        let cwd = path(&["b"]);
        assert_eq!(resolve(&cwd, "a/~/c").unwrap(), path(&["c"]));
    }

    #[test]
    fn test_resolve_discards_empty_tokens() {
        let cwd = path(&["b"]);
        assert_eq!(resolve(&cwd, "a//b/").unwrap(), path(&["b", "a", "b"]));
        // a leading slash is just an empty first token
        assert_eq!(resolve(&cwd, "/a").unwrap(), path(&["b", "a"]));
        assert_eq!(resolve(&cwd, "").unwrap(), cwd);
    }

    #[test]
    fn test_resolve_dot_is_an_ordinary_segment() {
        let cwd = path(&["x"]);
        assert_eq!(resolve(&cwd, ".").unwrap(), path(&["x", "."]));
        assert_eq!(
            resolve(&path(&["b", "docs"]), "./a").unwrap(),
            path(&["b", "docs", ".", "a"])
        );
    }

    #[test]
    fn test_from_segments_rejects_unrooted() {
        assert!(matches!(
            WorkingPath::from_segments(vec![]),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(
            WorkingPath::from_segments(vec!["bucket".into()]),
            Err(Error::InvalidPath(_))
        ));
    }

    #[test]
    fn test_starts_with() {
        let docs = path(&["b", "docs"]);
        assert!(path(&["b", "docs", "x"]).starts_with(&docs));
        assert!(docs.starts_with(&docs));
        assert!(!path(&["b"]).starts_with(&docs));
    }

    #[test]
    fn test_object_path() {
        let p = ObjectPath::new("b", "docs/a.txt");
        assert_eq!(p.file_name(), "a.txt");
        assert!(!p.is_folder_marker());
        assert_eq!(p.as_folder().key, "docs/a.txt/");
        assert_eq!(p.to_string(), "root:/b/docs/a.txt");

        assert_eq!(ObjectPath::new("b", "docs/").file_name(), "docs");
        assert_eq!(
            path(&["b", "x", "y"]).object_path(),
            Some(ObjectPath::new("b", "x/y"))
        );
        assert_eq!(path(&["b"]).object_path(), None);
    }
}
