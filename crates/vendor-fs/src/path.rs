//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Provides consistent path handling across platforms by normalizing
/// all paths to forward slashes internally and converting to
/// platform-native format only at I/O boundaries.
///
/// Normalization also collapses `.` and `..` segments, duplicate
/// separators and trailing slashes, so two spellings of the same
/// location compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    ///
    /// The segment is always appended, even when it starts with a slash.
    pub fn join(&self, segment: &str) -> Self {
        if segment.is_empty() || segment == "." {
            return self.clone();
        }
        if self.inner.is_empty() {
            return Self::new(segment);
        }
        Self {
            inner: clean(&format!("{}/{}", self.inner, segment)),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: clean(&trimmed[..=idx]),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the file name without its extension.
    pub fn file_stem(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[..idx]),
            _ => Some(name),
        }
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Whether the path is rooted (`/x`, `//server/x` or `C:/x`).
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/') || drive_prefix(&self.inner).is_some()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Return the remainder of this path below `root`.
    ///
    /// The suffix keeps its leading slash (`/acme/lib`), and is empty when
    /// both paths are equal. Returns `None` when the path is not `root`
    /// or one of its descendants; `/vendor-other` is not below `/vendor`.
    pub fn strip_root(&self, root: &NormalizedPath) -> Option<&str> {
        let base = root.inner.trim_end_matches('/');
        let rest = self.inner.strip_prefix(base)?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}

/// Returns the `X:` drive prefix of a Windows-style `X:/...` path.
fn drive_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
    {
        Some(&s[..2])
    } else {
        None
    }
}

fn clean(raw: &str) -> String {
    let slashed = raw.replace('\\', "/");
    if slashed.is_empty() {
        return slashed;
    }

    let (prefix, rest) = if slashed.starts_with("//") && !slashed.starts_with("///") {
        ("//".to_string(), &slashed[2..])
    } else if let Some(rest) = slashed.strip_prefix('/') {
        ("/".to_string(), rest)
    } else if let Some(drive) = drive_prefix(&slashed) {
        (format!("{drive}/"), &slashed[drive.len()..])
    } else {
        (String::new(), slashed.as_str())
    };
    let absolute = !prefix.is_empty();

    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    if absolute {
        format!("{prefix}{body}")
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_collapses_dot_segments() {
        assert_eq!(clean("/a/./b/../c"), "/a/c");
        assert_eq!(clean("a/b/../../.."), "..");
        assert_eq!(clean("/.."), "/");
        assert_eq!(clean("a/.."), ".");
    }

    #[test]
    fn clean_strips_trailing_and_duplicate_slashes() {
        assert_eq!(clean("/a//b///"), "/a/b");
        assert_eq!(clean("C:\\vendor\\acme\\"), "C:/vendor/acme");
    }

    #[test]
    fn clean_keeps_network_prefix() {
        assert_eq!(clean("\\\\server\\share\\x"), "//server/share/x");
    }
}
