//! Stream paths: `/`-rooted, slash-separated names in the host's tree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalised path such as `/bri` or `/nt160e/zone_temp`.
///
/// Construction never fails: empty segments are dropped and a leading `/`
/// is added, so `"bri"`, `"/bri"` and `"//bri/"` all name the same stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct StreamPath(String);

impl StreamPath {
    /// Normalise `raw` into a path.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        let segments: Vec<&str> = raw
            .as_ref()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        Self(format!("/{}", segments.join("/")))
    }

    /// The root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Append `child` below this path.
    #[must_use]
    pub fn join(&self, child: impl AsRef<str>) -> Self {
        Self::new(format!("{}/{}", self.0, child.as_ref()))
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// The last segment (empty for the root).
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Borrow the normalised path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StreamPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StreamPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for StreamPath {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<StreamPath> for String {
    fn from(path: StreamPath) -> Self {
        path.0
    }
}
