//! Sentinel link parsing.
//!
//! A sentinel link looks like `embedded-codesandbox://react/counter?view=split`.
//! The part before `?` names a directory relative to the root, the query
//! string carries per-link embed options.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::error::EmbedError;

/// Values given for one query key, in link order. `None` is a key without `=`.
pub type QueryValues = Vec<Option<String>>;

/// Per-link embed options, ordered by key.
pub type LinkQuery = BTreeMap<String, QueryValues>;

/// A parsed sentinel link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxLink {
    /// Path portion after the protocol, before `?`.
    pub base: String,
    /// Per-link embed options from the query string.
    pub query: LinkQuery,
}

impl SandboxLink {
    /// Parse a link that starts with `protocol`.
    ///
    /// The query is decoded with form-urlencoded rules (`+` is a space).
    /// Repeated keys keep every value in order. A key without `=` is kept as
    /// a bare flag, distinct from `key=`.
    #[must_use]
    pub fn parse(url: &str, protocol: &str) -> Self {
        let rest = url.strip_prefix(protocol).unwrap_or(url);
        let (base, query) = match rest.split_once('?') {
            Some((base, query)) => (base, parse_query(query)),
            None => (rest, LinkQuery::new()),
        };
        Self {
            base: base.to_owned(),
            query,
        }
    }

    /// Resolve the example directory below `root`.
    ///
    /// The base path is joined onto `root` and normalized lexically: empty
    /// and `.` segments are dropped, `..` removes the previous segment. A
    /// leading `/` is treated as relative to the root.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::OutsideRoot`] if `..` segments climb above `root`.
    pub fn directory(&self, root: &Path) -> Result<PathBuf, EmbedError> {
        let mut segments: Vec<&str> = Vec::new();
        for segment in self.base.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err(EmbedError::OutsideRoot {
                            link: self.base.clone(),
                        });
                    }
                }
                name => segments.push(name),
            }
        }

        let mut dir = root.to_path_buf();
        for segment in segments {
            // Segments like `C:` would replace the whole path when joined.
            if Path::new(segment)
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
            {
                return Err(EmbedError::OutsideRoot {
                    link: self.base.clone(),
                });
            }
            dir.push(segment);
        }
        Ok(dir)
    }
}

fn parse_query(query: &str) -> LinkQuery {
    let mut parsed = LinkQuery::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let Some((key, value)) = url::form_urlencoded::parse(pair.as_bytes()).next() else {
            continue;
        };
        let value = pair.contains('=').then(|| value.into_owned());
        parsed.entry(key.into_owned()).or_default().push(value);
    }
    parsed
}
