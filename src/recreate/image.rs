//! Image reference parsing and tag resolution.

use std::fmt;

/// A parsed image reference, split into repository and tag.
///
/// Parsing splits at the *last* `:` so repositories containing a registry
/// port keep their path intact once a tag is present. A reference without a
/// separator gets the implicit `latest` tag; the repository is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Repository, possibly registry-qualified (e.g. `registry.example.com/app`)
    pub repository: String,
    /// Tag, defaulting to `latest`
    pub tag: String,
}

impl ImageReference {
    /// Parse an image string into repository and tag.
    pub fn parse(image: &str) -> Self {
        match image.rfind(':') {
            // A separator at position 0 would leave the repository empty.
            Some(idx) if idx > 0 => Self {
                repository: image[..idx].to_string(),
                tag: image[idx + 1..].to_string(),
            },
            _ => Self {
                repository: image.to_string(),
                tag: "latest".to_string(),
            },
        }
    }

    /// Parse an image string and merge in a caller-requested tag.
    ///
    /// An absent or empty desired tag keeps whatever tag the image string
    /// already carries (including the implicit `latest`).
    pub fn resolve(image: &str, desired_tag: Option<&str>) -> Self {
        let mut reference = Self::parse(image);
        if let Some(tag) = desired_tag
            && !tag.is_empty()
        {
            reference.tag = tag.to_string();
        }
        reference
    }

    /// The registry host component, if the repository carries one.
    ///
    /// Follows the engine's convention: the first path segment is a registry
    /// host only when it contains a `.` or a `:`, or is `localhost`.
    pub fn registry_host(&self) -> Option<&str> {
        let (first, _) = self.repository.split_once('/')?;
        if first == "localhost" || first.contains('.') || first.contains(':') {
            Some(first)
        } else {
            None
        }
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}
