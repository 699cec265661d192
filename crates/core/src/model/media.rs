use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

//
// ─── ERRORS (domain validation) ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaValidationError {
    #[error("media locator cannot be empty")]
    EmptyLocator,

    #[error("media locator is not a valid URL: {0}")]
    InvalidUrl(String),
}

//
// ─── VIDEO LOCATOR ─────────────────────────────────────────────────────────────
//

/// Where a playable video lives: a remote URL or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoLocator {
    FilePath(PathBuf),
    Url(Url),
}

impl VideoLocator {
    /// # Errors
    ///
    /// Returns `MediaValidationError::EmptyLocator` for an empty path.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, MediaValidationError> {
        let p = path.into();
        if p.as_os_str().is_empty() {
            return Err(MediaValidationError::EmptyLocator);
        }
        Ok(VideoLocator::FilePath(p))
    }

    /// # Errors
    ///
    /// Returns `MediaValidationError` if the string is blank or not a URL.
    pub fn from_url(url: impl AsRef<str>) -> Result<Self, MediaValidationError> {
        let s = url.as_ref().trim();
        if s.is_empty() {
            return Err(MediaValidationError::EmptyLocator);
        }
        let u = Url::parse(s).map_err(|_| MediaValidationError::InvalidUrl(s.to_string()))?;
        Ok(VideoLocator::Url(u))
    }

    /// Parses either form: anything with a URL scheme is a URL, the rest a path.
    ///
    /// # Errors
    ///
    /// Returns `MediaValidationError` if the input is blank or a malformed URL.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, MediaValidationError> {
        let s = raw.as_ref().trim();
        if s.contains("://") {
            Self::from_url(s)
        } else {
            Self::from_file(s)
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            VideoLocator::FilePath(p) => Some(p.as_path()),
            _ => None,
        }
    }

    pub fn as_url(&self) -> Option<&Url> {
        match self {
            VideoLocator::Url(u) => Some(u),
            _ => None,
        }
    }
}

impl std::fmt::Display for VideoLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoLocator::FilePath(p) => write!(f, "{}", p.display()),
            VideoLocator::Url(u) => write!(f, "{u}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_detects_urls() {
        let loc = VideoLocator::parse("https://example.org/a.mp4").unwrap();
        assert_eq!(loc.as_url().map(Url::as_str), Some("https://example.org/a.mp4"));
        assert!(loc.as_path().is_none());
    }

    #[test]
    fn parse_falls_back_to_paths() {
        let loc = VideoLocator::parse("videos/intro.mp4").unwrap();
        assert_eq!(loc.as_path(), Some(Path::new("videos/intro.mp4")));
    }

    #[test]
    fn blank_locator_is_rejected() {
        assert_eq!(
            VideoLocator::parse("   ").unwrap_err(),
            MediaValidationError::EmptyLocator
        );
        assert_eq!(
            VideoLocator::from_url("").unwrap_err(),
            MediaValidationError::EmptyLocator
        );
    }

    #[test]
    fn malformed_url_is_rejected() {
        let err = VideoLocator::from_url("http://").unwrap_err();
        assert!(matches!(err, MediaValidationError::InvalidUrl(_)));
    }
}
