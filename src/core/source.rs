//! Diff providers: the remote compare endpoint and a local snapshot file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Timeout applied to compare-endpoint requests.
const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors from fetching raw diff text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// HTTP request failed (connect failure, timeout, bad URL).
    #[error("diff request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("diff endpoint returned {status} for {url}")]
    Status {
        /// HTTP status returned by the endpoint.
        status: reqwest::StatusCode,
        /// URL that was requested.
        url: String,
    },
    /// The local snapshot could not be read.
    #[error("failed to read diff snapshot {path}: {source}")]
    Io {
        /// Snapshot path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A provider of raw unified-diff lines between two tags.
///
/// On success every line of the diff is returned in original order with the
/// trailing newline stripped. Tags are passed through unvalidated: an
/// unknown tag yields whatever the source yields, possibly nothing.
pub trait DiffProvider {
    /// Fetch the full diff between `old_tag` and `new_tag`.
    fn fetch(&self, new_tag: &str, old_tag: &str) -> Result<Vec<String>, SourceError>;
}

/// Fetches the diff from a GitHub-style compare endpoint.
pub struct HttpDiffSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpDiffSource {
    /// Create a provider against `base_url`, e.g.
    /// `https://github.com/k3s-io/k3s/compare`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Compare URL for a tag pair: `<base>/<oldTag>...<newTag>.diff`.
    fn compare_url(&self, new_tag: &str, old_tag: &str) -> String {
        format!(
            "{}/{}...{}.diff",
            self.base_url.trim_end_matches('/'),
            old_tag,
            new_tag
        )
    }
}

impl DiffProvider for HttpDiffSource {
    fn fetch(&self, new_tag: &str, old_tag: &str) -> Result<Vec<String>, SourceError> {
        let url = self.compare_url(new_tag, old_tag);
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status(),
                url,
            });
        }
        let body = response.text()?;
        Ok(body.lines().map(str::to_string).collect())
    }
}

/// Reads the diff from a local snapshot file.
///
/// Interchangeable with [`HttpDiffSource`]; the tags are accepted for
/// interface parity but do not select the snapshot.
pub struct FileDiffSource {
    path: PathBuf,
}

impl FileDiffSource {
    /// Create a provider reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DiffProvider for FileDiffSource {
    fn fetch(&self, _new_tag: &str, _old_tag: &str) -> Result<Vec<String>, SourceError> {
        let file = File::open(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn compare_url_shape() {
        let source = HttpDiffSource::new("https://github.com/k3s-io/k3s/compare").unwrap();
        assert_eq!(
            source.compare_url("v1.28.4+k3s1", "v1.28.3+k3s1"),
            "https://github.com/k3s-io/k3s/compare/v1.28.3+k3s1...v1.28.4+k3s1.diff"
        );
    }

    #[test]
    fn compare_url_tolerates_trailing_slash() {
        let source = HttpDiffSource::new("https://example.com/compare/").unwrap();
        assert_eq!(
            source.compare_url("new", "old"),
            "https://example.com/compare/old...new.diff"
        );
    }

    #[test]
    fn file_source_returns_lines_in_order() {
        let mut snapshot = tempfile::NamedTempFile::new().unwrap();
        writeln!(snapshot, "diff --git a/x b/x").unwrap();
        writeln!(snapshot, "+added").unwrap();
        writeln!(snapshot, "-removed").unwrap();

        let source = FileDiffSource::new(snapshot.path());
        let lines = source.fetch("new", "old").unwrap();
        assert_eq!(lines, vec!["diff --git a/x b/x", "+added", "-removed"]);
    }

    #[test]
    fn file_source_strips_trailing_newlines_only() {
        let mut snapshot = tempfile::NamedTempFile::new().unwrap();
        write!(snapshot, "  indented\n\nlast").unwrap();

        let source = FileDiffSource::new(snapshot.path());
        let lines = source.fetch("new", "old").unwrap();
        assert_eq!(lines, vec!["  indented", "", "last"]);
    }

    #[test]
    fn missing_snapshot_is_an_error() {
        let source = FileDiffSource::new("/nonexistent/k3s.diff");
        let err = source.fetch("", "").unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
