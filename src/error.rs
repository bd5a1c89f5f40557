use std::path::PathBuf;

/// Failures surfaced by the pipeline steps.
///
/// Command handlers wrap these in `anyhow` with the name of the step that
/// failed, so the variants only carry what the step itself knows.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to resolve repo path {path}: {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not a git repository: {0}")]
    NotAGitRepo(PathBuf),
    #[error("git command failed ({command}): {message}")]
    Git { command: String, message: String },
    #[error(
        "raygun token required: use --token flag, set RAYGUN_TOKEN or run 'ai-review-pr auth login'"
    )]
    MissingCredential,
    #[error("raygun API returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to send request to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{0}")]
    EmptyResult(String),
    #[error("invalid selection: {0}")]
    Selection(String),
    #[error("template error: {0}")]
    Template(String),
    #[error("assistant '{command}' {reason}")]
    Assistant { command: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_http_status_mentions_code_and_body() {
        let err = Error::HttpStatus {
            status: 401,
            body: "{\"message\":\"unauthorized\"}".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("401"));
        assert!(rendered.contains("unauthorized"));
    }

    #[test]
    fn test_decode_keeps_source() {
        let source = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err = Error::Decode {
            what: "applications",
            source,
        };
        assert!(err.to_string().starts_with("failed to decode applications"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_not_a_git_repo_names_path() {
        let err = Error::NotAGitRepo(PathBuf::from("/tmp/nowhere"));
        assert_eq!(err.to_string(), "not a git repository: /tmp/nowhere");
    }
}
