//! Where raw pace note text comes from.
//!
//! - A file path
//! - `-` for standard input
//! - An `http://` or `https://` URL

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tokio::io::AsyncReadExt;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteSource {
    Stdin,
    File(PathBuf),
    Url(String),
}

impl NoteSource {
    pub async fn read_to_string(&self) -> Result<String, SourceError> {
        match self {
            Self::Stdin => {
                let mut raw = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut raw)
                    .await
                    .map_err(SourceError::Stdin)?;
                Ok(raw)
            }
            Self::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| SourceError::File {
                        path: path.clone(),
                        source,
                    })
            }
            Self::Url(url) => {
                tracing::debug!("Fetching pace notes from {}", url);
                let response = reqwest::get(url).await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.text().await?)
            }
        }
    }
}

impl From<&str> for NoteSource {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s == "-" {
            Self::Stdin
        } else if s.starts_with("http://") || s.starts_with("https://") {
            Self::Url(s.to_string())
        } else {
            Self::File(PathBuf::from(s))
        }
    }
}

impl fmt::Display for NoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("stdin"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}
