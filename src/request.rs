use crate::constants::{ImageKind, FALLBACK_MIME_TYPE, QUALITY_FIELD, URL_FIELD};
use crate::error::{OptimizerError, Result};
use crate::validation::validate_source_file;
use std::fs;
use std::path::{Path, PathBuf};

/// One submission to the compression service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressionRequest {
    LocalFile { path: PathBuf, quality: u8 },
    RemoteUrl { url: String, quality: u8 },
}

/// The encoded body handed to a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// `multipart/form-data` with the file under `files` and quality under `qlty`.
    Multipart {
        file_name: String,
        mime_type: &'static str,
        contents: Vec<u8>,
        quality: String,
    },
    /// `application/x-www-form-urlencoded` key/value pairs.
    Form { fields: Vec<(String, String)> },
}

impl Payload {
    /// The `qlty` value this payload carries.
    pub fn quality(&self) -> Option<&str> {
        match self {
            Payload::Multipart { quality, .. } => Some(quality.as_str()),
            Payload::Form { fields } => fields
                .iter()
                .find(|(name, _)| name == QUALITY_FIELD)
                .map(|(_, value)| value.as_str()),
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Payload::Multipart { .. })
    }
}

impl CompressionRequest {
    pub fn local_file(path: impl Into<PathBuf>, quality: u8) -> Self {
        CompressionRequest::LocalFile {
            path: path.into(),
            quality,
        }
    }

    pub fn remote_url(url: impl Into<String>, quality: u8) -> Self {
        CompressionRequest::RemoteUrl {
            url: url.into(),
            quality,
        }
    }

    pub fn quality(&self) -> u8 {
        match self {
            CompressionRequest::LocalFile { quality, .. }
            | CompressionRequest::RemoteUrl { quality, .. } => *quality,
        }
    }

    /// Encodes the request. Local files are validated and read here, so a
    /// precondition failure surfaces before any network traffic.
    pub fn into_payload(self) -> Result<Payload> {
        match self {
            CompressionRequest::LocalFile { path, quality } => {
                let contents = read_source_file(&path)?;
                let file_name = file_name_of(&path);
                let mime_type = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(ImageKind::from_extension)
                    .map(|kind| kind.mime_type())
                    .unwrap_or(FALLBACK_MIME_TYPE);

                tracing::debug!(
                    file = %path.display(),
                    bytes = contents.len(),
                    quality,
                    "built multipart payload"
                );

                Ok(Payload::Multipart {
                    file_name,
                    mime_type,
                    contents,
                    quality: quality.to_string(),
                })
            }
            CompressionRequest::RemoteUrl { url, quality } => {
                tracing::debug!(%url, quality, "built form payload");

                Ok(Payload::Form {
                    fields: vec![
                        (URL_FIELD.to_string(), url),
                        (QUALITY_FIELD.to_string(), quality.to_string()),
                    ],
                })
            }
        }
    }
}

/// Checks the local-file preconditions and returns the file contents.
pub fn read_source_file(path: &Path) -> Result<Vec<u8>> {
    validate_source_file(path)?;

    let contents =
        fs::read(path).map_err(|_| OptimizerError::FileNotReadable(path.to_path_buf()))?;

    // The file may have been truncated between the size check and the read
    if contents.is_empty() {
        return Err(OptimizerError::EmptyFile(path.to_path_buf()));
    }

    Ok(contents)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}
