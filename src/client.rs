use crate::config::{OptimizerConfig, OptimizerOptions};
use crate::error::{OptimizerError, Result};
use crate::output::{derive_output_path, write_artifact};
use crate::request::{CompressionRequest, Payload};
use crate::response::{interpret_response, ServiceSuccess};
use crate::transport::{HttpTransport, Transport};
use crate::validation::validate_output_path;
use std::path::{Path, PathBuf};

/// Outcome of a successful compression.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionReport {
    pub output_path: PathBuf,
    /// Size of the local source, when there is one.
    pub original_size: Option<u64>,
    pub bytes_written: u64,
    /// Sizes and savings as reported by the service.
    pub src_size: Option<u64>,
    pub dest_size: Option<u64>,
    pub percent: Option<f64>,
    /// When the service will delete its copy of the artifact.
    pub expires: Option<String>,
}

/// Client for the remote compression service.
///
/// Holds an immutable [`OptimizerConfig`] and one transport, both reused for
/// every call. Each call is a blocking submit, interpret, fetch and write
/// sequence.
///
/// ```no_run
/// use img_optimizer::{ImageOptimizer, OptimizerOptions};
/// use std::path::Path;
///
/// let optimizer = ImageOptimizer::new(OptimizerOptions::new(Some(85), None))?;
/// let output = optimizer.compress_file(Path::new("photo.jpg"), None)?;
/// println!("written to {}", output.display());
/// # Ok::<(), img_optimizer::OptimizerError>(())
/// ```
#[derive(Debug)]
pub struct ImageOptimizer<T = HttpTransport> {
    config: OptimizerConfig,
    transport: T,
}

impl ImageOptimizer<HttpTransport> {
    pub fn new(options: OptimizerOptions) -> Result<Self> {
        let config = OptimizerConfig::new(options)?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> ImageOptimizer<T> {
    pub fn with_transport(config: OptimizerConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Compresses a local image. Without `output_path` the result goes to
    /// `<dir>/optimized-<basename>` next to the source.
    pub fn compress_file(&self, file_path: &Path, output_path: Option<&Path>) -> Result<PathBuf> {
        self.compress_file_with_report(file_path, output_path)
            .map(|report| report.output_path)
    }

    pub fn compress_file_with_report(
        &self,
        file_path: &Path,
        output_path: Option<&Path>,
    ) -> Result<CompressionReport> {
        let payload =
            CompressionRequest::local_file(file_path, self.config.quality()).into_payload()?;

        let output_path = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| derive_output_path(file_path));
        validate_output_path(&output_path)?;

        let original_size = match &payload {
            Payload::Multipart { contents, .. } => Some(contents.len() as u64),
            Payload::Form { .. } => None,
        };

        tracing::info!(
            source = %file_path.display(),
            output = %output_path.display(),
            quality = self.config.quality(),
            "compressing local image"
        );

        self.run(payload, output_path, original_size)
    }

    /// Compresses a remote image by URL. The service downloads the source
    /// itself; the URL is not checked beforehand.
    pub fn compress_from_url(&self, image_url: &str, output_path: &Path) -> Result<PathBuf> {
        self.compress_from_url_with_report(image_url, output_path)
            .map(|report| report.output_path)
    }

    pub fn compress_from_url_with_report(
        &self,
        image_url: &str,
        output_path: &Path,
    ) -> Result<CompressionReport> {
        validate_output_path(output_path)?;
        let payload =
            CompressionRequest::remote_url(image_url, self.config.quality()).into_payload()?;

        tracing::info!(
            source = %image_url,
            output = %output_path.display(),
            quality = self.config.quality(),
            "compressing remote image"
        );

        self.run(payload, output_path.to_path_buf(), None)
    }

    fn run(
        &self,
        payload: Payload,
        output_path: PathBuf,
        original_size: Option<u64>,
    ) -> Result<CompressionReport> {
        let raw = self.transport.submit(payload)?;
        let success = interpret_response(&raw)?;
        tracing::debug!(dest = %success.dest, "service accepted image");

        let bytes = self.transport.fetch(&success.dest)?;
        if bytes.is_empty() {
            return Err(OptimizerError::MalformedResponse(format!(
                "artifact at {} is empty",
                success.dest
            )));
        }

        let bytes_written = write_artifact(&output_path, &bytes)?;

        if let Some(original) = original_size.filter(|&size| bytes_written > size) {
            tracing::warn!(
                original,
                compressed = bytes_written,
                "service returned a larger file than the source"
            );
        }

        tracing::info!(
            output = %output_path.display(),
            bytes = bytes_written,
            "compressed image written"
        );

        Ok(build_report(output_path, original_size, bytes_written, success))
    }
}

fn build_report(
    output_path: PathBuf,
    original_size: Option<u64>,
    bytes_written: u64,
    success: ServiceSuccess,
) -> CompressionReport {
    CompressionReport {
        output_path,
        original_size,
        bytes_written,
        src_size: success.src_size,
        dest_size: success.dest_size,
        percent: success.percent,
        expires: success.expires,
    }
}
