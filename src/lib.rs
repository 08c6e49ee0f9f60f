pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;
pub mod output;
pub mod request;
pub mod response;
pub mod transport;
pub mod utils;
pub mod validation;

pub use client::{CompressionReport, ImageOptimizer};
pub use config::{OptimizerConfig, OptimizerOptions};
pub use error::{OptimizerError, Result};
pub use output::{derive_output_path, write_artifact};
pub use request::{CompressionRequest, Payload};
pub use response::{interpret_response, ServiceResponse, ServiceSuccess};
pub use transport::{HttpTransport, RawResponse, Transport};
pub use validation::{validate_output_path, validate_source_file};
