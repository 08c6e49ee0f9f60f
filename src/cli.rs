use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-optimizer",
    about = "Compress images with a remote optimization service",
    long_about = "img-optimizer sends images to a reSmush.it compatible compression service, \
                  downloads the optimized result and writes it next to the source or to a path of your choice. \
                  Local files are uploaded; remote images are compressed by URL.",
    version,
    after_help = "EXAMPLES:\n  \
    img-optimizer file photo.jpg -q 85\n  \
    img-optimizer file photo.jpg compressed/photo.jpg\n  \
    img-optimizer url https://example.com/banner.png banner.png -t 10"
)]
pub struct Args {
    #[arg(short = 'Q', long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Print request details")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServiceArgs {
    #[arg(
        short = 'q',
        long,
        help = "Compression quality (1-100, default: 92)",
        long_help = "Quality sent to the service as 'qlty'. \
                     Lower values compress harder; values outside 1-100 are rejected."
    )]
    pub quality: Option<u8>,

    #[arg(
        short = 't',
        long,
        help = "Timeout per request in seconds (default: 30)",
        long_help = "Applied separately to the submit request and to the download of the result."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'e',
        long,
        help = "Custom service endpoint",
        long_help = "Override the compression endpoint. \
                     Default: https://api.resmush.it/"
    )]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress a local image file",
        long_about = "Upload a local image and save the compressed result. \
                      Without an output path the result is written as optimized-<name> next to the input."
    )]
    File {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(help = "Output image file path (default: <dir>/optimized-<name>)")]
        output: Option<PathBuf>,

        #[command(flatten)]
        service: ServiceArgs,
    },

    #[command(
        about = "Compress an image by URL",
        long_about = "Ask the service to fetch and compress a remote image, then save the result locally."
    )]
    Url {
        #[arg(help = "URL of the source image")]
        url: String,

        #[arg(help = "Output image file path")]
        output: PathBuf,

        #[command(flatten)]
        service: ServiceArgs,
    },
}
