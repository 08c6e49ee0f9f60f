use anyhow::{Context, Result};
use clap::Parser;
use img_optimizer::cli::{Args, Commands, ServiceArgs};
use img_optimizer::logger::{init_tracing, set_quiet_mode, set_verbose_mode};
use img_optimizer::utils::{create_progress_spinner, print_compression_report};
use img_optimizer::{error, info, verbose, ImageOptimizer, OptimizerOptions};

fn main() {
    let args = Args::parse();

    set_quiet_mode(args.quiet);
    set_verbose_mode(args.verbose);
    init_tracing();

    if let Err(e) = run(args.command) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::File {
            input,
            output,
            service,
        } => {
            let optimizer = build_optimizer(service)?;
            info!("🗜️  Compressing image: {:?}", input);

            let pb = create_progress_spinner("Uploading to compression service...");
            let result = optimizer.compress_file_with_report(&input, output.as_deref());
            pb.finish_and_clear();

            let report = result.with_context(|| format!("failed to compress {}", input.display()))?;
            print_compression_report(&report);
        }
        Commands::Url {
            url,
            output,
            service,
        } => {
            let optimizer = build_optimizer(service)?;
            info!("🗜️  Compressing image: {}", url);

            let pb = create_progress_spinner("Waiting for compression service...");
            let result = optimizer.compress_from_url_with_report(&url, &output);
            pb.finish_and_clear();

            let report = result.with_context(|| format!("failed to compress {}", url))?;
            print_compression_report(&report);
        }
    }

    Ok(())
}

fn build_optimizer(service: ServiceArgs) -> Result<ImageOptimizer> {
    let mut options = OptimizerOptions::new(service.quality, service.timeout);
    if let Some(endpoint) = service.endpoint {
        options = options.with_endpoint(endpoint);
    }

    let optimizer = ImageOptimizer::new(options).context("invalid configuration")?;
    let config = optimizer.config();
    verbose!("Endpoint: {}", config.endpoint());
    verbose!("Quality: {}", config.quality());
    verbose!("Timeout: {:?}", config.timeout());

    Ok(optimizer)
}
