//! Command line tool for serving sentiment analysis over HTTP

use std::{env, sync::Arc};

use anyhow::{anyhow, Result};
use burn::config::Config as _;
use burn_finbert::{
    pipelines::sentiment_analysis::{self, Classifier},
    server::{self, ServerConfig},
};
use pico_args::Arguments;

#[cfg(not(feature = "tch-gpu"))]
use burn::backend::{ndarray::NdArrayDevice, NdArray};

#[cfg(feature = "tch-gpu")]
use burn::backend::{libtorch::LibTorchDevice, LibTorch};

#[cfg(not(feature = "tch-gpu"))]
type Backend = NdArray;

#[cfg(feature = "tch-gpu")]
type Backend = LibTorch;

const HELP: &str = "\
Usage: serve [OPTIONS]

Options:
  -h, --help           Print help
  -c, --config FILE    Load server settings from a JSON file
      --host HOST      The interface to bind (default: 0.0.0.0)
  -p, --port PORT      The port to bind (default: 5001)
  -m, --model MODEL    The Hugging Face model to serve (default: ProsusAI/finbert)
      --revision REV   The model revision to load (default: main)
";

#[derive(Debug)]
struct Args {
    /// Prints the usage menu
    help: bool,

    /// A JSON server config file
    config: Option<String>,

    /// The interface to bind
    host: Option<String>,

    /// The port to bind
    port: Option<u16>,

    /// The model to serve
    model: Option<String>,

    /// The model revision
    revision: Option<String>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = Arguments::from_env();

    let args = Args {
        help: pargs.contains(["-h", "--help"]),
        config: pargs.opt_value_from_str(["-c", "--config"])?,
        host: pargs.opt_value_from_str("--host")?,
        port: pargs.opt_value_from_str(["-p", "--port"])?,
        model: pargs.opt_value_from_str(["-m", "--model"])?,
        revision: pargs.opt_value_from_str("--revision")?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        log::warn!("Ignoring unexpected arguments: {:?}", remaining);
    }

    Ok(args)
}

fn load_config(args: Args) -> Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .map_err(|e| anyhow!("Unable to load config file {}: {}", path, e))?,
        None => ServerConfig::new(),
    };

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(model) = args.model {
        config.model_name = model;
    }
    if let Some(revision) = args.revision {
        config.revision = revision;
    }

    Ok(config)
}

#[cfg(not(feature = "tch-gpu"))]
fn device() -> NdArrayDevice {
    NdArrayDevice::Cpu
}

#[cfg(feature = "tch-gpu")]
fn device() -> LibTorchDevice {
    LibTorchDevice::Cuda(0)
}

#[actix_web::main]
async fn main() -> Result<()> {
    pretty_env_logger::formatted_builder()
        .parse_filters(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let args = parse_args()?;

    if args.help {
        println!("{}", HELP);
        return Ok(());
    }

    let config = load_config(args)?;

    log::info!(
        "Starting the {} pipeline with {}",
        sentiment_analysis::PIPELINE,
        config.model_name
    );

    // Nothing is served unless the model loads
    let classifier = sentiment_analysis::pretrained::load::<Backend>(&config.source(), device())
        .await
        .map_err(|e| {
            log::error!("Unable to load {}: {}", config.model_name, e);

            e
        })?;

    let classifier: Arc<dyn Classifier> = Arc::new(classifier);

    server::run(&config, classifier).await?;

    Ok(())
}
