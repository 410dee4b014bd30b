use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use sf_locator::{
    constants::{
        DEFAULT_MAX_STORES, DEFAULT_OUTPUT_FILE_NAME, DEFAULT_REQUEST_DELAY,
        DEFAULT_STORE_SERVICE_URL, DEFAULT_TIMEOUT,
    },
    ApiKey, Batch, BatchOutcome, Pincodes, StoreLocator, StoreLocatorConfigBuilder, Summary,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(about = "Find the nearest stores for every pincode in a CSV file")]
struct CliArgs {
    #[command(subcommand)]
    pub subcommand: Command,

    #[command(flatten)]
    pub global_opts: GlobalOpts,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    #[arg(
        short = 'k',
        long,
        env = "STOREFINDER_API_KEY",
        hide_env_values = true,
        global = true,
        help = "API key for the store locator"
    )]
    pub api_key: Option<String>,

    #[arg(short = 'e', long, default_value = DEFAULT_STORE_SERVICE_URL, global = true, help = "Store locator endpoint")]
    pub endpoint: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs(), global = true, help = "Per-request timeout in seconds")]
    pub timeout_secs: u64,

    #[arg(long, default_value_t = DEFAULT_MAX_STORES, global = true, help = "Stores to keep per pincode")]
    pub max_stores: usize,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    #[clap(name = "find", about = "Look up every pincode in a CSV file and write an xlsx report")]
    Find {
        #[arg(short = 'i', long, help = "CSV file with a pincode column")]
        input: PathBuf,

        #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_FILE_NAME, help = "Output file")]
        output: PathBuf,

        #[arg(
            short = 'd',
            long,
            default_value_t = DEFAULT_REQUEST_DELAY.as_millis() as u64,
            help = "Pause between lookups in milliseconds"
        )]
        delay_ms: u64,
    },

    #[clap(name = "lookup", about = "Look up a single pincode and print the stores as JSON")]
    Lookup {
        #[arg(short = 'p', long, help = "Pincode to search near")]
        pincode: String,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefinder=info,sf_locator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn store_locator(opts: &GlobalOpts) -> Result<StoreLocator> {
    let Some(api_key) = opts.api_key.as_deref() else {
        bail!("an API key is required (--api-key or STOREFINDER_API_KEY)");
    };
    let config = StoreLocatorConfigBuilder::default()
        .api_key(ApiKey::from_raw(api_key))
        .endpoint(opts.endpoint.clone())
        .timeout(Duration::from_secs(opts.timeout_secs))
        .max_stores(opts.max_stores)
        .build()?;
    let http = sf_locator::default_http_client()?;
    Ok(StoreLocator::new(http, config))
}

/// Look up every pincode in `input` and write the xlsx report to `output`.
///
/// Nothing is written when the file has no usable pincodes or no store was found.
async fn find(
    locator: StoreLocator,
    input: &Path,
    output: &Path,
    delay: Duration,
) -> Result<Summary> {
    let pincodes = Pincodes::load(input)
        .await
        .with_context(|| format!("unable to load pincodes from {}", input.display()))?;
    println!(
        "Found {} unique pincodes in column \"{}\" of {}",
        pincodes.len(),
        pincodes.column(),
        input.display()
    );
    if pincodes.is_empty() {
        bail!("No valid pincodes found!");
    }

    let progress = ProgressBar::new(pincodes.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )?
        .progress_chars("=> "),
    );
    let batch = Batch::new(locator).with_delay(delay);
    let outcome = batch
        .run(&pincodes, |p| {
            progress.set_message(format!("pincode {}: {} stores", p.pincode, p.stores_found));
            progress.inc(1);
        })
        .await?;
    progress.finish_and_clear();

    match outcome {
        BatchOutcome::Completed(summary) => {
            tokio::fs::write(output, &summary.spreadsheet)
                .await
                .with_context(|| format!("unable to write {}", output.display()))?;
            info!(path = %output.display(), bytes = summary.spreadsheet.len(), "wrote report");
            Ok(summary)
        }
        BatchOutcome::NoStores { .. } => {
            bail!("No stores found for any pincode. Try different areas.");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    let locator = store_locator(&args.global_opts)?;

    match args.subcommand {
        Command::Lookup { pincode } => {
            let stores = locator.find_nearest(&pincode).await?;
            println!("{}", serde_json::to_string_pretty(&stores)?);
        }
        Command::Find {
            input,
            output,
            delay_ms,
        } => {
            let summary = find(locator, &input, &output, Duration::from_millis(delay_ms)).await?;
            println!(
                "Done! Found {} stores across {} pincodes. Saved to {}",
                summary.rows,
                summary.pincodes,
                output.display()
            );
        }
    }

    Ok(())
}
