//! Command-line interface over the serviceability engine: resolve and
//! search pincodes, list popular cities, and compute delivery charges.

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use aquaship_core::charge::{delivery_charge, DEFAULT_PER_KG_RATE};
use aquaship_core::config::load_app_config;
use aquaship_core::Directory;
use aquaship_resolver::{PincodeService, RateLimiter, RemoteResolver, ResolverCache};

#[derive(Debug, Parser)]
#[command(name = "aquaship-cli")]
#[command(about = "Pincode serviceability and delivery-charge tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve one pincode to a serviceability record.
    Resolve { pincode: String },
    /// Search the static directory by city, state, or district.
    Search { query: String },
    /// List the curated quick-pick cities.
    Popular,
    /// Compute the weight-based delivery charge.
    Charge {
        /// Total shipment weight in grams.
        #[arg(long)]
        grams: f64,
        /// Per-kilogram rate; defaults to the flat storefront rate.
        #[arg(long, default_value_t = DEFAULT_PER_KG_RATE)]
        rate: f64,
    },
    /// Resolve many pincodes; unresolvable codes are omitted.
    Batch { pincodes: Vec<String> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = load_app_config().context("failed to load configuration")?;

    match cli.command {
        Commands::Charge { grams, rate } => {
            println!("{:.2}", delivery_charge(grams, rate));
            return Ok(());
        }
        ref command => {
            let directory = Directory::load(&config.directory_path)
                .with_context(|| format!("failed to load {}", config.directory_path.display()))?;
            let denylist = directory.denylist().to_vec();
            let resolver = RemoteResolver::new(
                config.sources,
                ResolverCache::new(Duration::from_secs(config.cache_ttl_secs)),
                RateLimiter::new(),
                denylist,
            )
            .context("failed to construct resolver")?;
            let service = PincodeService::new(directory, resolver);

            match command {
                Commands::Resolve { pincode } => match service.resolve(pincode).await {
                    Some(resolved) => println!("{}", serde_json::to_string_pretty(&resolved)?),
                    None => {
                        tracing::warn!(pincode = %pincode, "could not determine serviceability");
                        println!("null");
                    }
                },
                Commands::Search { query } => {
                    for record in service.directory().search(query) {
                        println!(
                            "{}  {}, {} ({}) — {} @ {}",
                            record.code,
                            record.city,
                            record.state,
                            record.region,
                            record.delivery_time,
                            record.shipping_cost
                        );
                    }
                }
                Commands::Popular => {
                    for record in service.directory().popular_cities() {
                        println!("{}  {}, {}", record.code, record.city, record.state);
                    }
                }
                Commands::Batch { pincodes } => {
                    let resolved = service.batch_resolve(pincodes).await;
                    println!("{}", serde_json::to_string_pretty(&resolved)?);
                }
                Commands::Charge { .. } => unreachable!("handled above"),
            }
        }
    }

    Ok(())
}
