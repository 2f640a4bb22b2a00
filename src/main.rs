//! haggle CLI binary

use anyhow::Context;
use clap::Parser;
use haggle::catalog::{find_product, load_catalogue, sample_products};
use haggle::cli::report::{
    render_persona, render_presets, render_run, render_summary, render_transcript,
};
use haggle::cli::{Cli, Commands, HaggleApp};
use haggle::{scenario_triplets, Product, Settings};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = Settings::from_env().context("failed to load settings from environment")?;
    let settings = cli.overrides.apply(settings).context("invalid command-line settings")?;
    tracing::debug!("Settings: {:?}", settings);

    let currency = settings.currency.clone();
    let app = HaggleApp::new(settings);

    match cli.command {
        Commands::Suite {
            buyer,
            seller,
            products,
        } => {
            let products = catalogue(products.as_deref())?;
            let summary = app.run_suite(&products, buyer, seller).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("TESTING BUYER: {} vs {:?} seller", summary.buyer, summary.seller);
                for run in &summary.runs {
                    println!();
                    print!("{}", render_run(run, &currency));
                }
                println!();
                print!("{}", render_summary(&summary, &currency));
            }
        }

        Commands::Run {
            product,
            difficulty,
            buyer,
            seller,
            products,
            transcript,
        } => {
            let products = catalogue(products.as_deref())?;
            let product = find_product(&products, &product)?;
            let run = app.run_scenario(buyer, seller, product, difficulty)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&run)?);
            } else {
                print!("{}", render_run(&run, &currency));
                if transcript {
                    println!();
                    print!("{}", render_transcript(&run.result));
                }
            }
        }

        Commands::Scenarios { market_price } => {
            let triplet = scenario_triplets(market_price);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&triplet)?);
            } else {
                print!("{}", render_presets(market_price, &triplet, &currency));
            }
        }

        Commands::Persona { buyer } => {
            let agent = app.buyer(buyer, 0);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(agent.personality())?);
            } else {
                print!("{}", render_persona(agent.as_ref()));
            }
        }
    }

    Ok(())
}

fn catalogue(path: Option<&Path>) -> anyhow::Result<Vec<Product>> {
    match path {
        Some(path) => load_catalogue(path)
            .with_context(|| format!("failed to load catalogue {}", path.display())),
        None => Ok(sample_products()),
    }
}
