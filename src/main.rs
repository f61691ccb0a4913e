use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use signage_sync::scrapers::contact::format_display_phone;
use signage_sync::server::{build_app, AppState};
use signage_sync::{sync, Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "signage-sync", about = "Scrape listings and properties for the LED panel")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the display API (default)
    Serve,
    /// Run one refresh cycle and print what was scraped
    Refresh {
        #[arg(value_enum)]
        pipeline: Pipeline,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Pipeline {
    Listings,
    Properties,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,signage_sync=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let state = AppState::with_memory_stores(config.scrape.clone())
        .context("Failed to create scrapers")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(state, config.port).await,
        Command::Refresh { pipeline } => refresh_once(state, pipeline).await,
    }
}

async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = build_app(state);

    let addr = format!("0.0.0.0:{}", port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

async fn refresh_once(state: AppState, pipeline: Pipeline) -> Result<()> {
    match pipeline {
        Pipeline::Listings => {
            let listings = sync::refresh(&*state.listing_scraper, &*state.listings).await?;
            info!("✅ Scraped {} listings", listings.len());

            for (i, stored) in listings.iter().enumerate() {
                let listing = &stored.record;
                println!("{}. {}", i + 1, listing.display_title);
                println!(
                    "   Contato: {}",
                    format_display_phone(listing.contact_number.as_deref(), &state.fallback_contact)
                );
                if let Some(tags) = &listing.tags {
                    println!("   Tags: {}", tags.join(" "));
                }
                if let Some(image) = &listing.image_url {
                    println!("   Image: {}", image);
                }
                println!("   URL: {}", listing.url);
                println!();
            }
        }
        Pipeline::Properties => {
            let properties = sync::refresh(&*state.property_scraper, &*state.properties).await?;
            info!("✅ Scraped {} properties", properties.len());

            for (i, stored) in properties.iter().enumerate() {
                let property = &stored.record;
                println!(
                    "{}. {} (R$ {}, {:?})",
                    i + 1,
                    property.title,
                    property.price,
                    property.transaction_kind
                );
                if let Some(image) = &property.image_url {
                    println!("   Image: {}", image);
                }
                println!("   URL: {}", property.url);
                println!();
            }
        }
    }

    Ok(())
}
