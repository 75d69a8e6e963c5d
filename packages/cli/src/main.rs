#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Public WiFi security map for Seoul.
//!
//! Finds public WiFi access points around a place, rates each one's likely
//! security from its network name and operator, and lists them safest or
//! nearest first. Run without a subcommand for the interactive prompt loop.
//!
//! Uses `indicatif-log-bridge` (via [`wifi_map_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and the catalog loading spinner never fight for the terminal.

mod config;
mod interactive;
mod render;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use wifi_map_catalog::profile::all_profiles;
use wifi_map_catalog_models::TextEncoding;
use wifi_map_cli_utils::IndicatifProgress;
use wifi_map_geocoder::{nominatim::NominatimGeocoder, service_registry::find_service};
use wifi_map_search::SortMode;
use wifi_map_security::rules;

use crate::{config::DashboardConfig, session::Session};

#[derive(Parser)]
#[command(name = "wifi_map", about = "Public WiFi security map")]
struct Cli {
    /// Dashboard config TOML (defaults to the built-in Seoul config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Catalog CSV path (overrides the config)
    #[arg(long, global = true)]
    csv: Option<PathBuf>,
    /// Text encoding of the catalog ("utf-8" or "cp949")
    #[arg(long, global = true)]
    encoding: Option<TextEncoding>,
    /// Header profile id (see `profiles`)
    #[arg(long, global = true)]
    profile: Option<String>,
    /// Keep only rows in this region (e.g. "서울특별시")
    #[arg(long, global = true)]
    region: Option<String>,
    /// Disable the region filter from the config
    #[arg(long, global = true, conflicts_with = "region")]
    all_regions: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for public WiFi around a place
    Search {
        /// Place to search around (defaults to the configured place)
        place: Option<String>,
        /// Search radius in meters
        #[arg(long)]
        radius: Option<u32>,
        /// Ordering: "security" (safest first) or "distance"
        #[arg(long)]
        sort: Option<SortMode>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List the CSV header profiles
    Profiles,
    /// Show the security rules in evaluation order
    Rules,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    fn apply_overrides(&self, config: &mut DashboardConfig) {
        if let Some(csv) = &self.csv {
            config.catalog.path.clone_from(csv);
        }
        if let Some(encoding) = self.encoding {
            config.catalog.encoding = encoding;
        }
        if let Some(profile) = &self.profile {
            config.catalog.profile.clone_from(profile);
        }
        if self.all_regions {
            config.catalog.region = None;
        } else if let Some(region) = &self.region {
            config.catalog.region = Some(region.clone());
        }
    }
}

fn build_session(
    config: DashboardConfig,
) -> Result<Session<NominatimGeocoder>, Box<dyn std::error::Error>> {
    let service = find_service(&config.search.geocoder).ok_or_else(|| {
        format!(
            "Unknown or disabled geocoding service: {}",
            config.search.geocoder
        )
    })?;
    let geocoder = NominatimGeocoder::from_service(&service)?;
    Ok(Session::new(config, geocoder))
}

fn print_profiles() {
    let profiles = all_profiles();
    println!("{:<20} {:<40} REGION COLUMN", "ID", "NAME");
    println!("{}", "-".repeat(76));
    for profile in &profiles {
        println!(
            "{:<20} {:<40} {}",
            profile.id,
            profile.name,
            profile.columns.region.as_deref().unwrap_or("-")
        );
    }
    println!();
    println!("{} profiles", profiles.len());
}

fn print_rules() {
    for (i, rule) in rules().iter().enumerate() {
        let predicate = rule.predicate.to_string();
        println!(
            "{}. {predicate:<55} -> {} (score {})",
            i + 1,
            rule.tier.label(),
            rule.tier.score()
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = wifi_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    match cli.command {
        Some(Commands::Profiles) => print_profiles(),
        Some(Commands::Rules) => print_rules(),
        Some(Commands::Search {
            place,
            radius,
            sort,
            format,
        }) => {
            let radius_m = radius.unwrap_or(config.search.radius.default_m);
            let sort_mode = sort.unwrap_or(config.search.default_sort);
            let place = place.unwrap_or_default();

            let mut session = build_session(config)?;
            let progress = IndicatifProgress::rows_spinner(&multi, "Loading WiFi catalog");
            let report = session
                .run_query(&place, radius_m, sort_mode, progress.as_ref())
                .await?;

            match format {
                OutputFormat::Table => render::print_report(&report),
                OutputFormat::Json => println!("{}", render::to_json(&report)?),
            }
        }
        None => {
            println!("Seoul Public WiFi Security Map");
            println!();
            let mut session = build_session(config)?;
            interactive::run(&mut session, &multi).await?;
        }
    }

    Ok(())
}
