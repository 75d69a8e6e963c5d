//! Terminal and JSON output for query reports.

use console::{StyledObject, style};
use wifi_map_search::ResultRow;
use wifi_map_security_models::{ColorTag, SecurityTier};

use crate::session::QueryReport;

/// Styles a status label by its tier's colour.
#[must_use]
pub fn status_cell(row: &ResultRow) -> StyledObject<&'static str> {
    let label = style(row.label);
    match row.tier.color_tag() {
        ColorTag::Green => label.green().bold(),
        ColorTag::Orange => label.color256(208).bold(),
        ColorTag::Red => label.red().bold(),
        ColorTag::Gray => label.dim(),
    }
}

/// Formats the distance column.
#[must_use]
pub fn format_distance(distance_m: f64) -> String {
    format!("{distance_m:.1}m")
}

/// One line counting matches per tier, best tier first.
#[must_use]
pub fn summary_line(report: &QueryReport) -> String {
    let mut parts = Vec::new();
    let mut tiers: Vec<SecurityTier> = report.summary.keys().copied().collect();
    tiers.sort_by_key(|tier| std::cmp::Reverse(tier.score()));
    for tier in tiers {
        parts.push(format!("{}: {}", tier.label(), report.summary[&tier]));
    }
    parts.join(" | ")
}

/// Prints the origin, the summary and the result table.
pub fn print_report(report: &QueryReport) {
    if let Some(warning) = &report.origin.warning {
        println!("{}", style(format!("! {warning}")).yellow());
    }

    println!(
        "Searching {} m around {} {}",
        report.radius_m,
        report.origin.coordinate,
        report
            .origin
            .display_address
            .as_deref()
            .unwrap_or(&report.place)
    );
    println!();

    if report.rows.is_empty() {
        println!("No public WiFi within {} m.", report.radius_m);
        return;
    }

    println!(
        "Found {} of {} access points ({})",
        report.rows.len(),
        report.catalog_size,
        report.sort_mode.label()
    );
    println!("{}", summary_line(report));
    println!();

    println!(
        "{:<30} {:<34} {:<24} {:>9}  {:<24} {}",
        "PLACE", "STATUS", "SSID", "DISTANCE", "DETAIL", "PROVIDER"
    );
    println!("{}", "-".repeat(140));
    for row in &report.rows {
        println!(
            "{:<30} {:<34} {:<24} {:>9}  {:<24} {}",
            row.place_name,
            status_cell(row),
            row.ssid,
            format_distance(row.distance_m),
            row.detail_address,
            row.provider
        );
    }
}

/// Serializes the report as pretty JSON.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if serialization fails.
pub fn to_json(report: &QueryReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
