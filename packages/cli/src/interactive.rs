//! Interactive query loop.
//!
//! Prompts for a place, a radius and an ordering, prints the result
//! table, and repeats until the user quits. Query errors are reported and
//! the loop continues.

use console::style;
use dialoguer::{Confirm, Input, Select};
use wifi_map_cli_utils::{IndicatifProgress, MultiProgress};
use wifi_map_geocoder::Geocoder;
use wifi_map_search::SortMode;

use crate::{render, session::Session};

/// Runs the prompt loop until the user declines another search.
///
/// # Errors
///
/// Returns an error if a prompt cannot be read from the terminal.
pub async fn run<G: Geocoder>(
    session: &mut Session<G>,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    let bounds = session.config().search.radius;
    let mut place = session.config().search.default_place.clone();
    let mut radius_m = bounds.default_m;
    let mut sort_mode = session.config().search.default_sort;

    let sort_labels: Vec<&str> = SortMode::all().iter().map(|m| m.label()).collect();

    loop {
        place = Input::<String>::new()
            .with_prompt("Place (e.g. 강남역, 홍대입구)")
            .default(place)
            .interact_text()?;

        radius_m = Input::<u32>::new()
            .with_prompt(format!(
                "Search radius in meters ({}-{})",
                bounds.min_m, bounds.max_m
            ))
            .default(radius_m)
            .validate_with(|r: &u32| bounds.check(*r).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()?;

        let default_idx = SortMode::all()
            .iter()
            .position(|m| *m == sort_mode)
            .unwrap_or(0);
        let idx = Select::new()
            .with_prompt("Sort by")
            .items(&sort_labels)
            .default(default_idx)
            .interact()?;
        sort_mode = SortMode::all()[idx];

        let progress = IndicatifProgress::rows_spinner(multi, "Loading WiFi catalog");
        match session
            .run_query(&place, radius_m, sort_mode, progress.as_ref())
            .await
        {
            Ok(report) => render::print_report(&report),
            Err(e) => {
                log::error!("Query failed: {e}");
                eprintln!("{}", style(format!("Error: {e}")).red());
            }
        }
        println!();

        let again = Confirm::new()
            .with_prompt("Search again?")
            .default(true)
            .interact()?;
        if !again {
            break;
        }
    }

    Ok(())
}
