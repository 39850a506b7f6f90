//! One end-to-end processing cycle
//!
//! A cycle fetches a character, the first page of starships and planets, the
//! film list and a featured vehicle, and renders each to the output sink. Only
//! the vehicle lookup may fail without aborting the cycle.

use std::io::{self, Write};

use thiserror::Error;
use tracing::{debug, warn};

use crate::data::{Collection, Film, FromRecord, Person, Planet, Starship, Vehicle};
use crate::fetch::{FetchError, ResourceFetcher};
use crate::present;
use crate::stats::rotating_id;

/// Featured vehicle ids rotate through `1..=MAX_FEATURED_VEHICLE_ID`
pub const MAX_FEATURED_VEHICLE_ID: u64 = 4;

/// Errors that abort a processing cycle
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Runs one processing cycle, writing all sections to `out`
///
/// On success the rotating item id is advanced and the stats report is logged.
/// A failed fetch for the character, starships, planets or films stops the
/// cycle and leaves the item id where it was.
pub async fn run_cycle<W: Write + Send>(
    fetcher: &ResourceFetcher,
    out: &mut W,
) -> Result<(), CycleError> {
    debug!("starting processing cycle");
    let item_id = fetcher.stats().current_item_id();

    let person = fetcher.fetch_resource(&format!("people/{}", item_id)).await?;
    present::render_person(out, &Person::from_record(&person))?;

    let starships = Collection::from_record(&fetcher.fetch_resource("starships/?page=1").await?);
    present::render_starships(out, starships.count, &starships.records::<Starship>())?;

    let planets: Vec<Planet> =
        Collection::from_record(&fetcher.fetch_resource("planets/?page=1").await?).records();
    let selected = present::select_large_populous_planets(
        &planets,
        present::MIN_PLANET_POPULATION,
        present::MIN_PLANET_DIAMETER,
    );
    present::render_planets(out, &selected)?;

    let mut films: Vec<Film> = Collection::from_record(&fetcher.fetch_resource("films/").await?).records();
    present::sort_films_by_release(&mut films);
    present::render_films(out, &films)?;

    let vehicle_id = rotating_id(item_id, MAX_FEATURED_VEHICLE_ID);
    match fetcher.fetch_resource(&format!("vehicles/{}", vehicle_id)).await {
        Ok(vehicle) => present::render_vehicle(out, &Vehicle::from_record(&vehicle))?,
        Err(err) => warn!(vehicle_id, error = %err, "could not fetch featured vehicle"),
    }

    fetcher.stats().advance_item_id();
    out.flush()?;

    let snapshot = fetcher.snapshot();
    debug!(
        api_calls = snapshot.api_call_count,
        cache_size = snapshot.cache_size,
        errors = snapshot.error_count,
        response_bytes = snapshot.total_response_bytes,
        "processing cycle finished"
    );

    Ok(())
}
