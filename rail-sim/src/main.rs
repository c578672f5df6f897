use rail_sim::cache::{CacheConfig, TrackCache};
use rail_sim::config::PlaybackConfig;
use rail_sim::domain::Timestamp;
use rail_sim::generate::default_dataset;
use rail_sim::playback::PlaybackClock;
use rail_sim::schedule::positions_at;
use rail_sim::store::DatasetStore;
use tracing::{debug, error, info, trace};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PlaybackConfig::from_env();
    let now = Timestamp::now();

    // Load the dataset, generating and saving a default one on first run
    let store = DatasetStore::new(config.store_config());
    let first_run = !store.path().exists();
    let data = store.load_or_default(|| default_dataset(now));
    if first_run {
        match store.save(&data) {
            Ok(()) => info!(path = %store.path().display(), "Saved default dataset"),
            Err(e) => error!(error = %e, "Failed to save default dataset"),
        }
    }

    // Warm the display cache the way a renderer would before its first frame
    let tracks = TrackCache::new(&CacheConfig::default());
    for track in data.tracks() {
        let smoothed = tracks.get_or_smooth(track);
        debug!(track = %track.id(), points = smoothed.len(), "Prepared track");
    }

    let mut clock = PlaybackClock::for_dataset(&data, now);
    info!(
        start = %clock,
        tick_ms = config.tick_ms,
        time_scale = config.time_scale,
        "Starting playback"
    );

    let step = config.sim_step();
    let mut interval = tokio::time::interval(config.tick());
    let mut ticks = 0u64;
    // Summarise at info roughly once per real second
    let report_every = (1000 / config.tick_ms).max(1);

    while !config.is_done(ticks) {
        interval.tick().await;
        clock.advance(step);
        ticks += 1;

        let trains = positions_at(&data, clock.current());
        for train in &trains {
            trace!(
                trip = %train.trip.id(),
                leg = train.leg_index,
                x = train.pose.position.x,
                y = train.pose.position.y,
                heading = train.pose.heading,
                "Train position"
            );
        }
        if ticks % report_every == 0 {
            info!(time = %clock, trains = trains.len(), "Frame");
        } else {
            debug!(time = %clock, trains = trains.len(), "Frame");
        }
    }

    info!(ticks, "Playback finished");
}
