//! Replays a persisted hand record through the tracker.
//!
//! The record is migrated if it predates the action sequence, hydrated
//! into a table store and printed one entry per line with its position and
//! derived pattern.

use std::path::PathBuf;

use anyhow::{Context, Error};
use hand_tracker::{
    ActionEntry, TableGeometry, TableRecord, TableStore, TrackerConfig, needs_migration,
    patterns::{ClassifiedAction, Pattern, classify_sequence, is_float_confirmed},
};
use log::{info, warn};
use pico_args::Arguments;

const HELP: &str = "\
Replay a persisted poker hand and print derived action patterns

USAGE:
  ht_replay --file PATH [OPTIONS]

OPTIONS:
  --file       PATH        Hand record (JSON) to replay
  --seats      N           Seats at the table     [default: env TRACKER_SEAT_COUNT or 9]
  --button     SEAT        Starting button seat   [default: env TRACKER_BUTTON_SEAT or 1]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  TRACKER_SEAT_COUNT       Seats at the table
  TRACKER_BUTTON_SEAT      Starting button seat
  RUST_LOG                 Log level (e.g., debug)
";

struct Args {
    file: PathBuf,
    seats: Option<usize>,
    button: Option<usize>,
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        file: pargs.value_from_str("--file")?,
        seats: pargs.opt_value_from_str("--seats")?,
        button: pargs.opt_value_from_str("--button")?,
    };

    env_logger::builder().format_target(false).init();

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        warn!("Ignoring unused arguments: {remaining:?}");
    }

    let mut config = TrackerConfig::from_env();
    if let Some(seats) = args.seats {
        config.seat_count = seats;
    }
    if let Some(button) = args.button {
        config.button_seat = button;
    }
    config.validate()?;
    info!(
        "Replaying {} on a {}-seat table (button {})",
        args.file.display(),
        config.seat_count,
        config.button_seat
    );

    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let record: TableRecord =
        serde_json::from_str(&raw).context("Hand record is not a JSON object")?;
    if needs_migration(&record) {
        info!("Migrating legacy seat actions");
    }

    let mut store = TableStore::from(&config);
    store
        .hydrate(record.saved_state()?)
        .context("Hand record failed validation")?;

    let state = store.state();
    let geometry = state.geometry();
    for classified in classify_sequence(&state.action_sequence, &geometry) {
        println!("{}", render(&classified, &state.action_sequence, &geometry));
    }
    info!("Replayed {} actions", state.action_sequence.len());

    Ok(())
}

/// `#order street seat position action -> pattern`
fn render(
    classified: &ClassifiedAction,
    sequence: &[ActionEntry],
    geometry: &TableGeometry,
) -> String {
    let entry = &classified.entry;
    let pattern = match classified.pattern {
        Some(Pattern::FloatCall) if is_float_confirmed(entry, sequence) => {
            "float-call (confirmed)".to_string()
        }
        Some(pattern) => pattern.to_string(),
        None => "-".to_string(),
    };
    format!(
        "#{} {} {} {} {} -> {pattern}",
        entry.order,
        entry.street,
        entry.seat,
        geometry.position_name(entry.seat),
        entry.action
    )
}
