//! Local mode: convert a JSON file of events into an .ics file.

use std::path::Path;

use anyhow::{Context, Result};
use icsgen_core::{Encoder, decode_events};
use tracing::{debug, info};

/// Read events from `input`, encode them and write the calendar to
/// `output`, creating parent directories as needed.
pub fn generate_local_ics(input: &Path, output: &Path, encoder: &Encoder) -> Result<()> {
    let json = std::fs::read(input)
        .with_context(|| format!("Error reading input file {}", input.display()))?;

    let events = decode_events(&json).context("Error parsing JSON")?;
    debug!(count = events.len(), input = %input.display(), "Decoded events");

    let ics = encoder.encode(&events).context("Error generating ICS")?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Error creating output directory {}", parent.display())
        })?;
    }

    std::fs::write(output, ics)
        .with_context(|| format!("Error writing output file {}", output.display()))?;

    info!("ICS file generated successfully: {}", output.display());

    Ok(())
}
