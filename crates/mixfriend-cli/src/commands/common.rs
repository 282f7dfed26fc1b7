//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use mixfriend_config::{DeviceProfile, ProfileSet, load_profiles};
use mixfriend_core::{BandTable, DecodedRecord, Decoder, FieldOrder};
use std::path::Path;

/// Load the profile set, following the default search order when `config`
/// is `None`.
pub fn load_profile_set(config: Option<&Path>) -> anyhow::Result<ProfileSet> {
    let (source, set) = load_profiles(config)
        .with_context(|| format!("failed to load device profiles from {}", source_label(config)))?;
    tracing::info!(%source, devices = set.len(), "using device profiles");
    Ok(set)
}

fn source_label(config: Option<&Path>) -> String {
    config.map_or_else(
        || "the default locations".to_string(),
        |p| format!("'{}'", p.display()),
    )
}

/// Profiles selected by an optional name query, in file order.
pub fn select_profiles<'a>(
    set: &'a ProfileSet,
    query: Option<&str>,
) -> anyhow::Result<Vec<&'a DeviceProfile>> {
    match query {
        Some(query) => Ok(set.matching(query)?),
        None => Ok(set.iter().collect()),
    }
}

/// Read and decode a `.pst` file.
pub fn read_record(path: &Path, field_order: FieldOrder) -> anyhow::Result<DecodedRecord> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), len = bytes.len(), "read record");
    Decoder::with_field_order(field_order)
        .decode_record(&bytes)
        .with_context(|| format!("'{}' is not a valid preset", path.display()))
}

/// Print a band table, one row per band.
pub fn print_band_table(bands: &BandTable) {
    println!(
        "  {:<15} {:>9} {:>8} {:>6}  {}",
        "Band", "Freq", "Gain", "Q", "State"
    );
    for band in bands {
        let state = if band.enabled() { "on" } else { "off" };
        println!(
            "  {:<15} {:>7} Hz {:>5} dB {:>6}  {}",
            band.kind().name(),
            format_number(band.frequency()),
            format_number(band.gain()),
            format_number(band.q()),
            state
        );
    }
}

/// Format a value without trailing zeros, e.g. `250`, `0.71`, `-8`.
pub fn format_number(value: f32) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e9 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
