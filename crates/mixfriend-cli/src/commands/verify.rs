//! Record verification command.
//!
//! Checks a captured `.pst` file against the built-in footer and, optionally,
//! against the encoding of a device profile.

use clap::Args;
use mixfriend_config::{DeviceProfile, ProfileSet};
use mixfriend_core::{Band, FOOTER_OFFSET, FieldOrder};
use std::path::{Path, PathBuf};

use super::common::{format_number, load_profile_set, read_record};

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// The .pst file to check
    file: PathBuf,

    /// Compare the bands against this device profile
    #[arg(short, long)]
    device: Option<String>,

    /// Order of the four band fields in each record
    #[arg(long, default_value_t = FieldOrder::default())]
    field_order: FieldOrder,
}

pub fn run(config: Option<&Path>, args: VerifyArgs) -> anyhow::Result<()> {
    let record = read_record(&args.file, args.field_order)?;
    let mut ok = true;

    let drift = record.footer_drift();
    if drift.is_empty() {
        println!("Footer: matches reference");
    } else {
        ok = false;
        println!("Footer: {} byte(s) differ from reference", drift.len());
        for offset in &drift {
            let absolute = FOOTER_OFFSET + offset;
            println!(
                "  offset {absolute:>3} (0x{absolute:02x}): found 0x{:02x}, expected 0x{:02x}",
                record.footer[*offset],
                mixfriend_core::FOOTER[*offset]
            );
        }
    }

    if let Some(query) = &args.device {
        let set = load_profile_set(config)?;
        let profile = pick_profile(&set, query)?;
        let device = profile.to_device()?;

        match record.bands.first_difference(device.bands()) {
            None => println!("Bands: match '{}'", device.name()),
            Some(kind) => {
                ok = false;
                println!("Bands: first difference from '{}' at {kind}", device.name());
                println!("  file:    {}", describe(&record.bands[kind]));
                println!("  profile: {}", describe(device.band(kind)));
            }
        }
    }

    if !ok {
        anyhow::bail!("'{}' failed verification", args.file.display());
    }
    println!("OK");
    Ok(())
}

/// An exact name match wins; otherwise the query must match exactly one device.
fn pick_profile<'a>(set: &'a ProfileSet, query: &str) -> anyhow::Result<&'a DeviceProfile> {
    if let Some(profile) = set.iter().find(|p| p.name.eq_ignore_ascii_case(query)) {
        return Ok(profile);
    }
    match set.matching(query)?.as_slice() {
        [profile] => Ok(*profile),
        many => anyhow::bail!(
            "'{}' matches {} devices: {}",
            query,
            many.len(),
            many.iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn describe(band: &Band) -> String {
    format!(
        "freq={} gain={} q={} enabled={}",
        format_number(band.frequency()),
        format_number(band.gain()),
        format_number(band.q()),
        band.enabled()
    )
}
