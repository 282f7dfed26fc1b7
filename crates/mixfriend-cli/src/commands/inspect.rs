//! Record inspection command.

use clap::Args;
use mixfriend_core::FieldOrder;
use std::path::PathBuf;

use super::common::{print_band_table, read_record};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// The .pst file to read
    file: PathBuf,

    /// Order of the four band fields in each record
    #[arg(long, default_value_t = FieldOrder::default())]
    field_order: FieldOrder,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let record = read_record(&args.file, args.field_order)?;

    println!("File: {}", args.file.display());
    println!("Field order: {}", args.field_order);
    println!(
        "Active bands: {}/8",
        record.bands.active_count()
    );
    println!();
    print_band_table(&record.bands);
    println!();

    let footer = if record.footer_matches_reference() {
        "matches reference"
    } else {
        "differs from reference (run 'mixfriend verify' for details)"
    };
    println!("Footer: {footer}");

    Ok(())
}
