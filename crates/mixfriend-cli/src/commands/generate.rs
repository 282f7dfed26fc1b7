//! Preset generation command.

use clap::Args;
use mixfriend_config::PresetWriter;
use mixfriend_core::{Encoder, FieldOrder};
use std::path::{Path, PathBuf};

use super::common::{format_number, load_profile_set, select_profiles};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Output directory for .pst files
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Only generate devices whose name contains this text (case-insensitive)
    #[arg(short, long)]
    device: Option<String>,

    /// Order of the four band fields in each record
    #[arg(long, default_value_t = FieldOrder::default())]
    field_order: FieldOrder,
}

pub fn run(config: Option<&Path>, args: GenerateArgs) -> anyhow::Result<()> {
    let set = load_profile_set(config)?;
    // Reject a broken set before anything is written.
    set.validate()?;
    let targets = select_profiles(&set, args.device.as_deref())?;

    let writer =
        PresetWriter::new(&args.output).with_encoder(Encoder::with_field_order(args.field_order));
    let shown_dir = std::path::absolute(&args.output).unwrap_or_else(|_| args.output.clone());
    println!(
        "Generating {} preset(s) -> {}/",
        targets.len(),
        shown_dir.display()
    );
    println!();

    for profile in &targets {
        let written = writer.write_profile(profile)?;
        let file = written
            .path
            .file_name()
            .map_or_else(|| written.path.display().to_string(), |f| f.to_string_lossy().into_owned());
        println!(
            "  {:<22} {}/8 bands  HP={}Hz  LP={}Hz  ->  {}",
            written.name,
            written.active_bands,
            format_number(written.high_pass),
            format_number(written.low_pass),
            file
        );
    }

    println!();
    println!("Done. {} preset(s) written.", targets.len());
    Ok(())
}
