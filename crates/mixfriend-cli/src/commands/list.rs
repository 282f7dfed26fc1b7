//! Device profile listing command.

use clap::Args;
use std::path::Path;

use super::common::load_profile_set;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Also show each profile's description
    #[arg(short, long)]
    long: bool,
}

pub fn run(config: Option<&Path>, args: ListArgs) -> anyhow::Result<()> {
    let set = load_profile_set(config)?;

    println!("Available devices ({}):", set.len());
    println!();
    for profile in set.iter() {
        println!(
            "  {:<22} {}/8 bands active  ->  {}",
            profile.name,
            profile.active_band_count(),
            profile.output_filename()
        );
        if args.long
            && let Some(desc) = &profile.description
        {
            println!("  {:<22} {}", "", desc);
        }
    }
    println!();

    Ok(())
}
