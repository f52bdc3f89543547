use super::CommandResult;
use colored::Colorize;
use seat_apportionment::formats::{json, pl_pkw};
use seat_apportionment::formats::pl_pkw::CategoryOverrides;
use seat_apportionment::Category;
use std::path::Path;

pub fn convert(raw_data_dir: &Path, output: &Path, overrides: &CategoryOverrides) -> CommandResult {
    println!(
        "🔍 Reading PKW exports from {}",
        raw_data_dir.display().to_string().cyan()
    );

    let election = pl_pkw::read_election(raw_data_dir, overrides)?;

    println!(
        "📋 Found {} constituencies with {} seats and {} committees",
        election.seats.len().to_string().bright_yellow(),
        election.seats.total_seats().to_string().bright_yellow(),
        election.votes.committees().count().to_string().bright_yellow()
    );
    for (name, category) in election.votes.committees() {
        if category != Category::Standard {
            println!("  🏷️  {} ({})", name.green(), category);
        }
    }

    json::write_election(output, &election)?;

    println!(
        "✅ Wrote election file: {}",
        output.display().to_string().bright_green()
    );
    Ok(())
}
