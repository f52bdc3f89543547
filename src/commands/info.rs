use super::CommandResult;
use colored::Colorize;
use seat_apportionment::formats::json;
use seat_apportionment::{Driver, ThresholdFilter, Thresholds};
use std::path::Path;

/// Validate an election file and dump what the threshold filter makes of it.
pub fn info(election_file: &Path, thresholds: Thresholds) -> CommandResult {
    let election = json::read_election(election_file)?;
    Driver::validate(&election.votes, &election.seats)?;

    println!(
        "🗳️  {}: {} constituencies, {} seats, {} votes",
        election_file.display().to_string().cyan(),
        election.seats.len(),
        election.seats.total_seats(),
        election.votes.total_votes()
    );

    for (constituency, seats) in election.seats.iter() {
        let votes: u64 = election
            .votes
            .constituency(constituency)
            .map(|votes| votes.values().sum())
            .unwrap_or(0);
        println!("  📍 {:>3}: {:>3} seats, {:>9} votes", constituency, seats, votes);
    }

    let filter = ThresholdFilter::new(thresholds)?;
    let mut assessments = filter.assess(&election.votes)?;
    assessments.sort_by(|a, b| b.national_votes.cmp(&a.national_votes).then_with(|| a.committee.cmp(&b.committee)));

    println!("📊 National results:");
    for assessment in assessments {
        let line = format!(
            "{} [{}] {} votes ({:.2}%, threshold {:.2}%)",
            assessment.committee,
            assessment.category,
            assessment.national_votes,
            assessment.share * 100.0,
            assessment.threshold * 100.0
        );
        if assessment.retained {
            println!("  ✅ {}", line.green());
        } else {
            println!("  ❌ {}", line.red());
        }
    }

    Ok(())
}
