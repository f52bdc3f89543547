use super::CommandResult;
use colored::Colorize;
use itertools::Itertools;
use seat_apportionment::formats::json;
use seat_apportionment::reports::{text, ElectionReport};
use seat_apportionment::{Driver, NamedMethod, Thresholds};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub async fn apportion(
    election_file: &Path,
    thresholds: Thresholds,
    methods: Vec<NamedMethod>,
    format: OutputFormat,
    per_constituency: bool,
) -> CommandResult {
    let election = json::read_election(election_file)?;
    let driver = Driver::new(thresholds, methods)?;

    if format == OutputFormat::Text {
        println!(
            "🚀 Apportioning {} seats in {} constituencies with {} methods",
            election.seats.total_seats().to_string().bright_cyan(),
            election.seats.len().to_string().bright_cyan(),
            driver.methods().len().to_string().bright_cyan()
        );
    }

    let prepared = Arc::new(driver.prepare(&election.votes, &election.seats)?);
    let outcomes = driver.apportion_concurrent(Arc::clone(&prepared)).await?;

    match format {
        OutputFormat::Json => {
            let report = ElectionReport::new(
                thresholds,
                election.seats.total_seats(),
                prepared.assessments.clone(),
                &outcomes,
                per_constituency,
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            let width = text::name_width(&outcomes);
            for outcome in &outcomes {
                println!("{}", text::header(&outcome.name, width).bright_cyan().bold());
                for (committee, seats) in text::ranked(outcome) {
                    println!("{}", text::seat_line(committee, seats, width));
                }
                if per_constituency {
                    for (constituency, seats) in &outcome.allocation {
                        let won = seats
                            .iter()
                            .filter(|(_, count)| **count > 0)
                            .map(|(name, count)| format!("{} {}", name, count))
                            .join(", ");
                        println!("  📍 {:>3}: {}", constituency, won.dimmed());
                    }
                }
                println!();
            }
        }
    }

    Ok(())
}
