//! Console output for completed runs

use colored::Colorize;
use plenum_domain::{DeliberationResult, Outcome};

/// Print the ballot list, counts, and outcome banner.
pub fn print_result(result: &DeliberationResult) {
    println!();
    println!("{}", "Voting Results".bold());
    println!("{}", "-".repeat(20));
    for ballot in &result.ballots {
        println!("{}: {}", ballot.participant, ballot.choice);
    }
    println!("{}", "-".repeat(20));
    println!(
        "Yes: {}   No: {}   Abstain: {}",
        result.tally.yes, result.tally.no, result.tally.abstain
    );

    let announcement = result.tally.outcome.announcement();
    match result.tally.outcome {
        Outcome::Adopted => println!("{}", announcement.green().bold()),
        Outcome::Rejected => println!("{}", announcement.red().bold()),
    }
}
