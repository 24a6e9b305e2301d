//! Console progress reporting

use colored::Colorize;
use plenum_application::ProgressNotifier;
use plenum_domain::Phase;

/// Prints a line per round and per turn as the run advances.
pub struct ProgressReporter;

impl ProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_round_start(&self, round: u32, phases: &[Phase]) {
        let names = phases
            .iter()
            .map(|p| p.display_name())
            .collect::<Vec<_>>()
            .join(" + ");
        println!();
        println!("{} {}", format!("Round {round}").bold(), format!("({names})").dimmed());
    }

    fn on_turn_complete(&self, _round: u32, speaker: &str, success: bool) {
        if success {
            println!("  {} {}", speaker.green(), "spoke".dimmed());
        } else {
            println!("  {} {}", speaker.yellow(), "produced no response".dimmed());
        }
    }

    fn on_round_complete(&self, _round: u32) {}
}
