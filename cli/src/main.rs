//! CLI entrypoint for plenum
//!
//! Wires the layers together with dependency injection: config loading,
//! the chat-completions gateway, the response parser, optional briefing
//! and event-log adapters, and the run-deliberation use case.

mod args;
mod output;
mod progress;

use anyhow::{Context, Result, bail};
use args::Cli;
use clap::Parser;
use plenum_application::{ParticipantSpec, RunDeliberationUseCase};
use plenum_infrastructure::{
    ConfigLoader, FileBriefingProvider, JsonlEventLog, KeyedResponseParser, OpenAiGateway,
};
use progress::ProgressReporter;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    // CLI flags override the merged file configuration.
    let mut run = file_config.run_config();
    if let Some(policy) = cli.policy {
        run.policy = policy;
    }
    if !cli.participants.is_empty() {
        run.participants = cli
            .participants
            .iter()
            .map(|name| ParticipantSpec::new(name.as_str()))
            .collect();
    }
    if let Some(rounds) = cli.rounds {
        run.total_rounds = rounds;
    }
    if let Some(cap) = cli.speaker_cap {
        run.speaker_cap = Some(cap);
    }
    if cli.no_chairperson {
        run.has_chairperson = false;
    }
    if cli.no_abstain {
        run.allow_abstain = false;
    }

    if run.policy.trim().is_empty() {
        bail!("no policy configured; pass --policy or set [run].policy in plenum.toml");
    }
    if run.participants.is_empty() {
        bail!(
            "no participants configured; pass --participant or add [[participants]] to plenum.toml"
        );
    }

    // === Dependency injection ===
    let gateway_cfg = &file_config.gateway;
    let api_key = std::env::var(&gateway_cfg.api_key_env).with_context(|| {
        format!("API key environment variable {} is not set", gateway_cfg.api_key_env)
    })?;

    let model = cli.model.unwrap_or_else(|| gateway_cfg.model.clone());
    let gateway = Arc::new(
        OpenAiGateway::new(api_key)
            .with_base_url(gateway_cfg.base_url.as_str())
            .with_model(model.as_str())
            .with_temperature(gateway_cfg.temperature)
            .with_max_tokens(gateway_cfg.max_tokens)
            .with_max_attempts(gateway_cfg.max_attempts),
    );

    let mut use_case =
        RunDeliberationUseCase::new(gateway, Arc::new(KeyedResponseParser::new()));

    if let Some(path) = cli.briefings.clone().or(file_config.output.briefing_file.clone()) {
        let briefings = FileBriefingProvider::from_path(&path)
            .with_context(|| format!("loading briefings from {}", path.display()))?;
        use_case = use_case.with_briefings(Arc::new(briefings));
    }

    if let Some(path) = cli.event_file.clone().or(file_config.output.event_file.clone())
        && let Some(event_log) = JsonlEventLog::create(&path)
    {
        info!("event log: {}", event_log.path().display());
        use_case = use_case.with_event_log(Arc::new(event_log));
    }

    if let Some(seed) = cli.seed.or(file_config.run.seed) {
        use_case = use_case.with_seed(seed);
    }

    if !cli.quiet {
        println!("Policy: {}", run.policy);
        println!(
            "Participants: {}",
            run.participants
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Rounds: {}   Model: {}", run.total_rounds, model);
    }

    let result = if cli.quiet {
        use_case.execute(run).await?
    } else {
        use_case
            .execute_with_progress(run, &ProgressReporter::new())
            .await?
    };

    output::print_result(&result);

    if let Some(path) = cli.log_file.clone().or(file_config.output.log_file.clone()) {
        std::fs::write(&path, &result.log)
            .with_context(|| format!("writing run log to {}", path.display()))?;
        println!("\nRun log written to {}", path.display());
    }

    if cli.print_log {
        println!("\n{}", result.log);
    }

    Ok(())
}
