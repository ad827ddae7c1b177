use anyhow::{Context, Result};
use clap::Parser;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

mod bias;
mod config;
mod inference;
mod stats;

use bias::expectation::SeedOutcome;
use bias::performance::{PerformanceBand, METRIC_SEED};
use bias::sentiment::CoverageBand;
use bias::{
    score_bias, BiasVerdict, SentimentLabel, SentimentResultSet, TourAverages, TournamentStats,
};
use config::Config;
use inference::{load_artifacts, SentimentPipeline};
use stats::MatchRecord;

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} from {}", what, path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {} in {}", what, path.display()))
}

/// Player stats and field averages, either given directly or derived from
/// match results.
fn load_performance_inputs(config: &Config) -> Result<(TournamentStats, TourAverages)> {
    if let (Some(stats_path), Some(averages_path)) = (&config.stats, &config.averages) {
        let stats: TournamentStats = read_json(stats_path, "tournament stats")?;
        let averages: TourAverages = read_json(averages_path, "tour averages")?;
        return Ok((stats, averages));
    }

    let matches_path = config
        .matches
        .as_deref()
        .context("no performance data source configured")?;
    let player = config.player.as_deref().context("--player is required")?;
    let tournament = config
        .tournament
        .as_deref()
        .context("--tournament is required")?;

    let matches: Vec<MatchRecord> = read_json(matches_path, "match results")?;
    info!("Loaded {} match records from {}", matches.len(), matches_path.display());

    let summary = stats::player_tournament_summary(&matches, player, tournament, config.year)?;
    let averages = stats::tour_averages(&matches, tournament, config.year)?;
    info!(
        "{} at {}: {}-{} ({:.0}% win rate), seed {}, reached {}",
        summary.player,
        summary.tournament,
        summary.wins,
        summary.losses,
        summary.win_rate,
        summary.stats.seed.unwrap_or(0),
        summary.stats.round_reached.as_deref().unwrap_or("?")
    );
    let season = stats::player_yearly_summary(&matches, player, config.year)?;
    info!(
        "{} season{}: {}-{} ({:.0}% win rate), {:.1} aces, {:.1} double faults, {:.1}% break points saved",
        season.player,
        season.year.map(|y| format!(" {}", y)).unwrap_or_default(),
        season.wins,
        season.losses,
        season.win_rate,
        season.aces,
        season.double_faults,
        season.break_points_saved_pct
    );
    Ok((summary.stats, averages))
}

fn read_headlines(path: &Path) -> Result<Vec<String>> {
    if path.extension().is_some_and(|ext| ext == "json") {
        return read_json(path, "headlines");
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read headlines from {}", path.display()))?;
    Ok(raw.lines().map(str::to_string).collect())
}

fn load_sentiment(config: &Config) -> Result<SentimentResultSet> {
    if let Some(path) = &config.sentiment_results {
        return read_json(path, "sentiment results");
    }

    let path = config
        .headlines
        .as_deref()
        .context("no sentiment data source configured")?;
    let headlines = read_headlines(path)?;

    // Artifacts are loaded exactly once for the whole batch.
    let artifacts = load_artifacts(&config.artifacts_dir).with_context(|| {
        format!(
            "Cannot classify headlines without artifacts in {}",
            config.artifacts_dir.display()
        )
    })?;
    let pipeline = SentimentPipeline::new(Arc::new(artifacts));

    let results = pipeline.classify_all(headlines.iter().map(String::as_str))?;
    info!(
        "Classified {} headline(s): {} positive, {} neutral, {} negative",
        results.total(),
        results.positive.len(),
        results.neutral.len(),
        results.negative.len()
    );
    Ok(results)
}

fn report(verdict: &BiasVerdict, sentiment: &SentimentResultSet) {
    info!(
        "Performance score {:.2}: {}",
        verdict.performance_score,
        PerformanceBand::from_score(verdict.performance_score).describe()
    );
    for factor in &verdict.performance_factors {
        info!(
            "  {:<22} {:>18}  vs {:>18}  {:+}",
            factor.metric,
            factor.value.to_string(),
            factor.tour_avg.to_string(),
            factor.points
        );
    }
    if let Some(seed) = verdict
        .performance_factors
        .iter()
        .find(|f| f.metric == METRIC_SEED)
    {
        info!(
            "Based on their seed, the player {}",
            SeedOutcome::from_points(seed.points).summary()
        );
    }

    match (
        sentiment.polar_share(SentimentLabel::Positive),
        sentiment.polar_share(SentimentLabel::Negative),
    ) {
        (Some(pos), Some(neg)) => {
            info!(
                "Positive headlines: {} ({:.0}%)",
                sentiment.positive.len(),
                pos * 100.0
            );
            info!(
                "Negative headlines: {} ({:.0}%)",
                sentiment.negative.len(),
                neg * 100.0
            );
            info!(
                "Sentiment score {:.2}: coverage was {}",
                verdict.sentiment_score,
                CoverageBand::from_score(verdict.sentiment_score).describe()
            );
        }
        _ => warn!("No positive or negative headlines found; sentiment score defaults to 0"),
    }

    info!(
        "Bias score {:.2} ({}): {}",
        verdict.bias_score, verdict.bias_level, verdict.bias_description
    );
    info!("{}", verdict.interpretation().message());
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the verdict JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;
    if config.needs_classifier() {
        info!("Artifacts directory: {}", config.artifacts_dir.display());
    }

    let (tournament_stats, tour_averages) = load_performance_inputs(&config)?;
    let sentiment = load_sentiment(&config)?;

    let verdict = score_bias(&tournament_stats, &tour_averages, &sentiment);
    report(&verdict, &sentiment);

    let json = if config.pretty {
        serde_json::to_string_pretty(&verdict)?
    } else {
        serde_json::to_string(&verdict)?
    };
    match &config.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write verdict to {}", path.display()))?;
            info!("Verdict written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
