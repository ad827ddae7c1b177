use clap::Parser;
use std::path::PathBuf;

/// Tennis media bias detector
#[derive(Parser, Debug, Clone)]
#[command(name = "media-bias", version, about)]
pub struct Config {
    /// Directory holding model.json, vectorizer.json, label_encoder.json and feature_order.json
    #[arg(long, env = "BIAS_ARTIFACTS_DIR", default_value = "artifacts")]
    pub artifacts_dir: PathBuf,

    /// Player tournament statistics (JSON)
    #[arg(long, env = "BIAS_STATS")]
    pub stats: Option<PathBuf>,

    /// Tour averages for the same tournament (JSON)
    #[arg(long, env = "BIAS_AVERAGES")]
    pub averages: Option<PathBuf>,

    /// ATP-style match results (JSON array); stats and averages are derived from it
    #[arg(long, env = "BIAS_MATCHES")]
    pub matches: Option<PathBuf>,

    /// Player name as it appears in the match results
    #[arg(long, env = "BIAS_PLAYER")]
    pub player: Option<String>,

    /// Tournament name (case-insensitive substring)
    #[arg(long, env = "BIAS_TOURNAMENT")]
    pub tournament: Option<String>,

    /// Restrict match results to one season
    #[arg(long, env = "BIAS_YEAR")]
    pub year: Option<i32>,

    /// Raw headlines, one per line (or a JSON array of strings for .json files)
    #[arg(long, env = "BIAS_HEADLINES")]
    pub headlines: Option<PathBuf>,

    /// Pre-classified headlines in the {"Positive": [...], "Neutral": [...], "Negative": [...]} layout
    #[arg(long, env = "BIAS_SENTIMENT_RESULTS")]
    pub sentiment_results: Option<PathBuf>,

    /// Write the verdict JSON here instead of stdout
    #[arg(long, env = "BIAS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Pretty-print the verdict JSON
    #[arg(long, env = "BIAS_PRETTY", default_value = "false")]
    pub pretty: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (&self.stats, &self.matches) {
            (Some(_), Some(_)) => {
                anyhow::bail!("use either --stats/--averages or --matches, not both");
            }
            (None, None) => {
                anyhow::bail!("performance data required: --stats with --averages, or --matches");
            }
            (Some(_), None) => {
                if self.averages.is_none() {
                    anyhow::bail!("--averages is required together with --stats");
                }
            }
            (None, Some(_)) => {
                if self.player.is_none() || self.tournament.is_none() {
                    anyhow::bail!("--player and --tournament are required together with --matches");
                }
            }
        }
        match (&self.headlines, &self.sentiment_results) {
            (Some(_), Some(_)) => {
                anyhow::bail!("use either --headlines or --sentiment-results, not both");
            }
            (None, None) => {
                anyhow::bail!("sentiment data required: --headlines or --sentiment-results");
            }
            _ => {}
        }
        if let Some(year) = self.year {
            if !(1968..=2100).contains(&year) {
                anyhow::bail!("year {} is outside the open era", year);
            }
        }
        Ok(())
    }

    /// Whether the classifier artifacts have to be loaded.
    pub fn needs_classifier(&self) -> bool {
        self.headlines.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("media-bias").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn stats_and_headlines_accepted() {
        let c = parse(&["--stats", "s.json", "--averages", "a.json", "--headlines", "h.txt"]);
        assert!(c.validate().is_ok());
        assert!(c.needs_classifier());
        assert_eq!(c.artifacts_dir, PathBuf::from("artifacts"));
    }

    #[test]
    fn matches_need_player_and_tournament() {
        let c = parse(&["--matches", "m.json", "--player", "Jannik Sinner", "--sentiment-results", "r.json"]);
        assert!(c.validate().is_err());
        let c = parse(&[
            "--matches", "m.json", "--player", "Jannik Sinner", "--tournament", "Australian",
            "--sentiment-results", "r.json",
        ]);
        assert!(c.validate().is_ok());
        assert!(!c.needs_classifier());
    }

    #[test]
    fn stats_without_averages_rejected() {
        let c = parse(&["--stats", "s.json", "--headlines", "h.txt"]);
        assert!(c.validate().is_err());
    }

    #[test]
    fn conflicting_sources_rejected() {
        let c = parse(&[
            "--stats", "s.json", "--averages", "a.json", "--matches", "m.json",
            "--headlines", "h.txt",
        ]);
        assert!(c.validate().is_err());
        let c = parse(&[
            "--stats", "s.json", "--averages", "a.json", "--headlines", "h.txt",
            "--sentiment-results", "r.json",
        ]);
        assert!(c.validate().is_err());
    }

    #[test]
    fn missing_sentiment_source_rejected() {
        let c = parse(&["--stats", "s.json", "--averages", "a.json"]);
        assert!(c.validate().is_err());
    }
}
