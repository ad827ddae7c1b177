//! Tournament statistics from match results.
//!
//! Builds the scorer's [`TournamentStats`] and [`TourAverages`] from ATP-style
//! match rows, so the engine can run straight off a season's results.

pub mod models;

pub use models::{MatchRecord, PlayerTournamentSummary, PlayerYearlySummary};

use thiserror::Error;
use tracing::debug;

use crate::bias::rounds::{round_rank, RoundCode};
use crate::bias::{TourAverages, TournamentStats};
use models::SideStats;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("no matches found for {player} at {tournament}")]
    NoMatches { player: String, tournament: String },
    #[error("no matches found for tournament {0}")]
    NoTournament(String),
    #[error("no matches found for {player} in {season}")]
    NoSeasonMatches { player: String, season: String },
}

fn mean<I: IntoIterator<Item = Option<f64>>>(values: I) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

fn saved_pct(saved: Option<f64>, faced: Option<f64>) -> f64 {
    match (saved, faced) {
        (Some(s), Some(f)) if f > 0.0 => s / f * 100.0,
        _ => 0.0,
    }
}

fn tournament_matches<'a>(
    matches: &'a [MatchRecord],
    tournament: &str,
    year: Option<i32>,
) -> Vec<&'a MatchRecord> {
    matches
        .iter()
        .filter(|m| m.is_tournament(tournament))
        .filter(|m| year.map_or(true, |y| m.year() == Some(y)))
        .collect()
}

/// Furthest round a player reached, given the matches they won and lost.
///
/// Winning a final is `W`, losing one is `F`; otherwise the highest ranked
/// round played, never lower than `R128`.
pub fn furthest_round(won: &[&MatchRecord], lost: &[&MatchRecord]) -> RoundCode {
    if won.iter().any(|m| m.round == "F") {
        return RoundCode::W;
    }
    if lost.iter().any(|m| m.round == "F") {
        return RoundCode::F;
    }
    won.iter()
        .chain(lost)
        .map(|m| round_rank(&m.round))
        .max()
        .and_then(RoundCode::from_rank)
        .map_or(RoundCode::R128, |r| r.max(RoundCode::R128))
}

/// Seed from the first won match carrying one, else the first lost match
/// carrying one, else 0 (unseeded).
fn seed_of(won: &[&MatchRecord], lost: &[&MatchRecord]) -> u32 {
    won.iter()
        .find_map(|m| m.winner_seed)
        .or_else(|| lost.iter().find_map(|m| m.loser_seed))
        .unwrap_or(0)
}

/// Matches the player won and lost, in input order.
fn split_by_player<'a>(
    matches: &[&'a MatchRecord],
    player: &str,
) -> (Vec<&'a MatchRecord>, Vec<&'a MatchRecord>) {
    let won = matches
        .iter()
        .copied()
        .filter(|m| m.winner_name == player)
        .collect();
    let lost = matches
        .iter()
        .copied()
        .filter(|m| m.loser_name == player)
        .collect();
    (won, lost)
}

/// Win/loss record and per-match serve means over a set of played matches.
struct PlayerLine {
    total_matches: usize,
    win_rate: f64,
    avg_match_minutes: Option<f64>,
    aces: f64,
    double_faults: f64,
    break_points_faced: f64,
    break_points_saved_pct: f64,
}

fn player_line(won: &[&MatchRecord], lost: &[&MatchRecord]) -> PlayerLine {
    let total_matches = won.len() + lost.len();
    let sides: Vec<SideStats> = won
        .iter()
        .map(|m| m.winner_side())
        .chain(lost.iter().map(|m| m.loser_side()))
        .collect();
    let bp_saved = mean(sides.iter().map(|s| s.bp_saved));
    let bp_faced = mean(sides.iter().map(|s| s.bp_faced));

    PlayerLine {
        total_matches,
        win_rate: if total_matches > 0 {
            won.len() as f64 / total_matches as f64 * 100.0
        } else {
            0.0
        },
        avg_match_minutes: mean(won.iter().chain(lost).map(|m| m.minutes)),
        aces: mean(sides.iter().map(|s| s.aces)).unwrap_or(0.0),
        double_faults: mean(sides.iter().map(|s| s.double_faults)).unwrap_or(0.0),
        break_points_faced: bp_faced.unwrap_or(0.0),
        break_points_saved_pct: saved_pct(bp_saved, bp_faced),
    }
}

pub fn player_tournament_summary(
    matches: &[MatchRecord],
    player: &str,
    tournament: &str,
    year: Option<i32>,
) -> Result<PlayerTournamentSummary, StatsError> {
    let in_tournament = tournament_matches(matches, tournament, year);
    let (won, lost) = split_by_player(&in_tournament, player);
    if won.is_empty() && lost.is_empty() {
        return Err(StatsError::NoMatches {
            player: player.to_string(),
            tournament: tournament.to_string(),
        });
    }

    let line = player_line(&won, &lost);
    let round = furthest_round(&won, &lost);
    let seed = seed_of(&won, &lost);
    debug!(
        "{} at {}: {} matches, seed {}, reached {}",
        player, tournament, line.total_matches, seed, round
    );

    Ok(PlayerTournamentSummary {
        player: player.to_string(),
        tournament: tournament.to_string(),
        total_matches: line.total_matches,
        wins: won.len(),
        losses: lost.len(),
        win_rate: line.win_rate,
        avg_match_minutes: line.avg_match_minutes,
        break_points_faced: line.break_points_faced,
        stats: TournamentStats {
            aces: line.aces,
            double_faults: line.double_faults,
            break_points_saved_pct: line.break_points_saved_pct,
            seed: Some(seed),
            round_reached: Some(round.to_string()),
        },
    })
}

/// Season-wide record and serve means across every tournament, optionally
/// restricted to one year.
pub fn player_yearly_summary(
    matches: &[MatchRecord],
    player: &str,
    year: Option<i32>,
) -> Result<PlayerYearlySummary, StatsError> {
    let in_season: Vec<&MatchRecord> = matches
        .iter()
        .filter(|m| year.map_or(true, |y| m.year() == Some(y)))
        .collect();
    let (won, lost) = split_by_player(&in_season, player);
    if won.is_empty() && lost.is_empty() {
        return Err(StatsError::NoSeasonMatches {
            player: player.to_string(),
            season: year.map_or_else(|| "any season".to_string(), |y| y.to_string()),
        });
    }

    let line = player_line(&won, &lost);
    debug!(
        "{} season {:?}: {}-{} over {} matches",
        player,
        year,
        won.len(),
        lost.len(),
        line.total_matches
    );

    Ok(PlayerYearlySummary {
        player: player.to_string(),
        year,
        total_matches: line.total_matches,
        wins: won.len(),
        losses: lost.len(),
        win_rate: line.win_rate,
        avg_match_minutes: line.avg_match_minutes,
        aces: line.aces,
        double_faults: line.double_faults,
        break_points_faced: line.break_points_faced,
        break_points_saved_pct: line.break_points_saved_pct,
    })
}

fn average_sides(winners: Option<f64>, losers: Option<f64>) -> f64 {
    match (winners, losers) {
        (Some(w), Some(l)) => (w + l) / 2.0,
        (Some(v), None) | (None, Some(v)) => v,
        (None, None) => 0.0,
    }
}

/// Field averages for a tournament: the winners' mean and the losers' mean,
/// averaged. Break points saved % averages the two sides' saved/faced ratios.
pub fn tour_averages(
    matches: &[MatchRecord],
    tournament: &str,
    year: Option<i32>,
) -> Result<TourAverages, StatsError> {
    let in_tournament = tournament_matches(matches, tournament, year);
    if in_tournament.is_empty() {
        return Err(StatsError::NoTournament(tournament.to_string()));
    }

    let side_means = |side: fn(&MatchRecord) -> SideStats| {
        let sides: Vec<SideStats> = in_tournament.iter().map(|m| side(m)).collect();
        (
            mean(sides.iter().map(|s| s.aces)),
            mean(sides.iter().map(|s| s.double_faults)),
            saved_pct(
                mean(sides.iter().map(|s| s.bp_saved)),
                mean(sides.iter().map(|s| s.bp_faced)),
            ),
        )
    };
    let (w_aces, w_dfs, w_pct) = side_means(MatchRecord::winner_side);
    let (l_aces, l_dfs, l_pct) = side_means(MatchRecord::loser_side);

    Ok(TourAverages {
        aces: average_sides(w_aces, l_aces),
        double_faults: average_sides(w_dfs, l_dfs),
        break_points_saved_pct: (w_pct + l_pct) / 2.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[allow(clippy::too_many_arguments)]
    fn make_match(
        round: &str,
        winner: &str,
        loser: &str,
        w_seed: Option<u32>,
        l_seed: Option<u32>,
        w: (f64, f64, f64, f64),
        l: (f64, f64, f64, f64),
    ) -> MatchRecord {
        MatchRecord {
            tourney_name: "Australian Open".into(),
            tourney_date: Some(20240115),
            round: round.into(),
            minutes: Some(120.0),
            winner_name: winner.into(),
            loser_name: loser.into(),
            winner_seed: w_seed,
            loser_seed: l_seed,
            w_ace: Some(w.0),
            w_df: Some(w.1),
            w_bp_saved: Some(w.2),
            w_bp_faced: Some(w.3),
            l_ace: Some(l.0),
            l_df: Some(l.1),
            l_bp_saved: Some(l.2),
            l_bp_faced: Some(l.3),
        }
    }

    fn sample_draw() -> Vec<MatchRecord> {
        vec![
            make_match("R16", "Sinner", "Khachanov", Some(4), Some(15), (10.0, 2.0, 3.0, 4.0), (8.0, 4.0, 2.0, 6.0)),
            make_match("QF", "Sinner", "Rublev", Some(4), Some(5), (12.0, 1.0, 4.0, 4.0), (6.0, 3.0, 5.0, 8.0)),
            make_match("SF", "Medvedev", "Sinner", Some(3), Some(4), (14.0, 5.0, 6.0, 8.0), (8.0, 3.0, 1.0, 4.0)),
        ]
    }

    #[test]
    fn semifinal_loser_summary() {
        let summary =
            player_tournament_summary(&sample_draw(), "Sinner", "australian", Some(2024)).unwrap();
        assert_eq!(summary.total_matches, 3);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 1);
        assert_relative_eq!(summary.win_rate, 200.0 / 3.0, epsilon = 1e-9);
        assert_eq!(summary.stats.seed, Some(4));
        assert_eq!(summary.stats.round_reached.as_deref(), Some("SF"));
        // aces over all three of Sinner's matches: 10, 12, 8
        assert_relative_eq!(summary.stats.aces, 10.0, epsilon = 1e-12);
        assert_relative_eq!(summary.stats.double_faults, 2.0, epsilon = 1e-12);
        // saved (3 + 4 + 1) / 3 over faced (4 + 4 + 4) / 3
        assert_relative_eq!(summary.stats.break_points_saved_pct, 200.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(summary.break_points_faced, 4.0, epsilon = 1e-12);
        assert_eq!(summary.avg_match_minutes, Some(120.0));
    }

    #[test]
    fn final_winner_reaches_w_and_loser_f() {
        let mut draw = sample_draw();
        draw.push(make_match("F", "Medvedev", "Zverev", Some(3), Some(6), (1.0, 1.0, 1.0, 1.0), (1.0, 1.0, 1.0, 1.0)));
        let winner = player_tournament_summary(&draw, "Medvedev", "Australian Open", None).unwrap();
        let loser = player_tournament_summary(&draw, "Zverev", "Australian Open", None).unwrap();
        assert_eq!(winner.stats.round_reached.as_deref(), Some("W"));
        assert_eq!(loser.stats.round_reached.as_deref(), Some("F"));
        assert_eq!(loser.stats.seed, Some(6));
    }

    #[test]
    fn unseeded_player_gets_zero_seed() {
        let draw = vec![make_match("R128", "Qualifier", "Wildcard", None, None, (1.0, 1.0, 1.0, 1.0), (1.0, 1.0, 1.0, 1.0))];
        let summary = player_tournament_summary(&draw, "Wildcard", "Australian", None).unwrap();
        assert_eq!(summary.stats.seed, Some(0));
        assert_eq!(summary.stats.round_reached.as_deref(), Some("R128"));
    }

    #[test]
    fn unknown_rounds_fall_back_to_r128() {
        let draw = vec![make_match("RR", "A", "B", None, None, (1.0, 1.0, 1.0, 1.0), (1.0, 1.0, 1.0, 1.0))];
        let summary = player_tournament_summary(&draw, "A", "Australian", None).unwrap();
        assert_eq!(summary.stats.round_reached.as_deref(), Some("R128"));
    }

    #[test]
    fn missing_player_is_an_error() {
        let err = player_tournament_summary(&sample_draw(), "Federer", "Australian", None).unwrap_err();
        assert!(matches!(err, StatsError::NoMatches { .. }));
    }

    #[test]
    fn year_filter_excludes_other_seasons() {
        let err = player_tournament_summary(&sample_draw(), "Sinner", "Australian", Some(2023)).unwrap_err();
        assert!(matches!(err, StatsError::NoMatches { .. }));
    }

    #[test]
    fn zero_break_points_faced_gives_zero_pct() {
        let draw = vec![make_match("R64", "A", "B", None, None, (1.0, 1.0, 0.0, 0.0), (1.0, 1.0, 0.0, 0.0))];
        let summary = player_tournament_summary(&draw, "A", "Australian", None).unwrap();
        assert_eq!(summary.stats.break_points_saved_pct, 0.0);
    }

    #[test]
    fn averages_combine_winner_and_loser_means() {
        let avg = tour_averages(&sample_draw(), "Australian", Some(2024)).unwrap();
        // winners' aces mean 12, losers' 22/3
        assert_relative_eq!(avg.aces, (12.0 + 22.0 / 3.0) / 2.0, epsilon = 1e-9);
        // winners' dfs mean 8/3, losers' 10/3
        assert_relative_eq!(avg.double_faults, 3.0, epsilon = 1e-9);
        // winners 13/16, losers 8/18
        let expected = (13.0 / 16.0 * 100.0 + 8.0 / 18.0 * 100.0) / 2.0;
        assert_relative_eq!(avg.break_points_saved_pct, expected, epsilon = 1e-9);
    }

    #[test]
    fn averages_for_unknown_tournament_fail() {
        assert_eq!(
            tour_averages(&sample_draw(), "Wimbledon", None),
            Err(StatsError::NoTournament("Wimbledon".into()))
        );
    }

    fn season_with_other_tournament() -> Vec<MatchRecord> {
        let mut draw = sample_draw();
        let mut doha = make_match("F", "Rublev", "Sinner", Some(1), Some(2), (5.0, 2.0, 4.0, 6.0), (4.0, 0.0, 2.0, 2.0));
        doha.tourney_name = "Doha".into();
        doha.tourney_date = Some(20240219);
        doha.minutes = Some(90.0);
        let mut old_season = make_match("R32", "Sinner", "Rublev", None, None, (30.0, 9.0, 0.0, 0.0), (1.0, 1.0, 0.0, 0.0));
        old_season.tourney_date = Some(20230116);
        draw.push(doha);
        draw.push(old_season);
        draw
    }

    #[test]
    fn yearly_summary_spans_tournaments_with_wins_and_losses() {
        let summary = player_yearly_summary(&season_with_other_tournament(), "Sinner", Some(2024)).unwrap();
        assert_eq!(summary.year, Some(2024));
        assert_eq!(summary.total_matches, 4);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 2);
        assert_relative_eq!(summary.win_rate, 50.0, epsilon = 1e-12);
        // aces 10, 12, 8, 4
        assert_relative_eq!(summary.aces, 8.5, epsilon = 1e-12);
        // double faults 2, 1, 3, 0
        assert_relative_eq!(summary.double_faults, 1.5, epsilon = 1e-12);
        // saved (3 + 4 + 1 + 2) / 4 over faced (4 + 4 + 4 + 2) / 4
        assert_relative_eq!(summary.break_points_faced, 3.5, epsilon = 1e-12);
        assert_relative_eq!(summary.break_points_saved_pct, 10.0 / 14.0 * 100.0, epsilon = 1e-9);
        assert_relative_eq!(summary.avg_match_minutes.unwrap(), 112.5, epsilon = 1e-12);
    }

    #[test]
    fn yearly_summary_without_year_covers_every_season() {
        let summary = player_yearly_summary(&season_with_other_tournament(), "Sinner", None).unwrap();
        assert_eq!(summary.total_matches, 5);
        assert_eq!(summary.wins, 3);
        assert_eq!(summary.year, None);
    }

    #[test]
    fn yearly_summary_for_empty_season_fails() {
        assert_eq!(
            player_yearly_summary(&season_with_other_tournament(), "Sinner", Some(2022)),
            Err(StatsError::NoSeasonMatches {
                player: "Sinner".into(),
                season: "2022".into(),
            })
        );
        assert!(matches!(
            player_yearly_summary(&sample_draw(), "Federer", None),
            Err(StatsError::NoSeasonMatches { .. })
        ));
    }

    #[test]
    fn missing_values_are_skipped_in_means() {
        assert_eq!(mean([Some(2.0), None, Some(4.0)]), Some(3.0));
        assert_eq!(mean([None, None]), None);
        assert_eq!(mean([Some(f64::NAN), Some(1.0)]), Some(1.0));
    }
}
