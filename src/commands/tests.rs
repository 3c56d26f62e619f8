//! Tests for command handlers and rendering

use super::league::*;
use super::render::*;
use super::teams::*;
use super::CommandContext;
use crate::cli::types::{MatchId, Score, Strength, TeamId, Week};
use crate::config::LeagueConfig;
use crate::error::ErrorKind;
use crate::league::PredictionRow;
use crate::storage::{InMemoryStore, Match, Team, TeamStore};

fn test_context(as_json: bool) -> CommandContext<InMemoryStore> {
    let mut config = LeagueConfig::default();
    config.simulation.seed = Some(7);
    config.simulation.trials = 100;
    CommandContext::new(InMemoryStore::new(), &config, as_json).unwrap()
}

fn sample_team(id: i64, name: &str, points: u32) -> Team {
    let mut team = Team::new(TeamId::new(id), name, 80);
    team.points = points;
    team
}

#[test]
fn test_context_bootstraps_league() {
    let ctx = test_context(false);
    assert_eq!(ctx.league.table().unwrap().len(), 4);
    assert_eq!(ctx.league.matches(None).unwrap().len(), 12);
    assert_eq!(ctx.defaults.len(), 4);
}

#[test]
fn test_read_only_handlers_succeed() {
    for as_json in [false, true] {
        let ctx = test_context(as_json);
        handle_table(&ctx).unwrap();
        handle_current_week(&ctx).unwrap();
        handle_matches(&ctx, None).unwrap();
        handle_matches(&ctx, Some(Week::new(2))).unwrap();
        handle_matches(&ctx, Some(Week::new(9))).unwrap();
    }
}

#[test]
fn test_season_handlers_in_order() {
    for as_json in [false, true] {
        let mut ctx = test_context(as_json);

        let early = handle_predictions(&mut ctx).unwrap_err();
        assert_eq!(early.kind(), ErrorKind::PreconditionFailed);

        handle_next_week(&mut ctx).unwrap();
        assert_eq!(ctx.league.current_week().unwrap(), 2);

        handle_play_all(&mut ctx).unwrap();
        assert_eq!(ctx.league.current_week().unwrap(), -1);

        // Nothing left: both commands still succeed
        handle_next_week(&mut ctx).unwrap();
        handle_play_all(&mut ctx).unwrap();
        handle_predictions(&mut ctx).unwrap();

        handle_reset(&mut ctx).unwrap();
        assert_eq!(ctx.league.current_week().unwrap(), 1);
    }
}

#[test]
fn test_edit_match_validates_goals() {
    let mut ctx = test_context(false);

    let err = handle_edit_match(&mut ctx, MatchId::new(1), -1, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(!ctx.league.matches(None).unwrap()[0].is_played);

    let err = handle_edit_match(&mut ctx, MatchId::new(404), 1, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    handle_edit_match(&mut ctx, MatchId::new(1), 3, 1).unwrap();
    let edited = ctx.league.matches(None).unwrap()[0].clone();
    assert_eq!(edited.score(), Some(Score::new(3, 1)));
}

#[test]
fn test_team_handlers() {
    let mut ctx = test_context(true);
    let id = ctx.league.table().unwrap()[0].id;

    handle_set_strength(&mut ctx, id, Strength::new(12).unwrap()).unwrap();
    handle_set_name(&mut ctx, id, "Brentford").unwrap();
    assert_eq!(ctx.league.store().team(id).unwrap().name, "Brentford");

    let err = handle_set_name(&mut ctx, id, "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    handle_reset_defaults(&mut ctx).unwrap();
    let names: Vec<String> = ctx
        .league
        .table()
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert!(!names.contains(&"Brentford".to_string()));
}

#[test]
fn test_format_table_ranks_rows() {
    let table = vec![sample_team(2, "Arsenal", 9), sample_team(1, "Chelsea", 4)];

    let text = format_table(&table);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("Pts"));
    assert!(lines[2].starts_with(" 1    | Arsenal"));
    assert!(lines[3].starts_with(" 2    | Chelsea"));
    assert!(lines[2].trim_end().ends_with('9'));
}

#[test]
fn test_format_table_truncates_long_names() {
    let table = vec![sample_team(1, "Wolverhampton Wanderers", 0)];
    let text = format_table(&table);
    assert!(text.contains("Wolverhampton Wan |"));
}

#[test]
fn test_format_match_played_and_unplayed() {
    let names = team_names(&[sample_team(1, "Chelsea", 0), sample_team(2, "Arsenal", 0)]);
    let mut m = Match {
        id: MatchId::new(5),
        week: Week::new(2),
        home_team_id: TeamId::new(1),
        away_team_id: TeamId::new(2),
        home_goals: None,
        away_goals: None,
        is_played: false,
    };

    assert!(format_match(&m, &names).ends_with("Chelsea vs Arsenal"));

    m.record(Score::new(2, 1));
    let line = format_match(&m, &names);
    assert!(line.starts_with("Week 2"));
    assert!(line.contains("#5"));
    assert!(line.ends_with("Chelsea 2-1 Arsenal"));
}

#[test]
fn test_format_match_unknown_team() {
    let names = team_names(&[]);
    let m = Match {
        id: MatchId::new(1),
        week: Week::new(1),
        home_team_id: TeamId::new(8),
        away_team_id: TeamId::new(9),
        home_goals: None,
        away_goals: None,
        is_played: false,
    };
    assert!(format_match(&m, &names).ends_with("Team 8 vs Team 9"));
}

#[test]
fn test_format_predictions() {
    let rows = vec![
        PredictionRow {
            team_id: TeamId::new(1),
            team_name: "Chelsea".to_string(),
            probability_percentage: 62.5,
        },
        PredictionRow {
            team_id: TeamId::new(2),
            team_name: "Arsenal".to_string(),
            probability_percentage: 37.5,
        },
    ];

    let text = format_predictions(&rows);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("Chelsea"));
    assert!(lines[2].ends_with("62.50%"));
    assert!(lines[3].ends_with("37.50%"));
}
