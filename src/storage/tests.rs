//! Unit tests for storage functionality
//!
//! Every behavioural test runs against both the SQLite database and the
//! in-memory store so the two stay interchangeable.

use super::*;
use crate::cli::types::{MatchId, Score, Strength, TeamId, Week};
use crate::config::TeamSeed;
use crate::engine::fixture::generate_fixture;
use crate::engine::stats::StatDelta;
use crate::error::{ErrorKind, LeagueError};

fn create_test_db() -> LeagueDatabase {
    LeagueDatabase::open_in_memory().unwrap()
}

fn strength(value: i64) -> Strength {
    Strength::new(value).unwrap()
}

fn seed_four<S: LeagueStore>(store: &mut S) -> Vec<TeamId> {
    ["Chelsea", "Arsenal", "Manchester City", "Liverpool"]
        .iter()
        .zip([85, 82, 90, 88])
        .map(|(name, s)| store.create_team(name, strength(s)).unwrap())
        .collect()
}

fn seeded_with_fixture<S: LeagueStore>(mut store: S) -> (S, Vec<TeamId>) {
    let ids = seed_four(&mut store);
    store
        .replace_fixture(&generate_fixture(&ids).unwrap())
        .unwrap();
    (store, ids)
}

fn defaults() -> Vec<TeamSeed> {
    vec![
        TeamSeed::new("Chelsea", 85),
        TeamSeed::new("Arsenal", 82),
        TeamSeed::new("Manchester City", 90),
        TeamSeed::new("Liverpool", 88),
    ]
}

fn check_create_team_is_idempotent_by_name<S: LeagueStore>(mut store: S) {
    let first = store.create_team("Chelsea", strength(85)).unwrap();
    let again = store.create_team("  Chelsea ", strength(10)).unwrap();

    assert_eq!(first, again);
    assert_eq!(store.teams_ranked().unwrap().len(), 1);
    assert_eq!(store.team(first).unwrap().strength, 85);
}

fn check_unknown_ids_are_not_found<S: LeagueStore>(mut store: S) {
    let missing_team = store.team(TeamId::new(99)).unwrap_err();
    assert_eq!(missing_team.kind(), ErrorKind::NotFound);

    let missing_match = store.match_by_id(MatchId::new(99)).unwrap_err();
    assert!(matches!(
        missing_match,
        LeagueError::NotFound { entity: "Match", id: 99 }
    ));

    let update = store.update_result(MatchId::new(99), Score::new(1, 0));
    assert_eq!(update.unwrap_err().kind(), ErrorKind::NotFound);

    let delta = store.apply_result_delta(TeamId::new(99), 1, 0);
    assert_eq!(delta.unwrap_err().kind(), ErrorKind::NotFound);
}

fn check_stat_deltas_keep_invariants<S: LeagueStore>(mut store: S) {
    let id = store.create_team("Arsenal", strength(82)).unwrap();

    store.apply_result_delta(id, 3, 1).unwrap();
    store.apply_result_delta(id, 0, 0).unwrap();
    store.apply_edit_delta(id, Some((3, 1)), (0, 2)).unwrap();

    let team = store.team(id).unwrap();
    assert_eq!(team.played, 2);
    assert_eq!((team.wins, team.draws, team.losses), (0, 1, 1));
    assert_eq!((team.goals_for, team.goals_against), (0, 2));
    assert_eq!(team.goal_difference, -2);
    assert_eq!(team.points, 1);
}

fn check_set_name_rules<S: LeagueStore>(mut store: S) {
    let ids = seed_four(&mut store);

    store.set_name(ids[0], "  Tottenham  ").unwrap();
    assert_eq!(store.team(ids[0]).unwrap().name, "Tottenham");

    // Renaming a team to its own name is allowed
    store.set_name(ids[0], "Tottenham").unwrap();

    let empty = store.set_name(ids[1], "   ").unwrap_err();
    assert_eq!(empty.kind(), ErrorKind::Validation);

    let duplicate = store.set_name(ids[1], "Liverpool").unwrap_err();
    assert_eq!(duplicate.kind(), ErrorKind::Validation);
    assert!(duplicate.to_string().contains("already in use"));

    let missing = store.set_name(TeamId::new(99), "Everton").unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::NotFound);
}

fn check_set_strength<S: LeagueStore>(mut store: S) {
    let ids = seed_four(&mut store);

    store.set_strength(ids[2], strength(40)).unwrap();
    assert_eq!(store.team(ids[2]).unwrap().strength, 40);

    let missing = store.set_strength(TeamId::new(99), strength(40));
    assert_eq!(missing.unwrap_err().kind(), ErrorKind::NotFound);
}

fn check_fixture_replacement<S: LeagueStore>(store: S) {
    let (mut store, ids) = seeded_with_fixture(store);
    let first_ids: Vec<MatchId> = store.all_matches().unwrap().iter().map(|m| m.id).collect();
    assert_eq!(first_ids.len(), 12);

    store.update_result(first_ids[0], Score::new(2, 0)).unwrap();
    store
        .replace_fixture(&generate_fixture(&ids).unwrap())
        .unwrap();

    let matches = store.all_matches().unwrap();
    assert_eq!(matches.len(), 12);
    assert!(matches.iter().all(|m| !m.is_played && m.score().is_none()));
    assert!(matches.iter().all(|m| !first_ids.contains(&m.id)));
}

fn check_match_listing_order<S: LeagueStore>(store: S) {
    let (store, _) = seeded_with_fixture(store);

    let all = store.all_matches().unwrap();
    assert!(all.windows(2).all(|w| (w[0].week, w[0].id) < (w[1].week, w[1].id)));

    let week_three = store.matches_by_week(Week::new(3)).unwrap();
    assert_eq!(week_three.len(), 2);
    assert!(week_three.iter().all(|m| m.week == Week::new(3)));
    assert!(store.matches_by_week(Week::new(9)).unwrap().is_empty());
}

fn check_update_result_marks_played<S: LeagueStore>(store: S) {
    let (mut store, _) = seeded_with_fixture(store);
    let id = store.all_matches().unwrap()[0].id;

    store.update_result(id, Score::new(4, 4)).unwrap();
    let m = store.match_by_id(id).unwrap();
    assert!(m.is_played);
    assert_eq!(m.score(), Some(Score::new(4, 4)));

    // Overwrite keeps the same row
    store.update_result(id, Score::new(1, 2)).unwrap();
    assert_eq!(store.match_by_id(id).unwrap().score(), Some(Score::new(1, 2)));
    assert_eq!(store.all_matches().unwrap().len(), 12);
}

fn check_ranked_listing<S: LeagueStore>(mut store: S) {
    let ids = seed_four(&mut store);
    store.apply_result_delta(ids[3], 2, 0).unwrap();
    store.apply_result_delta(ids[1], 1, 1).unwrap();

    let table = store.teams_ranked().unwrap();
    let names: Vec<&str> = table.iter().map(|t| t.name.as_str()).collect();
    // Liverpool won, Arsenal drew, the rest are level and fall back to name order
    assert_eq!(names, vec!["Liverpool", "Arsenal", "Chelsea", "Manchester City"]);
}

fn check_reset_all_stats<S: LeagueStore>(mut store: S) {
    let ids = seed_four(&mut store);
    store.apply_result_delta(ids[0], 5, 1).unwrap();

    store.reset_all_stats().unwrap();

    let team = store.team(ids[0]).unwrap();
    assert_eq!(team, Team::new(ids[0], "Chelsea", 85));
}

fn check_reset_to_defaults<S: LeagueStore>(mut store: S) {
    let ids = seed_four(&mut store);
    store.set_name(ids[0], "Renamed").unwrap();
    store.set_name(ids[1], "Chelsea").unwrap();
    store.set_strength(ids[2], strength(1)).unwrap();
    store.apply_result_delta(ids[3], 3, 0).unwrap();

    store.reset_to_defaults(&defaults()).unwrap();

    let by_id: Vec<(String, u8, u32)> = ids
        .iter()
        .map(|id| {
            let t = store.team(*id).unwrap();
            (t.name, t.strength, t.played)
        })
        .collect();
    assert_eq!(
        by_id,
        vec![
            ("Chelsea".to_string(), 85, 0),
            ("Arsenal".to_string(), 82, 0),
            ("Manchester City".to_string(), 90, 0),
            ("Liverpool".to_string(), 88, 0),
        ]
    );
}

fn check_reset_to_defaults_creates_missing<S: LeagueStore>(mut store: S) {
    store.create_team("Only Team", strength(50)).unwrap();

    store.reset_to_defaults(&defaults()).unwrap();

    let mut names: Vec<String> = store
        .teams_ranked()
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["Arsenal", "Chelsea", "Liverpool", "Manchester City"]);
}

fn check_atomically_rolls_back<S: LeagueStore>(store: S) {
    let (mut store, ids) = seeded_with_fixture(store);
    let match_id = store.all_matches().unwrap()[0].id;

    let result: crate::Result<()> = store.atomically(|s| {
        s.update_result(match_id, Score::new(3, 0))?;
        s.apply_result_delta(ids[0], 3, 0)?;
        Err(LeagueError::validation("abort"))
    });
    assert!(result.is_err());

    assert!(!store.match_by_id(match_id).unwrap().is_played);
    assert_eq!(store.team(ids[0]).unwrap().played, 0);
}

fn check_atomically_commits<S: LeagueStore>(store: S) {
    let (mut store, ids) = seeded_with_fixture(store);
    let match_id = store.all_matches().unwrap()[0].id;

    let value = store
        .atomically(|s| {
            s.update_result(match_id, Score::new(1, 0))?;
            s.apply_result_delta(ids[0], 1, 0)?;
            Ok(7)
        })
        .unwrap();

    assert_eq!(value, 7);
    assert!(store.match_by_id(match_id).unwrap().is_played);
    assert_eq!(store.team(ids[0]).unwrap().points, 3);
}

macro_rules! store_tests {
    ($($name:ident),* $(,)?) => {
        mod sqlite {
            use super::*;
            $(
                #[test]
                fn $name() {
                    super::$name(create_test_db());
                }
            )*
        }

        mod in_memory {
            use super::*;
            $(
                #[test]
                fn $name() {
                    super::$name(InMemoryStore::new());
                }
            )*
        }
    };
}

store_tests!(
    check_create_team_is_idempotent_by_name,
    check_unknown_ids_are_not_found,
    check_stat_deltas_keep_invariants,
    check_set_name_rules,
    check_set_strength,
    check_fixture_replacement,
    check_match_listing_order,
    check_update_result_marks_played,
    check_ranked_listing,
    check_reset_all_stats,
    check_reset_to_defaults,
    check_reset_to_defaults_creates_missing,
    check_atomically_rolls_back,
    check_atomically_commits,
);

#[test]
fn test_database_creation() {
    let _db = create_test_db();
    // Should not panic - database creation successful
}

#[test]
fn test_reopening_file_database_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("league.db");

    {
        let mut db = LeagueDatabase::open(&path).unwrap();
        seed_four(&mut db);
    }

    let db = LeagueDatabase::open(&path).unwrap();
    assert_eq!(db.teams_ranked().unwrap().len(), 4);
}

#[test]
fn test_schema_rejects_goals_without_played_flag() {
    let (db, _) = seeded_with_fixture(create_test_db());

    let result = db.conn.execute(
        "UPDATE matches SET home_goals = 1, away_goals = 0, is_played = 0 WHERE id = 1",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn test_failed_insert_rolls_back_fixture_replacement() {
    let (mut db, ids) = seeded_with_fixture(create_test_db());
    let before = db.all_matches().unwrap();

    let mut fixture = generate_fixture(&ids).unwrap();
    fixture[11].away_team_id = TeamId::new(999);

    let err = db.replace_fixture(&fixture).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageFailure);
    assert!(err.to_string().contains("inserting week 6"));

    // The old fixture survives untouched
    assert_eq!(db.all_matches().unwrap(), before);
}

#[test]
fn test_failed_delta_leaves_team_untouched() {
    let mut db = create_test_db();
    let id = db.create_team("Chelsea", strength(85)).unwrap();
    db.conn
        .execute_batch(
            "CREATE TRIGGER block_gd BEFORE UPDATE OF goal_difference ON teams
             BEGIN SELECT RAISE(ABORT, 'blocked'); END;",
        )
        .unwrap();

    let err = db
        .apply_stat_delta(id, &StatDelta::for_result(2, 0))
        .unwrap_err();
    assert!(err.to_string().contains("recomputing goal difference"));

    assert_eq!(db.team(id).unwrap().played, 0);
}

#[test]
fn test_in_memory_fixture_requires_known_teams() {
    let mut store = InMemoryStore::new();
    let fixture = generate_fixture(&[1, 2, 3, 4].map(TeamId::new)).unwrap();

    let err = store.replace_fixture(&fixture).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(store.all_matches().unwrap().is_empty());
}
