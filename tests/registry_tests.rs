//! Registry tests: many games, many threads.

use std::sync::Arc;
use std::thread;

use rustc_hash::FxHashSet;
use skirmish_engine::core::{Action, ErrorCode, GameConfig, GameId, GameResult, Phase, PlayerId};
use skirmish_engine::engine::{Engine, GameEvent};
use skirmish_engine::registry::{GameRepository, InMemoryRepository};

fn seeded() -> GameConfig {
    GameConfig::new().with_seed(7)
}

/// Games run side by side without touching each other.
#[test]
fn test_games_are_independent() {
    let games = InMemoryRepository::new();
    let a = games.create(seeded());
    let b = games.create(seeded());
    assert_ne!(a, b);

    for id in [&a, &b] {
        games.join(id, "p1", "Alice").unwrap();
        games.join(id, "p2", "Bob").unwrap();
    }
    games.dispatch(&a, &Action::ready_up("p1")).unwrap();
    games.dispatch(&a, &Action::ready_up("p2")).unwrap();

    let phase = |id: &GameId| games.get(id).map(|game| game.lock().phase());
    assert_eq!(phase(&a), Some(Phase::Handbuilding));
    assert_eq!(phase(&b), Some(Phase::Setup));
}

#[test]
fn test_events_carry_game_id() {
    let games = InMemoryRepository::new();
    let id = games.insert(Engine::with_game_id("table-9", seeded()));

    let events = games.join(&id, "p1", "Alice").unwrap();
    assert!(events.iter().all(|e| e.game_id == id));
}

#[test]
fn test_rejections_pass_through() {
    let games = InMemoryRepository::new();
    let id = games.create(seeded());
    games.join(&id, "p1", "Alice").unwrap();

    let err = games.dispatch(&id, &Action::pass("p1")).unwrap_err();
    assert_eq!(err.code, ErrorCode::WrongPhase);

    let err = games.leave(&id, &PlayerId::from("ghost")).unwrap_err();
    assert_eq!(err.code, ErrorCode::PlayerNotInGame);
    assert!(games.get(&id).is_some());
}

/// Joins from many threads are serialized per game: every seat is filled
/// exactly once and the rest are turned away.
#[test]
fn test_concurrent_joins() {
    let games = Arc::new(InMemoryRepository::new());
    let id = games.create(seeded());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let games = Arc::clone(&games);
            let id = id.clone();
            thread::spawn(move || games.join(&id, format!("p{i}"), format!("Player {i}")))
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("join thread panicked"))
        .collect();

    let seated = results.iter().filter(|r| r.is_ok()).count();
    let full = results
        .iter()
        .filter(|r| matches!(r, Err(e) if e.code == ErrorCode::GameFull))
        .count();
    assert_eq!(seated, 4);
    assert_eq!(full, 4);

    let game = games.get(&id).unwrap();
    let engine = game.lock();
    assert_eq!(engine.players().len(), 4);
    let colors: FxHashSet<_> = engine.players().iter().map(|p| p.color).collect();
    assert_eq!(colors.len(), 4);
}

/// Separate games driven from separate threads all reach handbuilding.
#[test]
fn test_parallel_games() {
    let games = Arc::new(InMemoryRepository::new());
    let ids: Vec<_> = (0..6).map(|_| games.create(seeded())).collect();

    let handles: Vec<_> = ids
        .iter()
        .cloned()
        .map(|id| {
            let games = Arc::clone(&games);
            thread::spawn(move || -> GameResult<Vec<GameEvent>> {
                games.join(&id, "p1", "Alice")?;
                games.join(&id, "p2", "Bob")?;
                games.dispatch(&id, &Action::ready_up("p1"))?;
                games.dispatch(&id, &Action::ready_up("p2"))
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("game thread panicked").unwrap();
    }
    for id in &ids {
        let game = games.get(id).unwrap();
        assert_eq!(game.lock().phase(), Phase::Handbuilding);
    }
    assert_eq!(games.len(), 6);
}

#[test]
fn test_finished_game_is_removed_when_emptied() {
    let games = InMemoryRepository::new();
    let id = games.create(seeded());
    games.join(&id, "p1", "Alice").unwrap();
    games.join(&id, "p2", "Bob").unwrap();
    games.dispatch(&id, &Action::ready_up("p1")).unwrap();
    games.dispatch(&id, &Action::ready_up("p2")).unwrap();

    let events = games.leave(&id, &PlayerId::from("p2")).unwrap();
    assert_eq!(events.last().map(|e| e.name()), Some("GAME_ENDED"));
    assert!(games.get(&id).is_some());

    games.leave(&id, &PlayerId::from("p1")).unwrap();
    assert!(games.get(&id).is_none());
    assert!(games.is_empty());
}

/// A handle fetched before the last player leaves cannot seat anyone in a
/// game the registry has already dropped.
#[test]
fn test_stale_handle_cannot_join_removed_game() {
    let games = InMemoryRepository::new();
    let id = games.create(seeded());
    games.join(&id, "p1", "Alice").unwrap();

    let stale = games.get(&id).unwrap();
    games.leave(&id, &PlayerId::from("p1")).unwrap();
    assert!(games.get(&id).is_none());

    let err = stale.lock().add_player("p2", "Bob").unwrap_err();
    assert_eq!(err.code, ErrorCode::GameNotFound);
    assert!(stale.lock().is_empty());
}

/// A join that lands between the last leave and the cleanup keeps the game.
#[test]
fn test_join_before_cleanup_keeps_game() {
    let games = InMemoryRepository::new();
    let id = games.create(seeded());
    games.join(&id, "p1", "Alice").unwrap();

    let handle = games.get(&id).unwrap();
    handle.lock().remove_player(&PlayerId::from("p1")).unwrap();
    handle.lock().add_player("p2", "Bob").unwrap();

    assert!(!games.remove_if_empty(&id));
    let game = games.get(&id).unwrap();
    assert_eq!(game.lock().players().len(), 1);
    games.dispatch(&id, &Action::ready_up("p2")).unwrap();
}
