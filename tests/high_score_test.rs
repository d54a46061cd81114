//! High score persistence at round completion

use std::cell::RefCell;
use std::rc::Rc;

use memory_match::core::{
    Board, EventLog, Hooks, MemoryStore, PersistenceStore, RoundConfig, RoundController,
    RoundEvent, StoreError,
};
use memory_match::store::JsonFileStore;
use memory_match::types::{Difficulty, MATCH_HOLD_MS};

const LAYOUT: [u16; 12] = [0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5];

fn board() -> Board {
    Board::from_layout(Difficulty::Easy, &LAYOUT).unwrap()
}

/// Match every pair, with `misses` mismatches after the first match
fn play(ctl: &mut RoundController, misses: u32) {
    ctl.select(0).unwrap();
    ctl.select(1).unwrap();
    ctl.tick(MATCH_HOLD_MS).unwrap();
    for _ in 0..misses {
        ctl.select(2).unwrap();
        ctl.select(4).unwrap();
        ctl.tick(u32::MAX).unwrap();
    }
    for pair in 1..6u8 {
        ctl.select(pair * 2).unwrap();
        ctl.select(pair * 2 + 1).unwrap();
        ctl.tick(MATCH_HOLD_MS).unwrap();
    }
}

/// Store whose every call fails
struct BrokenStore;

impl PersistenceStore for BrokenStore {
    fn get_high_score(&self, _scope: &str) -> Result<u32, StoreError> {
        Err(StoreError::Backend("disk unplugged".to_string()))
    }
    fn set_high_score(&mut self, _scope: &str, _value: u32) -> Result<(), StoreError> {
        Err(StoreError::Backend("disk unplugged".to_string()))
    }
}

#[test]
fn test_scenario_completion_writes_high_score_once() {
    let store = Rc::new(RefCell::new(MemoryStore::with_score("easy", 25)));
    let log = Rc::new(RefCell::new(EventLog::new()));
    let hooks = Hooks::default()
        .with_store(store.clone())
        .with_render(log.clone());
    let mut ctl = RoundController::with_board(RoundConfig::default(), hooks, board());

    play(&mut ctl, 0);
    let outcome = *ctl.outcome().unwrap();
    assert_eq!(outcome.final_score, 60);
    assert_eq!(outcome.previous_high_score, Some(25));
    assert!(outcome.new_high_score);
    assert_eq!(store.borrow().writes(), 1);
    assert_eq!(store.borrow().get_high_score("easy").unwrap(), 60);
    assert_eq!(
        log.borrow()
            .count(|e| matches!(e, RoundEvent::RoundComplete { .. })),
        1
    );

    // Replay with a lower score
    ctl.reset_with_board(board());
    play(&mut ctl, 3);
    let outcome = *ctl.outcome().unwrap();
    assert_eq!(outcome.final_score, 54);
    assert!(!outcome.new_high_score);
    assert_eq!(store.borrow().writes(), 1);
    assert_eq!(store.borrow().get_high_score("easy").unwrap(), 60);
}

#[test]
fn test_equal_score_is_not_rewritten() {
    let store = Rc::new(RefCell::new(MemoryStore::with_score("easy", 60)));
    let hooks = Hooks::default().with_store(store.clone());
    let mut ctl = RoundController::with_board(RoundConfig::default(), hooks, board());
    play(&mut ctl, 0);
    assert!(!ctl.outcome().unwrap().new_high_score);
    assert_eq!(store.borrow().writes(), 0);
}

#[test]
fn test_scopes_follow_config() {
    let store = Rc::new(RefCell::new(MemoryStore::new()));
    let config = RoundConfig {
        high_score_scope: Some("global".to_string()),
        ..RoundConfig::default()
    };
    let hooks = Hooks::default().with_store(store.clone());
    let mut ctl = RoundController::with_board(config, hooks, board());
    play(&mut ctl, 0);
    assert_eq!(store.borrow().get_high_score("global").unwrap(), 60);
    assert_eq!(store.borrow().get_high_score("easy").unwrap(), 0);
}

#[test]
fn test_broken_store_does_not_abort_round() {
    let hooks = Hooks::default().with_store(BrokenStore);
    let mut ctl = RoundController::with_board(RoundConfig::default(), hooks, board());
    play(&mut ctl, 1);

    assert!(ctl.is_complete());
    assert!(ctl.board().all_matched());
    let outcome = ctl.outcome().unwrap();
    assert_eq!(outcome.final_score, 58);
    assert!(!outcome.high_score_saved);
    assert_eq!(outcome.previous_high_score, None);
    assert_eq!(ctl.high_score(), None);
}

#[test]
fn test_json_file_store_across_controllers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("high_scores.json");

    let hooks = Hooks::default().with_store(JsonFileStore::new(&path));
    let mut ctl = RoundController::with_board(RoundConfig::default(), hooks, board());
    play(&mut ctl, 2);
    assert_eq!(ctl.outcome().unwrap().final_score, 56);
    drop(ctl);

    let hooks = Hooks::default().with_store(JsonFileStore::new(&path));
    let mut ctl = RoundController::with_board(RoundConfig::default(), hooks, board());
    assert_eq!(ctl.high_score(), Some(56));
    play(&mut ctl, 0);
    assert!(ctl.outcome().unwrap().new_high_score);

    let raw = std::fs::read_to_string(&path).unwrap();
    let file: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(file["scores"]["easy"], 60);
}
