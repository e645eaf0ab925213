//! Shared helpers for the integration tests.

#![allow(dead_code)]

use selfplay::{
    PositionId, StateRegistry,
    adapters::{InMemoryStore, JsonFileStore, NullStore},
};
use tempfile::TempDir;

/// Registry that keeps nothing between runs.
pub fn ephemeral_registry() -> StateRegistry {
    StateRegistry::new(NullStore)
}

/// Registry plus the store it writes to.
pub fn shared_registry() -> (StateRegistry, InMemoryStore) {
    let store = InMemoryStore::new();
    (StateRegistry::new(store.clone()), store)
}

/// Registry on a fresh temporary directory; the directory lives as long as
/// the returned guard.
pub fn disk_registry() -> (StateRegistry, JsonFileStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = JsonFileStore::new(temp_dir.path().join("states"));
    (StateRegistry::new(store.clone()), store, temp_dir)
}

/// Play `moves` from the empty board and return the reached position.
pub fn play(registry: &mut StateRegistry, moves: &[usize]) -> PositionId {
    let mut id = registry.initial().expect("initial position");
    for &mv in moves {
        id = registry.apply_move(id, mv).expect("legal move");
    }
    id
}

pub fn assert_distribution(policy: &[f64]) {
    assert!(policy.iter().all(|p| (0.0..=1.0).contains(p)), "{policy:?}");
    let total: f64 = policy.iter().sum();
    assert!((total - 1.0).abs() <= 1e-4, "sum {total} for {policy:?}");
}
