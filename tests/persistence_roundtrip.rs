//! Statistics written by one registry and read back by another

mod common;

use std::fs;

use common::{disk_registry, play, shared_registry};
use selfplay::{
    PolicyScheme, StateRegistry,
    adapters::{InMemoryStore, JsonFileStore},
    pipeline::{TrainingConfig, TrialDriver},
    ports::StatsStore,
    tictactoe::Board,
};

#[test]
fn test_fresh_registry_restores_statistics() {
    let (mut registry, store, _guard) = disk_registry();
    let id = play(&mut registry, &[4, 0]);
    for explore_factor in [0.5, 0.2, 0.9] {
        let successors = registry.successors(id).unwrap();
        for next in successors {
            registry.revise(next, explore_factor).unwrap();
        }
        registry.revise(id, explore_factor).unwrap();
    }
    let original = registry.position(id).unwrap().clone();
    assert_eq!(original.revision_count(), 3);

    let mut fresh = StateRegistry::new(JsonFileStore::new(store.root()));
    let reloaded = play(&mut fresh, &[4, 0]);
    let reloaded = fresh.position(reloaded).unwrap();

    assert_eq!(reloaded.policy(), original.policy());
    assert_eq!(reloaded.value(), original.value());
    assert_eq!(reloaded.revision_count(), original.revision_count());
}

fn bits(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.to_bits()).collect()
}

#[test]
fn test_trained_statistics_reload_bit_for_bit() {
    for scheme in [
        PolicyScheme::Blended {
            explore_factor: 0.5,
        },
        PolicyScheme::Weighted,
    ] {
        let (mut registry, store, _guard) = disk_registry();
        TrialDriver::new(TrainingConfig {
            trials: 300,
            scheme,
            seed: Some(2024),
            ..TrainingConfig::default()
        })
        .unwrap()
        .run(&mut registry)
        .unwrap();

        let mut fresh = StateRegistry::new(JsonFileStore::new(store.root()));
        fresh.hydrate_all().unwrap();

        let mut revised = 0;
        for (_, trained) in registry.iter().filter(|(_, p)| p.revision_count() > 0) {
            let id = fresh
                .lookup(trained.board())
                .unwrap_or_else(|| panic!("{} not reloaded", trained.key()));
            let reloaded = fresh.position(id).unwrap();
            assert_eq!(
                bits(reloaded.policy()),
                bits(trained.policy()),
                "policy of {} under {scheme:?}",
                trained.key()
            );
            assert_eq!(
                bits(&[reloaded.value().x(), reloaded.value().o()]),
                bits(&[trained.value().x(), trained.value().o()]),
                "value of {} under {scheme:?}",
                trained.key()
            );
            assert_eq!(reloaded.revision_count(), trained.revision_count());
            revised += 1;
        }
        assert!(revised > 20, "only {revised} positions revised");
    }
}

#[test]
fn test_training_survives_restart() {
    let (mut registry, store, _guard) = disk_registry();
    let config = TrainingConfig {
        trials: 30,
        seed: Some(11),
        ..TrainingConfig::default()
    };
    TrialDriver::new(config.clone())
        .unwrap()
        .run(&mut registry)
        .unwrap();
    let root = registry.initial().unwrap();
    assert_eq!(registry.position(root).unwrap().revision_count(), 30);

    let mut fresh = StateRegistry::new(store.clone());
    TrialDriver::new(config).unwrap().run(&mut fresh).unwrap();
    let root = fresh.initial().unwrap();
    assert_eq!(fresh.position(root).unwrap().revision_count(), 60);
}

#[test]
fn test_corrupt_file_is_deleted_and_defaults_used() {
    let (_, store, _guard) = disk_registry();
    let board = Board::from_key("X---O----").unwrap();
    fs::create_dir_all(store.root()).unwrap();
    let path = store.path_for(&board.key());
    fs::write(&path, "{\"policy\": [0.5, ").unwrap();

    let mut registry = StateRegistry::new(store.clone());
    let id = registry.get_or_create(board).unwrap();
    let position = registry.position(id).unwrap();

    assert!(!path.exists());
    assert_eq!(position.revision_count(), 0);
    assert_eq!(position.policy(), &[1.0 / 7.0; 7][..]);
}

#[test]
fn test_stale_record_for_wrong_board_is_discarded() {
    let (mut registry, store) = shared_registry();
    let root = registry.initial().unwrap();
    registry.revise(root, 0.5).unwrap();

    // A 9-entry policy filed under a board with 8 legal moves.
    let record = store.load(&Board::new().key()).unwrap().unwrap();
    let board = Board::from_key("----X----").unwrap();
    store.save(&board.key(), &record).unwrap();

    let mut fresh = StateRegistry::new(store.clone());
    let id = fresh.get_or_create(board).unwrap();
    assert_eq!(fresh.position(id).unwrap().policy().len(), 8);
    assert!(!store.contains(&board.key()));
}

#[test]
fn test_live_entry_wins_over_store() {
    let (mut registry, store) = shared_registry();
    let root = registry.initial().unwrap();
    registry.revise(root, 0.5).unwrap();

    let planted = InMemoryStore::new();
    let mut other = StateRegistry::new(planted.clone());
    let other_root = other.initial().unwrap();
    for _ in 0..5 {
        other.revise(other_root, 0.5).unwrap();
    }
    let record = planted.load(&Board::new().key()).unwrap().unwrap();
    store.save(&Board::new().key(), &record).unwrap();

    let again = registry.initial().unwrap();
    assert_eq!(registry.position(again).unwrap().revision_count(), 1);

    registry.clear();
    let reloaded = registry.initial().unwrap();
    assert_eq!(registry.position(reloaded).unwrap().revision_count(), 5);
}

#[test]
fn test_hydrate_all_and_snapshot() {
    let (mut registry, store, _guard) = disk_registry();
    TrialDriver::new(TrainingConfig {
        trials: 10,
        seed: Some(5),
        ..TrainingConfig::default()
    })
    .unwrap()
    .run(&mut registry)
    .unwrap();
    let stored = store.keys().unwrap().len();
    assert!(stored > 0);

    let mut fresh = StateRegistry::new(store.clone());
    assert_eq!(fresh.hydrate_all().unwrap(), stored);
    assert_eq!(fresh.snapshot().records.len(), stored);

    let (mut target, target_store) = shared_registry();
    assert_eq!(target.restore(&fresh.snapshot()).unwrap(), stored);
    assert_eq!(target_store.count(), stored);
}
