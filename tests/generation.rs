//! End-to-end generation, checkpoint and reload behaviour.

use binary_prime_engine::{
    CancellationToken, EngineConfig, GeneratorState, JsonFileStore, MemoryStore, PersistedState,
    PrimeSequenceGenerator, StateStore,
};

fn file_config(dir: &tempfile::TempDir) -> EngineConfig {
    EngineConfig::new().with_storage_location(dir.path().join("binary_codes.json"))
}

#[test]
fn test_unbounded_run_from_one() {
    let dir = tempfile::tempdir().unwrap();
    let mut gen = PrimeSequenceGenerator::new(file_config(&dir).with_starting_position(1)).unwrap();

    let triples: Vec<_> = gen.by_ref().take(5).map(|r| r.triple()).collect();
    assert_eq!(
        triples,
        vec![(1, 2, 0), (2, 3, 1), (3, 5, 2), (4, 7, 2), (5, 11, 4)]
    );
}

#[test]
fn test_bounded_run_from_ten() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(&dir).with_starting_position(10).with_max_results(3);

    let records: Vec<_> = PrimeSequenceGenerator::new(config).unwrap().collect();

    assert_eq!(records.len(), 3);
    assert_eq!(records.iter().map(|r| r.prime).collect::<Vec<_>>(), vec![11, 13, 17]);
    assert_eq!(records.iter().map(|r| r.gap).collect::<Vec<_>>(), vec![0, 2, 4]);
    assert!(dir.path().join("binary_codes.json").exists());
}

#[test]
fn test_indices_and_primes_strictly_increase() {
    let store = MemoryStore::new();
    let config = EngineConfig::new().with_starting_position(1_000).with_max_results(200);
    let records: Vec<_> = PrimeSequenceGenerator::with_store(config, Box::new(store))
        .unwrap()
        .collect();

    for pair in records.windows(2) {
        assert_eq!(pair[1].sequence_index, pair[0].sequence_index + 1);
        assert!(pair[1].prime > pair[0].prime);
        assert_eq!(pair[1].gap, pair[1].prime - pair[0].prime);
    }
}

#[test]
fn test_checkpoint_holds_last_flushed_values() {
    let store = MemoryStore::new();
    let config = EngineConfig::new().with_starting_position(20).with_checkpoint_interval(2);
    let mut gen = PrimeSequenceGenerator::with_store(config, Box::new(store.clone())).unwrap();

    // 23, 29, 31, 37, 41: checkpoints after the 2nd and 4th
    let primes: Vec<_> = gen.by_ref().take(5).map(|r| r.prime).collect();
    assert_eq!(primes, vec![23, 29, 31, 37, 41]);
    assert_eq!(store.writes(), 2);

    let durable = store.state().unwrap();
    let stats = durable.stats.unwrap();
    // 21, 25, 27 and 33, 35, 39 were rejected before the 4th checkpoint
    assert!(!durable.codes.is_empty());
    assert_eq!(stats.total_primes, 4);
    assert_ne!(stats.total_primes, gen.statistics().total_primes);
    assert_eq!(stats.max_gap, 6);

    // a fresh instance sees the checkpoint, not the in-memory state
    let reloaded = PrimeSequenceGenerator::with_store(EngineConfig::new(), Box::new(store.clone())).unwrap();
    assert_eq!(reloaded.statistics().total_primes, 4);
    assert_eq!(reloaded.registry().len(), durable.codes.len());

    // keep the running instance from flushing on drop
    std::mem::forget(gen);
}

#[test]
fn test_reload_merges_registry_and_restores_stats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary_codes.json");
    let mut seed = JsonFileStore::new(&path);
    seed.write(&PersistedState::codes_only(vec!["11111111111".to_string()])).unwrap();

    let config = EngineConfig::new().with_storage_location(&path).with_starting_position(90).with_max_results(2);
    let first: Vec<_> = PrimeSequenceGenerator::new(config.clone()).unwrap().collect();
    assert_eq!(first.iter().map(|r| r.prime).collect::<Vec<_>>(), vec![97, 101]);

    let state = JsonFileStore::new(&path).read().unwrap().unwrap();
    assert!(state.codes.contains(&"11111111111".to_string()));
    // 91 = 7 * 13
    assert!(state.codes.contains(&"01011011".to_string()));
    assert_eq!(state.version, "2.0");
    assert_eq!(state.stats.as_ref().unwrap().total_primes, 2);

    // second session continues from the last prime + 1
    let resumed = config.with_starting_position(102);
    let mut gen = PrimeSequenceGenerator::new(resumed).unwrap();
    assert_eq!(gen.statistics().total_primes, 2);
    assert!(gen.registry().contains("11111111111"));

    let record = gen.next().unwrap();
    assert_eq!(record.triple(), (1, 103, 0));
    assert_eq!(gen.statistics().total_primes, 3);
    assert_eq!(gen.statistics().max_gap, 4);
}

#[test]
fn test_corrupt_state_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary_codes.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let config = EngineConfig::new().with_storage_location(&path).with_max_results(3);
    let mut gen = PrimeSequenceGenerator::new(config).unwrap();
    assert!(gen.registry().is_empty());
    assert_eq!(gen.statistics().total_primes, 0);

    assert_eq!(gen.by_ref().count(), 3);

    // the corrupt file is replaced by the final flush
    let state = JsonFileStore::new(&path).read().unwrap().unwrap();
    assert_eq!(state.stats.unwrap().total_primes, 3);
}

#[test]
fn test_failing_storage_does_not_interrupt_generation() {
    let store = MemoryStore::new();
    store.set_fail_writes(true);
    let config = EngineConfig::new().with_checkpoint_interval(1).with_max_results(10);

    let records: Vec<_> = PrimeSequenceGenerator::with_store(config, Box::new(store.clone()))
        .unwrap()
        .collect();

    assert_eq!(records.len(), 10);
    assert_eq!(records[9].prime, 29);
    assert!(store.state().is_none());
}

#[test]
fn test_cancellation_from_another_thread() {
    let store = MemoryStore::new();
    let token = CancellationToken::new();
    let mut gen = PrimeSequenceGenerator::with_store(EngineConfig::new(), Box::new(store.clone()))
        .unwrap()
        .with_cancellation(token.clone());

    let mut emitted = 0;
    for record in gen.by_ref() {
        emitted = record.sequence_index;
        if emitted == 50 {
            let remote = token.clone();
            std::thread::spawn(move || remote.cancel()).join().unwrap();
        }
    }

    assert_eq!(emitted, 50);
    assert_eq!(gen.state(), GeneratorState::Stopped);
    assert_eq!(store.state().unwrap().stats.unwrap().total_primes, 50);
}

#[test]
fn test_diagnostics_readable_while_generating() {
    let store = MemoryStore::new();
    let config = EngineConfig::new().with_cache_capacity(32);
    let mut gen = PrimeSequenceGenerator::with_store(config, Box::new(store)).unwrap();
    let oracle = gen.oracle().clone();

    let reader = std::thread::spawn(move || {
        let mut max_seen = 0;
        for _ in 0..1_000 {
            max_seen = max_seen.max(oracle.cache_occupancy());
        }
        max_seen
    });

    for _ in 0..500 {
        gen.next();
    }
    assert!(reader.join().unwrap() <= 32);
    assert!(gen.oracle().cache_occupancy() <= 32);
}
