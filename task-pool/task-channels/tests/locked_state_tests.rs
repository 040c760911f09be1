// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::collections::HashSet;
use task_pool_core::state_access::StateAccess;
use task_pool_core::{StateKey, StateValue, KEY_SPACE};
use task_pool_task_channels::LockedState;

// Every key gets its own disjoint band of values: key 2 only ever holds 20..25.
fn value_for(key: StateKey, n: u32) -> StateValue {
    u32::from(key) * 10 + n % 5
}

fn written_for(key: StateKey, value: StateValue) -> bool {
    value / 10 == u32::from(key) && value % 10 < 5
}

#[tokio::test]
async fn test_read_of_unwritten_key_is_none() {
    let state = LockedState::new();

    assert_eq!(state.read(3).await.unwrap(), None);
    assert_eq!(state.operations(), 1);
}

#[tokio::test]
async fn test_read_returns_last_write() {
    let state = LockedState::new();

    state.write(1, 10).await.unwrap();
    state.write(1, 20).await.unwrap();

    assert_eq!(state.read(1).await.unwrap(), Some(20));
    assert_eq!(state.snapshot().get(&1), Some(&20));
}

#[tokio::test]
async fn test_counter_counts_completed_operations() {
    let state = LockedState::new();

    for key in 0..KEY_SPACE {
        state.write(key, u32::from(key)).await.unwrap();
    }
    for key in 0..KEY_SPACE {
        state.read(key).await.unwrap();
    }

    assert_eq!(state.operations(), 2 * u64::from(KEY_SPACE));
    assert_eq!(state.counter().get(), state.operations());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_safety_concurrent_reads_only_observe_written_values() {
    let state = LockedState::new();

    let writers: Vec<_> = (0..10u32)
        .map(|w| {
            let state = state.clone();
            tokio::spawn(async move {
                for i in 0..200u32 {
                    let key = ((w + i) % u32::from(KEY_SPACE)) as StateKey;
                    state.write(key, value_for(key, w * 3 + i)).await.unwrap();
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..20u32)
        .map(|r| {
            let state = state.clone();
            tokio::spawn(async move {
                let mut seen = HashSet::new();
                for i in 0..200u32 {
                    let key = ((r + i) % u32::from(KEY_SPACE)) as StateKey;
                    if let Some(value) = state.read(key).await.unwrap() {
                        seen.insert((key, value));
                    }
                    tokio::task::yield_now().await;
                }
                seen
            })
        })
        .collect();

    for writer in writers {
        writer.await.unwrap();
    }
    for reader in readers {
        let seen = reader.await.unwrap();
        for (key, value) in seen {
            assert!(
                written_for(key, value),
                "key {} read {}, which no write to it produced",
                key,
                value
            );
        }
    }

    assert_eq!(state.operations(), 10 * 200 + 20 * 200);
    let snapshot = state.snapshot();
    assert_eq!(snapshot.len(), KEY_SPACE as usize);
    assert!(snapshot.iter().all(|(&key, &value)| written_for(key, value)));
}
