// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use task_pool_core::state_access::StateAccess;
use std::collections::HashSet;
use task_pool_core::{PoolError, StateKey, StateSnapshot, StateValue, KEY_SPACE};
use task_pool_task_channels::ActorState;

fn value_for(key: StateKey, n: u32) -> StateValue {
    u32::from(key) * 10 + n % 5
}

fn written_for(key: StateKey, value: StateValue) -> bool {
    value / 10 == u32::from(key) && value % 10 < 5
}

#[tokio::test]
async fn test_read_of_unwritten_key_is_none() {
    let state = ActorState::spawn();

    assert_eq!(state.read(0).await.unwrap(), None);
    assert_eq!(state.operations(), 1);
}

#[tokio::test]
async fn test_write_then_read() {
    let state = ActorState::spawn();

    state.write(4, 99).await.unwrap();

    assert_eq!(state.read(4).await.unwrap(), Some(99));
    assert_eq!(state.operations(), 2);
}

#[tokio::test]
async fn test_shutdown_returns_owned_state() {
    let state = ActorState::spawn();
    state.write(1, 5).await.unwrap();
    state.write(2, 6).await.unwrap();
    state.write(1, 7).await.unwrap();

    let final_state = state.shutdown().await.unwrap();

    assert_eq!(final_state, StateSnapshot::from([(1, 7), (2, 6)]));
}

#[tokio::test]
async fn test_calls_after_shutdown_fail() {
    let state = ActorState::spawn();
    state.shutdown().await.unwrap();

    assert_eq!(state.read(1).await, Err(PoolError::CoordinatorClosed));
    assert_eq!(state.write(1, 1).await, Err(PoolError::CoordinatorClosed));
    assert_eq!(state.shutdown().await, Err(PoolError::CoordinatorClosed));
    assert_eq!(state.operations(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_safety_each_caller_gets_its_own_reply() {
    let state = ActorState::spawn();

    // Each task owns one key, so every read must return that task's last write.
    let tasks: Vec<_> = (0..KEY_SPACE)
        .map(|key| {
            let state = state.clone();
            tokio::spawn(async move {
                for n in 0..200u32 {
                    let value = (n * 7 + u32::from(key)) % 100;
                    state.write(key, value).await.unwrap();
                    assert_eq!(state.read(key).await.unwrap(), Some(value));
                }
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(state.operations(), u64::from(KEY_SPACE) * 400);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_are_all_served() {
    let state = ActorState::spawn();

    let writers: Vec<_> = (0..100u32)
        .map(|w| {
            let state = state.clone();
            tokio::spawn(async move {
                for i in 0..10u32 {
                    state.write(((w + i) % 5) as u8, w % 100).await.unwrap();
                }
            })
        })
        .collect();

    for writer in writers {
        writer.await.unwrap();
    }

    assert_eq!(state.operations(), 1_000);
    let final_state = state.shutdown().await.unwrap();
    assert_eq!(final_state.len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_safety_concurrent_reads_only_observe_values_written_to_that_key() {
    let state = ActorState::spawn();

    let writers: Vec<_> = (0..10u32)
        .map(|w| {
            let state = state.clone();
            tokio::spawn(async move {
                for i in 0..100u32 {
                    let key = ((w + i) % u32::from(KEY_SPACE)) as StateKey;
                    state.write(key, value_for(key, w + i)).await.unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..20u32)
        .map(|r| {
            let state = state.clone();
            tokio::spawn(async move {
                let mut seen = HashSet::new();
                for i in 0..100u32 {
                    let key = ((r * 2 + i) % u32::from(KEY_SPACE)) as StateKey;
                    if let Some(value) = state.read(key).await.unwrap() {
                        seen.insert((key, value));
                    }
                }
                seen
            })
        })
        .collect();

    for writer in writers {
        writer.await.unwrap();
    }
    for reader in readers {
        for (key, value) in reader.await.unwrap() {
            assert!(
                written_for(key, value),
                "key {} read {}, which no write to it produced",
                key,
                value
            );
        }
    }

    assert_eq!(state.operations(), 10 * 100 + 20 * 100);
    let final_state = state.shutdown().await.unwrap();
    assert_eq!(final_state.len(), KEY_SPACE as usize);
    assert!(final_state.iter().all(|(&key, &value)| written_for(key, value)));
}
