// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::collections::HashSet;
use std::time::Duration;
use task_pool_core::PoolError;
use task_pool_task_channels::TaskQueue;

#[tokio::test]
async fn test_liveness_items_delivered_in_submission_order() {
    let queue = TaskQueue::new(10).unwrap();
    let receiver = queue.receiver();

    for item in 1..=5 {
        queue.submit(item).await.unwrap();
    }
    queue.close().unwrap();

    let mut received = Vec::new();
    while let Some(item) = receiver.next().await {
        received.push(item);
    }

    assert_eq!(received, vec![1, 2, 3, 4, 5]);
    assert_eq!(queue.submitted(), 5);
}

#[tokio::test]
async fn test_safety_drained_queue_is_not_restartable() {
    let queue = TaskQueue::new(2).unwrap();
    let receiver = queue.receiver();

    queue.submit(7).await.unwrap();
    queue.close().unwrap();

    assert_eq!(receiver.next().await, Some(7));
    assert_eq!(receiver.next().await, None);
    assert_eq!(receiver.next().await, None);
}

#[tokio::test]
async fn test_safety_double_close_is_contract_violation() {
    let queue = TaskQueue::<u32>::new(1).unwrap();

    assert!(queue.close().is_ok());
    let second = queue.close();

    assert!(matches!(second, Err(PoolError::ContractViolation(_))));
    assert!(queue.is_closed());
}

#[tokio::test]
async fn test_safety_submit_after_close_is_contract_violation() {
    let queue = TaskQueue::new(4).unwrap();
    queue.close().unwrap();

    let submitted = queue.submit(1).await;
    let tried = queue.try_submit(2);

    assert!(submitted.unwrap_err().is_contract_violation());
    assert!(tried.unwrap_err().is_contract_violation());
    assert_eq!(queue.submitted(), 0);
}

#[test]
fn test_zero_capacity_rejected() {
    let result = TaskQueue::<u32>::new(0);

    assert!(matches!(result, Err(PoolError::InvalidConfig(_))));
}

#[test]
fn test_capacity_reported_as_configured() {
    let queue = TaskQueue::<u32>::new(4).unwrap();

    assert_eq!(queue.capacity(), 4);
    assert_eq!(queue.submitted(), 0);
    assert!(!queue.is_closed());
}

#[tokio::test(start_paused = true)]
async fn test_submit_waits_while_queue_is_full() {
    let queue = TaskQueue::new(1).unwrap();
    queue.submit(1).await.unwrap();

    let blocked = queue.submit_timeout(2, Duration::from_millis(50)).await;

    assert!(matches!(blocked, Err(PoolError::Timeout { .. })));
    assert_eq!(queue.submitted(), 1);
}

#[tokio::test]
async fn test_submit_resumes_once_space_frees_up() {
    let queue = TaskQueue::new(1).unwrap();
    let receiver = queue.receiver();
    queue.submit(1).await.unwrap();

    let consumer = tokio::spawn(async move {
        let mut received = Vec::new();
        while let Some(item) = receiver.next().await {
            received.push(item);
        }
        received
    });

    queue.submit(2).await.unwrap();
    queue.submit(3).await.unwrap();
    queue.close().unwrap();

    assert_eq!(consumer.await.unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_try_submit_on_full_queue() {
    let queue = TaskQueue::new(1).unwrap();

    assert!(queue.try_submit(1).is_ok());
    assert_eq!(queue.try_submit(2), Err(PoolError::QueueFull));
}

#[tokio::test(start_paused = true)]
async fn test_next_times_out_on_open_empty_queue() {
    let queue = TaskQueue::<u32>::new(1).unwrap();

    let result = queue.receiver().next_timeout(Duration::from_millis(20)).await;

    assert!(matches!(result, Err(PoolError::Timeout { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_safety_competing_receivers_get_each_item_once() {
    let queue = TaskQueue::new(8).unwrap();

    let consumers: Vec<_> = (0..4)
        .map(|_| {
            let receiver = queue.receiver();
            tokio::spawn(async move {
                let mut received = Vec::new();
                while let Some(item) = receiver.next().await {
                    received.push(item);
                }
                received
            })
        })
        .collect();

    for item in 0..500u32 {
        queue.submit(item).await.unwrap();
    }
    queue.close().unwrap();

    let mut all = Vec::new();
    for consumer in consumers {
        all.extend(consumer.await.unwrap());
    }

    let distinct: HashSet<u32> = all.iter().copied().collect();
    assert_eq!(all.len(), 500, "no item may be delivered twice");
    assert_eq!(distinct, (0..500).collect::<HashSet<u32>>());
}
