//! Integration tests for the Redis-backed code store
//!
//! These tests need a running Redis server:
//! `REDIS_URL=redis://localhost:6379 cargo test -p msg_infra -- --ignored`

use std::time::Duration;

use msg_core::domain::{Identifier, VerificationRecord};
use msg_core::services::verification::CodeStore;
use msg_infra::cache::{CacheConfig, RedisClient, RedisCodeStore};

fn config() -> CacheConfig {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    )
    .with_prefix(format!("msg-test-{}", std::process::id()))
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_round_trip_and_delete() {
    let store = RedisCodeStore::connect(config()).await.unwrap();
    assert!(store.health_check().await.unwrap());

    let id = Identifier::new("Round.Trip@Example.com");
    let record = VerificationRecord::issue("4821");

    store.put(&id, &record, Duration::from_secs(60)).await.unwrap();
    assert_eq!(store.get(&id).await.unwrap(), Some(record));

    store.delete(&id).await.unwrap();
    assert!(store.get(&id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_record_expires() {
    let store = RedisCodeStore::connect(config()).await.unwrap();
    let id = Identifier::new("+15550000001");

    store
        .put(&id, &VerificationRecord::issue("1234"), Duration::from_secs(1))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert!(store.get(&id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_undecodable_value_reads_as_absent() {
    let config = config();
    let client = RedisClient::new(&config).await.unwrap();
    let store = RedisCodeStore::new(client.clone(), config.clone());
    let id = Identifier::new("+15550000002");

    client
        .set_with_expiry(&config.make_key(id.key()), "not json", 60)
        .await
        .unwrap();

    assert!(store.get(&id).await.unwrap().is_none());
    client.delete(&config.make_key(id.key())).await.unwrap();
}
