// [libs/infra/api-client/tests/credential_pool.rs]
//! Integration coverage for the lease/record contract (spec §4.1, §8).

use chrono::Utc;
use skirmish_domain_models::CredentialSpec;
use skirmish_infra_api_client::CredentialPool;

fn spec(secret: &str, rpm: u32) -> CredentialSpec {
    CredentialSpec {
        secret: secret.to_string(),
        rpm_limit: rpm,
    }
}

#[tokio::test]
async fn disjoint_pools_never_share_waiters() {
    let main_pool = CredentialPool::new(vec![spec("main-key", 1)]);
    let tournament_pool = CredentialPool::new(vec![spec("tournament-key", 1)]);

    let main_lease = main_pool.lease().await;
    main_pool.record_request(&main_lease, Utc::now()).await;

    // The tournament pool's only credential is untouched, so a lease from
    // it must resolve immediately even though the main pool is saturated.
    let tournament_lease = tokio::time::timeout(
        std::time::Duration::from_millis(200),
        tournament_pool.lease(),
    )
    .await;
    assert!(tournament_lease.is_ok());
}

#[tokio::test]
async fn exhausted_pool_eventually_recovers_after_window_ages_out() {
    let pool = CredentialPool::new(vec![spec("solo", 1)]);
    let first = pool.lease().await;
    // Backdate the dispatch so the 60s window is already stale.
    pool.record_request(&first, Utc::now() - chrono::Duration::seconds(61))
        .await;

    let second = tokio::time::timeout(std::time::Duration::from_millis(500), pool.lease()).await;
    assert!(second.is_ok(), "a stale window entry must free the credential");
}
