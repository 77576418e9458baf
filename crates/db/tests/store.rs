//! Integration tests for the record store, run against an in-memory SQLite
//! database:
//! - per-collection CRUD and ordering guarantees
//! - unique constraint behavior (case-insensitive emails)
//! - retention range-deletes (strict cutoff, idempotence)
//! - settings singleton upserts
//! - first-run seeding

use assert_matches::assert_matches;
use chrono::{DateTime, Duration, TimeZone, Utc};

use guardtower_core::model::{
    AppSettings, Endpoint, LogEntry, ModelLineage, Notification, UpdateEndpoint, User,
};
use guardtower_core::retention::RetentionPeriod;
use guardtower_core::types::{
    new_id, EndpointStatus, LogKind, LogLevel, NotificationKind, Theme, Timestamp, UserRole,
};
use guardtower_db::repositories::{
    EndpointRepo, LineageRepo, LogRepo, NotificationRepo, SettingsRepo, UserRepo,
};
use guardtower_db::{connect, seed, DbPool, SeedData, StoreError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn open() -> DbPool {
    connect("sqlite::memory:").await.expect("open in-memory store")
}

/// The store persists millisecond integers, so fixtures that round-trip
/// through it must not carry sub-millisecond precision.
fn now_ms() -> Timestamp {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap()
}

fn endpoint(name: &str) -> Endpoint {
    Endpoint {
        id: new_id("ep"),
        name: name.to_string(),
        url: "https://api.example.com/v1/chatbot".into(),
        api_key: "prod_sk_abc123def4...".into(),
        rate_limit: 100,
        ip_whitelist: vec!["203.0.113.1".into()],
        status: EndpointStatus::Active,
        created_at: now_ms(),
    }
}

fn log(endpoint: &str, level: LogLevel, ts: Timestamp) -> LogEntry {
    LogEntry {
        id: new_id("log-p"),
        timestamp: ts,
        endpoint: endpoint.to_string(),
        ip: "192.168.1.77".into(),
        level,
        message: "Request processed successfully.".into(),
        payload: Some("Benign request payload.".into()),
        latency_ms: Some(120),
    }
}

fn user(email: &str) -> User {
    User {
        id: new_id("usr"),
        name: "Alice Admin".into(),
        email: email.to_string(),
        role: UserRole::Admin,
        last_active: now_ms(),
        password: Some("password1".into()),
    }
}

fn notification(message: &str, ts: Timestamp) -> Notification {
    Notification {
        id: new_id("notif"),
        message: message.to_string(),
        kind: NotificationKind::Critical,
        read: false,
        timestamp: ts,
    }
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn endpoint_crud_round_trip() {
    let pool = open().await;
    let ep = endpoint("Production Chatbot API");

    EndpointRepo::insert(&pool, &ep).await.unwrap();
    let fetched = EndpointRepo::get(&pool, &ep.id).await.unwrap().unwrap();
    assert_eq!(fetched, ep);

    let by_name = EndpointRepo::find_by_name(&pool, "Production Chatbot API")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id, ep.id);

    let updated = EndpointRepo::update(
        &pool,
        &ep.id,
        &UpdateEndpoint {
            name: "Production Chatbot API v2".into(),
            url: ep.url.clone(),
            rate_limit: 250,
            ip_whitelist: vec![],
            status: EndpointStatus::Inactive,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "Production Chatbot API v2");
    assert_eq!(updated.rate_limit, 250);
    assert!(updated.ip_whitelist.is_empty());
    // Generated fields survive updates untouched.
    assert_eq!(updated.api_key, ep.api_key);
    assert_eq!(updated.created_at, ep.created_at);

    assert!(EndpointRepo::set_status(&pool, &ep.id, EndpointStatus::Active).await.unwrap());
    assert!(EndpointRepo::delete(&pool, &ep.id).await.unwrap());
    assert!(!EndpointRepo::delete(&pool, &ep.id).await.unwrap());
    assert!(EndpointRepo::get(&pool, &ep.id).await.unwrap().is_none());
}

#[tokio::test]
async fn endpoint_update_of_missing_row_returns_none() {
    let pool = open().await;
    let result = EndpointRepo::update(
        &pool,
        "ep-missing",
        &UpdateEndpoint {
            name: "X".into(),
            url: "https://api.example.com".into(),
            rate_limit: 1,
            ip_whitelist: vec![],
            status: EndpointStatus::Active,
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logs_list_newest_first_with_insertion_order_tiebreak() {
    let pool = open().await;
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    let old = log("E", LogLevel::Info, base - Duration::hours(2));
    let tied_first = log("E", LogLevel::Info, base);
    let tied_second = log("E", LogLevel::Warning, base);

    LogRepo::insert(&pool, LogKind::Prompt, &old).await.unwrap();
    LogRepo::insert(&pool, LogKind::Prompt, &tied_first).await.unwrap();
    LogRepo::insert(&pool, LogKind::Prompt, &tied_second).await.unwrap();

    let listed = LogRepo::list_desc(&pool, LogKind::Prompt).await.unwrap();
    let ids: Vec<&str> = listed.iter().map(|l| l.id.as_str()).collect();
    // Equal timestamps: the newest physical write wins.
    assert_eq!(ids, [&tied_second.id, &tied_first.id, &old.id]);
}

#[tokio::test]
async fn log_collections_are_disjoint() {
    let pool = open().await;
    LogRepo::insert(&pool, LogKind::Prompt, &log("E", LogLevel::Info, Utc::now()))
        .await
        .unwrap();
    assert_eq!(LogRepo::count(&pool, LogKind::Prompt).await.unwrap(), 1);
    assert_eq!(LogRepo::count(&pool, LogKind::Data).await.unwrap(), 0);
}

#[tokio::test]
async fn delete_before_is_strict_and_idempotent() {
    let pool = open().await;
    let cutoff = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    let older = log("E", LogLevel::Info, cutoff - Duration::milliseconds(1));
    let exactly_at = log("E", LogLevel::Info, cutoff);
    let newer = log("E", LogLevel::Info, cutoff + Duration::milliseconds(1));
    for entry in [&older, &exactly_at, &newer] {
        LogRepo::insert(&pool, LogKind::Data, entry).await.unwrap();
    }

    let removed = LogRepo::delete_before(&pool, LogKind::Data, cutoff).await.unwrap();
    assert_eq!(removed, 1);

    let remaining = LogRepo::list_desc(&pool, LogKind::Data).await.unwrap();
    let ids: Vec<&str> = remaining.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, [&newer.id, &exactly_at.id]);

    // Re-running the same purge is a no-op.
    let removed_again = LogRepo::delete_before(&pool, LogKind::Data, cutoff).await.unwrap();
    assert_eq!(removed_again, 0);
    assert_eq!(LogRepo::count(&pool, LogKind::Data).await.unwrap(), 2);
}

#[tokio::test]
async fn delete_by_endpoint_only_touches_matching_names() {
    let pool = open().await;
    for entry in [
        log("E", LogLevel::Critical, Utc::now()),
        log("E", LogLevel::Info, Utc::now()),
        log("F", LogLevel::Info, Utc::now()),
    ] {
        LogRepo::insert(&pool, LogKind::Prompt, &entry).await.unwrap();
    }

    let removed = LogRepo::delete_by_endpoint(&pool, LogKind::Prompt, "E").await.unwrap();
    assert_eq!(removed, 2);
    let remaining = LogRepo::list_desc(&pool, LogKind::Prompt).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].endpoint, "F");
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_email_is_rejected_case_insensitively() {
    let pool = open().await;
    UserRepo::insert(&pool, &user("alice@example.com")).await.unwrap();

    let err = UserRepo::insert(&pool, &user("ALICE@Example.COM")).await.unwrap_err();
    assert_matches!(err, StoreError::ConstraintViolation(_));

    // The failed insert left no partial state.
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn find_by_email_ignores_case() {
    let pool = open().await;
    let alice = user("alice@example.com");
    UserRepo::insert(&pool, &alice).await.unwrap();

    let found = UserRepo::find_by_email(&pool, "Alice@EXAMPLE.com").await.unwrap().unwrap();
    assert_eq!(found.id, alice.id);
    assert_eq!(found.password.as_deref(), Some("password1"));
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[tokio::test]
async fn notifications_list_desc_respects_limit() {
    let pool = open().await;
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    for i in 0..5 {
        let n = notification(&format!("alert {i}"), base + Duration::minutes(i));
        NotificationRepo::insert(&pool, &n).await.unwrap();
    }

    let top = NotificationRepo::list_desc(&pool, 3).await.unwrap();
    let messages: Vec<&str> = top.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(messages, ["alert 4", "alert 3", "alert 2"]);
}

#[tokio::test]
async fn mark_all_read_is_idempotent() {
    let pool = open().await;
    for i in 0..3 {
        NotificationRepo::insert(&pool, &notification(&format!("alert {i}"), Utc::now()))
            .await
            .unwrap();
    }

    assert_eq!(NotificationRepo::unread_count(&pool).await.unwrap(), 3);
    assert_eq!(NotificationRepo::mark_all_read(&pool).await.unwrap(), 3);
    assert_eq!(NotificationRepo::unread_count(&pool).await.unwrap(), 0);
    // Second pass changes nothing.
    assert_eq!(NotificationRepo::mark_all_read(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn settings_singleton_upserts_in_place() {
    let pool = open().await;
    assert!(SettingsRepo::get(&pool).await.unwrap().is_none());

    SettingsRepo::put(&pool, &AppSettings::default()).await.unwrap();
    SettingsRepo::put(
        &pool,
        &AppSettings { theme: Theme::Light, log_retention: RetentionPeriod::Days30 },
    )
    .await
    .unwrap();

    let settings = SettingsRepo::get(&pool).await.unwrap().unwrap();
    assert_eq!(settings.theme, Theme::Light);
    assert_eq!(settings.log_retention, RetentionPeriod::Days30);

    SettingsRepo::set_retention(&pool, RetentionPeriod::Days7).await.unwrap();
    SettingsRepo::set_theme(&pool, Theme::Dark).await.unwrap();
    let settings = SettingsRepo::get(&pool).await.unwrap().unwrap();
    assert_eq!(settings.log_retention, RetentionPeriod::Days7);
    assert_eq!(settings.theme, Theme::Dark);
}

// ---------------------------------------------------------------------------
// Lineage
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lineage_round_trips_nested_json() {
    let pool = open().await;
    let lineage: ModelLineage = serde_json::from_value(serde_json::json!({
        "modelId": "ep-001",
        "modelName": "Chatbot Model",
        "modelVersion": "1.0.0",
        "trainingData": [{
            "datasetId": "ds-001",
            "datasetName": "Generic Placeholder Dataset",
            "sources": [{
                "id": "src-001",
                "name": "Unspecified Data Source",
                "type": "Internal Dataset",
                "trustStatus": "Unverified",
                "timestamp": "2024-06-01T00:00:00Z",
                "details": {"info": "Auto-generated for new endpoint."}
            }],
            "processingScriptUrl": "N/A",
            "processingScriptHash": "N/A",
            "timestamp": "2024-06-01T00:00:00Z"
        }],
        "inferenceInputSource": {
            "id": "src-002",
            "name": "Live User Input Stream",
            "type": "API Feed",
            "trustStatus": "Unverified",
            "timestamp": "2024-06-01T00:00:00Z",
            "details": {}
        }
    }))
    .unwrap();

    LineageRepo::insert(&pool, &lineage).await.unwrap();
    let fetched = LineageRepo::get(&pool, "ep-001").await.unwrap().unwrap();
    assert_eq!(fetched, lineage);

    assert!(LineageRepo::delete(&pool, "ep-001").await.unwrap());
    assert!(LineageRepo::get(&pool, "ep-001").await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

fn sample_seed() -> SeedData {
    SeedData {
        users: vec![user("alice@example.com")],
        endpoints: vec![endpoint("Production Chatbot API")],
        prompt_logs: vec![log("Production Chatbot API", LogLevel::Info, Utc::now())],
        data_logs: vec![],
        lineage: vec![],
        settings: AppSettings::default(),
    }
}

#[tokio::test]
async fn seeding_populates_an_empty_store_once() {
    let pool = open().await;
    assert!(seed::is_empty(&pool).await.unwrap());

    assert!(seed::ensure_seeded(&pool, &sample_seed()).await.unwrap());
    assert!(!seed::is_empty(&pool).await.unwrap());
    assert!(SettingsRepo::get(&pool).await.unwrap().is_some());

    // A second call must not duplicate anything.
    assert!(!seed::ensure_seeded(&pool, &sample_seed()).await.unwrap());
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
    assert_eq!(EndpointRepo::count(&pool).await.unwrap(), 1);
    assert_eq!(LogRepo::count(&pool, LogKind::Prompt).await.unwrap(), 1);
}

#[tokio::test]
async fn seeding_recreates_a_missing_settings_singleton() {
    let pool = open().await;
    seed::ensure_seeded(&pool, &sample_seed()).await.unwrap();

    sqlx::query("DELETE FROM settings").execute(&pool).await.unwrap();
    assert!(!seed::ensure_seeded(&pool, &sample_seed()).await.unwrap());
    assert!(SettingsRepo::get(&pool).await.unwrap().is_some());
}
