//! Integration tests for the file-backed persistence backend.

use chrono::{NaiveDate, NaiveTime, Utc};
use reserva_core::{
    CustomerRepository, ReservationFilter, ReservationRepository, SettingsRepository,
    StoreRepository, StylistRepository,
};
use reserva_domain::{
    Customer, Reservation, ReservaError, ReservationStatus, Setting, Store, Stylist,
};
use reserva_infra::JsonBackend;
use tempfile::TempDir;
use uuid::Uuid;

fn reservation(store_id: &str, date: (i32, u32, u32), hour: u32, status: ReservationStatus) -> Reservation {
    Reservation {
        id: Uuid::now_v7(),
        store_id: store_id.to_string(),
        customer_id: Uuid::now_v7(),
        stylist_id: None,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
        menu: "カット".to_string(),
        status,
        note: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn stylist(store_id: &str, name: &str, display_order: u32) -> Stylist {
    Stylist {
        id: Uuid::now_v7(),
        store_id: store_id.to_string(),
        name: name.to_string(),
        active: true,
        display_order,
    }
}

#[tokio::test]
async fn store_roundtrip_and_duplicate_rejection() {
    let dir = TempDir::new().unwrap();
    let backend = JsonBackend::new(dir.path());

    let store = Store::new("abc123", "Sakura Hair", "owner@example.com");
    backend.stores.insert_store(store.clone()).await.unwrap();

    let fetched = backend.stores.get_store("abc123").await.unwrap();
    assert_eq!(fetched.name, "Sakura Hair");

    let err = backend.stores.insert_store(store).await.unwrap_err();
    assert!(matches!(err, ReservaError::Validation(_)));

    let err = backend.stores.get_store("zzz999").await.unwrap_err();
    assert!(matches!(err, ReservaError::NotFound(_)));
}

#[tokio::test]
async fn data_survives_backend_reconstruction() {
    let dir = TempDir::new().unwrap();

    {
        let backend = JsonBackend::new(dir.path());
        backend
            .stores
            .insert_store(Store::new("abc123", "Sakura Hair", "owner@example.com"))
            .await
            .unwrap();
    }

    let backend = JsonBackend::new(dir.path());
    let stores = backend.stores.list_stores().await.unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0].id, "abc123");
}

#[tokio::test]
async fn update_store_requires_existing_row() {
    let dir = TempDir::new().unwrap();
    let backend = JsonBackend::new(dir.path());

    let store = Store::new("abc123", "Sakura Hair", "owner@example.com");
    let err = backend.stores.update_store(&store).await.unwrap_err();
    assert!(matches!(err, ReservaError::NotFound(_)));

    backend.stores.insert_store(store.clone()).await.unwrap();
    let mut renamed = store;
    renamed.name = "Sakura Hair 渋谷".to_string();
    backend.stores.update_store(&renamed).await.unwrap();
    assert_eq!(backend.stores.get_store("abc123").await.unwrap().name, "Sakura Hair 渋谷");
}

#[tokio::test]
async fn reservations_filter_and_order_date_desc_then_start_desc() {
    let dir = TempDir::new().unwrap();
    let backend = JsonBackend::new(dir.path());

    let early = reservation("abc123", (2026, 9, 1), 10, ReservationStatus::Confirmed);
    let later_morning = reservation("abc123", (2026, 9, 2), 9, ReservationStatus::Confirmed);
    let later_evening = reservation("abc123", (2026, 9, 2), 17, ReservationStatus::Pending);
    let other_store = reservation("zzz999", (2026, 9, 2), 12, ReservationStatus::Confirmed);

    for r in [&early, &later_morning, &later_evening, &other_store] {
        backend.reservations.insert_reservation(r.clone()).await.unwrap();
    }

    let all = backend
        .reservations
        .list_reservations(&ReservationFilter::for_store("abc123"))
        .await
        .unwrap();
    let ids: Vec<Uuid> = all.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![later_evening.id, later_morning.id, early.id]);

    let filter = ReservationFilter {
        store_id: "abc123".to_string(),
        date_from: NaiveDate::from_ymd_opt(2026, 9, 2),
        date_to: NaiveDate::from_ymd_opt(2026, 9, 2),
        status: Some(ReservationStatus::Confirmed),
        limit: None,
    };
    let filtered = backend.reservations.list_reservations(&filter).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, later_morning.id);

    let limited = backend
        .reservations
        .list_reservations(&ReservationFilter {
            limit: Some(2),
            ..ReservationFilter::for_store("abc123")
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn reservation_update_is_scoped_to_store() {
    let dir = TempDir::new().unwrap();
    let backend = JsonBackend::new(dir.path());

    let mut r = reservation("abc123", (2026, 9, 1), 10, ReservationStatus::Pending);
    backend.reservations.insert_reservation(r.clone()).await.unwrap();

    // Same id, wrong store: must not match.
    let mut foreign = r.clone();
    foreign.store_id = "zzz999".to_string();
    let err = backend.reservations.update_reservation(&foreign).await.unwrap_err();
    assert!(matches!(err, ReservaError::NotFound(_)));

    r.transition(ReservationStatus::Confirmed).unwrap();
    backend.reservations.update_reservation(&r).await.unwrap();
    let fetched = backend.reservations.get_reservation("abc123", r.id).await.unwrap();
    assert_eq!(fetched.status, ReservationStatus::Confirmed);
}

#[tokio::test]
async fn customers_are_listed_in_kana_order() {
    let dir = TempDir::new().unwrap();
    let backend = JsonBackend::new(dir.path());

    let mut sato = Customer::new("abc123", "佐藤");
    sato.kana = Some("さとう".to_string());
    let mut tanaka = Customer::new("abc123", "田中");
    tanaka.kana = Some("たなか".to_string());

    backend.customers.insert_customer(tanaka.clone()).await.unwrap();
    backend.customers.insert_customer(sato.clone()).await.unwrap();

    let listed = backend.customers.list_customers("abc123").await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, sato.id);
    assert_eq!(listed[1].id, tanaka.id);

    assert!(backend.customers.list_customers("zzz999").await.unwrap().is_empty());
}

#[tokio::test]
async fn stylist_roster_is_replaced_wholesale_per_store() {
    let dir = TempDir::new().unwrap();
    let backend = JsonBackend::new(dir.path());

    backend
        .stylists
        .replace_stylists(
            "abc123",
            vec![stylist("abc123", "山田", 2), stylist("abc123", "鈴木", 1)],
        )
        .await
        .unwrap();
    backend
        .stylists
        .replace_stylists("zzz999", vec![stylist("zzz999", "高橋", 1)])
        .await
        .unwrap();

    let roster = backend.stylists.list_stylists("abc123").await.unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].name, "鈴木");
    assert_eq!(roster[1].name, "山田");

    backend.stylists.replace_stylists("abc123", vec![stylist("abc123", "伊藤", 1)]).await.unwrap();
    let roster = backend.stylists.list_stylists("abc123").await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].name, "伊藤");

    // The other store's roster is untouched.
    assert_eq!(backend.stylists.list_stylists("zzz999").await.unwrap().len(), 1);
}

#[tokio::test]
async fn settings_upsert_within_scope() {
    let dir = TempDir::new().unwrap();
    let backend = JsonBackend::new(dir.path());

    assert!(backend.settings.get_setting("_admin", "google_oauth_client_id").await.unwrap().is_none());

    let row = Setting {
        store_id: "_admin".to_string(),
        key: "google_oauth_client_id".to_string(),
        value: "client-1".to_string(),
        updated_at: Utc::now(),
    };
    backend.settings.put_setting(row.clone()).await.unwrap();

    let mut replaced = row;
    replaced.value = "client-2".to_string();
    backend.settings.put_setting(replaced).await.unwrap();

    let fetched = backend
        .settings
        .get_setting("_admin", "google_oauth_client_id")
        .await
        .unwrap()
        .expect("row");
    assert_eq!(fetched.value, "client-2");
}

#[tokio::test]
async fn collection_files_never_contain_partial_json() {
    let dir = TempDir::new().unwrap();
    let backend = JsonBackend::new(dir.path());

    backend
        .stores
        .insert_store(Store::new("abc123", "Sakura Hair", "owner@example.com"))
        .await
        .unwrap();

    // The write path goes through a temp file and rename; the visible file
    // must always parse and no temp residue may remain.
    let raw = std::fs::read_to_string(dir.path().join("stores.json")).unwrap();
    let parsed: Vec<Store> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.len(), 1);
    assert!(!dir.path().join("stores.json.tmp").exists());
}
