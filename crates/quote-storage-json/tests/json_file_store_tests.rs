use std::{fs, sync::Arc};

use chrono::{Duration, TimeZone, Utc};
use quote_core::{DraftStore, FixedClock, KeyValueStore};
use quote_domain::{FieldValue, FormData, ServiceContext};
use quote_storage_json::JsonFileStore;
use tempfile::tempdir;

#[test]
fn set_get_remove_round_trip() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("drafts")).expect("create store");

    assert_eq!(store.get("missing").expect("get"), None);
    store.set("greeting", "\"hello\"").expect("set");
    assert_eq!(store.get("greeting").expect("get").as_deref(), Some("\"hello\""));
    assert!(store.entry_path("greeting").exists());

    store.remove("greeting").expect("remove");
    store.remove("greeting").expect("remove twice");
    assert_eq!(store.get("greeting").expect("get"), None);
}

#[test]
fn keys_skip_leftover_temp_files() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");
    store.set("b_key", "1").expect("set");
    store.set("a_key", "2").expect("set");
    fs::write(dir.path().join("c_key.json.tmp"), "partial").expect("write tmp");

    assert_eq!(store.keys().expect("keys"), vec!["a_key", "b_key"]);
}

#[test]
fn drafts_survive_a_new_store_instance() {
    let dir = tempdir().expect("tempdir");
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap(),
    ));
    let context = Some(ServiceContext::SystemIntegration);
    let mut data = FormData::default();
    data.apply(FieldValue::CompanyName("Northwind".into()));

    {
        let store = Arc::new(JsonFileStore::new(dir.path().to_path_buf()).expect("store"));
        DraftStore::new(store, clock.clone()).save(context, &data);
    }

    let store = Arc::new(JsonFileStore::new(dir.path().to_path_buf()).expect("store"));
    let drafts = DraftStore::new(store.clone(), clock.clone());
    let loaded = drafts.load(context).expect("draft");
    assert_eq!(loaded["companyName"], "Northwind");

    clock.advance(Duration::days(8));
    assert!(drafts.load(context).is_none());
    assert!(store.keys().expect("keys").is_empty());
}
