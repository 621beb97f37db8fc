use chrono::NaiveDate;
use fittrack_core::seed::sample_state;
use fittrack_core::store::{clear_state, load_state, save_state};
use fittrack_core::{JsonFileStore, StateStore, StorageKey};
use tempfile::tempdir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

#[tokio::test]
async fn empty_directory_loads_nothing() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("data"));
    assert!(load_state(&store).await.expect("load").is_none());
}

#[tokio::test]
async fn saved_state_reloads_identically() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("data"));
    let state = sample_state(today());

    let failures = save_state(&store, &state).await;
    assert!(failures.is_empty(), "unexpected failures: {failures:?}");
    for key in StorageKey::ALL {
        assert!(store.dir().join(format!("{key}.json")).exists());
    }

    let back = load_state(&store).await.expect("load").expect("present");
    assert_eq!(back, state);
}

#[tokio::test]
async fn clear_removes_every_document() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path());
    save_state(&store, &sample_state(today())).await;
    assert!(clear_state(&store).await.is_empty());
    assert!(load_state(&store).await.expect("load").is_none());
    // clearing twice is fine
    assert!(clear_state(&store).await.is_empty());
}

#[tokio::test]
async fn legacy_timestamp_dates_load_as_calendar_dates() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path());
    std::fs::write(
        dir.path().join("bodyMetrics.json"),
        r#"[{"date": "2026-10-01T07:15:00.000Z", "weight": 81.0, "bodyFat": 18.9}]"#,
    )
    .unwrap();

    let state = load_state(&store).await.expect("load").expect("present");
    assert_eq!(state.body_metrics.len(), 1);
    assert_eq!(
        state.body_metrics[0].date,
        NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
    );
    assert_eq!(state.body_metrics[0].body_fat, Some(18.9));
}

#[tokio::test]
async fn corrupt_file_surfaces_an_error() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path());
    std::fs::write(dir.path().join("workouts.json"), "[{").unwrap();
    assert!(store.load(StorageKey::Workouts).await.is_err());
}
