//! End-to-end extraction, filtering and caching

use std::sync::Arc;

use bibchecker::{
    models::{BatchOutcome, FailureKind, Library},
    services::{cache, extraction::ExtractionService, filters, input, Services},
    sources,
};

use crate::common::{app_state, config_in, scratch_dir, StaticFetcher};

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| sources::normalize(s)).collect()
}

#[tokio::test]
async fn test_batch_with_mixed_sources_and_failures() {
    let service = ExtractionService::new(Arc::new(StaticFetcher::standard()), 3);
    let identifiers = ids(&["AK00119197", "no-such-format", "1234567", "SAK00000001", "999"]);

    let results = service.run_batch(&identifiers).await;
    assert_eq!(results.len(), 5);

    let hobbit = results[0].as_ref().unwrap();
    assert_eq!(hobbit.id, "SAK00119197");
    assert_eq!(hobbit.library, Library::Stuttgart);
    assert_eq!(hobbit.holdings.len(), 2);
    assert_eq!(hobbit.holdings[0].method.as_deref(), Some("Bestellen"));
    assert!(!hobbit.holdings[1].can_be_borrowed);

    assert_eq!(results[1].as_ref().unwrap_err().kind, FailureKind::UnknownFormat);
    assert_eq!(results[2].as_ref().unwrap().title.as_deref(), Some("Krabat"));
    assert_eq!(results[3].as_ref().unwrap_err().kind, FailureKind::FieldMapping);
    assert_eq!(results[4].as_ref().unwrap_err().kind, FailureKind::Fetch);

    let outcome: BatchOutcome = results.into_iter().collect();
    let ok: Vec<_> = outcome.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ok, vec!["SAK00119197", "1234567"]);
    let failed: Vec<_> = outcome.failures.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(failed, vec!["no-such-format", "SAK00000001", "999"]);
}

#[tokio::test]
async fn test_filtered_report_by_library() {
    let service = ExtractionService::new(Arc::new(StaticFetcher::standard()), 2);
    let outcome: BatchOutcome = service
        .run_batch(&ids(&["SAK00119197", "1234567"]))
        .await
        .into_iter()
        .collect();

    let available = filters::filter_entries(
        outcome.entries.clone(),
        &filters::FilterOptions::available_at(Vec::<String>::new()),
    );
    let groups = filters::group_by_library(&available);
    let names: Vec<_> = groups.iter().map(|g| g.library.as_str()).collect();
    assert_eq!(names, vec!["Mediathek im KUBUS", "Ost"]);

    let everything = filters::filter_entries(outcome.entries, &filters::FilterOptions::all());
    assert_eq!(filters::collect_libraries(&everything), vec!["Feuerbach", "Mediathek im KUBUS", "Ost"]);
}

#[tokio::test]
async fn test_refresh_writes_cache_and_attaches_annotations() {
    let dir = scratch_dir("refresh");
    let config = config_in(&dir);
    tokio::fs::write(
        &config.catalog.input_file,
        "# Liste\nAK00119197 fuer Lisa\n1234567\nfoo bar\n",
    )
    .await
    .unwrap();

    let services = Services::with_fetcher(Arc::new(StaticFetcher::standard()), &config);
    let summary = services.refresh.refresh().await.unwrap();
    assert_eq!(summary.id_count, 3);
    assert_eq!(summary.entries, 2);
    assert_eq!(summary.failures, 1);

    let cached = cache::load(&config.catalog.cache_file).await.unwrap();
    assert_eq!(cached.len(), 2);
    assert_eq!(cached[0].user_description.as_deref(), Some("fuer Lisa"));
    assert_eq!(
        cached[0].catalog_url.as_deref(),
        Some(Library::Stuttgart.catalog_url("SAK00119197").as_str())
    );
    assert_eq!(cached[1].user_description, None);

    let libraries = services.refresh.libraries().await;
    assert_eq!(libraries, vec!["Mediathek im KUBUS", "Ost", "Feuerbach"]);

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_seed_from_cache() {
    let dir = scratch_dir("seed");
    let config = config_in(&dir);
    let state = app_state(config.clone());
    assert!(!state.services.refresh.seed_from_cache().await.unwrap());

    let service = ExtractionService::new(Arc::new(StaticFetcher::standard()), 1);
    let outcome: BatchOutcome = service.run_batch(&ids(&["1234567"])).await.into_iter().collect();
    cache::save(&config.catalog.cache_file, &outcome.entries).await.unwrap();

    assert!(state.services.refresh.seed_from_cache().await.unwrap());
    let count = state.services.refresh.with_state(|s| s.entries.len()).await;
    assert_eq!(count, Some(1));

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_update_input_file_with_titles() {
    let dir = scratch_dir("titles");
    let path = dir.join("ids.txt");
    tokio::fs::write(&path, "AK00119197\n1234567 alt\n").await.unwrap();

    let service = ExtractionService::new(Arc::new(StaticFetcher::standard()), 2);
    let lines = input::load_input(&path).await.unwrap();
    let identifiers: Vec<String> = lines.into_iter().map(|l| l.id).collect();
    let outcome: BatchOutcome = service.run_batch(&identifiers).await.into_iter().collect();

    input::update_input_file(&path, &outcome.entries).await.unwrap();
    let text = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(text, "AK00119197 Der Hobbit\n1234567 Krabat\n");

    let _ = std::fs::remove_dir_all(dir);
}
