//! Discovery display policy and fallback.

mod common;

use common::{matching_doc, plain_doc, sample_names, Script, ScriptedSource};
use learnview::discovery::{discover, discover_or_fallback};
use learnview::sources::{DocumentLoader, LocalSource};
use learnview::{DiscoveryError, DiscoveryOrigin, FilterConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

#[tokio::test]
async fn one_matching_file_of_three_is_the_only_one_shown() {
    let loader = ScriptedSource::new()
        .with("a_learnings.json", Script::Load(plain_doc("a_learnings.json")))
        .with("b_learnings.json", Script::Load(matching_doc("b_learnings.json")))
        .with("c_learnings.json", Script::Load(plain_doc("c_learnings.json")))
        .into_loader();

    let report = discover(&loader, &FilterConfig::default(), 4).await.unwrap();
    assert_eq!(report.display_files().to_vec(), vec!["b_learnings.json"]);
    assert_eq!(report.loaded.len(), 3);
    assert_eq!(report.origin, DiscoveryOrigin::Source);
}

#[tokio::test]
async fn no_matches_shows_every_loaded_file_in_order() {
    let gate = Arc::new(Notify::new());
    let loader = ScriptedSource::new()
        .with(
            "c_learnings.json",
            Script::Gated(plain_doc("c_learnings.json"), gate.clone()),
        )
        .with("a_learnings.json", Script::Load(plain_doc("a_learnings.json")))
        .with("b_learnings.json", Script::Load(plain_doc("b_learnings.json")))
        .into_loader();

    // The first candidate finishes last.
    let task = tokio::spawn(async move { discover(&loader, &FilterConfig::default(), 3).await });
    tokio::time::sleep(Duration::from_millis(20)).await;
    gate.notify_one();

    let report = task.await.unwrap().unwrap();
    assert_eq!(
        report.display_files().to_vec(),
        vec!["c_learnings.json", "a_learnings.json", "b_learnings.json"]
    );
    assert!(report.matched.is_empty());
}

#[tokio::test]
async fn failed_candidates_are_skipped() {
    let loader = ScriptedSource::new()
        .with("a_learnings.json", Script::Fail)
        .with("b_learnings.json", Script::Load(plain_doc("b_learnings.json")))
        .into_loader();

    let report = discover(&loader, &FilterConfig::default(), 4).await.unwrap();
    assert_eq!(report.display_files().to_vec(), vec!["b_learnings.json"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].file, "a_learnings.json");
}

#[tokio::test]
async fn all_failing_falls_back_to_samples() {
    let loader = ScriptedSource::new()
        .with("a_learnings.json", Script::Fail)
        .with("b_learnings.json", Script::Fail)
        .with("c_learnings.json", Script::Fail)
        .into_loader();

    let err = discover(&loader, &FilterConfig::default(), 4)
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::AllFailed { attempted: 3 }));

    let report = discover_or_fallback(&loader, &FilterConfig::default(), 4).await;
    assert_eq!(report.origin, DiscoveryOrigin::Samples);
    assert_eq!(report.display_files().to_vec(), sample_names());
    assert!(!report.display_files().is_empty());
}

#[tokio::test]
async fn empty_candidate_list_falls_back_to_samples() {
    let loader = ScriptedSource::new().into_loader();
    assert!(matches!(
        discover(&loader, &FilterConfig::default(), 4).await,
        Err(DiscoveryError::NoCandidates)
    ));
    let report = discover_or_fallback(&loader, &FilterConfig::default(), 4).await;
    assert_eq!(report.origin, DiscoveryOrigin::Samples);
}

#[tokio::test]
async fn local_directory_discovery() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("alpha_learnings.json"),
        r#"[{"type": "tech_choices", "summary": "Testing Frameworks matter"}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("beta_learnings.json"),
        r#"[{"type": "patterns", "summary": "Testing Frameworks elsewhere"}]"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("broken_learnings.json"), "{oops").unwrap();

    let loader = DocumentLoader::new(
        Arc::new(LocalSource::new(dir.path())),
        Duration::from_secs(5),
    );
    let report = discover(&loader, &FilterConfig::default(), 4).await.unwrap();

    assert_eq!(
        report.candidates,
        vec![
            "alpha_learnings.json",
            "beta_learnings.json",
            "broken_learnings.json"
        ]
    );
    assert_eq!(report.loaded, vec!["alpha_learnings.json", "beta_learnings.json"]);
    assert_eq!(report.display_files().to_vec(), vec!["alpha_learnings.json"]);
    assert_eq!(report.failed[0].file, "broken_learnings.json");
}

#[tokio::test]
async fn broken_manifest_still_discovers_directory_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("manifest.json"), "{broken").unwrap();
    std::fs::write(
        dir.path().join("a_learnings.json"),
        r#"[{"type": "tech_choices", "summary": "Testing Frameworks"}]"#,
    )
    .unwrap();

    let loader = DocumentLoader::new(
        Arc::new(LocalSource::new(dir.path())),
        Duration::from_secs(5),
    );
    let report = discover_or_fallback(&loader, &FilterConfig::default(), 4).await;
    assert_eq!(report.origin, DiscoveryOrigin::Source);
    assert_eq!(report.display_files().to_vec(), vec!["a_learnings.json"]);
}

#[tokio::test]
async fn missing_directory_falls_back_to_samples() {
    let dir = tempfile::tempdir().unwrap();
    let loader = DocumentLoader::new(
        Arc::new(LocalSource::new(dir.path().join("missing"))),
        Duration::from_secs(5),
    );
    let report = discover_or_fallback(&loader, &FilterConfig::default(), 4).await;
    assert_eq!(report.origin, DiscoveryOrigin::Samples);
    assert_eq!(report.display_files().to_vec(), sample_names());
}
