use gcp_permission_mappings::config::OutputFormat;
use gcp_permission_mappings::report::{SetSummary, render_summary};
use gcp_permission_mappings::{BundledSource, Config, load_from_source, load_permission_set};
use std::fs;

#[tokio::test]
async fn embedded_data_loads_deduplicated() {
    let set = load_permission_set(false, &Config::default())
        .await
        .expect("bundled data should load");

    assert_eq!(
        SetSummary::of(&set),
        SetSummary {
            total: 61,
            v1: 61,
            v2: 26,
            both: 26,
            deny_support: 26,
            overrides: 7,
        }
    );
    assert!(set.audit().is_empty());

    // Every non-standard V1 name resolves to its V2-keyed entry.
    let projects = set
        .get("resourcemanager.projects.delete")
        .unwrap()
        .expect("override lookup");
    assert_eq!(projects.service(), "cloudresourcemanager");
    assert!(projects.deny_support());
}

#[tokio::test]
async fn enumeration_follows_load_order() {
    let set = load_permission_set(false, &Config::default()).await.unwrap();
    let first: Vec<String> = set
        .permissions()
        .take(2)
        .filter_map(|perm| perm.as_v1())
        .collect();

    // The mapped bigquery.connections.* V1 entries were fused away.
    assert_eq!(first, vec!["bigquery.connections.get", "bigquery.datasets.create"]);
}

#[tokio::test]
async fn data_dir_overrides_embedded_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("allowable_permissions.json"),
        r#"{"pubsub": ["pubsub.topics.get", "pubsub.topics.publish"]}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("deniable_permissions.json"),
        r#"{"pubsub": ["pubsub.googleapis.com/topics.publish"]}"#,
    )
    .unwrap();
    fs::write(dir.path().join("non_standard_mappings.json"), "{}").unwrap();

    let mut config = Config::default();
    config.sources.data_dir = Some(dir.path().to_path_buf());
    let set = load_permission_set(false, &config).await.unwrap();

    assert_eq!(set.len(), 2);
    let publish = set.get("pubsub.googleapis.com/topics.publish").unwrap().unwrap();
    assert!(publish.has_v1() && publish.has_v2() && publish.deny_support());

    let text = render_summary(&SetSummary::of(&set), OutputFormat::Text).unwrap();
    assert!(text.starts_with("total:        2"));
}

#[tokio::test]
async fn malformed_bundled_entry_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("allowable_permissions.json"),
        r#"{"broken": ["nodelimiter"]}"#,
    )
    .unwrap();
    fs::write(dir.path().join("deniable_permissions.json"), "{}").unwrap();
    fs::write(dir.path().join("non_standard_mappings.json"), "{}").unwrap();

    let err = load_from_source(&BundledSource::from_dir(dir.path()))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("nodelimiter"));
}
