use crate::doc_fixtures::{
    CUSTOM_ROLES_HTML, DENY_SUPPORT_BROKEN_NOTE_HTML, DENY_SUPPORT_HTML, ROLE_INDEX_JSON,
};
use gcp_permission_mappings::config::LiveConfig;
use gcp_permission_mappings::{
    Config, LiveSource, MappingError, PermissionSource, SourceError, load_from_source,
    load_permission_set,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROLE_INDEX_PATH: &str = "/iam/json/role-permission-filter.json";
const CUSTOM_ROLES_PATH: &str = "/iam/docs/custom-roles-permissions-support";
const DENY_SUPPORT_PATH: &str = "/iam/docs/deny-permissions-support";

async fn mount(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn documentation_server(deny_page: &str) -> MockServer {
    let server = MockServer::start().await;
    mount(
        &server,
        ROLE_INDEX_PATH,
        ResponseTemplate::new(200).set_body_raw(ROLE_INDEX_JSON, "application/json"),
    )
    .await;
    mount(
        &server,
        CUSTOM_ROLES_PATH,
        ResponseTemplate::new(200).set_body_raw(CUSTOM_ROLES_HTML, "text/html"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(DENY_SUPPORT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(deny_page, "text/html"))
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn live_load_merges_all_pages() {
    let server = documentation_server(DENY_SUPPORT_HTML).await;
    let config = Config {
        live: LiveConfig::with_base_url(&server.uri()),
        ..Config::default()
    };

    let set = load_permission_set(true, &config).await.expect("live load");

    let names: Vec<String> = set.sorted().iter().map(|p| p.key().to_string()).collect();
    assert_eq!(
        names,
        vec![
            "(bigquery, tables.get)",
            "(bigqueryconnection, connections.getIamPolicy)",
            "(compute, instances.delete)",
            "(storage, buckets.get)",
        ]
    );

    let conn = set
        .get("bigquery.connections.getIamPolicy")
        .unwrap()
        .expect("override lookup");
    assert!(conn.has_v1() && conn.has_v2() && conn.deny_support());

    let storage = set.get("storage.buckets.get").unwrap().unwrap();
    assert!(!storage.deny_support());
    assert!(!storage.has_v2());

    // The deny page feeds two collections but is fetched once.
    server.verify().await;
}

#[tokio::test]
async fn missing_v1_code_is_a_hard_failure() {
    let server = documentation_server(DENY_SUPPORT_BROKEN_NOTE_HTML).await;
    let source = LiveSource::new(&LiveConfig::with_base_url(&server.uri())).unwrap();

    let err = load_from_source(&source).await.unwrap_err();
    assert!(matches!(
        err,
        MappingError::Source(SourceError::Extraction { ref permission, .. })
            if permission == "bigqueryconnection.googleapis.com/connections.use"
    ));
}

#[tokio::test]
async fn http_error_is_source_unavailable() {
    let server = MockServer::start().await;
    mount(&server, ROLE_INDEX_PATH, ResponseTemplate::new(503)).await;

    let source = LiveSource::new(&LiveConfig::with_base_url(&server.uri())).unwrap();
    let err = source.allowable_permissions().await.unwrap_err();

    match err {
        SourceError::Unavailable { resource, reason } => {
            assert!(resource.ends_with(ROLE_INDEX_PATH));
            assert!(reason.contains("503"));
        }
        other @ SourceError::Extraction { .. } => panic!("expected unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_role_index_is_source_unavailable() {
    let server = MockServer::start().await;
    mount(
        &server,
        ROLE_INDEX_PATH,
        ResponseTemplate::new(200).set_body_raw("<html>moved</html>", "text/html"),
    )
    .await;

    let source = LiveSource::new(&LiveConfig::with_base_url(&server.uri())).unwrap();
    let err = source.allowable_permissions().await.unwrap_err();
    assert!(matches!(
        err,
        SourceError::Unavailable { ref resource, .. } if resource == "role index"
    ));
}
