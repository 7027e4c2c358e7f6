use gcp_permission_mappings::{GcpPermission, ParseErrorKind, PermissionSet};

const CONN_V1: &str = "bigquery.connections.getIamPolicy";
const CONN_V2: &str = "bigqueryconnection.googleapis.com/connections.getIamPolicy";

#[test]
fn v1_names_render_back_verbatim() {
    for name in [
        "bigquery.tables.get",
        "compute.instances.setMetadata",
        "iam.serviceAccounts.actAs",
        "storage.objects.list",
    ] {
        let perm = GcpPermission::parse(name, false).expect("valid V1 name");
        assert!(perm.has_v1());
        assert!(!perm.has_v2());
        assert_eq!(perm.as_v1().as_deref(), Some(name));
    }
}

#[test]
fn v2_names_render_back_verbatim() {
    for name in [
        "bigquery.googleapis.com/tables.get",
        "cloudresourcemanager.googleapis.com/projects.delete",
        "storage.googleapis.com/buckets/objects.get",
    ] {
        let perm = GcpPermission::parse(name, true).expect("valid V2 name");
        assert!(perm.has_v2());
        assert_eq!(perm.as_v2().as_deref(), Some(name));
        assert_eq!(
            GcpPermission::v2_to_v1(name).unwrap(),
            name.replace(".googleapis.com/", ".")
        );
    }
}

#[test]
fn v1_and_v2_of_one_permission_collapse() {
    let mut set = PermissionSet::new();
    set.add_permission("bigquery.tables.get", false).unwrap();
    set.add_permission("bigquery.googleapis.com/tables.get", true)
        .unwrap();

    let all: Vec<&GcpPermission> = set.permissions().collect();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].service(), "bigquery");
    assert_eq!(all[0].action(), "tables.get");
    assert!(all[0].has_v1());
    assert!(all[0].has_v2());
    assert!(all[0].deny_support());
}

#[test]
fn non_standard_mapping_keeps_v2_entry() {
    let mut set = PermissionSet::new();
    set.add_permission(CONN_V1, false).unwrap();
    set.add_permission(CONN_V2, false).unwrap();
    assert_eq!(set.len(), 2);

    assert!(set.dedupe_non_standard_mapping(CONN_V1, CONN_V2).unwrap());

    assert_eq!(set.len(), 1);
    let survivor = set.get(CONN_V1).unwrap().expect("override lookup");
    assert_eq!(survivor.service(), "bigqueryconnection");
    assert!(survivor.has_v1());
    assert_eq!(survivor.as_v1().as_deref(), Some(CONN_V1));
    assert!(set.contains(CONN_V2).unwrap());
}

#[test]
fn mapping_for_unknown_permission_changes_nothing() {
    let mut set = PermissionSet::new();
    set.add_permission(CONN_V2, true).unwrap();

    let fused = set
        .dedupe_non_standard_mapping("bigquery.connections.neverAdded", CONN_V2)
        .unwrap();

    assert!(!fused);
    assert_eq!(set.len(), 1);
    let entry = set.get(CONN_V2).unwrap().unwrap();
    assert!(!entry.has_v1());
    assert_eq!(entry.v1_override(), None);
}

#[test]
fn malformed_name_is_rejected() {
    let err = GcpPermission::parse("malformed", false).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingDelimiter);

    let mut set = PermissionSet::new();
    assert!(set.add_permission("malformed", false).is_err());
    assert!(set.is_empty());
}
