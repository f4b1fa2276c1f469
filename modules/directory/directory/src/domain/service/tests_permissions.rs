#![allow(clippy::unwrap_used, clippy::expect_used)]

use directory_sdk::{NewPermission, PermissionQuery, PermissionRecord};
use tracing_test::traced_test;

use super::permissions::{PERMISSION_EXISTS, PERMISSION_NOT_FOUND};
use crate::domain::error::DomainError;
use crate::module::ConcreteAppServices;
use crate::test_support::{build_services, inmem_db};

async fn services() -> ConcreteAppServices {
    build_services(inmem_db().await)
}

fn new_permission(group_name: &str, service: &str, action: &str) -> NewPermission {
    NewPermission {
        group_name: group_name.to_owned(),
        service: service.to_owned(),
        action: action.to_owned(),
    }
}

async fn grant_all(svc: &ConcreteAppServices, grants: &[(&str, &str, &str)]) {
    for (g, s, a) in grants {
        svc.permissions
            .grant(new_permission(g, s, a))
            .await
            .unwrap();
    }
}

async fn resolve(svc: &ConcreteAppServices, service: &str, action: &str) -> Vec<String> {
    svc.permissions
        .list_permissions(&PermissionQuery::ByServiceAndAction {
            service: service.to_owned(),
            action: action.to_owned(),
        })
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.group_name)
        .collect()
}

// =========================================================================
// Resolution over the SQLite store
// =========================================================================

#[tokio::test]
async fn test_ops_audit_root_scenario() {
    let svc = services().await;
    grant_all(
        &svc,
        &[
            ("ops", "deploy", "all"),
            ("audit", "all", "read"),
            ("root", "all", "all"),
        ],
    )
    .await;

    assert_eq!(resolve(&svc, "deploy", "read").await, vec!["ops", "audit", "root"]);
}

#[tokio::test]
async fn test_literal_grant_matches_exactly_once() {
    let svc = services().await;
    grant_all(
        &svc,
        &[
            ("ops", "deploy", "read"),
            ("ops", "deploy", "all"),
            ("ops", "all", "all"),
            ("dev", "deploy", "read"),
        ],
    )
    .await;

    assert_eq!(resolve(&svc, "deploy", "read").await, vec!["ops", "dev"]);
}

#[tokio::test]
async fn test_service_wildcard_matches_every_action() {
    let svc = services().await;
    grant_all(&svc, &[("ops", "deploy", "all")]).await;

    for action in ["read", "write", "rollback"] {
        assert_eq!(resolve(&svc, "deploy", action).await, vec!["ops"]);
    }
    assert!(resolve(&svc, "billing", "read").await.is_empty());
}

#[tokio::test]
async fn test_action_wildcard_matches_every_service() {
    let svc = services().await;
    grant_all(&svc, &[("audit", "all", "read")]).await;

    for service in ["deploy", "billing", "logs"] {
        assert_eq!(resolve(&svc, service, "read").await, vec!["audit"]);
    }
    assert!(resolve(&svc, "deploy", "write").await.is_empty());
}

#[tokio::test]
async fn test_full_wildcard_matches_any_pair() {
    let svc = services().await;
    grant_all(&svc, &[("root", "all", "all")]).await;

    for (service, action) in [("deploy", "read"), ("billing", "refund"), ("x", "y")] {
        assert_eq!(resolve(&svc, service, action).await, vec!["root"]);
    }
}

#[tokio::test]
async fn test_service_query_includes_blanket_grants() {
    let svc = services().await;
    grant_all(
        &svc,
        &[
            ("ops", "deploy", "read"),
            ("root", "all", "all"),
            ("ops", "all", "write"),
            ("billing", "invoice", "read"),
        ],
    )
    .await;

    let groups: Vec<String> = svc
        .permissions
        .list_permissions(&PermissionQuery::ByService {
            service: "deploy".to_owned(),
        })
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.group_name)
        .collect();

    assert_eq!(groups, vec!["ops", "root"]);
}

#[tokio::test]
async fn test_group_query_and_full_listing() {
    let svc = services().await;
    grant_all(&svc, &[("ops", "deploy", "all"), ("root", "all", "all")]).await;

    let ops = svc
        .permissions
        .list_permissions(&PermissionQuery::ByGroup {
            group_name: "ops".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(ops, vec![PermissionRecord::new("ops", "deploy", "all")]);

    let all = svc
        .permissions
        .list_permissions(&PermissionQuery::All)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

// =========================================================================
// grant / revoke
// =========================================================================

#[tokio::test]
#[traced_test]
async fn test_duplicate_grant_conflicts_and_leaves_state() {
    let svc = services().await;
    svc.permissions
        .grant(new_permission("ops", "deploy", "read"))
        .await
        .unwrap();

    let err = svc
        .permissions
        .grant(new_permission("ops", "deploy", "read"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Conflict { ref message } if message == PERMISSION_EXISTS));
    assert!(logs_contain("Permission already granted"));
    let all = svc
        .permissions
        .list_permissions(&PermissionQuery::All)
        .await
        .unwrap();
    assert_eq!(all, vec![PermissionRecord::new("ops", "deploy", "read")]);
}

#[tokio::test]
async fn test_same_pair_for_other_group_is_not_a_conflict() {
    let svc = services().await;
    grant_all(&svc, &[("ops", "deploy", "read"), ("dev", "deploy", "read")]).await;

    assert_eq!(resolve(&svc, "deploy", "read").await, vec!["ops", "dev"]);
}

#[tokio::test]
async fn test_grant_rejects_separator_and_blank_fields() {
    let svc = services().await;

    let err = svc
        .permissions
        .grant(new_permission("ops", "deploy#x", "read"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::MalformedInput { .. }));

    let err = svc
        .permissions
        .grant(new_permission("", "deploy", "read"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::MalformedInput { .. }));
}

#[tokio::test]
async fn test_revoke_missing_permission_is_not_found() {
    let svc = services().await;

    let err = svc.permissions.revoke("ops", "deploy#read").await.unwrap_err();

    assert!(matches!(err, DomainError::NotFound { ref message } if message == PERMISSION_NOT_FOUND));
}

#[tokio::test]
async fn test_revoke_removes_grant_from_resolution() {
    let svc = services().await;
    grant_all(&svc, &[("ops", "deploy", "all"), ("root", "all", "all")]).await;

    let removed = svc.permissions.revoke("ops", "deploy#all").await.unwrap();

    assert_eq!(removed, PermissionRecord::new("ops", "deploy", "all"));
    assert_eq!(resolve(&svc, "deploy", "read").await, vec!["root"]);
    assert!(svc.permissions.revoke("ops", "deploy#all").await.is_err());
}
