#![allow(clippy::unwrap_used, clippy::expect_used)]

use directory_sdk::{MembershipQuery, MembershipRecord, NewMembership};

use super::memberships::MEMBERSHIP_EXISTS;
use crate::domain::error::DomainError;
use crate::test_support::{build_services, inmem_db};

fn membership(user_id: &str, group_name: &str) -> NewMembership {
    NewMembership {
        user_id: user_id.to_owned(),
        group_name: group_name.to_owned(),
    }
}

fn record(user_id: &str, group_name: &str) -> MembershipRecord {
    MembershipRecord::from(membership(user_id, group_name))
}

#[tokio::test]
async fn test_assign_then_remove() {
    let svc = build_services(inmem_db().await);

    svc.memberships.assign(membership("u1", "ops")).await.unwrap();
    assert_eq!(
        svc.memberships.get_user_groups("u1").await.unwrap(),
        vec![record("u1", "ops")]
    );

    svc.memberships.remove("u1", "ops").await.unwrap();
    assert!(svc.memberships.get_user_groups("u1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_assign_conflicts() {
    let svc = build_services(inmem_db().await);
    svc.memberships.assign(membership("u1", "ops")).await.unwrap();

    let err = svc
        .memberships
        .assign(membership("u1", "ops"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Conflict { ref message } if message == MEMBERSHIP_EXISTS));
}

#[tokio::test]
async fn test_remove_absent_membership_succeeds() {
    let svc = build_services(inmem_db().await);

    assert!(svc.memberships.remove("ghost", "ops").await.is_ok());
}

#[tokio::test]
async fn test_queries_by_user_group_and_all() {
    let svc = build_services(inmem_db().await);
    for (u, g) in [("u1", "ops"), ("u2", "ops"), ("u1", "audit")] {
        svc.memberships.assign(membership(u, g)).await.unwrap();
    }

    let by_group = svc
        .memberships
        .list_memberships(&MembershipQuery::ByGroup {
            group_name: "ops".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(by_group, vec![record("u1", "ops"), record("u2", "ops")]);

    let by_user = svc
        .memberships
        .list_memberships(&MembershipQuery::ByUser {
            user_id: "u1".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(by_user, vec![record("u1", "ops"), record("u1", "audit")]);

    let all = svc
        .memberships
        .list_memberships(&MembershipQuery::All)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}
