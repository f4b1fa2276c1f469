#![allow(clippy::unwrap_used, clippy::expect_used)]

use directory_sdk::{ContactQuery, NewContact};

use super::contacts::{CONTACT_EXISTS, CONTACT_NOT_FOUND};
use crate::domain::error::DomainError;
use crate::test_support::{build_services, inmem_db};

fn contact(target: &str, contact_type: &str, data: &str) -> NewContact {
    NewContact {
        target: target.to_owned(),
        contact_type: contact_type.to_owned(),
        data: data.to_owned(),
    }
}

fn by_key(target: &str, contact_type: &str) -> ContactQuery {
    ContactQuery::ByKey {
        target: target.to_owned(),
        contact_type: contact_type.to_owned(),
    }
}

#[tokio::test]
async fn test_duplicate_contact_conflicts_and_keeps_original() {
    let svc = build_services(inmem_db().await);
    svc.contacts
        .create_contact(contact("user1", "email", "a@x.com"))
        .await
        .unwrap();

    let err = svc
        .contacts
        .create_contact(contact("user1", "email", "b@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { ref message } if message == CONTACT_EXISTS));

    let found = svc.contacts.get_contacts(&by_key("user1", "email")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].data, "a@x.com");
}

#[tokio::test]
async fn test_lookup_by_target_and_missing_cases() {
    let svc = build_services(inmem_db().await);
    svc.contacts
        .create_contact(contact("user1", "email", "a@x.com"))
        .await
        .unwrap();
    svc.contacts
        .create_contact(contact("user1", "phone", "+100"))
        .await
        .unwrap();

    let all_for_target = svc
        .contacts
        .get_contacts(&ContactQuery::ByTarget {
            target: "user1".to_owned(),
        })
        .await
        .unwrap();
    let types: Vec<&str> = all_for_target
        .iter()
        .map(|c| c.contact_type.as_str())
        .collect();
    assert_eq!(types, vec!["email", "phone"]);

    let err = svc
        .contacts
        .get_contacts(&ContactQuery::ByTarget {
            target: "nobody".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { ref message } if message == CONTACT_NOT_FOUND));

    let err = svc
        .contacts
        .get_contacts(&by_key("user1", "fax"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_full_listing_may_be_empty() {
    let svc = build_services(inmem_db().await);

    let all = svc.contacts.get_contacts(&ContactQuery::All).await.unwrap();

    assert!(all.is_empty());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let svc = build_services(inmem_db().await);
    svc.contacts
        .create_contact(contact("user1", "email", "a@x.com"))
        .await
        .unwrap();

    svc.contacts.delete_contact("user1", "email").await.unwrap();
    svc.contacts.delete_contact("user1", "email").await.unwrap();

    assert!(
        svc.contacts
            .get_contacts(&by_key("user1", "email"))
            .await
            .is_err()
    );
}
