//! Directory records and read query shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Match-any token for either the `service` or the `action` dimension.
pub const WILDCARD: &str = "all";

/// Separator between `service` and `action` inside the composite key.
pub const KEY_SEPARATOR: char = '#';

/// Build the composite `service#action` key.
#[must_use]
pub fn service_action_key(service: &str, action: &str) -> String {
    format!("{service}{KEY_SEPARATOR}{action}")
}

// ============================================================================
// Records
// ============================================================================

/// A permission granted to a group.
///
/// `service_action` is derived from `service` and `action` and is the
/// record's identity within its group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    pub group_name: String,
    pub service_action: String,
    pub service: String,
    pub action: String,
}

impl PermissionRecord {
    pub fn new(
        group_name: impl Into<String>,
        service: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        let service = service.into();
        let action = action.into();
        Self {
            group_name: group_name.into(),
            service_action: service_action_key(&service, &action),
            service,
            action,
        }
    }
}

/// Data for a grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPermission {
    pub group_name: String,
    pub service: String,
    pub action: String,
}

impl From<NewPermission> for PermissionRecord {
    fn from(new: NewPermission) -> Self {
        Self::new(new.group_name, new.service, new.action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRecord {
    pub user_id: String,
    pub group_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMembership {
    pub user_id: String,
    pub group_name: String,
}

impl From<NewMembership> for MembershipRecord {
    fn from(new: NewMembership) -> Self {
        Self {
            user_id: new.user_id,
            group_name: new.group_name,
        }
    }
}

/// Contact information for a target on one channel. `data` is opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub target: String,
    #[serde(rename = "type")]
    pub contact_type: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub target: String,
    #[serde(rename = "type")]
    pub contact_type: String,
    pub data: String,
}

impl From<NewContact> for ContactRecord {
    fn from(new: NewContact) -> Self {
        Self {
            target: new.target,
            contact_type: new.contact_type,
            data: new.data,
        }
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Shape of a permission read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionQuery {
    /// Every stored permission.
    All,
    /// A group's own records, no wildcard expansion.
    ByGroup { group_name: String },
    /// Wildcard-aware resolution of a `(service, action)` pair.
    ByServiceAndAction { service: String, action: String },
    /// Records stored under one exact composite key.
    ByServiceAction { service_action: String },
    /// Wildcard-aware resolution of a service.
    ByService { service: String },
}

impl PermissionQuery {
    /// Build a query from raw request parameters.
    ///
    /// Precedence is `group_name`, then `service` + `action`, then
    /// `service`, then `service_action`. An empty map selects [`Self::All`];
    /// any other combination is unsupported and yields `None`.
    #[must_use]
    pub fn from_params(params: &BTreeMap<String, String>) -> Option<Self> {
        if params.is_empty() {
            return Some(Self::All);
        }
        if let Some(group_name) = params.get("group_name") {
            return Some(Self::ByGroup {
                group_name: group_name.clone(),
            });
        }
        match (
            params.get("service"),
            params.get("action"),
            params.get("service_action"),
        ) {
            (Some(service), Some(action), _) => Some(Self::ByServiceAndAction {
                service: service.clone(),
                action: action.clone(),
            }),
            (Some(service), None, _) => Some(Self::ByService {
                service: service.clone(),
            }),
            (None, _, Some(service_action)) => Some(Self::ByServiceAction {
                service_action: service_action.clone(),
            }),
            (None, _, None) => None,
        }
    }
}

/// Shape of a membership read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipQuery {
    All,
    ByUser { user_id: String },
    ByGroup { group_name: String },
}

impl MembershipQuery {
    /// `user_id` wins over `group_name`. Parameters naming neither are
    /// unsupported and yield `None`.
    #[must_use]
    pub fn from_params(params: &BTreeMap<String, String>) -> Option<Self> {
        if params.is_empty() {
            return Some(Self::All);
        }
        if let Some(user_id) = params.get("user_id") {
            return Some(Self::ByUser {
                user_id: user_id.clone(),
            });
        }
        params.get("group_name").map(|group_name| Self::ByGroup {
            group_name: group_name.clone(),
        })
    }
}

/// Shape of a contact read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactQuery {
    All,
    ByTarget { target: String },
    ByKey { target: String, contact_type: String },
}

impl ContactQuery {
    /// Without a `target` every contact is listed, whatever else is passed.
    #[must_use]
    pub fn from_params(params: &BTreeMap<String, String>) -> Self {
        let Some(target) = params.get("target") else {
            return Self::All;
        };
        match params.get("type") {
            Some(contact_type) => Self::ByKey {
                target: target.clone(),
                contact_type: contact_type.clone(),
            },
            None => Self::ByTarget {
                target: target.clone(),
            },
        }
    }
}
