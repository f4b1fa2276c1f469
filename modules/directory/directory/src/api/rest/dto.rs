use directory_sdk::{NewContact, NewMembership, NewPermission};
use serde::{Deserialize, Serialize};

/// REST DTO for granting a permission
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePermissionReq {
    pub group_name: String,
    pub service: String,
    pub action: String,
}

impl From<CreatePermissionReq> for NewPermission {
    fn from(req: CreatePermissionReq) -> Self {
        Self {
            group_name: req.group_name,
            service: req.service,
            action: req.action,
        }
    }
}

/// REST DTO for assigning a user to a group
#[derive(Debug, Clone, Deserialize)]
pub struct AssignUserReq {
    pub user_id: String,
    pub group_name: String,
}

impl From<AssignUserReq> for NewMembership {
    fn from(req: AssignUserReq) -> Self {
        Self {
            user_id: req.user_id,
            group_name: req.group_name,
        }
    }
}

/// REST DTO for storing contact information
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContactReq {
    pub target: String,
    #[serde(rename = "type")]
    pub contact_type: String,
    pub data: String,
}

impl From<CreateContactReq> for NewContact {
    fn from(req: CreateContactReq) -> Self {
        Self {
            target: req.target,
            contact_type: req.contact_type,
            data: req.data,
        }
    }
}

/// Query parameters for `DELETE /v1/admin/permissions`
#[derive(Debug, Deserialize)]
pub struct RevokePermissionParams {
    pub group_name: Option<String>,
    pub service_action: Option<String>,
}

/// Query parameters for `DELETE /v1/admin/users`
#[derive(Debug, Deserialize)]
pub struct RemoveUserParams {
    pub user_id: Option<String>,
    pub group_name: Option<String>,
}

/// Query parameters for `DELETE /v1/admin/contacts`
#[derive(Debug, Deserialize)]
pub struct DeleteContactParams {
    pub target: Option<String>,
    #[serde(rename = "type")]
    pub contact_type: Option<String>,
}

/// Confirmation envelope for successful writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}
