// riwayat/src/utils/structs.rs
use serde::{Deserialize, Serialize};

use crate::utils::rbac::PermissionSet;

/// Authenticated admin as handed over by the login collaborator.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: String,              // Display role, e.g. "super_admin"
    pub permissions: Vec<String>,  // Flat grants; roles are resolved upstream
}

impl Session {
    pub fn permission_set(&self) -> PermissionSet {
        self.permissions.iter().cloned().collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}
