use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coarse permission class driving every authorization decision.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub enum AccessRole {
    #[serde(rename = "HR")]
    Hr = 1,
    Employee = 2,
}

impl AccessRole {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(AccessRole::Hr),
            2 => Some(AccessRole::Employee),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Computed once when the employee record is created, then stored.
    ///
    /// HR membership comes from the email or the free-text job title
    /// mentioning "hr" (case-insensitive). The title clause is what makes
    /// the seeded "HR Manager" resolve to HR even though her email carries
    /// no marker.
    pub fn assign(email: &str, role_title: &str) -> Self {
        if email.to_lowercase().contains("hr") || role_title.to_lowercase().contains("hr") {
            AccessRole::Hr
        } else {
            AccessRole::Employee
        }
    }
}
