use crate::model::role::AccessRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "10",
        "name": "Jane Doe",
        "email": "jane@talentflow.com",
        "avatar": "https://picsum.photos/id/248/200/200",
        "role": "HR Manager",
        "team": "Management",
        "access_role": "HR"
    })
)]
pub struct Employee {
    #[schema(example = "10")]
    pub id: String,

    #[schema(example = "Jane Doe")]
    pub name: String,

    #[schema(example = "jane@talentflow.com")]
    pub email: String,

    #[schema(example = "https://picsum.photos/id/248/200/200")]
    pub avatar: String,

    /// Free-text job title, not the permission class.
    #[schema(example = "HR Manager")]
    pub role: String,

    #[schema(example = "Management")]
    pub team: String,

    /// Stored once at creation; never recomputed afterwards.
    pub access_role: AccessRole,
}

impl Employee {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        avatar: impl Into<String>,
        role: impl Into<String>,
        team: impl Into<String>,
    ) -> Self {
        let email = email.into();
        let role = role.into();
        let access_role = AccessRole::assign(&email, &role);
        Employee {
            id: id.into(),
            name: name.into(),
            email,
            avatar: avatar.into(),
            role,
            team: team.into(),
            access_role,
        }
    }
}
