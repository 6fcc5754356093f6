use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum JobStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "job1",
        "title": "Senior Frontend Developer",
        "description": "Join our team to build amazing user experiences.",
        "status": "Open",
        "created_at": "2024-07-15T00:00:00Z"
    })
)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: JobStatus,
    #[schema(format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// Application intake happens outside this service; records are read-only
/// here and carry whatever status the intake pipeline assigned.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum ApplicationStatus {
    Received,
    #[serde(rename = "Under Review")]
    #[strum(serialize = "Under Review")]
    UnderReview,
    Hired,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "app1",
        "job_id": "job1",
        "candidate_name": "Liam Gallagher",
        "candidate_email": "liam.g@example.com",
        "cv_url": "#",
        "status": "Received",
        "applied_at": "2024-07-20T00:00:00Z"
    })
)]
pub struct Application {
    pub id: String,
    pub job_id: String,
    pub candidate_name: String,
    pub candidate_email: String,
    pub cv_url: String,
    pub status: ApplicationStatus,
    #[schema(format = "date-time", value_type = String)]
    pub applied_at: DateTime<Utc>,
}
