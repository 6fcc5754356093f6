use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum AbsenceStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "req4",
        "employee_id": "6",
        "start_date": "2024-08-15",
        "end_date": "2024-08-16",
        "reason": "Doctor appointment",
        "status": "Pending"
    })
)]
pub struct AbsenceRequest {
    #[schema(example = "req4")]
    pub id: String,

    #[schema(example = "6")]
    pub employee_id: String,

    #[schema(example = "2024-08-15", format = "date", value_type = String)]
    pub start_date: NaiveDate,

    #[schema(example = "2024-08-16", format = "date", value_type = String)]
    pub end_date: NaiveDate,

    #[schema(example = "Doctor appointment")]
    pub reason: String,

    #[schema(example = "Pending")]
    pub status: AbsenceStatus,
}
