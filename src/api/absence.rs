use crate::access::Resource;
use crate::auth::auth::AuthUser;
use crate::model::absence::AbsenceStatus;
use crate::store::{Store, StoreError, absence::NewAbsence};
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreateAbsence {
    #[schema(example = "2024-08-15", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-08-16", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Doctor appointment visit")]
    pub reason: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AbsenceFilter {
    /// Full team queue instead of own requests (HR only)
    pub all: Option<bool>,
}

/// Own requests by default; `?all=true` opens the team queue behind the
/// HR-only gate.
#[utoipa::path(
    get,
    path = "/api/v1/absences",
    params(AbsenceFilter),
    responses(
        (status = 200, description = "Absence requests", body = [crate::model::absence::AbsenceRequest]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Absence"
)]
pub async fn list_absences(
    auth: AuthUser,
    store: web::Data<Store>,
    query: web::Query<AbsenceFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::OwnAbsences)?;

    let requests = if query.all.unwrap_or(false) {
        auth.require(Resource::TeamAbsenceQueue)?;
        store.absences.list()
    } else {
        store.absences.for_employee(&auth.employee_id)
    };

    Ok(HttpResponse::Ok().json(requests))
}

#[utoipa::path(
    get,
    path = "/api/v1/absences/{request_id}",
    params(
        ("request_id", Path, description = "Absence request ID")
    ),
    responses(
        (status = 200, description = "Absence request found", body = crate::model::absence::AbsenceRequest),
        (status = 404, description = "Absence request not found", body = Object, example = json!({
            "message": "Absence request not found"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Absence"
)]
pub async fn get_absence(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let request_id = path.into_inner();
    let request = match store.absences.get(&request_id) {
        Some(r) => r,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Absence request not found"
            })));
        }
    };

    // Employees may only inspect their own requests.
    if request.employee_id != auth.employee_id {
        auth.require(Resource::TeamAbsenceQueue)?;
    }

    Ok(HttpResponse::Ok().json(request))
}

/// Files a request for the authenticated employee; status is forced to
/// Pending and validation happens before anything is stored.
#[utoipa::path(
    post,
    path = "/api/v1/absences",
    request_body = CreateAbsence,
    responses(
        (status = 201, description = "Absence request submitted", body = crate::model::absence::AbsenceRequest),
        (status = 400, description = "Inverted date range or reason too short"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Absence"
)]
pub async fn create_absence(
    auth: AuthUser,
    store: web::Data<Store>,
    payload: web::Json<CreateAbsence>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::OwnAbsences)?;

    // The token's employee may have been removed from the directory.
    if store.employees.get(&auth.employee_id).is_none() {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    let fields = NewAbsence {
        start_date: payload.start_date,
        end_date: payload.end_date,
        reason: payload.reason.clone(),
    };

    match store.absences.add(fields, &auth.employee_id) {
        Ok(request) => {
            info!(request_id = %request.id, employee_id = %auth.employee_id, "Absence request submitted");
            Ok(HttpResponse::Created().json(request))
        }
        Err(e @ (StoreError::InvertedDateRange | StoreError::ReasonTooShort)) => {
            Ok(HttpResponse::BadRequest().json(json!({ "message": e.to_string() })))
        }
        Err(e) => Err(actix_web::error::ErrorInternalServerError(e.to_string())),
    }
}

fn decide(
    auth: &AuthUser,
    store: &Store,
    request_id: &str,
    status: AbsenceStatus,
) -> actix_web::Result<HttpResponse> {
    auth.require(Resource::TeamAbsenceQueue)?;

    match store.absences.set_status(request_id, status) {
        Ok(request) => {
            info!(%request_id, status = %status, "Absence request decided");
            Ok(HttpResponse::Ok().json(request))
        }
        Err(StoreError::NotFound | StoreError::AlreadyProcessed) => {
            Ok(HttpResponse::BadRequest().json(json!({
                "message": "Absence request not found or already processed"
            })))
        }
        Err(e) => Err(actix_web::error::ErrorInternalServerError(e.to_string())),
    }
}

/// Approve absence (HR)
#[utoipa::path(
    put,
    path = "/api/v1/absences/{request_id}/approve",
    params(
        ("request_id", Path, description = "ID of the absence request to approve")
    ),
    responses(
        (status = 200, description = "Absence approved", body = crate::model::absence::AbsenceRequest),
        (status = 400, description = "Request not found or already processed", body = Object, example = json!({
            "message": "Absence request not found or already processed"
        })),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Absence"
)]
pub async fn approve_absence(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    decide(&auth, &store, &path.into_inner(), AbsenceStatus::Approved)
}

/// Reject absence (HR)
#[utoipa::path(
    put,
    path = "/api/v1/absences/{request_id}/reject",
    params(
        ("request_id", Path, description = "ID of the absence request to reject")
    ),
    responses(
        (status = 200, description = "Absence rejected", body = crate::model::absence::AbsenceRequest),
        (status = 400, description = "Request not found or already processed", body = Object, example = json!({
            "message": "Absence request not found or already processed"
        })),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Absence"
)]
pub async fn reject_absence(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    decide(&auth, &store, &path.into_inner(), AbsenceStatus::Rejected)
}
