use crate::access::Resource;
use crate::auth::auth::AuthUser;
use crate::model::recruitment::JobStatus;
use crate::store::{Store, StoreError, recruitment::NewJob};
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateJob {
    #[schema(example = "Senior Frontend Developer")]
    pub title: String,
    #[schema(example = "Join our team to build amazing user experiences.")]
    pub description: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SetJobStatus {
    #[schema(example = "Closed")]
    pub status: JobStatus,
}

#[utoipa::path(
    get,
    path = "/api/v1/recruitment/jobs",
    responses(
        (status = 200, description = "Job postings, newest first", body = [crate::model::recruitment::JobPosting]),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Recruitment"
)]
pub async fn list_jobs(auth: AuthUser, store: web::Data<Store>) -> actix_web::Result<impl Responder> {
    auth.require(Resource::Recruitment)?;
    Ok(HttpResponse::Ok().json(store.recruitment.list_jobs()))
}

/// New postings always start Open.
#[utoipa::path(
    post,
    path = "/api/v1/recruitment/jobs",
    request_body = CreateJob,
    responses(
        (status = 201, description = "Job posting created", body = crate::model::recruitment::JobPosting),
        (status = 400, description = "Missing title or description"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Recruitment"
)]
pub async fn create_job(
    auth: AuthUser,
    store: web::Data<Store>,
    payload: web::Json<CreateJob>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::JobManagement)?;

    if payload.title.trim().is_empty() || payload.description.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Title and description must not be empty"
        })));
    }

    let job = store.recruitment.add_job(NewJob {
        title: payload.title.trim().to_owned(),
        description: payload.description.trim().to_owned(),
    });
    info!(job_id = %job.id, "Job posting created");
    Ok(HttpResponse::Created().json(job))
}

/// Open and Closed cycle freely in both directions.
#[utoipa::path(
    put,
    path = "/api/v1/recruitment/jobs/{job_id}/status",
    params(
        ("job_id", Path, description = "Job posting ID")
    ),
    request_body = SetJobStatus,
    responses(
        (status = 200, description = "Job posting updated", body = crate::model::recruitment::JobPosting),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Job posting not found", body = Object, example = json!({
            "message": "Job posting not found"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Recruitment"
)]
pub async fn set_job_status(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<String>,
    payload: web::Json<SetJobStatus>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::JobManagement)?;

    let job_id = path.into_inner();
    match store.recruitment.set_job_status(&job_id, payload.status) {
        Ok(job) => {
            info!(%job_id, status = %job.status, "Job posting status changed");
            Ok(HttpResponse::Ok().json(job))
        }
        Err(StoreError::NotFound) => Ok(HttpResponse::NotFound().json(json!({
            "message": "Job posting not found"
        }))),
        Err(e) => Err(actix_web::error::ErrorInternalServerError(e.to_string())),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/recruitment/applications",
    responses(
        (status = 200, description = "All applications", body = [crate::model::recruitment::Application]),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Recruitment"
)]
pub async fn list_applications(
    auth: AuthUser,
    store: web::Data<Store>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::Recruitment)?;
    Ok(HttpResponse::Ok().json(store.recruitment.list_applications()))
}

#[utoipa::path(
    get,
    path = "/api/v1/recruitment/jobs/{job_id}/applications",
    params(
        ("job_id", Path, description = "Job posting ID")
    ),
    responses(
        (status = 200, description = "Applications for one posting", body = [crate::model::recruitment::Application]),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Recruitment"
)]
pub async fn job_applications(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::Recruitment)?;
    Ok(HttpResponse::Ok().json(store.recruitment.applications_for_job(&path.into_inner())))
}
