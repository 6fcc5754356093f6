use crate::access::Resource;
use crate::auth::auth::AuthUser;
use crate::model::employee::Employee;
use crate::model::role::AccessRole;
use crate::store::{Store, StoreError, employee::NewEmployee};
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "Zara Q")]
    pub name: String,
    #[schema(example = "zara@talentflow.com", format = "email")]
    pub email: String,
    /// Avatar URL; derived from the name when omitted.
    pub avatar: Option<String>,
    #[schema(example = "Intern")]
    pub role: String,
    #[schema(example = "Web")]
    pub team: String,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    /// Case-insensitive match against name or email
    pub search: Option<String>,
    /// Exact team filter
    pub team: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeResponse {
    #[schema(example = "6")]
    pub id: String,
    #[schema(example = "Fiona Clark")]
    pub name: String,
    #[schema(example = "fiona@talentflow.com")]
    pub email: String,
    pub avatar: String,
    #[schema(example = "QA Tester")]
    pub role: String,
    #[schema(example = "Web")]
    pub team: String,
    pub access_role: AccessRole,
    /// Derived on every read: true iff an approved absence covers today.
    pub on_leave: bool,
}

impl EmployeeResponse {
    fn from_record(employee: Employee, store: &Store) -> Self {
        let on_leave = store
            .absences
            .is_on_leave(&employee.id, Utc::now().date_naive());
        EmployeeResponse {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            avatar: employee.avatar,
            role: employee.role,
            team: employee.team,
            access_role: employee.access_role,
            on_leave,
        }
    }
}

/// Directory listing with the filters the directory page offers.
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Employee directory", body = [EmployeeResponse]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn list_employees(
    auth: AuthUser,
    store: web::Data<Store>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::Directory)?;

    let needle = query.search.as_deref().map(str::to_lowercase);
    let rows: Vec<EmployeeResponse> = store
        .employees
        .list()
        .into_iter()
        .filter(|e| {
            needle.as_deref().is_none_or(|n| {
                e.name.to_lowercase().contains(n) || e.email.to_lowercase().contains(n)
            })
        })
        .filter(|e| query.team.as_deref().is_none_or(|t| e.team == t))
        .map(|e| EmployeeResponse::from_record(e, &store))
        .collect();

    Ok(HttpResponse::Ok().json(rows))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn get_employee(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::Directory)?;

    let employee_id = path.into_inner();
    match store.employees.get(&employee_id) {
        Some(employee) => {
            Ok(HttpResponse::Ok().json(EmployeeResponse::from_record(employee, &store)))
        }
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
    }
}

/// HR-side directory add (signup handles self-service creation).
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Missing required field"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Email already in use")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn create_employee(
    auth: AuthUser,
    store: web::Data<Store>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::EmployeeCreate)?;

    let name = payload.name.trim();
    if name.is_empty() || payload.email.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Name and email must not be empty"
        })));
    }

    let avatar = payload
        .avatar
        .clone()
        .unwrap_or_else(|| format!("https://picsum.photos/seed/{name}/200/200"));

    match store.employees.add(NewEmployee {
        name: name.to_owned(),
        email: payload.email.trim().to_owned(),
        avatar,
        role: payload.role.clone(),
        team: payload.team.clone(),
    }) {
        Ok(employee) => {
            info!(employee_id = %employee.id, "Employee added to directory");
            Ok(HttpResponse::Created().json(EmployeeResponse::from_record(employee, &store)))
        }
        Err(StoreError::EmailTaken) => Ok(HttpResponse::Conflict().json(json!({
            "message": "Email already in use"
        }))),
        Err(e) => {
            error!(error = %e, "Failed to add employee");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

/// Delete Employee. No cascade: records referencing the removed id stay
/// behind and render as "N/A".
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn delete_employee(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::EmployeeDelete)?;

    let employee_id = path.into_inner();
    match store.employees.remove(&employee_id) {
        Ok(()) => {
            info!(%employee_id, "Employee removed from directory");
            Ok(HttpResponse::Ok().json(json!({
                "message": "Successfully deleted"
            })))
        }
        Err(StoreError::NotFound) => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
        Err(e) => {
            error!(error = %e, %employee_id, "Failed to delete employee");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::generate_access_token;
    use crate::config::Config;
    use actix_web::{App, test, web::Data};

    fn bearer(store: &Store, config: &Config, email: &str) -> String {
        let employee = store.employees.get_by_email(email).unwrap();
        format!(
            "Bearer {}",
            generate_access_token(&employee, &config.jwt_secret, config.access_token_ttl)
        )
    }

    fn fixtures() -> (Data<Store>, Data<Config>) {
        (Data::new(Store::seeded()), Data::new(Config::for_tests()))
    }

    macro_rules! spawn {
        ($store:expr, $config:expr) => {
            test::init_service(
                App::new()
                    .app_data($store.clone())
                    .app_data($config.clone())
                    .route("/api/v1/employees", web::get().to(list_employees))
                    .route("/api/v1/employees", web::post().to(create_employee))
                    .route("/api/v1/employees/{id}", web::get().to(get_employee))
                    .route("/api/v1/employees/{id}", web::delete().to(delete_employee)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn listing_carries_the_on_leave_flag() {
        let (store, config) = fixtures();
        let app = spawn!(store, config);
        let req = test::TestRequest::get()
            .uri("/api/v1/employees")
            .insert_header(("Authorization", bearer(&store, &config, "fiona@talentflow.com")))
            .to_request();
        let rows: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rows.len(), 10);

        // Fiona has a rolling approved absence covering today.
        let fiona = rows.iter().find(|r| r["id"] == "6").unwrap();
        assert_eq!(fiona["on_leave"], true);
        let jane = rows.iter().find(|r| r["id"] == "10").unwrap();
        assert_eq!(jane["on_leave"], false);
    }

    #[actix_web::test]
    async fn search_and_team_filters_narrow_the_listing() {
        let (store, config) = fixtures();
        let app = spawn!(store, config);
        let auth = bearer(&store, &config, "fiona@talentflow.com");

        let req = test::TestRequest::get()
            .uri("/api/v1/employees?search=jane")
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        let rows: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Jane Doe");

        let req = test::TestRequest::get()
            .uri("/api/v1/employees?team=Web")
            .insert_header(("Authorization", auth))
            .to_request();
        let rows: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rows.len(), 3);
    }

    #[actix_web::test]
    async fn employee_role_cannot_add_or_delete() {
        let (store, config) = fixtures();
        let app = spawn!(store, config);
        let fiona = bearer(&store, &config, "fiona@talentflow.com");

        let req = test::TestRequest::delete()
            .uri("/api/v1/employees/1")
            .insert_header(("Authorization", fiona.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
        assert!(store.employees.get("1").is_some());

        let req = test::TestRequest::post()
            .uri("/api/v1/employees")
            .insert_header(("Authorization", fiona))
            .set_json(json!({
                "name": "Zara Q",
                "email": "zara@talentflow.com",
                "role": "Intern",
                "team": "Web"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
        assert!(store.employees.get_by_email("zara@talentflow.com").is_none());
    }

    #[actix_web::test]
    async fn hr_can_add_and_delete_and_listing_reflects_it() {
        let (store, config) = fixtures();
        let app = spawn!(store, config);
        let auth = bearer(&store, &config, "jane@talentflow.com");

        let req = test::TestRequest::post()
            .uri("/api/v1/employees")
            .insert_header(("Authorization", auth.clone()))
            .set_json(json!({
                "name": "Zara Q",
                "email": "zara@talentflow.com",
                "role": "Intern",
                "team": "Web"
            }))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let zara_id = created["id"].as_str().unwrap().to_owned();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/employees/{zara_id}"))
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::get()
            .uri("/api/v1/employees")
            .insert_header(("Authorization", auth))
            .to_request();
        let rows: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
        assert!(rows.iter().all(|r| r["name"] != "Zara Q"));
    }
}
