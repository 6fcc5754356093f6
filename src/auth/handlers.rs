use crate::{
    auth::jwt::{generate_access_token, generate_refresh_token, verify_token},
    auth::oracle::IdentityOracle,
    config::Config,
    model::employee::Employee,
    models::{EnrollFaceReq, FaceLoginReq, LoginReq, SignupReq, TokenPair, TokenType},
    store::{Store, StoreError, employee::NewEmployee},
};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde_json::json;
use tracing::{debug, error, info, instrument};

fn issue_tokens(employee: &Employee, store: &Store, config: &Config) -> TokenPair {
    let access_token =
        generate_access_token(employee, &config.jwt_secret, config.access_token_ttl);
    let (refresh_token, refresh_claims) =
        generate_refresh_token(employee, &config.jwt_secret, config.refresh_token_ttl);
    store.tokens.record(&refresh_claims.jti);
    TokenPair {
        access_token,
        refresh_token,
    }
}

/// Password login. The password value is never checked against a secret;
/// presence of the employee record is the whole credential.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Authenticated", body = TokenPair),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "No employee with that email", body = Object, example = json!({
            "error": "Invalid credentials"
        }))
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(store, config, req), fields(email = %req.email))]
pub async fn login(
    req: web::Json<LoginReq>,
    store: web::Data<Store>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    if req.email.trim().is_empty() || req.password.is_empty() {
        info!("Validation failed: empty email or password");
        return HttpResponse::BadRequest().json(json!({
            "error": "Email and password are required"
        }));
    }

    let employee = match store.employees.get_by_email(req.email.trim()) {
        Some(e) => e,
        None => {
            info!("Invalid credentials: no employee for email");
            return HttpResponse::Unauthorized().json(json!({
                "error": "Invalid credentials"
            }));
        }
    };

    debug!(employee_id = %employee.id, role = ?employee.access_role, "Employee resolved");
    info!("Login successful");

    HttpResponse::Ok().json(issue_tokens(&employee, &store, &config))
}

/// Self-service signup: creates a directory entry with the default title
/// and team, then sends the user back to the login boundary.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupReq,
    responses(
        (status = 201, description = "Account created", body = Object, example = json!({
            "message": "Account created"
        })),
        (status = 400, description = "Missing required field"),
        (status = 409, description = "Email already in use")
    ),
    tag = "Auth"
)]
pub async fn signup(req: web::Json<SignupReq>, store: web::Data<Store>) -> impl Responder {
    let name = req.name.trim();
    let email = req.email.trim();

    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Name, email and password must not be empty"
        }));
    }

    match store.employees.add(NewEmployee {
        name: name.to_owned(),
        email: email.to_owned(),
        avatar: format!("https://picsum.photos/seed/{name}/200/200"),
        role: "Employee".to_owned(),
        team: "Unassigned".to_owned(),
    }) {
        Ok(employee) => {
            info!(employee_id = %employee.id, "Account created");
            HttpResponse::Created().json(json!({ "message": "Account created" }))
        }
        Err(StoreError::EmailTaken) => HttpResponse::Conflict().json(json!({
            "error": "Email already in use"
        })),
        Err(e) => {
            error!(error = %e, "Signup failed");
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to create account"
            }))
        }
    }
}

/// Camera login. Runs the configured identity oracle; which variant is
/// wired (mock or external) is invisible here.
#[utoipa::path(
    post,
    path = "/auth/face-login",
    request_body = FaceLoginReq,
    responses(
        (status = 200, description = "Face recognized", body = TokenPair),
        (status = 401, description = "Face not recognized"),
        (status = 502, description = "Face-match service failure")
    ),
    tag = "Auth"
)]
pub async fn face_login(
    req: web::Json<FaceLoginReq>,
    store: web::Data<Store>,
    config: web::Data<Config>,
    oracle: web::Data<IdentityOracle>,
) -> impl Responder {
    let verdict = match oracle.identify(&req.photo_data_uri).await {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "Face-match call failed");
            return HttpResponse::BadGateway().json(json!({
                "error": "Face-match service failure"
            }));
        }
    };

    let employee = verdict
        .recognized
        .then_some(verdict.employee_id)
        .flatten()
        .and_then(|id| store.employees.get(&id));

    match employee {
        Some(employee) => {
            info!(employee_id = %employee.id, "Face login successful");
            HttpResponse::Ok().json(issue_tokens(&employee, &store, &config))
        }
        None => HttpResponse::Unauthorized().json(json!({
            "error": "Face not recognized"
        })),
    }
}

/// Face-enrollment signup: directory entry plus oracle template in one
/// step. The entry is rolled back if enrollment fails, so no partial
/// account survives an oracle outage.
#[utoipa::path(
    post,
    path = "/auth/enroll-face",
    request_body = EnrollFaceReq,
    responses(
        (status = 201, description = "Enrolled", body = Object, example = json!({
            "message": "Account created",
            "employee_id": "f3b1..."
        })),
        (status = 400, description = "Missing required field"),
        (status = 409, description = "Email already in use"),
        (status = 502, description = "Face-match service failure")
    ),
    tag = "Auth"
)]
pub async fn enroll_face(
    req: web::Json<EnrollFaceReq>,
    store: web::Data<Store>,
    oracle: web::Data<IdentityOracle>,
) -> impl Responder {
    let name = req.name.trim();
    let email = req.email.trim();

    if name.is_empty() || email.is_empty() || req.photo_data_uri.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Name, email and photo are required"
        }));
    }

    let employee = match store.employees.add(NewEmployee {
        name: name.to_owned(),
        email: email.to_owned(),
        avatar: format!("https://picsum.photos/seed/{name}/200/200"),
        role: "Employee".to_owned(),
        team: "Unassigned".to_owned(),
    }) {
        Ok(e) => e,
        Err(StoreError::EmailTaken) => {
            return HttpResponse::Conflict().json(json!({
                "error": "Email already in use"
            }));
        }
        Err(e) => {
            error!(error = %e, "Enrollment signup failed");
            return HttpResponse::InternalServerError().json(json!({
                "error": "Failed to create account"
            }));
        }
    };

    if let Err(e) = oracle.enroll(&req.photo_data_uri, &employee.id).await {
        error!(error = %e, employee_id = %employee.id, "Face enrollment failed, rolling back");
        let _ = store.employees.remove(&employee.id);
        return HttpResponse::BadGateway().json(json!({
            "error": "Face-match service failure"
        }));
    }

    HttpResponse::Created().json(json!({
        "message": "Account created",
        "employee_id": employee.id
    }))
}

/// Rotates the refresh token: the presented jti is revoked and a fresh
/// pair is issued.
#[utoipa::path(
    post,
    path = "/auth/refresh",
    responses(
        (status = 200, description = "New token pair", body = TokenPair),
        (status = 401, description = "Invalid, revoked or non-refresh token")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn refresh_token(
    req: HttpRequest,
    store: web::Data<Store>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::Unauthorized().json(json!({"error": "No token"})),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::Unauthorized().json(json!({"error": "Invalid token"})),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    if claims.token_type != TokenType::Refresh || !store.tokens.is_active(&claims.jti) {
        return HttpResponse::Unauthorized().finish();
    }

    // The employee may have been deleted since the token was issued.
    let employee = match store.employees.get(&claims.sub) {
        Some(e) => e,
        None => return HttpResponse::Unauthorized().finish(),
    };

    store.tokens.revoke(&claims.jti);
    HttpResponse::Ok().json(issue_tokens(&employee, &store, &config))
}

/// Clears the persisted identity by revoking the refresh token. Succeeds
/// even when the token was already gone.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Logged out")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    req: HttpRequest,
    store: web::Data<Store>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::NoContent().finish(),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::NoContent().finish(),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::NoContent().finish(),
    };

    if claims.token_type == TokenType::Refresh {
        store.tokens.revoke(&claims.jti);
    }

    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web::Data};

    fn app_data() -> (Data<Store>, Data<Config>, Data<IdentityOracle>) {
        let config = Config::for_tests();
        let oracle = IdentityOracle::from_config(&config);
        (
            Data::new(Store::seeded()),
            Data::new(config),
            Data::new(oracle),
        )
    }

    #[actix_web::test]
    async fn login_with_known_email_returns_token_pair() {
        let (store, config, oracle) = app_data();
        let app = test::init_service(
            App::new()
                .app_data(store)
                .app_data(config)
                .app_data(oracle)
                .route("/auth/login", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"email": "jane@talentflow.com", "password": "anything"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["access_token"].as_str().is_some());
        assert!(body["refresh_token"].as_str().is_some());
    }

    #[actix_web::test]
    async fn login_with_unknown_email_is_unauthorized() {
        let (store, config, oracle) = app_data();
        let app = test::init_service(
            App::new()
                .app_data(store)
                .app_data(config)
                .app_data(oracle)
                .route("/auth/login", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"email": "nobody@talentflow.com", "password": "anything"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn login_with_empty_password_is_rejected() {
        let (store, config, oracle) = app_data();
        let app = test::init_service(
            App::new()
                .app_data(store)
                .app_data(config)
                .app_data(oracle)
                .route("/auth/login", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"email": "jane@talentflow.com", "password": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn signup_then_login_works_and_duplicate_signup_conflicts() {
        let (store, config, oracle) = app_data();
        let app = test::init_service(
            App::new()
                .app_data(store)
                .app_data(config)
                .app_data(oracle)
                .route("/auth/signup", web::post().to(signup))
                .route("/auth/login", web::post().to(login)),
        )
        .await;

        let body = json!({"name": "Zara Q", "email": "zara@talentflow.com", "password": "pw"});
        let req = test::TestRequest::post()
            .uri("/auth/signup")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/auth/signup")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"email": "zara@talentflow.com", "password": "pw"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn refresh_rotates_and_old_token_stops_working() {
        let (store, config, oracle) = app_data();
        let app = test::init_service(
            App::new()
                .app_data(store.clone())
                .app_data(config.clone())
                .app_data(oracle)
                .route("/auth/refresh", web::post().to(refresh_token)),
        )
        .await;

        let jane = store.employees.get_by_email("jane@talentflow.com").unwrap();
        let pair = issue_tokens(&jane, &store, &config);

        let req = test::TestRequest::post()
            .uri("/auth/refresh")
            .insert_header(("Authorization", format!("Bearer {}", pair.refresh_token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        // The rotated-out token is now revoked.
        let req = test::TestRequest::post()
            .uri("/auth/refresh")
            .insert_header(("Authorization", format!("Bearer {}", pair.refresh_token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn access_token_cannot_refresh() {
        let (store, config, oracle) = app_data();
        let app = test::init_service(
            App::new()
                .app_data(store.clone())
                .app_data(config.clone())
                .app_data(oracle)
                .route("/auth/refresh", web::post().to(refresh_token)),
        )
        .await;

        let jane = store.employees.get_by_email("jane@talentflow.com").unwrap();
        let pair = issue_tokens(&jane, &store, &config);

        let req = test::TestRequest::post()
            .uri("/auth/refresh")
            .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
