use crate::{
    api::{absence, employee, insights, message, recruitment, reports},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let signup_limiter = Arc::new(build_limiter(config.rate_signup_per_min));
    let face_limiter = Arc::new(build_limiter(config.rate_face_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes: the login/signup boundary
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/signup")
                    .wrap(signup_limiter.clone())
                    .route(web::post().to(handlers::signup)),
            )
            .service(
                web::resource("/face-login")
                    .wrap(face_limiter.clone())
                    .route(web::post().to(handlers::face_login)),
            )
            .service(
                web::resource("/enroll-face")
                    .wrap(face_limiter.clone())
                    .route(web::post().to(handlers::enroll_face)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Everything else sits behind the auth middleware; an unauthenticated
    // request never reaches a handler.
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/absences")
                    // /absences
                    .service(
                        web::resource("")
                            .route(web::get().to(absence::list_absences))
                            .route(web::post().to(absence::create_absence)),
                    )
                    // /absences/{id}
                    .service(web::resource("/{id}").route(web::get().to(absence::get_absence)))
                    // /absences/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(absence::approve_absence)),
                    )
                    // /absences/{id}/reject
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(absence::reject_absence)),
                    ),
            )
            .service(
                web::scope("/recruitment")
                    .service(
                        web::resource("/jobs")
                            .route(web::get().to(recruitment::list_jobs))
                            .route(web::post().to(recruitment::create_job)),
                    )
                    .service(
                        web::resource("/jobs/{id}/status")
                            .route(web::put().to(recruitment::set_job_status)),
                    )
                    .service(
                        web::resource("/jobs/{id}/applications")
                            .route(web::get().to(recruitment::job_applications)),
                    )
                    .service(
                        web::resource("/applications")
                            .route(web::get().to(recruitment::list_applications)),
                    ),
            )
            .service(
                web::scope("/conversations")
                    .service(
                        web::resource("")
                            .route(web::get().to(message::list_conversations))
                            .route(web::post().to(message::open_conversation)),
                    )
                    .service(
                        web::resource("/{id}/messages")
                            .route(web::get().to(message::list_messages))
                            .route(web::post().to(message::send_message)),
                    ),
            )
            .service(
                web::scope("/insights")
                    .service(
                        web::resource("/absence-summary")
                            .route(web::post().to(insights::absence_summary)),
                    )
                    .service(
                        web::resource("/suggest-actions")
                            .route(web::post().to(insights::suggest_actions)),
                    ),
            )
            .service(
                web::scope("/reports").service(
                    web::resource("/absences.csv").route(web::get().to(reports::absences_csv)),
                ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::oracle::IdentityOracle;
    use crate::store::Store;
    use actix_web::{App, test, web::Data};

    #[actix_web::test]
    async fn protected_scope_rejects_anonymous_requests() {
        let config = Config::for_tests();
        let oracle = Data::new(IdentityOracle::from_config(&config));
        let ai = Data::new(crate::ai::GenAiClient::from_config(&config));
        let route_config = config.clone();
        let app = test::init_service(
            App::new()
                .app_data(Data::new(Store::seeded()))
                .app_data(Data::new(config))
                .app_data(oracle)
                .app_data(ai)
                .configure(|cfg| configure(cfg, route_config)),
        )
        .await;

        for uri in [
            "/api/v1/employees",
            "/api/v1/absences",
            "/api/v1/conversations",
            "/api/v1/recruitment/jobs",
            "/api/v1/reports/absences.csv",
        ] {
            // The IP-keyed limiter needs a peer address to exist.
            let req = test::TestRequest::get()
                .uri(uri)
                .peer_addr("127.0.0.1:9999".parse().unwrap())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(
                resp.status(),
                actix_web::http::StatusCode::UNAUTHORIZED,
                "{uri}"
            );
        }
    }

    #[actix_web::test]
    async fn refresh_token_is_not_a_bearer_credential() {
        let config = Config::for_tests();
        let store = Data::new(Store::seeded());
        let oracle = Data::new(IdentityOracle::from_config(&config));
        let ai = Data::new(crate::ai::GenAiClient::from_config(&config));
        let route_config = config.clone();

        let jane = store.employees.get_by_email("jane@talentflow.com").unwrap();
        let (refresh, claims) = crate::auth::jwt::generate_refresh_token(
            &jane,
            &config.jwt_secret,
            config.refresh_token_ttl,
        );
        store.tokens.record(&claims.jti);

        let app = test::init_service(
            App::new()
                .app_data(store)
                .app_data(Data::new(config))
                .app_data(oracle)
                .app_data(ai)
                .configure(|cfg| configure(cfg, route_config)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/employees")
            .peer_addr("127.0.0.1:9999".parse().unwrap())
            .insert_header(("Authorization", format!("Bearer {refresh}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn login_boundary_is_reachable_without_a_token() {
        let config = Config::for_tests();
        let oracle = Data::new(IdentityOracle::from_config(&config));
        let ai = Data::new(crate::ai::GenAiClient::from_config(&config));
        let route_config = config.clone();
        let app = test::init_service(
            App::new()
                .app_data(Data::new(Store::seeded()))
                .app_data(Data::new(config))
                .app_data(oracle)
                .app_data(ai)
                .configure(|cfg| configure(cfg, route_config)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .peer_addr("127.0.0.1:9999".parse().unwrap())
            .set_json(serde_json::json!({
                "email": "jane@talentflow.com",
                "password": "anything"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}
