use crate::access::{self, Resource};
use crate::config::Config;
use crate::model::role::AccessRole;
use crate::models::Claims;
use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data};
use futures::future::{Ready, ready};
use jsonwebtoken::{DecodingKey, Validation, decode};

/// The authenticated principal: a reference to exactly one employee record
/// plus the access role stamped into the token at login.
pub struct AuthUser {
    pub employee_id: String,
    pub email: String,
    pub role: AccessRole,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ErrorUnauthorized("Missing token"))),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "Config missing",
                )));
            }
        };

        let data = match decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        ) {
            Ok(d) => d,
            Err(_) => return ready(Err(ErrorUnauthorized("Invalid token"))),
        };

        let role = match AccessRole::from_id(data.claims.role) {
            Some(r) => r,
            None => return ready(Err(ErrorUnauthorized("Invalid role"))),
        };

        ready(Ok(AuthUser {
            employee_id: data.claims.sub,
            email: data.claims.email,
            role,
        }))
    }
}

impl AuthUser {
    /// Policy check against the static role/resource table. Denial is the
    /// "Access Denied" response the caller renders, not a fault.
    pub fn require(&self, resource: Resource) -> actix_web::Result<()> {
        if access::is_allowed(self.role, resource) {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("Access Denied"))
        }
    }
}
