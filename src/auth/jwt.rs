use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::employee::Employee;
use crate::models::{Claims, TokenType};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before unix epoch")
        .as_secs() as usize
}

fn mint(employee: &Employee, token_type: TokenType, secret: &str, ttl: usize) -> (String, Claims) {
    let claims = Claims {
        sub: employee.id.clone(),
        email: employee.email.clone(),
        role: employee.access_role.id(),
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("JWT encoding with HS256 cannot fail");

    (token, claims)
}

pub fn generate_access_token(employee: &Employee, secret: &str, ttl: usize) -> String {
    mint(employee, TokenType::Access, secret, ttl).0
}

pub fn generate_refresh_token(employee: &Employee, secret: &str, ttl: usize) -> (String, Claims) {
    mint(employee, TokenType::Refresh, secret, ttl)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::AccessRole;

    fn jane() -> Employee {
        Employee::new(
            "10",
            "Jane Doe",
            "jane@talentflow.com",
            "https://picsum.photos/id/248/200/200",
            "HR Manager",
            "Management",
        )
    }

    #[test]
    fn access_token_round_trips_principal_and_role() {
        let token = generate_access_token(&jane(), "test-secret", 900);
        let claims = verify_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, "10");
        assert_eq!(claims.email, "jane@talentflow.com");
        assert_eq!(AccessRole::from_id(claims.role), Some(AccessRole::Hr));
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_access_token(&jane(), "test-secret", 900);
        assert!(verify_token(&token, "other-secret").is_err());
    }
}
