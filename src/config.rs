use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub jwt_secret: String,
    pub access_token_ttl: usize,
    pub refresh_token_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_signup_per_min: u32,
    pub rate_face_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    // Generative text gateway
    pub genai_url: String,
    pub genai_api_key: String,

    // Face-match oracle: "mock" or "remote"
    pub face_oracle: String,
    pub face_oracle_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            access_token_ttl: env::var("ACCESS_TOKEN_TTL")
                .unwrap_or_else(|_| "900".to_string()) // default 15 min
                .parse()
                .unwrap(),
            refresh_token_ttl: env::var("REFRESH_TOKEN_TTL")
                .unwrap_or_else(|_| "604800".to_string()) // default 7 days
                .parse()
                .unwrap(),

            rate_login_per_min: env::var("RATE_LOGIN_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_signup_per_min: env::var("RATE_SIGNUP_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_face_per_min: env::var("RATE_FACE_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),

            genai_url: env::var("GENAI_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8090/v1/generate".to_string()),
            genai_api_key: env::var("GENAI_API_KEY").unwrap_or_default(),

            face_oracle: env::var("FACE_ORACLE").unwrap_or_else(|_| "mock".to_string()),
            face_oracle_url: env::var("FACE_ORACLE_URL").unwrap_or_default(),
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            server_addr: "127.0.0.1:0".into(),
            jwt_secret: "test-secret".into(),
            access_token_ttl: 900,
            refresh_token_ttl: 604_800,
            rate_login_per_min: 60,
            rate_signup_per_min: 30,
            rate_face_per_min: 30,
            rate_protected_per_min: 1000,
            api_prefix: "/api/v1".into(),
            genai_url: "http://127.0.0.1:8090/v1/generate".into(),
            genai_api_key: String::new(),
            face_oracle: "mock".into(),
            face_oracle_url: String::new(),
        }
    }
}
