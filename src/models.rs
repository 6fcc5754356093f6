use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReq {
    #[schema(example = "jane@talentflow.com")]
    pub email: String,
    /// Any non-empty value is accepted; this is not a security boundary.
    #[schema(example = "password")]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SignupReq {
    #[schema(example = "Zara Q")]
    pub name: String,
    #[schema(example = "zara@talentflow.com", format = "email")]
    pub email: String,
    #[schema(example = "password")]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct FaceLoginReq {
    /// Camera capture as a data URI ("data:<mimetype>;base64,<data>").
    pub photo_data_uri: String,
}

#[derive(Deserialize, ToSchema)]
pub struct EnrollFaceReq {
    pub photo_data_uri: String,
    #[schema(example = "Zara Q")]
    pub name: String,
    #[schema(example = "zara@talentflow.com", format = "email")]
    pub email: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Employee id of the principal.
    pub sub: String,
    pub email: String,
    pub role: u8, // role id
    pub exp: usize,
    pub jti: String,
    pub token_type: TokenType,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum TokenType {
    Access,
    Refresh,
}
