use crate::config::Config;
use anyhow::{Context, anyhow};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct FaceMatch {
    pub recognized: bool,
    pub employee_id: Option<String>,
}

/// Face-match boundary. Callers never assume which variant is wired; the
/// mock exists because no real biometric backend ships with the product.
pub enum IdentityOracle {
    /// Coin-flip recognition, matching the reference behavior.
    Mock,
    /// Delegates to an external matching service.
    Remote { http: reqwest::Client, url: String },
}

impl IdentityOracle {
    pub fn from_config(config: &Config) -> Self {
        match config.face_oracle.as_str() {
            "remote" => IdentityOracle::Remote {
                http: reqwest::Client::new(),
                url: config.face_oracle_url.clone(),
            },
            _ => IdentityOracle::Mock,
        }
    }

    pub async fn identify(&self, photo_data_uri: &str) -> anyhow::Result<FaceMatch> {
        match self {
            IdentityOracle::Mock => {
                info!("face recognition request served by mock oracle");
                let recognized = rand::random::<bool>();
                Ok(FaceMatch {
                    recognized,
                    employee_id: recognized.then(|| "1".to_string()),
                })
            }
            IdentityOracle::Remote { http, url } => {
                let response = http
                    .post(format!("{url}/identify"))
                    .json(&serde_json::json!({ "photo_data_uri": photo_data_uri }))
                    .send()
                    .await
                    .context("face-match service unreachable")?;
                if !response.status().is_success() {
                    return Err(anyhow!(
                        "face-match service returned {}",
                        response.status()
                    ));
                }
                response
                    .json::<FaceMatch>()
                    .await
                    .context("face-match service returned malformed body")
            }
        }
    }

    /// Template capture for signup. The mock accepts everything; the real
    /// backend owns validation and storage of the biometric template.
    pub async fn enroll(&self, photo_data_uri: &str, employee_id: &str) -> anyhow::Result<()> {
        match self {
            IdentityOracle::Mock => {
                info!(employee_id, "face enrollment accepted by mock oracle");
                Ok(())
            }
            IdentityOracle::Remote { http, url } => {
                let response = http
                    .post(format!("{url}/enroll"))
                    .json(&serde_json::json!({
                        "photo_data_uri": photo_data_uri,
                        "employee_id": employee_id,
                    }))
                    .send()
                    .await
                    .context("face-match service unreachable")?;
                if !response.status().is_success() {
                    return Err(anyhow!(
                        "face-match service returned {}",
                        response.status()
                    ));
                }
                Ok(())
            }
        }
    }
}
