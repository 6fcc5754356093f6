//! Thin gateway to the generative-text service. The service is a black
//! box: one prompt in, natural-language text out. Failures surface to the
//! caller; nothing is retried silently.

use crate::config::Config;
use crate::model::absence::AbsenceRequest;
use anyhow::{Context, anyhow};
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionInput {
    pub employee_name: String,
    pub employee_role: String,
    pub team_morale: String,
    pub recent_events: String,
}

#[derive(Deserialize)]
struct Completion {
    text: String,
}

pub struct GenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GenAiClient {
    pub fn from_config(config: &Config) -> Self {
        GenAiClient {
            http: reqwest::Client::new(),
            endpoint: config.genai_url.clone(),
            api_key: config.genai_api_key.clone(),
        }
    }

    async fn complete(&self, prompt: String) -> anyhow::Result<String> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({ "prompt": prompt }));
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .context("generative-text service unreachable")?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "generative-text service returned {}",
                response.status()
            ));
        }

        let completion: Completion = response
            .json()
            .await
            .context("generative-text service returned malformed body")?;
        Ok(completion.text)
    }

    /// Condenses the absence book into a trends-and-issues summary for
    /// managers.
    pub async fn summarize_absences(&self, records: &[AbsenceRequest]) -> anyhow::Result<String> {
        self.complete(absence_summary_prompt(records)).await
    }

    /// Suggests manager actions for one employee, one suggestion per line.
    pub async fn suggest_actions(&self, input: &SuggestionInput) -> anyhow::Result<Vec<String>> {
        let text = self.complete(suggestion_prompt(input)).await?;
        let actions: Vec<String> = text
            .lines()
            .map(|line| line.trim_start_matches(['-', '*', ' ']).trim().to_owned())
            .filter(|line| !line.is_empty())
            .collect();
        if actions.is_empty() {
            return Err(anyhow!("generative-text service returned no suggestions"));
        }
        Ok(actions)
    }
}

fn absence_summary_prompt(records: &[AbsenceRequest]) -> String {
    let mut prompt = String::from(
        "You are an AI assistant helping managers understand employee absence data.\n\
         Given the following absence records, provide a concise summary highlighting any \
         trends, issues, or notable patterns.\n\
         Focus on approved absences to identify workforce trends, but also consider pending \
         and rejected requests if they show unusual patterns.\n\nAbsence Records:\n",
    );
    for r in records {
        let _ = writeln!(
            prompt,
            "- Employee ID: {}, Start: {}, End: {}, Reason: {}, Status: {}",
            r.employee_id, r.start_date, r.end_date, r.reason, r.status
        );
    }
    prompt.push_str("\nGenerate a summary of the data.\n");
    prompt
}

fn suggestion_prompt(input: &SuggestionInput) -> String {
    format!(
        "You are an AI assistant helping managers support their employees.\n\n\
         Based on the employee's information, team morale, and recent events, suggest a \
         list of actions the manager can take to support the employee.\n\n\
         Employee name: {}\nEmployee role: {}\nTeam morale: {}\nRecent events: {}\n\n\
         Reply with one suggested action per line.\n",
        input.employee_name, input.employee_role, input.team_morale, input.recent_events
    )
}
