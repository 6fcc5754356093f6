use crate::access::Resource;
use crate::ai::{GenAiClient, SuggestionInput};
use crate::auth::auth::AuthUser;
use crate::store::Store;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SuggestActionsReq {
    #[schema(example = "Fiona Clark")]
    pub employee_name: String,
    #[schema(example = "QA Tester")]
    pub employee_role: String,
    #[schema(example = "Low after the release crunch")]
    pub team_morale: String,
    #[schema(example = "Worked two weekends in a row")]
    pub recent_events: String,
}

#[derive(Serialize, ToSchema)]
pub struct SuggestActionsResponse {
    pub suggested_actions: Vec<String>,
}

/// Feeds the whole absence book through the generative-text service. A
/// service failure surfaces as 502 with nothing committed anywhere.
#[utoipa::path(
    post,
    path = "/api/v1/insights/absence-summary",
    responses(
        (status = 200, description = "Natural-language summary", body = SummaryResponse),
        (status = 403, description = "Forbidden"),
        (status = 502, description = "Generative-text service failure")
    ),
    security(("bearer_auth" = [])),
    tag = "Insights"
)]
pub async fn absence_summary(
    auth: AuthUser,
    store: web::Data<Store>,
    ai: web::Data<GenAiClient>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::Insights)?;

    match ai.summarize_absences(&store.absences.list()).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(SummaryResponse { summary })),
        Err(e) => {
            error!(error = %e, "Absence summary generation failed");
            Ok(HttpResponse::BadGateway().json(json!({
                "message": "Generative-text service failure"
            })))
        }
    }
}

/// Manager coaching: a list of suggested supportive actions for one
/// employee.
#[utoipa::path(
    post,
    path = "/api/v1/insights/suggest-actions",
    request_body = SuggestActionsReq,
    responses(
        (status = 200, description = "Suggested actions", body = SuggestActionsResponse),
        (status = 403, description = "Forbidden"),
        (status = 502, description = "Generative-text service failure")
    ),
    security(("bearer_auth" = [])),
    tag = "Insights"
)]
pub async fn suggest_actions(
    auth: AuthUser,
    ai: web::Data<GenAiClient>,
    payload: web::Json<SuggestActionsReq>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::Insights)?;

    let input = SuggestionInput {
        employee_name: payload.employee_name.clone(),
        employee_role: payload.employee_role.clone(),
        team_morale: payload.team_morale.clone(),
        recent_events: payload.recent_events.clone(),
    };

    match ai.suggest_actions(&input).await {
        Ok(suggested_actions) => {
            Ok(HttpResponse::Ok().json(SuggestActionsResponse { suggested_actions }))
        }
        Err(e) => {
            error!(error = %e, "Action suggestion generation failed");
            Ok(HttpResponse::BadGateway().json(json!({
                "message": "Generative-text service failure"
            })))
        }
    }
}
