use crate::access::Resource;
use crate::auth::auth::AuthUser;
use crate::model::message::{Conversation, Message};
use crate::store::Store;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct OpenConversation {
    /// The other participant's employee id
    #[schema(example = "10")]
    pub peer_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SendMessage {
    #[schema(example = "I wanted to ask about the new project timeline.")]
    pub content: String,
}

#[derive(Serialize, ToSchema)]
pub struct ConversationResponse {
    pub id: String,
    pub participant_ids: [String; 2],
    pub last_message: Message,
    /// "N/A" when the other participant has left the directory.
    #[schema(example = "Jane Doe")]
    pub other_participant_name: String,
    pub other_participant_id: Option<String>,
}

impl ConversationResponse {
    fn for_viewer(conversation: Conversation, viewer_id: &str, store: &Store) -> Self {
        let peer_id = conversation.peer_of(viewer_id).map(str::to_owned);
        let other_participant_name = peer_id
            .as_deref()
            .and_then(|id| store.employees.get(id))
            .map(|e| e.name)
            .unwrap_or_else(|| "N/A".to_owned());
        ConversationResponse {
            id: conversation.id,
            participant_ids: conversation.participant_ids,
            last_message: conversation.last_message,
            other_participant_name,
            other_participant_id: peer_id,
        }
    }
}

/// The viewer's conversations, newest activity first.
#[utoipa::path(
    get,
    path = "/api/v1/conversations",
    responses(
        (status = 200, description = "Conversations for the principal", body = [ConversationResponse]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Messaging"
)]
pub async fn list_conversations(
    auth: AuthUser,
    store: web::Data<Store>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::Messages)?;

    let rows: Vec<ConversationResponse> = store
        .messages
        .conversations_for(&auth.employee_id)
        .into_iter()
        .map(|c| ConversationResponse::for_viewer(c, &auth.employee_id, &store))
        .collect();
    Ok(HttpResponse::Ok().json(rows))
}

/// Find-or-create against the unordered participant pair; calling this
/// twice with the same peer never duplicates a conversation.
#[utoipa::path(
    post,
    path = "/api/v1/conversations",
    request_body = OpenConversation,
    responses(
        (status = 200, description = "Existing or newly created conversation", body = ConversationResponse),
        (status = 400, description = "Cannot open a conversation with yourself"),
        (status = 404, description = "Peer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Messaging"
)]
pub async fn open_conversation(
    auth: AuthUser,
    store: web::Data<Store>,
    payload: web::Json<OpenConversation>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::Messages)?;

    if payload.peer_id == auth.employee_id {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Cannot open a conversation with yourself"
        })));
    }
    if store.employees.get(&payload.peer_id).is_none() {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    let conversation = store.messages.find_or_create(&auth.employee_id, &payload.peer_id);
    Ok(HttpResponse::Ok().json(ConversationResponse::for_viewer(
        conversation,
        &auth.employee_id,
        &store,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/conversations/{conversation_id}/messages",
    params(
        ("conversation_id", Path, description = "Conversation ID")
    ),
    responses(
        (status = 200, description = "Messages in chronological order", body = [crate::model::message::Message]),
        (status = 403, description = "Not a participant")
    ),
    security(("bearer_auth" = [])),
    tag = "Messaging"
)]
pub async fn list_messages(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::Messages)?;

    let conversation_id = path.into_inner();
    if !store
        .messages
        .conversations_for(&auth.employee_id)
        .iter()
        .any(|c| c.id == conversation_id)
    {
        return Err(actix_web::error::ErrorForbidden("Access Denied"));
    }

    Ok(HttpResponse::Ok().json(store.messages.messages_for(&conversation_id)))
}

/// Appends a message; the conversation's last-message pointer moves in the
/// same store operation.
#[utoipa::path(
    post,
    path = "/api/v1/conversations/{conversation_id}/messages",
    params(
        ("conversation_id", Path, description = "Conversation ID")
    ),
    request_body = SendMessage,
    responses(
        (status = 201, description = "Message sent", body = crate::model::message::Message),
        (status = 400, description = "Empty message"),
        (status = 403, description = "Not a participant")
    ),
    security(("bearer_auth" = [])),
    tag = "Messaging"
)]
pub async fn send_message(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<String>,
    payload: web::Json<SendMessage>,
) -> actix_web::Result<impl Responder> {
    auth.require(Resource::Messages)?;

    let conversation_id = path.into_inner();
    if payload.content.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Message content must not be empty"
        })));
    }
    if !store
        .messages
        .conversations_for(&auth.employee_id)
        .iter()
        .any(|c| c.id == conversation_id)
    {
        return Err(actix_web::error::ErrorForbidden("Access Denied"));
    }

    match store
        .messages
        .send(&conversation_id, &auth.employee_id, payload.content.trim())
    {
        Ok(message) => {
            info!(%conversation_id, message_id = %message.id, "Message sent");
            Ok(HttpResponse::Created().json(message))
        }
        Err(e) => Ok(HttpResponse::NotFound().json(json!({ "message": e.to_string() }))),
    }
}
