use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::models::chat::ChatTopic;
use crate::services::assistant::{AssistantFailure, SendError, SendToken};
use crate::services::generation::TextGenerator;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

/// Aborts the pending send if the handler future is dropped at the
/// generation await (client disconnect), so the topic never stays wedged
/// in the loading state.
struct SendGuard {
    state: web::Data<AppState>,
    topic: ChatTopic,
    token: SendToken,
    armed: bool,
}

impl Drop for SendGuard {
    fn drop(&mut self) {
        if self.armed {
            if let Ok(mut assistant) = self.state.assistant.lock() {
                assistant.abort_send(self.topic, self.token);
            }
        }
    }
}

/*
    POST /api/assistant/{topic}/messages
*/
pub async fn send_message(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<SendMessageRequest>,
) -> impl Responder {
    let topic: ChatTopic = match path.into_inner().parse() {
        Ok(topic) => topic,
        Err(msg) => return HttpResponse::NotFound().json(json!({ "error": msg })),
    };

    let (token, prompt) = {
        let mut assistant = data.assistant.lock().unwrap();
        match assistant.begin_send(topic, &body.text) {
            Ok(staged) => staged,
            Err(SendError::Busy) => {
                return HttpResponse::Conflict()
                    .json(json!({ "error": "A message is already being answered" }));
            }
            Err(SendError::EmptyMessage) => {
                return HttpResponse::BadRequest()
                    .json(json!({ "error": "Message text must not be empty" }));
            }
        }
    };

    let mut guard = SendGuard { state: data.clone(), topic, token, armed: true };

    // The assistant lock is not held across the generation call.
    let reply = match &data.gemini {
        Some(client) => client
            .generate(&prompt)
            .await
            .map_err(AssistantFailure::Generation),
        None => Err(AssistantFailure::NotConfigured),
    };

    let mut assistant = data.assistant.lock().unwrap();
    guard.armed = false;
    match assistant.complete_send(topic, token, reply) {
        Some(message) => HttpResponse::Ok().json(message),
        None => HttpResponse::Conflict()
            .json(json!({ "error": "The message was cancelled before a reply arrived" })),
    }
}

/*
    GET /api/assistant/{topic}/messages
*/
pub async fn history(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let topic: ChatTopic = match path.into_inner().parse() {
        Ok(topic) => topic,
        Err(msg) => return HttpResponse::NotFound().json(json!({ "error": msg })),
    };

    let assistant = data.assistant.lock().unwrap();
    HttpResponse::Ok().json(json!({
        "messages": assistant.history(topic),
        "loading": assistant.is_loading(topic),
    }))
}
