use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::voice::{parse_command, VoiceCommand};

#[derive(Debug, Deserialize)]
pub struct VoiceQuery {
    /// Transcript of the spoken command.
    pub command: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct VoiceResponse {
    pub message: String,
    /// The recognised task title, absent when nothing was recognised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Interpret a voice command
///
/// Recognises "create task <title>" style transcripts and echoes the parsed
/// title. Nothing is persisted.
#[post("/create_task")]
pub async fn create_task_from_voice(query: web::Query<VoiceQuery>) -> impl Responder {
    let response = match parse_command(&query.command) {
        Some(VoiceCommand::CreateTask { title }) => VoiceResponse {
            message: format!("Task '{}' created", title),
            title: Some(title),
        },
        None => VoiceResponse {
            message: "Command not recognized".to_string(),
            title: None,
        },
    };

    HttpResponse::Ok().json(response)
}
