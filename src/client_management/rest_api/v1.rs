use crate::{ClassifyError, DataProvider, ErrorClass, Move, MoveOutcome, Settings};

use actix_web::{
    http::StatusCode,
    web::{Data, Json, Path},
    HttpResponse,
};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, sync::Mutex};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct SessionSelector {
    session_id: Uuid,
}

pub(crate) fn json_error(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "success": false,
        "error": message.into(),
    }))
}

fn provider_error<E: Display + ClassifyError>(err: E) -> HttpResponse {
    let status = match err.class() {
        ErrorClass::NotFound => StatusCode::NOT_FOUND,
        ErrorClass::Conflict => StatusCode::CONFLICT,
        ErrorClass::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!("data provider failed: {}", err);
    } else {
        debug!("rejected request: {}", err);
    }
    json_error(status, err.to_string())
}

/// Runs `action` on the locked provider and answers with its result as JSON.
fn with_provider<T, R>(
    sessions: &Data<Mutex<T>>,
    action: impl FnOnce(&mut T) -> Result<R, T::ErrorKind>,
) -> HttpResponse
where
    T: DataProvider,
    R: Serialize,
{
    let mut provider = match sessions.lock() {
        Ok(provider) => provider,
        Err(_) => {
            error!("data provider lock is poisoned");
            return json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "could not acquire lock on data provider",
            );
        }
    };
    match action(&mut provider) {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => provider_error(err),
    }
}

pub async fn get_track<T: DataProvider>(sessions: Data<Mutex<T>>) -> HttpResponse {
    with_provider(&sessions, |provider| Ok(provider.field_track().clone()))
}

pub async fn get_sessions<T: DataProvider>(sessions: Data<Mutex<T>>) -> HttpResponse {
    with_provider(&sessions, |provider| provider.get_sessions())
}

pub async fn create_session<T: DataProvider>(sessions: Data<Mutex<T>>) -> HttpResponse {
    with_provider(&sessions, |provider| provider.create_session(None))
}

pub async fn get_session<T: DataProvider>(
    path: Path<SessionSelector>,
    sessions: Data<Mutex<T>>,
) -> HttpResponse {
    with_provider(&sessions, |provider| {
        provider.get_session_data(path.session_id)
    })
}

pub async fn end_session<T: DataProvider>(
    path: Path<SessionSelector>,
    sessions: Data<Mutex<T>>,
) -> HttpResponse {
    with_provider(&sessions, |provider| {
        provider.end_session(path.session_id).map(|_| "ok")
    })
}

pub async fn configure_session<T: DataProvider>(
    path: Path<SessionSelector>,
    sessions: Data<Mutex<T>>,
    body: Json<Settings>,
) -> HttpResponse {
    let settings = body.into_inner();
    with_provider(&sessions, |provider| {
        provider.configure_session(path.session_id, settings)
    })
}

pub async fn move_player<T: DataProvider>(
    path: Path<SessionSelector>,
    sessions: Data<Mutex<T>>,
    body: Json<Move>,
) -> HttpResponse {
    let new_move = body.into_inner();
    with_provider(&sessions, |provider| {
        provider
            .move_player(path.session_id, new_move)
            .map(|position| MoveOutcome {
                player: new_move.player,
                position,
            })
    })
}

pub async fn reset_positions<T: DataProvider>(
    path: Path<SessionSelector>,
    sessions: Data<Mutex<T>>,
) -> HttpResponse {
    with_provider(&sessions, |provider| {
        provider.reset_positions(path.session_id).map(|_| "ok")
    })
}

pub async fn get_board<T: DataProvider>(
    path: Path<SessionSelector>,
    sessions: Data<Mutex<T>>,
) -> HttpResponse {
    with_provider(&sessions, |provider| provider.get_board_view(path.session_id))
}
