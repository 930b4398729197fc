use crate::{DataProvider, Server};
use actix_web::{
    error::InternalError,
    http::StatusCode,
    web::{delete, get, post, put, Data, JsonConfig, PathConfig, ServiceConfig},
    App, HttpServer,
};
use log::info;
use std::sync::Mutex;

mod v1;
use v1::{
    configure_session, create_session, end_session, get_board, get_session, get_sessions,
    get_track, json_error, move_player, reset_positions,
};

/*
Endpoints:
* GET    /api/v1/track                          -> DataProvider::field_track
* GET    /api/v1/sessions                       -> DataProvider::get_sessions
* PUT    /api/v1/sessions                       -> DataProvider::create_session(None)
* GET    /api/v1/sessions/{session_id}          -> DataProvider::get_session_data(session_id)
* DELETE /api/v1/sessions/{session_id}          -> DataProvider::end_session(session_id)
* PUT    /api/v1/sessions/{session_id}/settings -> DataProvider::configure_session(session_id, body)
* POST   /api/v1/sessions/{session_id}/moves    -> DataProvider::move_player(session_id, body)
* POST   /api/v1/sessions/{session_id}/reset    -> DataProvider::reset_positions(session_id)
* GET    /api/v1/sessions/{session_id}/board    -> DataProvider::get_board_view(session_id)
*/

pub fn routes<T: DataProvider + 'static>(cfg: &mut ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(|err, _request| {
        let response = json_error(StatusCode::BAD_REQUEST, err.to_string());
        InternalError::from_response(err, response).into()
    }))
    .app_data(PathConfig::default().error_handler(|err, _request| {
        let response = json_error(StatusCode::NOT_FOUND, err.to_string());
        InternalError::from_response(err, response).into()
    }))
    .route("/api/v1/track", get().to(get_track::<T>))
        .route("/api/v1/sessions", get().to(get_sessions::<T>))
        .route("/api/v1/sessions", put().to(create_session::<T>))
        .route("/api/v1/sessions/{session_id}", get().to(get_session::<T>))
        .route("/api/v1/sessions/{session_id}", delete().to(end_session::<T>))
        .route(
            "/api/v1/sessions/{session_id}/settings",
            put().to(configure_session::<T>),
        )
        .route(
            "/api/v1/sessions/{session_id}/moves",
            post().to(move_player::<T>),
        )
        .route(
            "/api/v1/sessions/{session_id}/reset",
            post().to(reset_positions::<T>),
        )
        .route(
            "/api/v1/sessions/{session_id}/board",
            get().to(get_board::<T>),
        );
}

pub struct ApiServer<T: DataProvider> {
    pub port: u16,
    pub host: String,
    pub data_provider: T,
}

impl<T: DataProvider + Default + 'static> Server<T> for ApiServer<T> {
    type ErrorKind = std::io::Error;
    const HOST_VAR: &'static str = "API_HOST";
    const PORT_VAR: &'static str = "API_PORT";

    fn new(host: String, port: u16, data_provider: T) -> Self {
        Self {
            port,
            host,
            data_provider,
        }
    }

    fn get_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    async fn start(&mut self) -> Result<(), std::io::Error> {
        let sessions = Data::new(Mutex::new(self.data_provider.clone()));
        info!("Serving sessions on {}", self.get_address());
        // bind in its own statement so no HttpServer is held across the await
        let server = HttpServer::new(move || {
            App::new()
                .app_data(sessions.clone())
                .configure(routes::<T>)
        })
        .bind(self.get_address())?
        .run();
        server.await
    }
}
