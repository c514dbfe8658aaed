use crate::admin::{AdminCommand, RoomDescription};
use crate::server::{ServerCommand, ServerError, ServerTx};
use actix_web::http::StatusCode;
use actix_web::web::{self, HttpResponse};
use actix_web::ResponseError;
use system::serde_json::json;
use tokio::sync::oneshot;

pub fn configure_room_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rooms")
            .service(web::resource("").route(web::get().to(list_rooms)))
            .service(web::resource("/{room_id}").route(web::get().to(show_room))),
    );
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::BrokerUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "message": self.to_string() }))
    }
}

async fn list_rooms(srv_tx: web::Data<ServerTx>) -> Result<HttpResponse, ServerError> {
    let (tx, rx) = oneshot::channel::<Vec<RoomDescription>>();

    srv_tx
        .get_ref()
        .send(ServerCommand::AdminCommand(AdminCommand::ListRooms { tx }))
        .map_err(|_| ServerError::BrokerUnavailable)?;

    let rooms = rx.await.map_err(|_| ServerError::BrokerUnavailable)?;
    Ok(HttpResponse::Ok().json(rooms))
}

async fn show_room(
    path: web::Path<String>,
    srv_tx: web::Data<ServerTx>,
) -> Result<HttpResponse, ServerError> {
    let (tx, rx) = oneshot::channel::<Result<RoomDescription, ServerError>>();

    srv_tx
        .get_ref()
        .send(ServerCommand::AdminCommand(AdminCommand::DescribeRoom {
            room_id: path.into_inner(),
            tx,
        }))
        .map_err(|_| ServerError::BrokerUnavailable)?;

    let room = rx.await.map_err(|_| ServerError::BrokerUnavailable)??;
    Ok(HttpResponse::Ok().json(room))
}
