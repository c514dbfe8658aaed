use crate::connection::ws_index;
use crate::handlers::rooms::configure_room_handlers;
use crate::handlers::status::status;
use actix_cors::Cors;
use actix_web::web;

mod rooms;
mod status;

pub fn root(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws/").route(web::get().to(ws_index)));
    cfg.service(web::resource("/status").route(web::get().to(status)));

    configure_room_handlers(cfg);
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST"])
        .allow_any_header()
}
