use actix_web::{middleware, App, HttpServer};
use std::io;

use server::config::ServerConfig;
use server::handlers;
use server::server::spawn_server;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config =
        ServerConfig::from_env().map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let srv_tx = spawn_server();

    log::info!("Server is running on {}", config.bind_address());
    HttpServer::new(move || {
        App::new()
            .data(srv_tx.clone())
            .wrap(handlers::cors())
            .wrap(middleware::Logger::default())
            .configure(handlers::root)
    })
    .bind(config.bind_address())?
    .run()
    .await
}
