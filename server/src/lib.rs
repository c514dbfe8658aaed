pub extern crate actix_web;

pub mod admin;
pub mod config;
pub mod connection;
pub mod handlers;
mod registry;
mod relay;
mod room;
pub mod server;
mod server_state;
mod session;
