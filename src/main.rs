mod errors;
mod handlers;
mod initialization;
mod insights;
mod logging;
mod manager_weather;
mod manager_windy;
mod map_embed;
mod pages;

use std::sync::Arc;
use actix_web::{web, App, HttpServer};
use log::info;
use crate::errors::UnrecoverableError;
use crate::initialization::{config, Location};
use crate::manager_windy::Windy;

pub struct AppState {
    windy: Arc<Windy>,
    fallback: Location,
    map_key: Option<String>,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;
    let windy = Arc::new(Windy::new(&config.windy, &config.credentials)?);
    let fallback = config.location;
    let map_key = config.credentials.map.clone();

    info!("starting web server on {}:{}", config.web_server.bind_address, config.web_server.bind_port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(AppState {
                windy: windy.clone(),
                fallback,
                map_key: map_key.clone(),
            }))
            .configure(handlers::configure)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
