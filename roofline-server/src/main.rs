#![deny(missing_docs)]
//! Roofline server executable.
//!
//! Hosts HTTP endpoints for computing roof replacement estimates.

mod openapi;
mod routes;

#[cfg(not(test))]
use actix_cors::Cors;
#[cfg(not(test))]
use actix_web::{App, HttpServer, http::header, web};
#[cfg(not(test))]
use dotenvy::dotenv;

#[cfg(not(test))]
use crate::routes::{AppState, ServerConfig, compute, health, json_config, openapi_json, rates};

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env().expect("invalid Roofline server configuration");
    let state = web::Data::new(AppState::from(&config));
    let allowed_origins = config.ui_origins.clone();
    log::info!(
        "rates per square: {} / {} / {}, strict geometry: {}",
        config.rates.low,
        config.rates.mid,
        config.rates.high,
        config.strict_geometry
    );

    let err_msg = format!("Can't bind {}:{}", &config.host, config.port);

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec![header::CONTENT_TYPE])
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .app_data(state.clone())
                .app_data(json_config())
                .service(health)
                .service(rates)
                .service(compute)
                .service(openapi_json)
        })
        .bind((config.host, config.port))
        .expect(&err_msg)
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
