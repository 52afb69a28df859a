use actix_web::{web, App, HttpServer};
use std::io;

use search_functions::handlers::{configure_routes, health_handler};
use search_functions::{AppState, SERVICE_NAME};
use searchfn_config::AppConfig;
use searchfn_observability::{error, info, init_tracing, observability, TracingConfig};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    init_tracing(TracingConfig::for_service(SERVICE_NAME));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    info!(
        "Starting {} on {}:{} (embedding model: {}, route prefix: {:?})",
        SERVICE_NAME, config.host, config.port, config.embedding_model, config.route_prefix
    );

    let state = web::Data::new(AppState::from_config(&config));
    let prefix = config.route_prefix.clone();

    HttpServer::new(move || {
        let app = App::new()
            .wrap(observability(SERVICE_NAME))
            .app_data(state.clone())
            .route("/health", web::get().to(health_handler));

        if prefix.is_empty() {
            app.configure(configure_routes)
        } else {
            app.service(web::scope(&prefix).configure(configure_routes))
        }
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
