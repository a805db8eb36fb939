//! Backend entry point: configuration, database setup, and the HTTP server.

use actix_web::{web, App, HttpServer};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use waymark::inbound::http::{routes, HttpState};
use waymark::outbound::persistence::{run_migrations, PoolConfig};
use waymark::server::{session_middleware, AppConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::parse();
    let key = config.session_key().map_err(std::io::Error::other)?;

    let pool = PoolConfig::new(&config.database_url)
        .build()
        .map_err(std::io::Error::other)?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    let state = web::Data::new(HttpState::diesel(&pool));
    let cookie_secure = config.cookie_secure;

    info!(addr = %config.bind_addr, db = %config.database_url, "starting server");
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(session_middleware(key.clone(), cookie_secure))
            .configure(routes::configure)
    })
    .bind(config.bind_addr)?
    .run()
    .await
}
