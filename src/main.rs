#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

use actix_web::{middleware::Logger, web, App, HttpServer};
use stashgate::{
    handlers::{health, login, logout, session_info, stash_tabs},
    session::SessionManager,
    settings::StashgateSettings,
    upstream::StashClient,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from Settings.toml and environment variables.
    // This also initializes the logger and rejects an unset session secret.
    let settings = StashgateSettings::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load settings: {e}")))?;

    let bind_address = settings.get_bind_address();
    print_startup_info(&bind_address);

    let session_manager = SessionManager::from_settings(&settings);
    let stash_client = StashClient::from_settings(&settings.upstream);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(session_manager.clone()))
            .app_data(web::Data::new(stash_client.clone()))
            .wrap(Logger::default())
            .configure(configure_services)
    })
    .bind(&bind_address)?
    .run()
    .await
}

fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg
        // Session endpoints
        .route("/auth/login", web::post().to(login))
        .route("/auth/logout", web::post().to(logout))
        .route("/auth/session", web::get().to(session_info))
        // Upstream inventory endpoint (session required)
        .route("/stash/{league}/tabs", web::get().to(stash_tabs))
        // Health endpoint
        .route("/ping", web::get().to(health));
}

fn print_startup_info(bind_address: &str) {
    println!("Starting Stashgate on http://{bind_address}");
    println!();
    println!("Session endpoints:");
    println!("  POST /auth/login    - Start a session for a verified user");
    println!("  POST /auth/logout   - Clear the session cookie");
    println!("  GET  /auth/session  - Claims of the current session");
    println!();
    println!("Inventory endpoints:");
    println!("  GET  /stash/{{league}}/tabs - Stash tabs via the upstream API");
    println!();
    println!("System endpoints:");
    println!("  GET  /ping            - Health check");
}
