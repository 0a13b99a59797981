use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use sqlgym_api::{configure_service, AppState};
use sqlgym_db::connection::create_connection_pool;
use sqlgym_db::run_migrations;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let pool = create_connection_pool();
    run_migrations(&pool);

    let state = AppState::new(pool);
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    log::info!("listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(state.clone()))
            .service(web::scope("/api/v1").configure(configure_service))
    })
    .bind(bind_addr)?
    .run()
    .await
}
