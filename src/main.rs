use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use wikiquiz_server::{app_state::AppState, config::Config, handlers::quiz_handler};

const ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
    "http://localhost:8080",
    "http://127.0.0.1:8080",
];

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = match AppState::new(config).await {
        Ok(state) => state,
        Err(err) => {
            log::error!("Startup failed: {}", err);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, err.to_string()));
        }
    };

    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = ALLOWED_ORIGINS
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .service(quiz_handler::root)
            .service(quiz_handler::generate_quiz)
            .service(quiz_handler::get_history)
            .service(quiz_handler::get_quiz_by_id)
            .service(quiz_handler::health_check)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
