use actix_web::{App, HttpServer, middleware::Logger, web};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use donation_portal::{AppConfig, AppState, cors::build_cors, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    info!("Loaded configuration: {:?}", config);

    let allowed_origins = config.allowed_origins();
    let state = web::Data::new(AppState::from_config(&config));

    info!("Starting donation portal on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(build_cors(&allowed_origins))
            .configure(routes::api::scoped_config)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
