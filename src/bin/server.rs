use actix_web::{web, App, HttpServer};
use error_stack::{Result, ResultExt};
use std::process;
use std::sync::Mutex;
use thiserror::Error;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use wicket::config::{self, Mode};
use wicket::{demo, http};

#[derive(Debug, Error)]
#[error("Failed to start server")]
struct StartError;

#[tokio::main]
async fn main() {
    if let Err(report) = run().await {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

async fn run() -> Result<(), StartError> {
    let config = config::Server::load().change_context(StartError)?;
    init_tracing(config.mode);

    let addr = (config.ip, config.port);
    let prefix = config.api_prefix.clone();

    let app = wicket::App::new(config).await.change_context(StartError)?;
    let app = web::Data::new(app);

    // One store shared across all workers
    let demo_store = web::Data::new(Mutex::new(demo::Store::new()));

    tracing::info!(address = %addr.0, port = addr.1, "starting HTTP server");
    HttpServer::new(move || {
        App::new()
            .app_data(app.clone())
            .app_data(demo_store.clone())
            .app_data(web::JsonConfig::default().error_handler(http::util::handle_json_error))
            .wrap(TracingLogger::default())
            .configure(|cfg| http::controllers::configure(cfg, &prefix))
    })
    .bind(addr)
    .change_context(StartError)
    .attach_printable("could not bind the listen address")?
    .run()
    .await
    .change_context(StartError)
}

// Production keeps the filter at info, which is what hides internal
// error reports from production logs; development shows them at debug.
fn init_tracing(mode: Mode) {
    let default_directives = match mode {
        Mode::Development => "debug,sqlx=info",
        Mode::Production => "info",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
