use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};

use crate::pipelines::sentiment_analysis::{Classifier, Limits};

/// Server configuration
pub mod config;

/// Request errors
pub mod error;

/// Route handlers
pub mod handlers;

pub use config::ServerConfig;
pub use error::{Error, ErrorBody};

/// State shared by every worker for the lifetime of the process
pub struct AppState {
    /// The classifier, loaded once at startup and read-only afterwards
    pub classifier: Arc<dyn Classifier>,

    /// Name reported by the health check
    pub model_name: String,

    /// Character limits applied to each text
    pub limits: Limits,

    /// Largest accepted JSON body
    pub max_body_bytes: usize,
}

impl AppState {
    /// Build the shared state from a loaded classifier
    pub fn new(classifier: Arc<dyn Classifier>, config: &ServerConfig) -> Self {
        Self {
            classifier,
            model_name: config.display_name.clone(),
            limits: config.limits(),
            max_body_bytes: config.max_body_bytes,
        }
    }
}

/// Register the routes and the state they read
pub fn configure(state: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let json = web::JsonConfig::default()
            .limit(state.max_body_bytes)
            .error_handler(|err, _req| Error::InvalidBody(err.to_string()).into());

        cfg.app_data(state)
            .app_data(json)
            .route(
                "/analyze-sentiment",
                web::post().to(handlers::analyze_sentiment),
            )
            .route("/health", web::get().to(handlers::health));
    }
}

/// Serve the classifier until the process is stopped
pub async fn run(config: &ServerConfig, classifier: Arc<dyn Classifier>) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(classifier, config));

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(configure(state.clone()))
    });

    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    log::info!("Listening on http://{}:{}", config.host, config.port);

    server.bind(config.bind_address())?.run().await
}
