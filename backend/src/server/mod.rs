//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use chirp::Trace;
use chirp::doc::ApiDoc;
use chirp::middleware::cors;
use chirp::inbound::http::health::{HealthState, live, ready, welcome};
use chirp::inbound::http::routes;
use chirp::inbound::http::state::HttpState;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cors_allowed_origins: Vec<String>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + 'static>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(deps.health_state)
        .app_data(deps.http_state)
        .wrap(Trace)
        .wrap(cors(&deps.cors_allowed_origins))
        .service(web::scope("/api/v1").configure(routes::configure))
        .service(welcome)
        .service(ready)
        .service(live)
        .service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Bind the listener and return the running server.
///
/// Readiness flips once the socket is bound; the returned [`Server`] must be
/// awaited to serve requests.
///
/// # Errors
/// Returns [`std::io::Error`] when the bind address cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(config);
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        cors_allowed_origins: config.cors_allowed_origins.clone(),
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr())?
        .run();

    health_state.mark_ready();
    info!(bind_addr = %config.bind_addr(), "http listener bound");
    Ok(server)
}
