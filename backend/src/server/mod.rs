//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use evaluations::Trace;
#[cfg(debug_assertions)]
use evaluations::doc::ApiDoc;
use evaluations::domain::EvaluationService;
use evaluations::inbound::http::error::{json_error_handler, path_error_handler};
use evaluations::inbound::http::evaluations::{
    delete_evaluation, list_evaluations, list_student_evaluations, upsert_evaluation,
};
use evaluations::inbound::http::health::{HealthState, live, ready};
use evaluations::inbound::http::state::HttpState;
use evaluations::inbound::http::static_assets::{StaticAssets, serve_static};
use evaluations::outbound::persistence::DieselEvaluationRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    static_assets: web::Data<StaticAssets>,
}

fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repository = Arc::new(DieselEvaluationRepository::new(config.db_pool.clone()));
    let service = Arc::new(EvaluationService::new(repository));
    web::Data::new(HttpState::new(service.clone(), service))
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        static_assets,
    } = deps;

    let api = web::scope("/api/evaluations")
        .service(list_evaluations)
        .service(list_student_evaluations)
        .service(upsert_evaluation)
        .service(delete_evaluation);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(static_assets)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(serve_static))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the listener is bound.
/// - `config`: binding address, database pool and static asset directory.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let static_assets = web::Data::new(StaticAssets::open_or_empty(&config.static_dir));
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            static_assets: static_assets.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
