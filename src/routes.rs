use crate::{
    api::{employee, leave_request},
    config::Config,
    docs::ApiDoc,
    error::ApiError,
    state::AppState,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{
    App, Error, HttpResponse, Responder,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    get, guard,
    middleware::{Logger, NormalizePath},
    web,
};
use anyhow::{Result, anyhow};
use serde_json::json;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

type Limiter = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-client limits: a tight one for submissions, a loose one for everything under the API prefix.
#[derive(Clone)]
pub struct RateLimits {
    submit: Limiter,
    read: Limiter,
}

impl RateLimits {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            submit: build_limiter(config.rate_submit_per_min)?,
            read: build_limiter(config.rate_read_per_min)?,
        })
    }
}

fn build_limiter(requests_per_min: u32) -> Result<Limiter> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / u64::from(requests_per_min)).max(1);
    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit: {requests_per_min} per minute"))
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, limits: &RateLimits) {
    cfg.service(
        web::scope(api_prefix)
            .wrap(Governor::new(&limits.read))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(web::resource("").route(web::get().to(employee::list_employees)))
                    // /employees/{id}
                    .service(web::resource("/{id}").route(web::get().to(employee::get_employee))),
            )
            .service(
                web::scope("/leave")
                    // POST /leave
                    .service(
                        web::resource("")
                            .guard(guard::Post())
                            .wrap(Governor::new(&limits.submit))
                            .to(leave_request::submit_leave),
                    )
                    // GET /leave
                    .service(web::resource("").route(web::get().to(leave_request::leave_list)))
                    // /leave/quote
                    .service(
                        web::resource("/quote").route(web::post().to(leave_request::quote_leave)),
                    )
                    // /leave/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(leave_request::leave_details)),
                    ),
            ),
    );
}

/// Whole application; `main` and the handler tests build it the same way.
pub fn build_app(
    state: AppState,
    api_prefix: String,
    limits: RateLimits,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into());

    App::new()
        .wrap(Logger::default())
        .wrap(NormalizePath::trim())
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}") // ← wildcard {_:.*} to match JS/CSS files
                .url("/api-doc/openapi.json", ApiDoc::openapi()),
        )
        .app_data(web::Data::new(state))
        .app_data(json_config)
        .service(health)
        .configure(|cfg| configure(cfg, &api_prefix, &limits))
}
