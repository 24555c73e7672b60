use crate::{
    api::{career, employee, job, mail_request, project},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
    error::ApiError,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{
    middleware::{Condition, from_fn},
    web,
};

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = 60_000 / requests_per_min as u64;
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms.max(1))
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap_or_else(GovernorConfig::default);
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // bad bodies and query strings answer with the usual {message} envelope
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    );

    let limit = config.rate_limit_enabled;

    // Auth
    cfg.service(
        web::resource("/signup")
            .wrap(Condition::new(limit, build_limiter(config.rate_signup_per_min)))
            .route(web::post().to(handlers::signup)),
    )
    .service(
        web::resource("/login")
            .wrap(Condition::new(limit, build_limiter(config.rate_login_per_min)))
            .route(web::post().to(handlers::login)),
    )
    .service(
        web::resource("/protected")
            .wrap(from_fn(auth_middleware))
            .route(web::get().to(handlers::protected)),
    );

    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/projects")
                    // /projects
                    .service(
                        web::resource("")
                            .route(web::post().to(project::create_project))
                            .route(web::get().to(project::list_projects)),
                    )
                    // /projects/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(project::update_project))
                            .route(web::delete().to(project::delete_project)),
                    )
                    // /projects/{id}/assign
                    .service(
                        web::resource("/{id}/assign").route(web::put().to(project::assign_employees)),
                    ),
            )
            .service(
                web::resource("/employees")
                    .route(web::post().to(employee::create_employee))
                    .route(web::get().to(employee::list_employees)),
            )
            .service(
                web::resource("/careers")
                    .route(web::post().to(career::submit_application))
                    .route(web::get().to(career::list_applications)),
            )
            .service(
                web::scope("/career")
                    // paginated listing used by the admin dashboard
                    .service(web::resource("").route(web::get().to(career::list_applications)))
                    .service(web::resource("/approve").route(web::post().to(career::approve)))
                    .service(web::resource("/deny").route(web::post().to(career::deny))),
            )
            .service(
                web::scope("/mailrequest")
                    .service(
                        web::resource("")
                            .route(web::post().to(mail_request::submit_mail_request))
                            .route(web::get().to(mail_request::list_mail_requests)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::delete().to(mail_request::delete_mail_request)),
                    ),
            )
            .service(
                web::scope("/admin")
                    .wrap(from_fn(auth_middleware))
                    .service(
                        web::resource("/jobs")
                            .route(web::post().to(job::create_job))
                            .route(web::get().to(job::list_jobs)),
                    ),
            ),
    );
}
