//! Shared setup for handler tests: an in-memory store, the full route table
//! and a swappable mailer.

use crate::auth::jwt::generate_token;
use crate::config::Config;
use crate::model::role::Role;

/// Builds the service with every route and the same app data `main` installs.
macro_rules! test_app {
    ($pool:expr, $mailer:expr) => {{
        let config = crate::config::Config::for_tests();
        let mailer: std::sync::Arc<dyn crate::notify::Mailer> = $mailer.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data(actix_web::web::Data::new(config.clone()))
                .app_data(actix_web::web::Data::from(mailer))
                .app_data(actix_web::web::Data::new(
                    crate::utils::email_cache::EmailRegistry::new(),
                ))
                .configure(|cfg| crate::routes::configure(cfg, &config)),
        )
        .await
    }};
}

pub(crate) use test_app;

pub fn bearer(role: Role) -> (&'static str, String) {
    let config = Config::for_tests();
    let (token, _) = generate_token("test-user", "test@vishakan.com", role, &config.jwt_secret, 600)
        .expect("token");
    ("Authorization", format!("Bearer {}", token))
}
