use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub token_ttl: usize,
    pub log_dir: String,

    // Rate limiting
    pub rate_limit_enabled: bool,
    pub rate_login_per_min: u32,
    pub rate_signup_per_min: u32,

    pub email: EmailConfig,
}

/// SMTP settings used by the career notification mailer.
#[derive(Clone, Debug, Default)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub from_name: String,
}

impl EmailConfig {
    pub fn is_configured(&self) -> bool {
        !self.smtp_host.is_empty() && self.smtp_username.is_some()
    }
}

fn var_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://buildoffice.db?mode=rwc".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            token_ttl: var_or("TOKEN_TTL", 3600), // 1 hour
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),

            rate_limit_enabled: var_or("RATE_LIMIT_ENABLED", true),
            rate_login_per_min: var_or("RATE_LOGIN_PER_MIN", 60),
            rate_signup_per_min: var_or("RATE_SIGNUP_PER_MIN", 30),

            email: EmailConfig {
                smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
                smtp_port: var_or("SMTP_PORT", 465),
                smtp_username: env::var("EMAIL_USER").ok(),
                smtp_password: env::var("EMAIL_PASS").ok(),
                from_name: env::var("EMAIL_FROM_NAME")
                    .unwrap_or_else(|_| "Vishakan Builders".to_string()),
            },
        }
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret".to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            token_ttl: 3600,
            log_dir: "logs".to_string(),
            rate_limit_enabled: false,
            rate_login_per_min: 60,
            rate_signup_per_min: 30,
            email: EmailConfig::default(),
        }
    }
}
