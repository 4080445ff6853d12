use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is
/// immutable once loaded and travels inside the shared application state, so
/// every service sees the same values. There is no hidden global: handlers
/// receive it through the state they were constructed with.
#[derive(Clone)]
pub struct AppConfig {
    // SQLite connection string (e.g. "sqlite:posts.db").
    pub db_url: String,
    // Address the HTTP listener binds to.
    pub bind_addr: String,
    // Runtime environment marker. Controls the log output format.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, switching between human-readable local
/// logging and JSON logs for production ingestion.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for
    /// test setup, without requiring any environment variables.
    fn default() -> Self {
        Self {
            db_url: "sqlite::memory:".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration
    /// at startup, following the fail-fast principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current
    /// runtime environment is not set. This prevents the application from
    /// starting with an incomplete configuration.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        match env {
            Env::Local => Self {
                env: Env::Local,
                // A local database file next to the binary is a reasonable
                // default for development.
                db_url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:posts.db".to_string()),
                bind_addr,
            },
            Env::Production => Self {
                env: Env::Production,
                db_url: env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in prod"),
                bind_addr,
            },
        }
    }
}
