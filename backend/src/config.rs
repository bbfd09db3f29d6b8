use clap::Parser;

/// Server configuration. Flags override environment variables, which
/// override the built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "task-list", about = "Task list CRUD service", version)]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, env = "TASKS_BIND", default_value = "0.0.0.0:3000")]
    pub bind: String,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://tasks.db?mode=rwc")]
    pub database_url: String,

    /// Log level filter, e.g. "info" or "debug,sqlx=warn"
    #[arg(long, env = "TASKS_LOG", default_value = "info")]
    pub log: String,
}
