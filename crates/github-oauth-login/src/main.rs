//! GitHub OAuth Login - Entry Point

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use github_oauth_login::{
    Config, Credentials, GitHubOAuthClient, StorageConfig, server::AuthServer, store,
};

#[derive(Parser, Debug)]
#[command(name = "github-oauth-login")]
#[command(about = "GitHub OAuth login service")]
#[command(version)]
struct Cli {
    /// OAuth application client ID
    #[arg(long, env = "CLIENT_ID")]
    client_id: String,

    /// OAuth application client secret
    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Callback URL registered with GitHub
    #[arg(long, env = "REDIRECT_URI")]
    redirect_uri: String,

    /// Requested OAuth scope
    #[arg(long, env = "OAUTH_SCOPE", default_value = "read:user")]
    scope: String,

    /// Let users without a GitHub account sign up during consent
    #[arg(long, env = "ALLOW_SIGNUP", default_value_t = true, action = clap::ArgAction::Set)]
    allow_signup: bool,

    /// Deta project key; the in-memory store is used when absent
    #[arg(long, env = "DETA_PROJECT_KEY", hide_env_values = true)]
    deta_project_key: Option<String>,

    /// Base (table) that holds user profiles
    #[arg(long, env = "USERS_BASE", default_value = "users")]
    users_base: String,

    /// HTTP server port
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Timeout for calls to GitHub and the store, in seconds
    #[arg(long, default_value = "30", env = "REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: u64,

    /// Retries on transient failures of profile and store calls (0 = single attempt).
    /// The token exchange is never retried; authorization codes are single-use.
    #[arg(long, default_value = "0", env = "MAX_RETRIES")]
    max_retries: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting GitHub OAuth login server");

    let credentials = Credentials::new(cli.client_id, cli.client_secret, cli.redirect_uri)
        .with_scope(cli.scope)
        .with_allow_signup(cli.allow_signup);
    credentials.validate()?;

    let config = Config::new(credentials)
        .with_request_timeout(Duration::from_secs(cli.request_timeout_secs))
        .with_max_retries(cli.max_retries);

    let storage = StorageConfig::from_project_key(cli.deta_project_key, cli.users_base);
    tracing::info!(backend = storage.backend_name(), "Using user store");

    let store = store::from_config(&storage, &config)?;
    let client = GitHubOAuthClient::new(config)?;

    AuthServer::new(client, store).run_http(cli.port).await
}
