use std::sync::Arc;

use twilight_http::Client;

/// Environment-driven bot configuration.
pub mod config;
/// Reaction callback registry and next-message waiters fed by the gateway loop.
pub mod interactive;

pub use config::BotConfig;
pub use interactive::Interactive;

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub interactive: Interactive,
    pub config: Arc<BotConfig>,
}

impl Context {
    /// Create a new application context.
    pub fn new(http: Arc<Client>, interactive: Interactive, config: BotConfig) -> Self {
        Self {
            http,
            interactive,
            config: Arc::new(config),
        }
    }
}
