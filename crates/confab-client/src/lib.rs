//! # confab-client
//!
//! Screen-facing layer of Confab: the authenticated session, the message
//! feed over the store, and the view-models that own subscription
//! lifetimes for the conversation, directory, and todo screens.

pub mod config;
pub mod directory;
pub mod feed;
pub mod session;
pub mod todos;
pub mod view;

mod error;

pub use config::ClientConfig;
pub use directory::UserDirectory;
pub use error::ClientError;
pub use feed::MessageFeed;
pub use session::Session;
pub use todos::TodoList;
pub use view::ConversationView;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the tracing subscriber once at startup.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("confab_client=debug,confab_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::info!("Confab client starting");
}
