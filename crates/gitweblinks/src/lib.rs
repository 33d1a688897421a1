pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;

pub use app::links::{LinkHandler, LinkHandlerFinder};
pub use app::service::{GeneratedLink, LinkService};
pub use domain::errors::LinkError;

/// Install the stderr log subscriber; `RUST_LOG` controls verbosity.
pub fn init() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}
