//! CLI subcommand implementations.

pub mod doctor;
pub mod search_cmd;
pub mod serve;

/// Initialize tracing for a CLI entrypoint. `RUST_LOG` still wins over
/// the default directive.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "stayscout=debug" } else { "stayscout=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default.parse().unwrap()),
        )
        .init();
}
