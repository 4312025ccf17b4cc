use tracing_subscriber::EnvFilter;

/// Progress lines go to stdout so CI logs read top to bottom with the flow.
/// `RUST_LOG` wins over the verbosity flag when set.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn,clawlogin_cli=info,flow=info",
        1 => "info,clawlogin_cli=debug,flow=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .init();
}
