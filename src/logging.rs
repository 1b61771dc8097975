use tracing_subscriber::EnvFilter;

/// Log to stderr. `RUST_LOG` wins over `--verbose` when it is set.
pub fn init(verbose: bool) {
    let fallback = match verbose {
        true => "warn,linkfile=debug",
        false => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
