use anyhow::Context as _;

/// Directives used when `RUST_LOG` is unset. Verbose raises only this
/// crate to `debug`; HTTP and HTML dependencies stay at `info`.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,packt_free_notifier=debug"
    } else {
        "info"
    }
}

pub fn init(verbose: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_directives(verbose)))
        .context("build log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}
