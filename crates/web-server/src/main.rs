use configuration::settings::Overrides;

// This main function is the entry point when running `cargo run -p web-server`.
// It serves with settings from `surfsup.toml` and the environment only; the
// `surfsup` binary adds command-line overrides.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = configuration::load_settings(None, &Overrides::default())?;
    let _guard = configuration::init_tracing(&settings.logging, settings.debug)?;
    web_server::run_server(&settings).await
}
