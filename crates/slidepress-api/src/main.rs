use slidepress_core::Config;

// mimalloc keeps fragmentation low on musl-based container images.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    // Initialize the application (telemetry, storage, converter, routes)
    let (_state, router) = slidepress_api::setup::initialize_app(config.clone()).await?;

    slidepress_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
