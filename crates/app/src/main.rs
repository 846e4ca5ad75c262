mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tracker={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let engine = engine::Engine::builder()
        .path(&settings.store.path)
        .track_type(settings.store.track_type)
        .validation(settings.store.validation)
        .build()?;

    if settings.store.create_missing && engine.store().ensure_exists().await? {
        tracing::info!("Created empty store at {}", engine.store().path().display());
    }

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|err| {
        tracing::error!("failed to bind server listener on {addr}: {err}");
        err
    })?;

    server::run_with_listener(engine, listener).await?;
    Ok(())
}
