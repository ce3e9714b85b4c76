use invoicedash_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    invoicedash_observability::init_with(config.log_format);

    let services = invoicedash_api::app::services::build_services(&config).await?;
    let app = invoicedash_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
