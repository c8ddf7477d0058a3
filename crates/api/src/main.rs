use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bazaar_observability::init();

    // Missing signing key is a fatal startup condition.
    let jwt_secret =
        std::env::var("JWT_SECRET").context("JWT_SECRET must be set; refusing to start")?;

    let port: u16 = match std::env::var("PORT") {
        Ok(p) => p.parse().context("PORT must be a valid port number")?,
        Err(_) => 8080,
    };

    #[cfg(feature = "postgres")]
    let app = {
        use std::sync::Arc;

        let url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL must be set when built with the postgres feature")?;
        let pool = sqlx::PgPool::connect(&url)
            .await
            .context("failed to connect to the database")?;

        let tokens = Arc::new(bazaar_auth::TokenService::new(jwt_secret.as_bytes()));
        let services = bazaar_api::app::services::build_postgres_services(tokens.clone(), pool)
            .await
            .context("failed to initialize the database schema")?;
        bazaar_api::app::build_app_with(Arc::new(services), tokens)
    };
    #[cfg(not(feature = "postgres"))]
    let app = bazaar_api::app::build_app(jwt_secret);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind 0.0.0.0:{port}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
