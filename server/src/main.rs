use anyhow::{Context, Result};
use clap::Parser;
use recipe_server::config::{Cli, Command};
use recipe_server::store::users;
use recipe_server::{api, app, db, telemetry, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.command() == Command::Openapi {
        let spec = api::openapi()
            .to_pretty_json()
            .context("Failed to serialize OpenAPI spec")?;
        println!("{}", spec);
        return Ok(());
    }

    telemetry::init_telemetry();

    let pool = db::create_pool(cli.require_database_url()?)
        .context("Failed to create database pool")?;

    match cli.command() {
        Command::CreateSuperuser { email, password } => {
            let mut conn = pool.get().context("Failed to get database connection")?;
            let user = users::create_superuser(&mut conn, &email, &password)
                .map_err(|e| anyhow::anyhow!("Failed to create superuser: {}", e))?;
            println!("Created superuser {}", user.email);
        }
        Command::Serve | Command::Openapi => serve(&cli, Arc::new(pool)).await?,
    }

    Ok(())
}

async fn serve(cli: &Cli, pool: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(cli.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind_addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", local_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", local_addr);
    tracing::info!(
        "OpenAPI spec available at http://{}/api-docs/openapi.json",
        local_addr
    );

    axum::serve(listener, app(pool)).await?;
    Ok(())
}
