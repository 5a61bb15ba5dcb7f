// --- Registro de notas - Archivo principal ---

use notasbackend::config::Settings;
use notasbackend::run_server;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,notasbackend=debug"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let settings = Settings::from_env()?;
    tracing::info!("=== Registro de notas (API) === http://{}", settings.bind);
    run_server(settings).await?;
    Ok(())
}
