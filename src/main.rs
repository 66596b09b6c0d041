use todo_api::{init_tracing, run, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let environment = std::env::var(todo_api::config::ENVIRONMENT_VAR)
        .unwrap_or_else(|_| todo_api::config::DEFAULT_ENVIRONMENT.into());
    init_tracing(&environment);

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "no usable configuration");
            return Err(e.into());
        }
    };
    run(settings).await?;
    Ok(())
}
