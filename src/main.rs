use brixflow::{
    config::{database, defaults},
    core::{report, scenario},
    errors::Result,
};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally

    // 3. Load scenario defaults (config.toml is optional)
    let config = defaults::load_or_default("config.toml")?;

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db).await?;

    // 5. Resolve the scenario to report on, creating a base case on first run
    let project = env::var("BRIXFLOW_PROJECT").unwrap_or_else(|_| "Default Project".to_string());
    let active = match scenario::get_active_scenario(&db, &project).await? {
        Some(existing) => existing,
        None => {
            info!("No scenario found for '{project}', creating a base case.");
            scenario::create_scenario(
                &db,
                &project,
                "Base Case",
                "base",
                true,
                &config.scenario_defaults,
            )
            .await?
        }
    };

    // 6. Compute and print the consolidated cash-flow statement
    let cash_flow = report::project_cash_flow(&db, active.id).await?;
    println!("{}", report::format_cash_flow_summary(&cash_flow));

    Ok(())
}
