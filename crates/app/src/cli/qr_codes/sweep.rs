use beyond_app::{
    database::{self, Db},
    domain::qr_codes::sweep_statuses,
};
use clap::Args;
use jiff::Timestamp;

#[derive(Debug, Args)]
pub(crate) struct SweepArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SweepArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let settled = sweep_statuses(&Db::new(pool), Timestamp::now())
        .await
        .map_err(|error| format!("failed to sweep qr codes: {error}"))?;

    println!("settled_qr_codes: {settled}");

    Ok(())
}
