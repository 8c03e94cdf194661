use beyond_app::{
    database::{self, Db},
    domain::advertisers::{
        AdvertisersService, PgAdvertisersService,
        data::NewAdvertiser,
        records::AdvertiserUuid,
        tokens::{generate_api_token, hash_api_token},
    },
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateAdvertiserArgs {
    /// Advertiser display name
    #[arg(long)]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional advertiser UUID; generated when omitted
    #[arg(long)]
    advertiser_uuid: Option<Uuid>,

    /// Optional raw API token; generated when omitted
    #[arg(long)]
    token: Option<String>,
}

pub(crate) async fn run(args: CreateAdvertiserArgs) -> Result<(), String> {
    let raw_token = args.token.unwrap_or_else(generate_api_token);

    if raw_token.trim().is_empty() {
        return Err("token cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAdvertisersService::new(Db::new(pool));

    let advertiser = service
        .create_advertiser(NewAdvertiser {
            uuid: args
                .advertiser_uuid
                .map_or_else(AdvertiserUuid::new, AdvertiserUuid::from_uuid),
            name: args.name,
            token_uuid: Uuid::now_v7(),
            token_hash: hash_api_token(&raw_token),
        })
        .await
        .map_err(|error| format!("failed to create advertiser: {error}"))?;

    println!("advertiser_uuid: {}", advertiser.uuid);
    println!("advertiser_name: {}", advertiser.name);
    println!("api_token: {raw_token}");
    println!("store this token now; it is only shown once");

    Ok(())
}
