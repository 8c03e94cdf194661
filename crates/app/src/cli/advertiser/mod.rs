use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct AdvertiserCommand {
    #[command(subcommand)]
    command: AdvertiserSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdvertiserSubcommand {
    /// Create an advertiser and its first API token
    Create(create::CreateAdvertiserArgs),
}

pub(crate) async fn run(command: AdvertiserCommand) -> Result<(), String> {
    match command.command {
        AdvertiserSubcommand::Create(args) => create::run(args).await,
    }
}
