use clap::{Parser, Subcommand};

mod advertiser;
mod qr_codes;

#[derive(Debug, Parser)]
#[command(name = "beyond-app", about = "Beyond Trips admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Advertiser(advertiser::AdvertiserCommand),
    #[command(name = "qr-codes")]
    QrCodes(qr_codes::QrCodesCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Advertiser(command) => advertiser::run(command).await,
            Commands::QrCodes(command) => qr_codes::run(command).await,
        }
    }
}
