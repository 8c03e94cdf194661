use clap::{Args, Subcommand};

mod sweep;

#[derive(Debug, Args)]
pub(crate) struct QrCodesCommand {
    #[command(subcommand)]
    command: QrCodesSubcommand,
}

#[derive(Debug, Subcommand)]
enum QrCodesSubcommand {
    /// Expire or deactivate every active QR code whose limits have been reached
    Sweep(sweep::SweepArgs),
}

pub(crate) async fn run(command: QrCodesCommand) -> Result<(), String> {
    match command.command {
        QrCodesSubcommand::Sweep(args) => sweep::run(args).await,
    }
}
