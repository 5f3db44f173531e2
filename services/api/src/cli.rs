use crate::commands::{run_analyze, run_extract, run_mail_test, AnalyzeArgs, ExtractArgs, MailTestArgs};
use crate::server;
use check_mate::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "check-mate",
    about = "Check performance-assessment drafts against their conditions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Analyze a draft against a conditions file and print the report
    Analyze(AnalyzeArgs),
    /// Print the text extracted from a text or image file
    Extract(ExtractArgs),
    /// Report delivery utilities
    Mail {
        #[command(subcommand)]
        command: MailCommand,
    },
}

#[derive(Subcommand, Debug)]
enum MailCommand {
    /// Send the sample 85/100 report to verify the mail relay
    Test(MailTestArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args).await,
        Command::Extract(args) => run_extract(args).await,
        Command::Mail {
            command: MailCommand::Test(args),
        } => run_mail_test(args).await,
    }
}
