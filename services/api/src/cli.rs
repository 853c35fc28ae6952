use crate::demo::{print_schema, run_demo, DemoArgs};
use crate::infra::parse_layout;
use crate::server;
use avalia_ai::error::AppError;
use avalia_ai::valuation::FormLayout;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "AvaliaAi",
    about = "Serve and demonstrate the property valuation form from the command line",
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
    /// Walk through a scripted valuation form and print every rendered step
    Demo(DemoArgs),
    /// Print the field schema as JSON
    Schema,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the default form layout (stepped or single_page)
    #[arg(long, value_parser = parse_layout)]
    pub(crate) layout: Option<FormLayout>,
    /// Override the price estimation endpoint URL
    #[arg(long)]
    pub(crate) estimator_url: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args).await,
        Command::Schema => print_schema(),
    }
}
