use crate::demo::{run_demo, run_promote, DemoArgs, PromoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recruit_slots::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "recruit-slots",
    about = "Promote recruitment candidates into project slots from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the webhook service (default command)
    Serve(ServeArgs),
    /// Run a promotion for one project from a CRM snapshot file
    Promote(PromoteArgs),
    /// Run a dry promotion over a synthetic project
    Demo(DemoArgs),
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
        Command::Promote(args) => run_promote(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn promote_requires_snapshot_and_project() {
        let parsed = Cli::try_parse_from(["recruit-slots", "promote", "--project", "112"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "recruit-slots",
            "promote",
            "--snapshot",
            "crm.json",
            "--project",
            "112",
            "--apply",
        ])
        .expect("promote parses");
        match parsed.command {
            Some(Command::Promote(args)) => {
                assert_eq!(args.project, "112");
                assert!(args.apply);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let parsed = Cli::try_parse_from(["recruit-slots"]).expect("no args parse");
        assert!(parsed.command.is_none());
    }
}
