use anyhow::Result;

use kasse_cli::cli::{Cli, Command};
use kasse_db::connection;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::init();

    let conn = connection::open(&cli.dues_db).await?;
    match cli.command {
        Command::Clubs(cmd) => cmd.run(&conn).await,
        Command::Members(cmd) => cmd.run(&conn).await,
        Command::Fees(cmd) => cmd.run(&conn).await,
        Command::Charges(cmd) => cmd.run(&conn).await,
        Command::Pay(cmd) => cmd.run(&conn).await,
        Command::Balance(cmd) => cmd.run(&conn).await,
        Command::Notify(cmd) => cmd.run(&conn).await,
    }?;

    Ok(())
}
