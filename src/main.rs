use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use sql_console::airline::{AirlineApp, Console};
use sql_console::cli::Args;
use sql_console::logging;
use sql_console::{QueryExecutor, SqlConsoleError};

const GREETING: &str = concat!(
    "\n\n*******************************************************\n",
    "              User Interface      \t               \n",
    "*******************************************************\n",
);

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = logging::init(args.log.clone(), args.verbose) {
        eprintln!("failed to open log file: {e}");
        return ExitCode::FAILURE;
    }
    tracing::debug!(
        "args: {}",
        serde_json::to_string(&args).unwrap_or_else(|_| "{}".to_string())
    );

    println!("{GREETING}");
    let executor = match connect(&args).await {
        Ok(executor) => executor,
        Err(e) => {
            eprintln!("Error - Unable to Connect to Database: {e}");
            println!("Make sure the database server is running and reachable");
            return ExitCode::FAILURE;
        }
    };

    let mut app = AirlineApp::new(executor, Console::stdio());
    let outcome = app.run().await;
    let (executor, _) = app.into_parts();
    if let Err(e) = &outcome {
        eprintln!("{e}");
    }

    print!("Disconnecting from database...");
    if let Err(e) = executor.close().await {
        tracing::warn!(error = %e, "connection did not close cleanly");
    }
    println!("Done\n\nBye !");

    if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn connect(args: &Args) -> Result<QueryExecutor, SqlConsoleError> {
    let config = args.connection_config()?;
    print!("Connecting to database...");
    println!("Connection URL: {}\n", config.connection_url());
    let mut executor = QueryExecutor::connect(config).await?;
    println!("Done");

    if let Some(script) = &args.init
        && let Err(e) = apply_script(&mut executor, script).await
    {
        if let Err(close_err) = executor.close().await {
            tracing::warn!(error = %close_err, "connection did not close cleanly");
        }
        return Err(e);
    }
    Ok(executor)
}

async fn apply_script(executor: &mut QueryExecutor, script: &Path) -> Result<(), SqlConsoleError> {
    let sql = tokio::fs::read_to_string(script).await?;
    executor.execute_batch(&sql).await?;
    tracing::info!(script = %script.display(), "init script applied");
    Ok(())
}
