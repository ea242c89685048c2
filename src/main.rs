use clap::Parser;
use dotenv::dotenv;
use std::process::ExitCode;
use taskdeck::cli::terminal::TerminalNavigator;
use taskdeck::cli::{self, Cli, INTERRUPTED_EXIT_CODE};
use taskdeck::config::ClientConfig;
use taskdeck::logging;
use taskdeck::persistence::file_credential_store::FileCredentialStore;
use taskdeck::remote::HttpConnectivity;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    let mut config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(api_url) = cli.api_url {
        config.set_api_url(api_url);
    }
    if let Some(credential_file) = cli.credential_file {
        config.credential_file = credential_file;
    }

    let otel_exporters = match config.otel_endpoints {
        Some((ref traces, ref metrics)) => match logging::init_exporters(traces, metrics) {
            Ok(exporters) => Some(exporters),
            Err(err) => {
                eprintln!("Could not start OpenTelemetry exporters: {err:#}");
                None
            }
        },
        None => None,
    };
    logging::setup_logging_and_tracing(
        logging::init_env_filter(),
        config.log_format,
        otel_exporters.as_ref(),
    );
    debug!("Using API at {}", config.api_url);

    let exit_code = run_until_interrupted(cli.command, config).await;

    if let Some(exporters) = otel_exporters {
        exporters.shutdown();
    }
    exit_code
}

/// Runs one command. Ctrl-C drops the in-flight request and abandons the flow.
async fn run_until_interrupted(command: cli::Commands, config: ClientConfig) -> ExitCode {
    let ext_cxn = match HttpConnectivity::new(
        config.api_url,
        config.request_timeout,
        FileCredentialStore::new(config.credential_file),
    ) {
        Ok(ext_cxn) => ext_cxn,
        Err(err) => {
            error!("Could not set up API access: {err:#}");
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    let navigator = TerminalNavigator::new();

    let result = tokio::select! {
        result = cli::run(command, &ext_cxn, &navigator) => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Interrupted");
            return ExitCode::from(INTERRUPTED_EXIT_CODE);
        }
    };

    match result {
        Ok(ref output) => print!("{output}"),
        Err(ref err) => eprintln!("Error: {err}"),
    }
    cli::exit_code(&result)
}
