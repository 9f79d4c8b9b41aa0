use std::io::{self, Read};
use std::process::ExitCode;

use clap::Parser;
use ff_client::cli::Cli;
use ff_client::logging::init_logging;
use ff_client::{ClientConfig, ClientError, FfClient};
use tracing::{debug, error};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match cli.to_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ff-client: {err}");
            return ExitCode::from(2);
        }
    };
    init_logging(config.verbosity());

    match run(config, cli.https) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "request failed");
            eprintln!("ff-client: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: ClientConfig, https: bool) -> Result<(), ClientError> {
    let mut body = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut body)
        .map_err(ClientError::Input)?;
    debug!(body_len = body.len(), "read request from stdin");

    let mut client = FfClient::connect(config)?;
    client.send_request(&body, https)?;
    Ok(())
}
