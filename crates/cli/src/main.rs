use clap::Parser;
use clawlogin_cli::{browser::BrowserSession, cli::Cli, env, logging};
use flow::{FlowError, LoginSequencer, PageDriver};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    std::process::exit(run(cli).await);
}

async fn run(cli: Cli) -> i32 {
    let config = match cli.flow_config() {
        Ok(config) => config,
        Err(err) => {
            error!(target = "clawlogin", error = %err, "invalid configuration");
            return err.exit_code();
        }
    };

    // Credentials are checked before any browser starts.
    let credentials = match env::credentials_from_env() {
        Ok(credentials) => credentials,
        Err(err) => {
            error!(target = "clawlogin", error = %err, "credential check failed");
            return err.exit_code();
        }
    };

    info!(
        target = "clawlogin",
        username = %credentials.masked_username(),
        totp_seed = credentials.has_totp_seed(),
        url = %config.target_url,
        "starting login run"
    );

    let session =
        match BrowserSession::launch(cli.headed, &cli.screenshot_dir, config.nav_timeout).await {
            Ok(session) => session,
            Err(err) => {
                error!(target = "clawlogin", error = %err, "browser launch failed");
                return 1;
            }
        };

    let sequencer = LoginSequencer::new(&session, &config);
    let outcome = tokio::select! {
        result = sequencer.run(&credentials) => result,
        _ = tokio::signal::ctrl_c() => {
            warn!(target = "clawlogin", "interrupted by user");
            Err(FlowError::Interrupted)
        }
    };

    match &outcome {
        Ok(()) => info!(target = "clawlogin", "login confirmed"),
        Err(FlowError::Interrupted) => {}
        Err(err) => {
            error!(target = "clawlogin", error = %err, "login failed");
            if matches!(err, FlowError::Automation(_)) {
                session.capture("exception_error").await;
            }
        }
    }

    session.close().await;

    match outcome {
        Ok(()) => 0,
        Err(err) => err.exit_code(),
    }
}
