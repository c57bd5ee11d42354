//! Jenkins Connect - headless connect front end
//!
//! This is the binary entry point. All logic lives in the library.

use std::time::Duration;

use clap::Parser;

/// Headless runner for the Jenkins-for-Jira connect flow
#[derive(Parser, Debug)]
#[command(name = "jconnect")]
#[command(about = "Headless connect front end for the Jenkins-for-Jira integration", long_about = None)]
struct Args {
    /// Seconds to wait for a bridge response before failing the request
    #[arg(long, default_value_t = 30)]
    request_timeout: u64,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    jconnect_core::logging::init()?;

    jenkins_connect::run(Duration::from_secs(args.request_timeout)).await?;

    Ok(())
}
