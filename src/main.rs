use gnss_relay::logging;
use gnss_relay::service::spawn_signal_listener;
use gnss_relay::{AcquisitionLoop, DbusPositionSource, LoopStats, MqttSink, Publisher, RelayConfig, RelayError};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    logging::init_logging();
    if dotenv.is_err() {
        info!("no .env file found");
    }

    match run().await {
        Ok(stats) => {
            info!(published = stats.published, "GNSS relay stopped");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "GNSS relay failed to start");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<LoopStats, RelayError> {
    let cancel = CancellationToken::new();
    spawn_signal_listener(cancel.clone())?;

    let config = RelayConfig::from_env()?;
    info!(?config, "configuration loaded");

    let sink = MqttSink::connect(&config.broker).await?;
    let source = DbusPositionSource::connect().await?;
    info!("connected to system bus");

    let publisher = Publisher::new(sink, &config.broker.base_topic);
    let acquisition = AcquisitionLoop::new(source, publisher, config.poll_interval);
    Ok(acquisition.run(cancel).await)
}
