//! Homework bot: polls the homework status API and relays changes to Telegram.
mod config;
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use bot_logging::{bot_critical, bot_info};
use homework_core::{classify, ClassifiedError, PipelineError, PollState};
use homework_engine::{
    ClientSettings, Notifier, PollLoop, ReqwestStatusSource, TelegramMessenger, TokioPacer,
};

use config::{Args, BotConfig};
use logging::LogDestination;

fn main() -> ExitCode {
    let args = match config::load_args() {
        Ok(args) => args,
        Err(err) => return reject_arguments(err),
    };
    logging::initialize(args.log);

    // The loop only returns on a fatal failure, which it has already logged.
    if let Err(err) = run(args) {
        bot_critical!("{:#}", err);
    }
    ExitCode::FAILURE
}

// Arguments failed to parse, so the chosen log destination is unknown.
fn reject_arguments(err: clap::Error) -> ExitCode {
    match config::args_error(err) {
        Ok(config_err) => {
            logging::initialize(LogDestination::Terminal);
            bot_critical!("{}", classify(&PipelineError::Config(config_err.to_string())));
            ExitCode::FAILURE
        }
        Err(display) => display.exit(),
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = BotConfig::from_args(args)
        .map_err(|err| classify(&PipelineError::Config(err.to_string())))?;
    bot_info!("All tokens are available");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime
        .block_on(poll_forever(&config))
        .context("failed to set up http clients")?;
    Ok(())
}

async fn poll_forever(config: &BotConfig) -> Result<ClassifiedError, PipelineError> {
    let settings = ClientSettings::default();
    let source = ReqwestStatusSource::new(
        config.endpoint.clone(),
        config.practicum_token.clone(),
        &settings,
    )?;
    let messenger = TelegramMessenger::new(
        config.telegram_api.clone(),
        config.telegram_token.clone(),
        &settings,
    )?;

    bot_info!(
        "Polling {} every {:?} from_date={}",
        config.endpoint,
        homework_engine::RETRY_INTERVAL,
        config.from_date
    );
    let mut poll_loop = PollLoop::new(
        source,
        Notifier::new(messenger, config.chat_id.clone()),
        TokioPacer,
        PollState::new(config.from_date),
    );
    Ok(poll_loop.run().await)
}
