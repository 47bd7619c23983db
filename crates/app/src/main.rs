use std::{future::Future, io, path::PathBuf, process::ExitCode};

use clap::Parser;
use piglow_animator_core::{
    command, AnimatorError, AppConfig, CommandSource, ConsoleDevice, Device, Dispatcher,
    Result, RADIAL_ORDER,
};
use tokio::{sync::mpsc, task::JoinError};
use tracing_subscriber::EnvFilter;

const COMMAND_CAPACITY: usize = 16;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.list {
        print_catalog();
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::default(),
    };
    if cli.queue.is_some() {
        config.queue.endpoint = cli.queue;
    }

    let source = select_source(cli.animation, &config)?;
    let dispatcher = Dispatcher::new(ConsoleDevice::stdout(), config.pacing.clone())?;
    serve(dispatcher, source, tokio::signal::ctrl_c()).await
}

/// An explicit animation wins over the queue; without either the configured
/// default animation runs.
fn select_source(animation: Option<String>, config: &AppConfig) -> Result<CommandSource> {
    match (animation, &config.queue.endpoint) {
        (None, Some(endpoint)) => CommandSource::queue(endpoint.clone(), &config.queue),
        (animation, _) => Ok(CommandSource::Once(
            animation.unwrap_or_else(|| config.default_animation.clone()),
        )),
    }
}

/// Pumps commands from `source` into the dispatcher until the source fails or
/// `interrupt` resolves. Only an interrupt or an exhausted source blanks the
/// board on the way out.
async fn serve<D: Device>(
    mut dispatcher: Dispatcher<D>,
    source: CommandSource,
    interrupt: impl Future<Output = io::Result<()>>,
) -> Result<()> {
    let (tx, rx) = mpsc::channel(COMMAND_CAPACITY);
    let mut feeder = tokio::spawn(source.feed(tx));

    let outcome = tokio::select! {
        biased;
        joined = &mut feeder => source_outcome(joined),
        // the channel closes only after the feeder has finished, so its result
        // decides how the loop ended
        result = dispatcher.run(rx) => match result {
            Ok(()) => source_outcome((&mut feeder).await),
            Err(error) => Err(error),
        },
        signal = interrupt => {
            signal?;
            tracing::info!("interrupted, shutting down");
            Ok(())
        }
    };
    feeder.abort();

    outcome?;
    dispatcher.shutdown().await?;
    Ok(())
}

fn source_outcome(joined: std::result::Result<Result<()>, JoinError>) -> Result<()> {
    joined.unwrap_or_else(|error| {
        Err(AnimatorError::msg(format!(
            "command source task failed: {error}"
        )))
    })
}

fn print_catalog() {
    println!("\nAvailable animations:");
    for description in command::catalog() {
        println!("   {description}");
    }

    println!("\nAvailable colors:");
    for color in RADIAL_ORDER {
        println!("   {color}");
    }

    println!();
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Drive a PiGlow board from text commands", long_about = None)]
struct Cli {
    /// Animation to run until interrupted. Takes precedence over the queue.
    #[arg(short, long)]
    animation: Option<String>,
    /// List the available animations and colors, then exit.
    #[arg(short, long)]
    list: bool,
    /// Long-poll this URL for commands.
    #[arg(long, env = "WEBQUEUE")]
    queue: Option<String>,
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}
