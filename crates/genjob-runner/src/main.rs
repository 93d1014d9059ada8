/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Started generation task polled to completion, artifact on disk
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, startup flow, or shutdown handling
*/

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use genjob_adapter::JobClient;
use genjob_runner::config::default_config_path;
use genjob_runner::{
    DownloadNavigator, Navigator, PrintNavigator, RunnerConfig, TaskLauncher, TerminalDisplay,
};

const LOG_FILE_NAME: &str = "genjob-runner.log";

#[derive(Parser, Debug)]
#[command(name = "genjob-runner", version, about = "Template generation job runner")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    /// Overrides base_url from the configuration file
    #[arg(long = "base-url", value_name = "URL", env = "GENJOB_BASE_URL", global = true)]
    base_url: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,
    /// Also write logs to <DIR>/genjob-runner.log
    #[arg(long = "log-dir", value_name = "DIR", global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a generation task, poll it and fetch the artifact
    Generate(GenerateArgs),
    /// Print the current status of a task
    Status {
        #[arg(value_name = "TASK_ID")]
        task_id: String,
    },
    /// Fetch the artifact of a finished task
    Download {
        #[arg(value_name = "TASK_ID")]
        task_id: String,
        #[arg(long = "output-dir", value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Interactively write a configuration file
    Init {
        #[arg(long = "output", value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Validate configuration and exit
    #[arg(long = "dry-run")]
    dry_run: bool,
    /// Print the download URL instead of fetching the artifact
    #[arg(long = "no-download")]
    no_download: bool,
    #[arg(long = "output-dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,
    #[arg(long = "poll-interval-ms", value_name = "MS")]
    poll_interval_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let _log_guard = init_tracing(&args.log_level, args.log_dir.as_ref())?;

    if let Command::Init { output } = &args.command {
        let output = match output.clone().or_else(default_config_path) {
            Some(path) => path,
            None => return Err(anyhow!("no config directory on this platform; pass --output")),
        };
        return cli::init::run_init(output);
    }

    let mut config = RunnerConfig::load(args.config_path.as_deref()).context("load config")?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    match args.command {
        Command::Generate(generate) => run_generate(config, generate).await,
        Command::Status { task_id } => run_status(config, &task_id).await,
        Command::Download {
            task_id,
            output_dir,
        } => {
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            run_download(config, &task_id).await
        }
        Command::Init { .. } => Ok(()),
    }
}

async fn run_generate(mut config: RunnerConfig, args: GenerateArgs) -> Result<()> {
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(interval) = args.poll_interval_ms {
        config.poll_interval_ms = interval;
    }
    if args.no_download {
        config.download = false;
    }
    config.validate().context("invalid configuration")?;

    info!(
        base_url = %config.base_url,
        poll_interval_ms = config.poll_interval_ms,
        download = config.download,
        "configuration loaded"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let client = Arc::new(build_client(&config)?);
    let navigator: Arc<dyn Navigator> = if config.download {
        Arc::new(DownloadNavigator::new(client.clone(), config.output_dir.clone()))
    } else {
        Arc::new(PrintNavigator)
    };
    let launcher = TaskLauncher::new(
        client,
        Arc::new(TerminalDisplay::new()),
        navigator,
        config.poll_interval(),
    );

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    tokio::select! {
        result = launcher.run() => {
            let completed = result.map_err(|failure| {
                let context = match failure.task_id() {
                    Some(task_id) => format!("generation of task {task_id} failed"),
                    None => "generation failed".to_string(),
                };
                anyhow::Error::new(failure).context(context)
            })?;
            info!(task_id = %completed.task_id, polls = completed.polls, "generation finished");
            Ok(())
        }
        _ = shutdown.cancelled() => {
            warn!("interrupted; leaving the server-side task running");
            Err(anyhow!("interrupted"))
        }
    }
}

async fn run_status(config: RunnerConfig, task_id: &str) -> Result<()> {
    config.validate().context("invalid configuration")?;
    let client = build_client(&config)?;
    let status = client
        .task_status(task_id)
        .await
        .with_context(|| format!("query status of task {task_id}"))?;

    let state = status
        .state
        .as_ref()
        .map_or("<missing>", |state| state.as_str());
    println!(
        "{task_id}: {state} {}% {}",
        status.progress.unwrap_or(0.0),
        status.message.as_deref().unwrap_or("")
    );
    Ok(())
}

async fn run_download(config: RunnerConfig, task_id: &str) -> Result<()> {
    config.validate().context("invalid configuration")?;
    let client = Arc::new(build_client(&config)?);
    let url = client.download_url(task_id)?;
    DownloadNavigator::new(client, config.output_dir.clone())
        .navigate(task_id, &url)
        .await
}

fn build_client(config: &RunnerConfig) -> Result<JobClient> {
    JobClient::with_config(config.client_config(), &config.base_url).context("build HTTP client")
}

fn init_tracing(log_level: &str, log_dir: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create log dir {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
