/*
[INPUT]:  Launcher/poller progress (start, running snapshots, terminal states)
[OUTPUT]: User-visible status text on a display surface
[POS]:    Presentation layer - the single status element of a generation run
[UPDATE]: When adding new user-visible states or display surfaces
*/

use console::{Term, style};
use genjob_adapter::TaskStatusResponse;
use std::fmt;
use tracing::warn;

/// Every text a generation run can show to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    Starting,
    StartFailed,
    Running { progress: f64, message: String },
    Finished,
    TaskFailed,
    StatusFailed,
    DownloadFailed,
}

impl StatusUpdate {
    /// Running snapshot; progress defaults to 0 and message to "".
    pub fn running(status: &TaskStatusResponse) -> Self {
        StatusUpdate::Running {
            progress: status.progress.unwrap_or(0.0),
            message: status.message.clone().unwrap_or_default(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            StatusUpdate::StartFailed
                | StatusUpdate::TaskFailed
                | StatusUpdate::StatusFailed
                | StatusUpdate::DownloadFailed
        )
    }
}

impl fmt::Display for StatusUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusUpdate::Starting => f.write_str("Starting generation, please wait..."),
            StatusUpdate::StartFailed => f.write_str("Error while starting generation."),
            StatusUpdate::Running { progress, message } => {
                write!(f, "Running... {progress}% - {message}")
            }
            StatusUpdate::Finished => f.write_str("Generation finished."),
            StatusUpdate::TaskFailed => f.write_str("Error while generating templates."),
            StatusUpdate::StatusFailed => f.write_str("Error while retrieving status."),
            StatusUpdate::DownloadFailed => {
                f.write_str("Error while downloading the generated templates.")
            }
        }
    }
}

/// Surface that shows the current status of a run.
pub trait StatusDisplay: Send + Sync {
    fn show(&self, update: &StatusUpdate);
}

/// Status line on stdout. Running snapshots overwrite each other on a terminal.
#[derive(Debug, Clone)]
pub struct TerminalDisplay {
    term: Term,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn render(&self, update: &StatusUpdate) -> std::io::Result<()> {
        let text = update.to_string();
        let styled = match update {
            StatusUpdate::Running { .. } => style(text).cyan(),
            StatusUpdate::Finished => style(text).green(),
            update if update.is_error() => style(text).red().bold(),
            _ => style(text).dim(),
        };

        if !self.term.is_term() {
            return self.term.write_line(&styled.to_string());
        }

        self.term.clear_line()?;
        match update {
            StatusUpdate::Running { .. } | StatusUpdate::Starting => {
                self.term.write_str(&styled.to_string())
            }
            _ => self.term.write_line(&styled.to_string()),
        }
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusDisplay for TerminalDisplay {
    fn show(&self, update: &StatusUpdate) {
        if let Err(err) = self.render(update) {
            warn!(error = %err, status = %update, "failed to render status");
        }
    }
}
