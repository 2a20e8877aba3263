//! User-facing status output.
//!
//! Every line is a right-aligned status word followed by a message, written to
//! stderr so stdout stays free for documents such as `launchpack manifest`
//! output. Staging progress is drawn with indicatif.

use std::fmt::Display;
use std::io::{self, IsTerminal};
use std::str::FromStr;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

/// Width status words are right-aligned to.
const STATUS_WIDTH: usize = 12;

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            ("auto", ColorChoice::Auto),
            ("always", ColorChoice::Always),
            ("never", ColorChoice::Never),
        ]
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(s))
        .map(|(_, choice)| choice)
        .ok_or_else(|| format!("unknown color mode `{}` (use auto, always or never)", s))
    }
}

/// How much the shell prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Nothing but the final error, if any.
    Quiet,
    #[default]
    Normal,
    /// One line per progress step instead of a bar.
    Verbose,
}

/// Status word of an output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Collecting,
    Packaging,
    Created,
    Staged,
    Skipped,
    Warning,
}

impl Status {
    fn label(self) -> &'static str {
        match self {
            Status::Collecting => "Collecting",
            Status::Packaging => "Packaging",
            Status::Created => "Created",
            Status::Staged => "Staged",
            Status::Skipped => "Skipped",
            Status::Warning => "warning",
        }
    }

    fn ansi(self) -> &'static str {
        match self {
            Status::Collecting | Status::Packaging => "\x1b[1;36m",
            Status::Created | Status::Staged => "\x1b[1;32m",
            Status::Skipped | Status::Warning => "\x1b[1;33m",
        }
    }
}

/// Output sink shared by the CLI commands.
#[derive(Debug, Default)]
pub struct Shell {
    verbosity: Verbosity,
    color: bool,
}

impl Shell {
    pub fn new(verbosity: Verbosity, color: ColorChoice) -> Self {
        Shell {
            verbosity,
            color: color.enabled(),
        }
    }

    /// Shell for the global `--quiet`/`--verbose` flags; quiet wins.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice) -> Self {
        let verbosity = match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        };
        Shell::new(verbosity, color)
    }

    /// Print `{status:>12} {message}` unless quiet.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        eprintln!("{} {}", self.render(status), msg);
    }

    pub fn warn(&self, msg: impl Display) {
        self.status(Status::Warning, msg);
    }

    fn render(&self, status: Status) -> String {
        let word = format!("{:>width$}", status.label(), width = STATUS_WIDTH);
        if self.color {
            format!("{}{}\x1b[0m", status.ansi(), word)
        } else {
            word
        }
    }

    /// Start tracking `total` steps labelled `label`.
    ///
    /// A bar is drawn only at normal verbosity and for more than one step.
    pub fn progress(self: &Arc<Self>, total: u64, label: impl Display) -> Progress {
        let label = label.to_string();
        let bar = (self.verbosity == Verbosity::Normal && total > 1).then(|| {
            let bar = ProgressBar::new(total);
            if let Ok(style) =
                ProgressStyle::with_template("{msg:>12.cyan.bold} [{bar:30}] {pos}/{len}")
            {
                bar.set_style(style.progress_chars("=> "));
            }
            bar.set_message(label.clone());
            bar
        });

        Progress {
            shell: Arc::clone(self),
            bar,
            total,
            done: 0,
            label,
        }
    }
}

/// Step counter behind [`Shell::progress`].
pub struct Progress {
    shell: Arc<Shell>,
    bar: Option<ProgressBar>,
    total: u64,
    done: u64,
    label: String,
}

impl Progress {
    pub fn inc(&mut self, delta: u64) {
        self.done += delta;
        match &self.bar {
            Some(bar) => bar.inc(delta),
            None if self.shell.verbosity == Verbosity::Verbose => {
                eprintln!("{:>width$} {}/{}", self.label, self.done, self.total, width = STATUS_WIDTH);
            }
            None => {}
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_choice_parse() {
        assert_eq!("Always".parse::<ColorChoice>().unwrap(), ColorChoice::Always);
        assert_eq!("never".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
        assert!("sometimes".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let shell = Shell::from_flags(true, true, ColorChoice::Never);
        assert_eq!(shell.verbosity, Verbosity::Quiet);
        assert_eq!(
            Shell::from_flags(false, true, ColorChoice::Never).verbosity,
            Verbosity::Verbose
        );
    }

    #[test]
    fn test_status_is_right_aligned() {
        let shell = Shell::new(Verbosity::Normal, ColorChoice::Never);
        let word = shell.render(Status::Staged);
        assert_eq!(word, "      Staged");
        assert_eq!(word.len(), STATUS_WIDTH);
    }

    #[test]
    fn test_colored_status_is_wrapped() {
        let shell = Shell::new(Verbosity::Normal, ColorChoice::Always);
        let word = shell.render(Status::Warning);
        assert!(word.starts_with("\x1b[1;33m"));
        assert!(word.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_progress_counts_without_bar() {
        let shell = Arc::new(Shell::new(Verbosity::Quiet, ColorChoice::Never));
        let mut progress = shell.progress(3, "Staging");
        assert!(progress.bar.is_none());
        progress.inc(1);
        progress.inc(2);
        progress.finish();
        assert_eq!(progress.done, 3);
    }
}
