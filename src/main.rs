use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use pyedit::app::{write_document, write_problems, ReportOptions, SyntaxTheme, Workbench};
use pyedit::kernel::services::adapters::{ensure_settings_file, load_settings, AsyncRuntime};
use pyedit::kernel::services::ports::Settings;
use pyedit::kernel::DocumentId;

mod logging;

const USAGE: &str = "usage: pyedit [--plain | --color] [--no-line-numbers] FILE...";
const POLL_INTERVAL: Duration = Duration::from_millis(10);
/// Extra wait on top of debounce and analyzer timeout before giving up.
const SETTLE_SLACK: Duration = Duration::from_secs(5);

#[derive(Debug, Default, PartialEq, Eq)]
struct CliOptions {
    files: Vec<PathBuf>,
    color: Option<bool>,
    line_numbers: bool,
}

fn parse_args<I>(cwd: &Path, args: I) -> io::Result<CliOptions>
where
    I: IntoIterator<Item = String>,
{
    let mut options = CliOptions {
        line_numbers: true,
        ..CliOptions::default()
    };
    for arg in args {
        match arg.as_str() {
            "--plain" => options.color = Some(false),
            "--color" => options.color = Some(true),
            "--no-line-numbers" => options.line_numbers = false,
            flag if flag.starts_with("--") => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("unknown option {flag}"),
                ));
            }
            path => {
                let path = Path::new(path);
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    cwd.join(path)
                };
                options.files.push(path);
            }
        }
    }
    if options.files.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, USAGE));
    }
    Ok(options)
}

fn load_or_default_settings() -> Settings {
    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "ensure_settings_file failed");
    }
    load_settings().unwrap_or_default()
}

/// Pumps until every file loaded or failed and no check is outstanding.
fn settle(workbench: &mut Workbench, expected: usize, budget: Duration) -> Vec<DocumentId> {
    let deadline = Instant::now() + budget;
    let mut loaded = Vec::new();
    let mut failed = 0usize;
    loop {
        workbench.pump(Instant::now());
        loaded.extend(workbench.take_loaded());
        for (path, error) in workbench.take_failures() {
            eprintln!("pyedit: {}: {error}", path.display());
            failed += 1;
        }
        if loaded.len() + failed >= expected && workbench.checks_idle() {
            break;
        }
        if Instant::now() >= deadline {
            tracing::warn!(loaded = loaded.len(), failed, expected, "gave up waiting for checks");
            break;
        }
        std::thread::sleep(POLL_INTERVAL);
    }
    loaded
}

fn run(options: CliOptions) -> io::Result<ExitCode> {
    let settings = load_or_default_settings();
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx, &settings.check)?;
    let mut workbench = Workbench::new(runtime, rx, settings.check.clone());

    for path in &options.files {
        workbench.open_path(path);
    }
    let budget = settings.check.debounce() + settings.check.stall_after() + SETTLE_SLACK;
    let loaded = settle(&mut workbench, options.files.len(), budget);

    let mut theme = SyntaxTheme::from_settings(&settings.theme);
    theme.adapt_to_terminal_capabilities();
    let color = options.color.unwrap_or_else(|| {
        io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
    });
    let report = ReportOptions {
        color,
        line_numbers: options.line_numbers,
    };

    let mut stdout = io::stdout().lock();
    let mut any_errors = false;
    for path in &options.files {
        let Some(doc) = loaded.iter().copied().find(|doc| {
            workbench
                .state()
                .editor
                .get(*doc)
                .and_then(|state| state.document().path())
                == Some(path.as_path())
        }) else {
            continue;
        };
        workbench.set_active_document(doc);
        any_errors |= !workbench.error_list(doc).is_empty();

        writeln!(stdout, "==> {} <==", path.display())?;
        write_document(&mut stdout, &workbench, doc, &theme, report)?;
        write_problems(
            &mut stdout,
            &path.display().to_string(),
            workbench.error_rows(),
        )?;
    }
    stdout.flush()?;

    let code = if loaded.len() < options.files.len() {
        2
    } else if any_errors {
        1
    } else {
        0
    };
    Ok(ExitCode::from(code))
}

fn main() -> ExitCode {
    let _logging = logging::init();

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("pyedit: {e}");
            return ExitCode::from(2);
        }
    };
    let options = match parse_args(&cwd, std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    match run(options) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "pyedit failed");
            eprintln!("pyedit: {e}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/cli_args.rs"]
mod tests;
