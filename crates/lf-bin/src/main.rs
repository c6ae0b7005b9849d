//! linefold entrypoint: fold ranges of a text file and print the laid-out lines.
use anyhow::{Context, Result, bail};
use clap::Parser;
use core_config::{Config, load_from};
use core_fold::FoldingStorage;
use core_layout::{DocumentLayout, FoldingTypesetter, LayoutSettings};
use core_text::AttributedText;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const SAMPLE: &str = "fn main() {\n    let greeting = \"hello\";\n    println!(\"{greeting}\");\n}\n\nfn unused() {\n    todo!()\n}\n";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "linefold", version, about = "Fold character ranges and print the laid-out lines")]
struct Args {
    /// Optional UTF-8 text file. If omitted a built-in sample is used.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `linefold.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Character range to fold, `START..END`. May be repeated.
    #[arg(long = "fold", value_parser = parse_fold_range)]
    pub folds: Vec<Range<usize>>,
    /// Line width override.
    #[arg(long = "width")]
    pub width: Option<usize>,
}

fn parse_fold_range(s: &str) -> Result<Range<usize>> {
    let Some((start, end)) = s.split_once("..") else {
        bail!("expected START..END, got `{s}`");
    };
    let start: usize = start
        .trim()
        .parse()
        .with_context(|| format!("invalid fold start `{start}`"))?;
    let end: usize = end
        .trim()
        .parse()
        .with_context(|| format!("invalid fold end `{end}`"))?;
    if start > end {
        bail!("fold start {start} is past its end {end}");
    }
    Ok(start..end)
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("linefold.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "linefold.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
        .ok()
        // Subscriber already installed; dropping the guard shuts the writer down.
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let Some(path) = path else {
        return Ok(SAMPLE.to_string());
    };
    match std::fs::read_to_string(path) {
        Ok(content) => {
            tracing::debug!(target: "io", file = %path.display(), size_bytes = content.len(), "file_read_ok");
            Ok(content)
        }
        Err(e) => {
            error!(target: "io", ?e, file = %path.display(), "file_open_error");
            Err(e).with_context(|| format!("reading {}", path.display()))
        }
    }
}

fn layout_settings(config: &Config, width: Option<usize>) -> LayoutSettings {
    let layout = config.effective_layout();
    LayoutSettings {
        line_width: width.unwrap_or(layout.line_width).max(1),
        tab_width: layout.tab_width,
        placeholder_width: layout.placeholder_width,
    }
}

/// Fold every requested range and lay the document out. Ranges that fall
/// outside the text are skipped with a warning.
fn fold_and_layout(
    text: &str,
    folds: &[Range<usize>],
    settings: LayoutSettings,
) -> Result<DocumentLayout> {
    let mut storage = FoldingStorage::from_str(text);
    for range in folds {
        if let Err(e) = storage.fold(range.clone()) {
            warn!(target: "runtime", start = range.start, end = range.end, error = %e, "fold_skipped");
        }
    }
    info!(
        target: "runtime",
        chars = storage.len_chars(),
        folded = storage.folded_ranges().len(),
        "folds_applied"
    );
    let mut typesetter = FoldingTypesetter::new(settings);
    Ok(typesetter.layout_document(&mut storage)?)
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = load_from(args.config.clone())?;
    let text = read_input(args.path.as_deref())?;
    let settings = layout_settings(&config, args.width);

    let layout = fold_and_layout(&text, &args.folds, settings)?;
    for line in layout.render(config.placeholder()) {
        println!("{line}");
    }
    info!(target: "runtime", lines = layout.lines.len(), "shutdown");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_fold_ranges() {
        assert_eq!(parse_fold_range("3..7").unwrap(), 3..7);
        assert_eq!(parse_fold_range(" 0 .. 0 ").unwrap(), 0..0);
        assert!(parse_fold_range("7..3").is_err());
        assert!(parse_fold_range("3-7").is_err());
        assert!(parse_fold_range("a..7").is_err());
    }

    #[test]
    fn cli_collects_repeated_folds() {
        let args = Args::try_parse_from([
            "linefold", "in.txt", "--fold", "1..4", "--fold", "6..9", "--width", "20",
        ])
        .unwrap();
        assert_eq!(args.path, Some(PathBuf::from("in.txt")));
        assert_eq!(args.folds, vec![1..4, 6..9]);
        assert_eq!(args.width, Some(20));
        assert!(Args::try_parse_from(["linefold", "--fold", "x"]).is_err());
    }

    #[test]
    fn width_override_wins_over_config() {
        let config = Config::default();
        assert_eq!(layout_settings(&config, None).line_width, 80);
        assert_eq!(layout_settings(&config, Some(12)).line_width, 12);
        assert_eq!(layout_settings(&config, Some(0)).line_width, 1);
    }

    #[test]
    fn folds_sample_body() {
        // Body of `main` between the braces, minus its final newline.
        let start = SAMPLE.find('{').unwrap() + 1;
        let end = SAMPLE.find("\n}").unwrap();
        let layout = fold_and_layout(SAMPLE, &[start..end], LayoutSettings::default()).unwrap();
        let lines = layout.render("…");
        assert_eq!(lines[0], "fn main() {…");
        assert_eq!(lines[1], "}");
        assert_eq!(lines[3], "fn unused() {");
    }

    #[test]
    fn out_of_range_fold_is_skipped() {
        let layout = fold_and_layout("abc", &[10..20], LayoutSettings::default()).unwrap();
        assert_eq!(layout.render("…"), vec!["abc"]);
    }

    #[test]
    fn missing_input_is_an_error() {
        assert!(read_input(Some(Path::new("__missing_linefold_input__.txt"))).is_err());
        assert_eq!(read_input(None).unwrap(), SAMPLE);
    }
}
