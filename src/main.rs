use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use splitdiff::{
    cli::{Cli, OutputFormat},
    config::SplitDiffConfig,
    diff::{row_class, DiffMode, DiffOutput, DiffStats, FormatMode, HighlightSpan, Row, Side, SpanClass},
    events::{AppEvent, AppState, InputSlot},
    export::{export_status, DiffExporter, ExportConfig},
    input::load_text,
    performance::EventDebouncer,
    tui::{restore_terminal, setup_terminal, TuiApp},
    watcher::InputWatcher,
};

const EXIT_NO_CHANGES: i32 = 0;
const EXIT_CHANGES: i32 = 1;
const EXIT_TROUBLE: i32 = 2;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = cli.validate() {
        eprintln!("Error: {}", err);
        std::process::exit(EXIT_TROUBLE);
    }

    cli.setup_logging();

    let mut config = match SplitDiffConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(EXIT_TROUBLE);
        }
    };
    cli.apply_overrides(&mut config);
    if let Err(err) = config.validate() {
        eprintln!("Error: invalid configuration: {}", err);
        std::process::exit(EXIT_TROUBLE);
    }

    let left = load_slot(&cli.left);
    let right = load_slot(&cli.right);
    let state = AppState::new(left, right, &config);

    tracing::info!(
        left = %cli.left.display(),
        right = %cli.right.display(),
        algorithm = %config.diff.algorithm,
        "comparing inputs"
    );

    match cli.output {
        OutputFormat::Tui => {
            run_tui_mode(&cli, &config, state)?;
            Ok(())
        }
        OutputFormat::Text | OutputFormat::Json => {
            let has_changes = run_print_mode(&cli, &config, state)?;
            std::process::exit(if has_changes { EXIT_CHANGES } else { EXIT_NO_CHANGES });
        }
    }
}

fn load_slot(path: &Path) -> InputSlot {
    match load_text(path) {
        Ok(loaded) => InputSlot::from_loaded(path.to_path_buf(), loaded),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(EXIT_TROUBLE);
        }
    }
}

fn exporter(config: &SplitDiffConfig) -> DiffExporter {
    DiffExporter::new(ExportConfig {
        file_name: config.export.file_name.clone(),
    })
}

fn run_tui_mode(cli: &Cli, config: &SplitDiffConfig, state: AppState) -> Result<()> {
    let watcher = if cli.watch {
        Some(InputWatcher::new(&cli.left, &cli.right)?)
    } else {
        None
    };

    let export_target = cli.export.clone().unwrap_or_else(|| {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });

    // Setup terminal
    let mut terminal = setup_terminal()?;

    let app = TuiApp::new(state, watcher, config, export_target);

    // Run the application
    let res = app.run(&mut terminal);

    // Restore terminal
    if let Err(err) = restore_terminal(&mut terminal) {
        eprintln!("Failed to restore terminal: {}", err);
    }

    if let Err(err) = res {
        eprintln!("Application error: {}", err);
        std::process::exit(EXIT_TROUBLE);
    }

    Ok(())
}

/// Print the diff once, or on every change with `--watch`. Returns whether
/// the last printed diff had changes.
fn run_print_mode(cli: &Cli, config: &SplitDiffConfig, mut state: AppState) -> Result<bool> {
    emit(cli, config, &state)?;

    if !cli.watch {
        return Ok(state.output.has_changes);
    }

    let watcher = InputWatcher::new(&cli.left, &cli.right)?;
    let mut debouncer = EventDebouncer::new(config.watcher.event_debounce_duration());

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    while running.load(Ordering::SeqCst) {
        match watcher.recv_timeout(Duration::from_millis(100)) {
            Ok(AppEvent::InputChanged { side, .. }) => {
                debouncer.add_event(state.slot(side).path.clone());
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }

        let ready = debouncer.get_ready_events();
        if ready.is_empty() {
            continue;
        }
        for side in [Side::Left, Side::Right] {
            if ready.contains(&state.slot(side).path) {
                state.reload(side);
            }
        }
        if !state.status.is_empty() {
            eprintln!("{}", state.status);
            state.status.clear();
        }
        emit(cli, config, &state)?;
    }

    Ok(state.output.has_changes)
}

fn emit(cli: &Cli, config: &SplitDiffConfig, state: &AppState) -> Result<()> {
    match cli.output {
        OutputFormat::Json => print_json(state)?,
        _ => print_text(state, cli.no_color),
    }

    if let Some(target) = &cli.export {
        let result = exporter(config).export_plain(&state.output, target);
        let status = export_status(&result);
        if !status.is_empty() {
            eprintln!("{}", status);
        }
        result?;
    }

    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    left: &'a str,
    right: &'a str,
    mode: DiffMode,
    has_changes: bool,
    stats: DiffStats,
    rows: &'a [Row],
    plain_text: &'a str,
}

fn print_json(state: &AppState) -> Result<()> {
    let report = JsonReport {
        left: &state.left.filename,
        right: &state.right.filename,
        mode: state.mode,
        has_changes: state.output.has_changes,
        stats: state.output.stats,
        rows: &state.output.rows,
        plain_text: &state.output.plain_text,
    };
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

fn print_text(state: &AppState, no_color: bool) {
    let width = crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(120);

    for line in split_lines(&state.output, state.format, width, no_color) {
        println!("{}", line);
    }
}

/// Side-by-side rendering with a line-number gutter per pane. Plain format
/// shows the prefixed per-row form, colored by row class.
fn split_lines(output: &DiffOutput, format: FormatMode, width: usize, no_color: bool) -> Vec<String> {
    if output.rows.is_empty() {
        return vec![splitdiff::tui::PLACEHOLDER.to_string()];
    }

    let width = width.max(40);
    let number_width = output.rows.len().to_string().len();
    let half_width = (width - 3) / 2; // Account for separator " | "
    let text_width = half_width.saturating_sub(number_width + 1);

    output
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let (left, right) = match format {
                FormatMode::Highlight => output.highlights[index].clone(),
                FormatMode::Plain => (
                    plain_spans(row, Side::Left, &output.plain_left[index]),
                    plain_spans(row, Side::Right, &output.plain_right[index]),
                ),
            };
            let left_cell = render_cell(row.left_line_number, &left, number_width, text_width, no_color);
            let right_cell = render_cell(row.right_line_number, &right, number_width, text_width, no_color);
            format!("{} | {}", left_cell, right_cell)
        })
        .collect()
}

fn plain_spans(row: &Row, side: Side, text: &str) -> Vec<HighlightSpan> {
    vec![HighlightSpan::new(row_class(row.kind, side), text)]
}

fn render_cell(
    number: Option<usize>,
    spans: &[HighlightSpan],
    number_width: usize,
    text_width: usize,
    no_color: bool,
) -> String {
    let number = number.map(|n| n.to_string()).unwrap_or_default();
    let mut cell = format!("{:>width$} ", number, width = number_width);

    let mut remaining = text_width;
    for span in spans {
        if remaining == 0 {
            break;
        }
        let text: String = span.text.chars().take(remaining).collect();
        remaining -= text.chars().count();

        if no_color {
            cell.push_str(&text);
        } else {
            let color = match span.class {
                SpanClass::Added => "\x1b[32m",   // Green
                SpanClass::Removed => "\x1b[31m", // Red
                SpanClass::Unchanged => "",
            };
            if color.is_empty() {
                cell.push_str(&text);
            } else {
                cell.push_str(&format!("{}{}\x1b[0m", color, text));
            }
        }
    }

    cell.push_str(&" ".repeat(remaining));
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitdiff::diff::DiffGenerator;

    #[test]
    fn test_plain_text_output_uses_row_form() {
        let output = DiffGenerator::default().generate("keep\nold\ngone\n", "keep\nnew\n", DiffMode::Line);
        let lines = split_lines(&output, FormatMode::Plain, 40, true);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("1   keep"));
        assert!(lines[1].starts_with("2 - old"));
        assert!(lines[1].contains("| 2 + new"));
        assert!(lines[2].starts_with("3 - gone"));
        assert_eq!(lines[2].split(" | ").nth(1).map(str::trim), Some(""));
    }

    #[test]
    fn test_highlight_text_output_colors_changes() {
        let output = DiffGenerator::default().generate("a\n", "b\n", DiffMode::Line);
        let lines = split_lines(&output, FormatMode::Highlight, 40, false);

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\x1b[31ma\x1b[0m"));
        assert!(lines[0].contains("\x1b[32mb\x1b[0m"));
    }

    #[test]
    fn test_empty_inputs_print_placeholder() {
        let output = DiffGenerator::default().generate("", "", DiffMode::Line);
        assert_eq!(split_lines(&output, FormatMode::Plain, 80, true), vec![splitdiff::tui::PLACEHOLDER]);
    }
}
