use std::io;
use std::path::PathBuf;
use std::time::Duration;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame, Terminal,
};
use crate::config::SplitDiffConfig;
use crate::diff::{DiffOutput, FormatMode, HighlightSpan, Side, SpanClass};
use crate::events::{AppEvent, AppState};
use crate::export::{export_status, ClipboardSink, DiffExporter, ExportConfig};
use crate::performance::EventDebouncer;
use crate::watcher::InputWatcher;

/// Shown in both panes when there are no rows at all
pub const PLACEHOLDER: &str = "Start typing above to see the differences.";

const GUTTER_STYLE: Style = Style::new().fg(Color::Rgb(100, 100, 100));
const BORDER_STYLE: Style = Style::new().fg(Color::Rgb(80, 80, 80));

pub struct TuiApp {
    pub state: AppState,
    pub should_quit: bool,
    watcher: Option<InputWatcher>,
    debouncer: EventDebouncer,
    clipboard: Option<ClipboardSink>,
    exporter: DiffExporter,
    export_target: PathBuf,
    poll_interval: Duration,
    scroll_step: usize,
    show_line_numbers: bool,
}

impl TuiApp {
    pub fn new(
        state: AppState,
        watcher: Option<InputWatcher>,
        config: &SplitDiffConfig,
        export_target: PathBuf,
    ) -> Self {
        Self {
            state,
            should_quit: false,
            watcher,
            debouncer: EventDebouncer::new(config.watcher.event_debounce_duration()),
            clipboard: None,
            exporter: DiffExporter::new(ExportConfig {
                file_name: config.export.file_name.clone(),
            }),
            export_target,
            poll_interval: config.watcher.poll_interval_duration(),
            scroll_step: config.ui.scroll_step,
            show_line_numbers: config.ui.show_line_numbers,
        }
    }

    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.ui(f))?;

            self.drain_watcher();

            // Handle keyboard input
            if event::poll(self.poll_interval)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Feed watcher notifications through the debouncer and reload the
    /// sides whose quiet period has elapsed.
    fn drain_watcher(&mut self) {
        if let Some(watcher) = &self.watcher {
            while let Ok(AppEvent::InputChanged { side, .. }) = watcher.try_recv() {
                self.debouncer.add_event(self.state.slot(side).path.clone());
            }
        }

        for path in self.debouncer.get_ready_events() {
            for side in [Side::Left, Side::Right] {
                if self.state.slot(side).path == path {
                    self.state.reload(side);
                }
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('h') | KeyCode::F(1) => self.state.toggle_help(),
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_down(1),
            KeyCode::PageUp => self.state.scroll_up(self.scroll_step),
            KeyCode::PageDown => self.state.scroll_down(self.scroll_step),
            KeyCode::Home => self.state.scroll_to_top(),
            KeyCode::End => self.state.scroll_to_bottom(),
            KeyCode::Char('m') => self.state.toggle_mode(),
            KeyCode::Char('f') => self.state.toggle_format(),
            KeyCode::Char('r') => {
                self.state.reload(Side::Left);
                self.state.reload(Side::Right);
            }
            KeyCode::Char('c') => self.copy(),
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
    }

    fn copy(&mut self) {
        let clipboard = self.clipboard.get_or_insert_with(ClipboardSink::new);
        let status = clipboard.copy_diff(&self.state.output);
        if !status.is_empty() {
            self.state.status = status;
        }
    }

    fn export(&mut self) {
        let result = self.exporter.export_plain(&self.state.output, &self.export_target);
        let status = export_status(&result);
        if !status.is_empty() {
            self.state.status = status;
        }
    }

    fn ui(&mut self, f: &mut Frame) {
        if self.state.show_help {
            self.render_help(f);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(5),    // Split panes
                Constraint::Length(3), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_panes(f, chunks[1]);
        self.render_status(f, chunks[2]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let state = &self.state;
        let headline_color = if state.output.has_changes { Color::Yellow } else { Color::Green };

        let header = Line::from(vec![
            Span::styled(state.headline(), Style::default().fg(headline_color).add_modifier(Modifier::BOLD)),
            Span::styled("  |  Left ", Style::default().fg(Color::Rgb(150, 150, 150))),
            Span::styled(format!("{} chars", state.left.char_count()), Style::default().fg(Color::Cyan)),
            Span::styled("  Right ", Style::default().fg(Color::Rgb(150, 150, 150))),
            Span::styled(format!("{} chars", state.right.char_count()), Style::default().fg(Color::Cyan)),
            Span::styled("  Mode ", Style::default().fg(Color::Rgb(150, 150, 150))),
            Span::styled(state.mode.label(), Style::default().fg(Color::Cyan)),
            Span::styled("  Format ", Style::default().fg(Color::Rgb(150, 150, 150))),
            Span::styled(state.format.label(), Style::default().fg(Color::Cyan)),
            Span::styled("  Algorithm ", Style::default().fg(Color::Rgb(150, 150, 150))),
            Span::styled(state.algorithm().name(), Style::default().fg(Color::Cyan)),
        ]);

        let paragraph = Paragraph::new(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(BORDER_STYLE)
                    .title(" Diff result ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            )
            .alignment(Alignment::Left);

        f.render_widget(paragraph, area);
    }

    fn render_panes(&mut self, f: &mut Frame, area: Rect) {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let visible_height = (area.height as usize).saturating_sub(2);
        let start = self.state.scroll_offset;

        for (side, pane) in [(Side::Left, panes[0]), (Side::Right, panes[1])] {
            let slot = self.state.slot(side);
            let label = match side {
                Side::Left => "Original text",
                Side::Right => "Updated text",
            };

            let lines = pane_lines(
                &self.state.output,
                side,
                self.state.format,
                self.show_line_numbers,
                start,
                visible_height,
            );

            let paragraph = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(BORDER_STYLE)
                    .title(format!(" {} ({}) ", label, slot.filename))
                    .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            );
            f.render_widget(paragraph, pane);
        }

        let total = self.state.row_count();
        if total > visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));
            let mut scrollbar_state = ScrollbarState::new(total).position(start);
            f.render_stateful_widget(
                scrollbar,
                panes[1].inner(ratatui::layout::Margin { vertical: 1, horizontal: 0 }),
                &mut scrollbar_state,
            );
        }
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let stats = crate::diff::PlainFormatter::format_stats(&self.state.output.stats);
        let mut spans = vec![
            Span::styled(" q ", Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(" quit  ", Style::default().fg(Color::Rgb(150, 150, 150))),
            Span::styled(" h ", Style::default().fg(Color::White).bg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled(" help  ", Style::default().fg(Color::Rgb(150, 150, 150))),
            Span::styled(stats, Style::default().fg(Color::Cyan)),
        ];
        if !self.state.status.is_empty() {
            spans.push(Span::styled("  |  ", Style::default().fg(Color::Rgb(100, 100, 100))));
            spans.push(Span::styled(
                self.state.status.clone(),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ));
        }

        let status = Paragraph::new(Line::from(spans))
            .block(Block::default()
                .borders(Borders::ALL)
                .border_style(BORDER_STYLE)
                .title(" Status ")
                .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)))
            .alignment(Alignment::Center);

        f.render_widget(status, area);
    }

    fn render_help(&self, f: &mut Frame) {
        let popup_area = centered_rect(70, 70, f.area());

        let key = |k: &'static str, color: Color, what: &'static str| {
            Line::from(vec![
                Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(what),
            ])
        };

        let (algorithm, description) = self.state.algorithm_summary();
        let help_text = vec![
            Line::from(vec![
                Span::styled("splitdiff - side-by-side text diff", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            ]),
            Line::from(""),
            Line::from("Keyboard Shortcuts:"),
            Line::from(""),
            key("  q, Esc     ", Color::Red, "- Quit the application"),
            key("  h, F1      ", Color::Green, "- Show/hide this help"),
            key("  ↑, k / ↓, j", Color::Blue, "- Scroll one row"),
            key("  PgUp/PgDn  ", Color::Blue, "- Scroll one page"),
            key("  Home/End   ", Color::Blue, "- Jump to first/last row"),
            key("  m          ", Color::Yellow, "- Toggle line / word highlighting"),
            key("  f          ", Color::Yellow, "- Toggle highlighted / plain panes"),
            key("  c          ", Color::Magenta, "- Copy plain diff to clipboard"),
            key("  e          ", Color::Magenta, "- Export plain diff as .txt"),
            key("  r          ", Color::Magenta, "- Reload both inputs from disk"),
            Line::from(""),
            Line::from(format!("Line engine: {} - {}", algorithm, description)),
            Line::from("Changed lines are paired by position within each changed block."),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .title_style(Style::default().fg(Color::Cyan))
            )
            .wrap(Wrap { trim: true });

        f.render_widget(Clear, popup_area);
        f.render_widget(paragraph, popup_area);
    }
}

/// Style for a highlighted span
pub fn span_style(class: SpanClass) -> Style {
    match class {
        SpanClass::Unchanged => Style::default().fg(Color::Rgb(200, 200, 200)),
        SpanClass::Added => Style::default().fg(Color::Rgb(150, 255, 150)).bg(Color::Rgb(0, 40, 0)),
        SpanClass::Removed => Style::default().fg(Color::Rgb(255, 150, 150)).bg(Color::Rgb(40, 0, 0)),
    }
}

fn styled_spans(spans: &[HighlightSpan]) -> Vec<Span<'static>> {
    spans
        .iter()
        .map(|span| Span::styled(span.text.clone(), span_style(span.class)))
        .collect()
}

/// Visible lines of one pane, starting at row `start`.
pub fn pane_lines(
    output: &DiffOutput,
    side: Side,
    format: FormatMode,
    show_line_numbers: bool,
    start: usize,
    height: usize,
) -> Vec<Line<'static>> {
    if output.rows.is_empty() {
        return vec![Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::Gray)))];
    }

    let width = output.rows.len().to_string().len();
    let end = start.saturating_add(height).min(output.rows.len());
    let start = start.min(end);

    (start..end)
        .map(|index| {
            let row = &output.rows[index];
            let mut spans = Vec::new();

            if show_line_numbers {
                let number = row
                    .line_number(side)
                    .map(|n| n.to_string())
                    .unwrap_or_default();
                spans.push(Span::styled(format!("{:>width$} │ ", number, width = width), GUTTER_STYLE));
            }

            match format {
                FormatMode::Highlight => {
                    let (left, right) = &output.highlights[index];
                    let highlights = match side {
                        Side::Left => left,
                        Side::Right => right,
                    };
                    spans.extend(styled_spans(highlights));
                }
                FormatMode::Plain => {
                    let plain = match side {
                        Side::Left => &output.plain_left[index],
                        Side::Right => &output.plain_right[index],
                    };
                    spans.push(Span::raw(plain.clone()));
                }
            }

            Line::from(spans)
        })
        .collect()
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}
