use std::path::PathBuf;
use std::sync::Arc;

use crate::config::SplitDiffConfig;
use crate::diff::{DiffAlgorithmType, DiffMode, DiffOutput, FormatMode, Side};
use crate::input::{load_text, LoadedText};
use crate::session::DiffSession;

#[derive(Debug, Clone)]
pub enum AppEvent {
    InputChanged { side: Side, path: PathBuf },
}

/// One compared input and where it came from
#[derive(Debug, Clone, Default)]
pub struct InputSlot {
    pub path: PathBuf,
    pub filename: String,
    pub text: String,
}

impl InputSlot {
    pub fn from_loaded(path: PathBuf, loaded: LoadedText) -> Self {
        Self {
            path,
            filename: loaded.filename,
            text: loaded.text,
        }
    }

    /// Number of characters, as shown in the header stats
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// State shared by the interactive and one-shot front ends
pub struct AppState {
    pub left: InputSlot,
    pub right: InputSlot,
    pub mode: DiffMode,
    pub format: FormatMode,
    pub output: Arc<DiffOutput>,
    pub status: String,
    pub scroll_offset: usize,
    pub show_help: bool,
    session: DiffSession,
}

impl AppState {
    pub fn new(left: InputSlot, right: InputSlot, config: &SplitDiffConfig) -> Self {
        let mut session = DiffSession::new(config.diff.algorithm, config.cache.result_cache_capacity());
        let output = session.compute(&left.text, &right.text, config.diff.mode);

        Self {
            left,
            right,
            mode: config.diff.mode,
            format: config.diff.format,
            output,
            status: String::new(),
            scroll_offset: 0,
            show_help: false,
            session,
        }
    }

    /// Recompute the diff for the current inputs and mode
    pub fn refresh(&mut self) {
        self.output = self.session.compute(&self.left.text, &self.right.text, self.mode);
        self.clamp_scroll();

        let cache = self.session.cache_stats();
        tracing::debug!(hits = cache.hits, misses = cache.misses, rows = self.output.rows.len(), "diff refreshed");
    }

    pub fn algorithm(&self) -> DiffAlgorithmType {
        self.session.algorithm()
    }

    pub fn algorithm_summary(&self) -> (&str, &str) {
        self.session.algorithm_summary()
    }

    pub fn slot(&self, side: Side) -> &InputSlot {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut InputSlot {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Reload one side from disk.
    ///
    /// A failed read keeps the previous text and the previous diff; only the
    /// status line reports the problem.
    pub fn reload(&mut self, side: Side) {
        let path = self.slot(side).path.clone();
        match load_text(&path) {
            Ok(loaded) => {
                let slot = self.slot_mut(side);
                if slot.text != loaded.text {
                    *slot = InputSlot::from_loaded(path, loaded);
                    self.status = format!("Reloaded {}", self.slot(side).filename);
                }
                self.refresh();
            }
            Err(err) => {
                tracing::warn!("{}", err);
                self.status = err.to_string();
            }
        }
    }

    pub fn set_text(&mut self, side: Side, text: String) {
        self.slot_mut(side).text = text;
        self.refresh();
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
        self.refresh();
    }

    pub fn toggle_format(&mut self) {
        self.format = self.format.toggle();
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// "Changes detected" / "No changes detected"
    pub fn headline(&self) -> &'static str {
        if self.output.has_changes {
            "Changes detected"
        } else {
            "No changes detected"
        }
    }

    pub fn row_count(&self) -> usize {
        self.output.rows.len()
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount);
        self.clamp_scroll();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.row_count().saturating_sub(1);
    }

    fn clamp_scroll(&mut self) {
        let max_scroll = self.row_count().saturating_sub(1);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn slot(text: &str) -> InputSlot {
        InputSlot {
            path: PathBuf::from("unused.txt"),
            filename: "unused.txt".to_string(),
            text: text.to_string(),
        }
    }

    fn state(left: &str, right: &str) -> AppState {
        AppState::new(slot(left), slot(right), &SplitDiffConfig::default())
    }

    #[test]
    fn test_headline_follows_changes() {
        assert_eq!(state("a", "a").headline(), "No changes detected");
        assert_eq!(state("a", "b").headline(), "Changes detected");
    }

    #[test]
    fn test_toggle_mode_recomputes_highlights() {
        let mut app = state("a b", "a c");
        let line = Arc::clone(&app.output);

        app.toggle_mode();
        assert_eq!(app.mode, DiffMode::Word);
        assert_eq!(app.output.mode, DiffMode::Word);
        assert_ne!(line.highlights, app.output.highlights);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut app = state("1\n2\n3\n", "1\n2\n3\n");

        app.scroll_down(10);
        assert_eq!(app.scroll_offset, 2);
        app.scroll_up(5);
        assert_eq!(app.scroll_offset, 0);
        app.scroll_to_bottom();
        assert_eq!(app.scroll_offset, 2);

        app.set_text(Side::Left, String::new());
        app.set_text(Side::Right, "only\n".to_string());
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_reload_failure_keeps_previous_diff() {
        let mut app = state("a", "b");
        let before = Arc::clone(&app.output);

        app.left.path = PathBuf::from("/definitely/missing/left.txt");
        app.reload(Side::Left);

        assert!(app.status.starts_with("Failed to read file: "));
        assert!(Arc::ptr_eq(&before, &app.output));
        assert_eq!(app.left.text, "a");
    }

    #[test]
    fn test_reload_picks_up_new_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("right.txt");
        std::fs::write(&path, "a").unwrap();

        let mut app = state("a", "b");
        app.right.path = path.clone();
        app.reload(Side::Right);

        assert_eq!(app.right.text, "a");
        assert_eq!(app.status, "Reloaded right.txt");
        assert!(!app.output.has_changes);
    }

    #[test]
    fn test_char_count() {
        assert_eq!(slot("héllo").char_count(), 5);
    }
}
