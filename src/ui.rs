//! UI ports driven by the viewer.
//!
//! The viewer never renders anything itself. It pushes file options,
//! category buttons, content fragments and status lines into a
//! [`ViewerPanel`], which the CLI, the web server and tests implement.

use std::sync::Mutex;

use serde::Serialize;

use crate::render::category_title;

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Info,
    Error,
}

/// Message for the status area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub level: StatusLevel,
    pub message: String,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == StatusLevel::Error
    }
}

/// One selectable category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryButton {
    pub kind: String,
    pub label: String,
    pub active: bool,
}

impl CategoryButton {
    pub fn new(kind: &str, active: bool) -> Self {
        Self {
            kind: kind.to_string(),
            label: category_title(kind),
            active,
        }
    }
}

/// Output port for the viewer.
pub trait ViewerPanel: Send + Sync {
    /// Replace the file selector options.
    fn show_files(&self, files: &[String], selected: Option<&str>);
    /// Replace the category buttons.
    fn show_categories(&self, buttons: &[CategoryButton]);
    /// Replace the content region with an HTML fragment.
    fn show_content(&self, html: &str);
    fn show_status(&self, status: Status);
    fn set_loading(&self, loading: bool);
}

/// Everything a panel currently displays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelSnapshot {
    pub files: Vec<String>,
    pub selected_file: Option<String>,
    pub categories: Vec<CategoryButton>,
    pub content: String,
    pub status: Option<Status>,
    pub loading: bool,
    /// Number of content updates so far.
    pub renders: u64,
}

impl PanelSnapshot {
    pub fn active_category(&self) -> Option<&str> {
        self.categories
            .iter()
            .find(|b| b.active)
            .map(|b| b.kind.as_str())
    }
}

/// Panel that keeps the latest value of every output in memory.
#[derive(Debug, Default)]
pub struct RecordingPanel {
    state: Mutex<PanelSnapshot>,
}

impl RecordingPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PanelSnapshot> {
        // A poisoned lock only means a panic happened mid-update; the data is still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ViewerPanel for RecordingPanel {
    fn show_files(&self, files: &[String], selected: Option<&str>) {
        let mut state = self.lock();
        state.files = files.to_vec();
        state.selected_file = selected.map(str::to_string);
    }

    fn show_categories(&self, buttons: &[CategoryButton]) {
        self.lock().categories = buttons.to_vec();
    }

    fn show_content(&self, html: &str) {
        let mut state = self.lock();
        state.content = html.to_string();
        state.renders += 1;
    }

    fn show_status(&self, status: Status) {
        self.lock().status = Some(status);
    }

    fn set_loading(&self, loading: bool) {
        self.lock().loading = loading;
    }
}
