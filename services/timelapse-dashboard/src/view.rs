//! View model standing in for the page: panels, banner, projects and entries

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::model::{Profile, Project};

/// Everything the dashboard page displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub welcome_visible: bool,
    pub signed_in_visible: bool,
    pub sign_in_attached: bool,
    /// `None` hides the profile image
    pub profile_image: Option<String>,
    pub display_name: String,
    pub requests_in_flight: u32,
    pub error_banner: Option<String>,
    pub start_visible: bool,
    pub projects: Vec<String>,
    pub entries: Option<String>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            welcome_visible: true,
            signed_in_visible: false,
            sign_in_attached: false,
            profile_image: None,
            display_name: String::new(),
            requests_in_flight: 0,
            error_banner: None,
            start_visible: false,
            projects: Vec::new(),
            entries: None,
        }
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.requests_in_flight > 0
    }

    /// Show the welcome panel and drop everything tied to the previous user
    pub fn show_signed_out(&mut self) {
        self.welcome_visible = true;
        self.signed_in_visible = false;
        self.profile_image = None;
        self.display_name.clear();
        self.error_banner = None;
        self.start_visible = false;
        self.projects.clear();
        self.entries = None;
    }

    pub fn attach_sign_in(&mut self) {
        self.sign_in_attached = true;
    }

    /// Show the signed-in panel for `profile`.
    ///
    /// Projects and entries of a previous account are cleared so they never
    /// show under the new name.
    pub fn show_signed_in(&mut self, profile: &Profile) {
        self.welcome_visible = false;
        self.signed_in_visible = true;
        self.profile_image = profile.image_url.clone().filter(|url| !url.is_empty());
        self.display_name = profile.name.clone();
        self.error_banner = None;
        self.start_visible = false;
        self.projects.clear();
        self.entries = None;
    }

    pub fn begin_request(&mut self) {
        self.requests_in_flight += 1;
    }

    pub fn end_request(&mut self) {
        self.requests_in_flight = self.requests_in_flight.saturating_sub(1);
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_banner = Some(message.into());
    }

    /// Reveal the start section with one button per project, in order
    pub fn render_projects(&mut self, projects: &[Project]) {
        self.start_visible = true;
        self.projects = projects.iter().map(|p| p.label().to_string()).collect();
    }

    /// Show entries verbatim
    pub fn render_entries(&mut self, entries: &serde_json::Value) {
        let text = serde_json::to_string_pretty(entries).unwrap_or_else(|_| entries.to_string());
        self.entries = Some(text);
    }
}

/// View model shared between the controller's requests and the dashboard server
pub type ViewHandle = Arc<RwLock<DashboardView>>;

pub fn new_view_handle() -> ViewHandle {
    Arc::new(RwLock::new(DashboardView::new()))
}
