//! HTML and plain-text renderings of the view model

use std::fmt::Write as _;

use askama::Template;

use crate::view::DashboardView;

/// The dashboard page; all text is escaped by the template
#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardPage<'a> {
    loading: bool,
    show_banner: bool,
    error_banner: &'a str,
    welcome_visible: bool,
    sign_in_attached: bool,
    signed_in_visible: bool,
    show_image: bool,
    profile_image: &'a str,
    display_name: &'a str,
    start_visible: bool,
    projects: &'a [String],
    entries: &'a str,
}

impl<'a> From<&'a DashboardView> for DashboardPage<'a> {
    fn from(view: &'a DashboardView) -> Self {
        Self {
            loading: view.is_loading(),
            show_banner: view.error_banner.is_some(),
            error_banner: view.error_banner.as_deref().unwrap_or_default(),
            welcome_visible: view.welcome_visible,
            sign_in_attached: view.sign_in_attached,
            signed_in_visible: view.signed_in_visible,
            show_image: view.profile_image.is_some(),
            profile_image: view.profile_image.as_deref().unwrap_or_default(),
            display_name: &view.display_name,
            start_visible: view.start_visible,
            projects: &view.projects,
            entries: view.entries.as_deref().unwrap_or_default(),
        }
    }
}

/// Render the whole dashboard page
pub fn render_html(view: &DashboardView) -> crate::Result<String> {
    Ok(DashboardPage::from(view).render()?)
}

/// Render the dashboard for a terminal
pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();

    if let Some(message) = &view.error_banner {
        let _ = writeln!(out, "Error: {}", message);
    }

    if view.welcome_visible {
        let _ = writeln!(out, "Welcome! You are signed out.");
        if view.sign_in_attached {
            let _ = writeln!(out, "Sign in with an ID token to see your projects.");
        }
        return out;
    }

    let _ = writeln!(out, "Signed in as {}", view.display_name);
    if let Some(url) = &view.profile_image {
        let _ = writeln!(out, "Picture: {}", url);
    }

    if view.start_visible {
        let _ = writeln!(out, "\nProjects:");
        if view.projects.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for label in &view.projects {
            let _ = writeln!(out, "  [{}]", label);
        }
    }

    if let Some(entries) = &view.entries {
        let _ = writeln!(out, "\nEntries:\n{}", entries);
    }

    out
}
