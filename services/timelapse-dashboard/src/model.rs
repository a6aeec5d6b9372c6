//! Records consumed from the identity provider and the backend

use serde::{Deserialize, Serialize};

/// Label shown for a project with neither a name nor a description
pub const UNNAMED_PROJECT: &str = "Unnamed project";

/// User display data as returned by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub email: Option<String>,
}

/// A project as returned by `GET /projects`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Project {
    /// Button label: name, else description, else [`UNNAMED_PROJECT`].
    /// Empty strings count as missing.
    pub fn label(&self) -> &str {
        non_empty(&self.name)
            .or_else(|| non_empty(&self.description))
            .unwrap_or(UNNAMED_PROJECT)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Parse the body of `GET /projects`, keeping backend order
pub fn parse_projects(body: &serde_json::Value) -> crate::Result<Vec<Project>> {
    Ok(Vec::<Project>::deserialize(body)?)
}
