//! Project aggregate.

use serde::Serialize;

use crate::domain::foundation::{
    optional_text, required_text, Entity, LocationId, ProjectId, ValidationError,
    MAX_TEXT_LENGTH,
};

/// Longest project description accepted.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Stored project snapshot.
pub type Project = Entity<ProjectId, ProjectData>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    name: String,
    description: Option<String>,
    location: Option<LocationId>,
}

impl ProjectData {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        location: Option<LocationId>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", name, MAX_TEXT_LENGTH)?,
            description: optional_text("description", description, MAX_DESCRIPTION_LENGTH)?,
            location,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn location(&self) -> Option<LocationId> {
        self.location
    }
}
