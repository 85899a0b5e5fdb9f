use serde::{Deserialize, Serialize};

/// A project as stored by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub project_name: String,
    pub id: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub users: Vec<String>,
}

impl Project {
    pub fn to_ref(&self) -> ProjectRef {
        ProjectRef {
            name: self.project_name.clone(),
            project_id: self.id.clone(),
        }
    }
}

/// A (name, opaque ID) pair remembered locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectRef {
    pub name: String,
    pub project_id: String,
}

impl std::fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' ({})", self.name, self.project_id)
    }
}
