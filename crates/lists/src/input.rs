use serde::{Deserialize, Serialize};

use crate::template::lenient_id;

/// Caller-supplied fields for `create`/`update`.
///
/// Empty strings are treated like absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductListData {
    #[serde(deserialize_with = "lenient_id")]
    pub template_id: Option<String>,
    #[serde(deserialize_with = "lenient_id")]
    pub scope_id: Option<String>,
    #[serde(deserialize_with = "lenient_id")]
    pub type_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProductListData {
    pub fn template_id(&self) -> Option<&str> {
        present(&self.template_id)
    }

    pub fn scope_id(&self) -> Option<&str> {
        present(&self.scope_id)
    }

    pub fn type_id(&self) -> Option<&str> {
        present(&self.type_id)
    }

    pub fn name(&self) -> Option<&str> {
        present(&self.name)
    }

    pub fn description(&self) -> Option<&str> {
        present(&self.description)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
