//! Product list feature configuration.

use serde::{Deserialize, Serialize};

use wishlist_core::{DomainError, DomainResult};

use crate::kind::is_special_type;
use crate::template::ListTemplate;

/// Injected product list settings.
///
/// Deserializes from the storefront configuration JSON, e.g.
/// `{"loginRequired": true, "additionEnabled": true, "listTemplates": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductListConfig {
    pub login_required: bool,
    pub addition_enabled: bool,
    pub list_templates: Vec<ListTemplate>,
}

impl ProductListConfig {
    pub fn from_json_str(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("product list configuration: {e}")))
    }

    /// Single-list deployments: shoppers cannot add lists and exactly one
    /// template is neither saved-for-later nor request-a-quote.
    pub fn is_single_list(&self) -> bool {
        !self.addition_enabled
            && self
                .list_templates
                .iter()
                .filter(|t| !is_special_type(t.type_id.as_deref()))
                .count()
                == 1
    }

    /// First template declaring the given type id.
    pub fn template_for_type(&self, type_id: &str) -> Option<&ListTemplate> {
        self.list_templates
            .iter()
            .find(|t| t.type_id.as_deref() == Some(type_id))
    }
}
