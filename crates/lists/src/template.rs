//! Configuration-defined list templates.
//!
//! Templates guarantee that predefined lists (e.g. "Saved For Later") show up for
//! a shopper even before a record has been stored for them.

use serde::{Deserialize, Deserializer, Serialize};

use crate::kind::{PREDEFINED_TYPE_ID, PREDEFINED_TYPE_NAME, PRIVATE_SCOPE_ID, PRIVATE_SCOPE_NAME};

/// Static fallback list descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListTemplate {
    #[serde(deserialize_with = "lenient_id")]
    pub template_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_id")]
    pub scope_id: Option<String>,
    pub scope_name: Option<String>,
    #[serde(deserialize_with = "lenient_id")]
    pub type_id: Option<String>,
    pub type_name: Option<String>,
}

impl ListTemplate {
    /// A template can stand in for a stored list only with both an id and a name.
    pub fn is_well_formed(&self) -> bool {
        non_empty(&self.template_id) && non_empty(&self.name)
    }

    /// Defaults applied when a special-type lookup falls back to this template.
    ///
    /// The scope id reuses the looked-up type id.
    pub fn with_lookup_defaults(mut self, type_id: &str) -> Self {
        if !non_empty(&self.scope_id) {
            self.scope_id = Some(type_id.to_string());
            self.scope_name = Some(PRIVATE_SCOPE_NAME.to_string());
        }
        if !non_empty(&self.description) {
            self.description = Some(String::new());
        }
        self
    }

    /// Defaults applied when the template is synthesized into the general listing.
    pub fn with_listing_defaults(mut self) -> Self {
        if !non_empty(&self.scope_id) {
            self.scope_id = Some(PRIVATE_SCOPE_ID.to_string());
            self.scope_name = Some(PRIVATE_SCOPE_NAME.to_string());
        }
        if !non_empty(&self.description) {
            self.description = Some(String::new());
        }
        if !non_empty(&self.type_id) {
            self.type_id = Some(PREDEFINED_TYPE_ID.to_string());
            self.type_name = Some(PREDEFINED_TYPE_NAME.to_string());
        }
        self
    }
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Accepts ids written either as JSON strings or numbers; numbers are kept as
/// their decimal text so they compare equal to ids read back from the store.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}
