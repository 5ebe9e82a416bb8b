//! Well-known list type and scope identifiers.

/// Type id of the "Saved For Later" list.
pub const SAVED_FOR_LATER_TYPE_ID: &str = "2";

/// Type id of the "Request a Quote" list.
pub const REQUEST_A_QUOTE_TYPE_ID: &str = "4";

/// Type given to configured templates that do not declare one.
pub const PREDEFINED_TYPE_ID: &str = "3";
pub const PREDEFINED_TYPE_NAME: &str = "predefined";

/// Scope given to configured templates that do not declare one.
pub const PRIVATE_SCOPE_ID: &str = "2";
pub const PRIVATE_SCOPE_NAME: &str = "private";

/// Saved-for-later and request-a-quote lists are kept out of the general listing.
pub fn is_special_type(type_id: Option<&str>) -> bool {
    matches!(type_id, Some(SAVED_FOR_LATER_TYPE_ID) | Some(REQUEST_A_QUOTE_TYPE_ID))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_later_and_quote_are_special() {
        assert!(is_special_type(Some("2")));
        assert!(is_special_type(Some("4")));
        assert!(!is_special_type(Some("3")));
        assert!(!is_special_type(Some("1")));
        assert!(!is_special_type(None));
    }
}
