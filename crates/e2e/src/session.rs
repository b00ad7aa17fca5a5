//! UI vocabulary of the erpweb client
//!
//! Encodes how the web client's document windows are reached and how its
//! form widgets are driven: text fields and checkboxes are addressed by
//! field name, lookups type into the field and pick the first suggestion,
//! and a document is saved by leaving edit mode and waiting for the
//! saved indicator.

use crate::browser::UiStep;

/// Opaque window tokens of the masterdata windows
pub mod window {
    /// Product window
    pub const PRODUCT: &str = "140";

    /// Product category window
    pub const PRODUCT_CATEGORY: &str = "144";

    /// Bill of material window
    pub const BILL_OF_MATERIAL: &str = "285";
}

/// How long a field widget gets to react before the step fails
pub const FIELD_TIMEOUT_MS: u64 = 10_000;

/// How long a document save gets before the step fails
pub const SAVE_TIMEOUT_MS: u64 = 30_000;

fn field_selector(field: &str) -> String {
    format!(".form-field-{field} input")
}

/// Steps that sign a fresh browser session in
///
/// Window navigation requires an authenticated session, so every
/// compiled scenario starts with these.
pub fn login(user: &str, password: &str) -> Vec<UiStep> {
    vec![
        UiStep::Navigate {
            path: "/login".to_string(),
            wait_for: Some("input[name=\"username\"]".to_string()),
        },
        UiStep::Fill {
            selector: "input[name=\"username\"]".to_string(),
            value: user.to_string(),
        },
        UiStep::Fill {
            selector: "input[name=\"password\"]".to_string(),
            value: password.to_string(),
        },
        UiStep::Click {
            selector: "button[type=\"submit\"]".to_string(),
            timeout_ms: FIELD_TIMEOUT_MS,
        },
        UiStep::WaitFor {
            selector: ".header-container".to_string(),
            timeout_ms: SAVE_TIMEOUT_MS,
        },
    ]
}

/// Navigate to a document window's list view
pub fn visit_window(window_id: &str) -> Vec<UiStep> {
    vec![UiStep::Navigate {
        path: format!("/window/{window_id}"),
        wait_for: Some(".document-list".to_string()),
    }]
}

/// Open a fresh document in a window
pub fn new_document(window_id: &str) -> Vec<UiStep> {
    vec![UiStep::Navigate {
        path: format!("/window/{window_id}/new"),
        wait_for: Some(".document-form".to_string()),
    }]
}

/// Fill a plain text field by field name
pub fn fill_field(field: &str, value: &str) -> Vec<UiStep> {
    vec![UiStep::Fill {
        selector: field_selector(field),
        value: value.to_string(),
    }]
}

/// Fill a lookup field and pick the first suggestion
pub fn fill_lookup(field: &str, value: &str) -> Vec<UiStep> {
    vec![
        UiStep::Fill {
            selector: field_selector(field),
            value: value.to_string(),
        },
        UiStep::WaitFor {
            selector: ".input-dropdown-list-option".to_string(),
            timeout_ms: FIELD_TIMEOUT_MS,
        },
        UiStep::Click {
            selector: ".input-dropdown-list-option".to_string(),
            timeout_ms: FIELD_TIMEOUT_MS,
        },
    ]
}

/// Force a named checkbox into a known state
pub fn set_flag(field: &str, on: bool) -> Vec<UiStep> {
    vec![UiStep::SetChecked {
        selector: format!(".form-field-{field} input[type=\"checkbox\"]"),
        checked: on,
    }]
}

/// Leave edit mode and wait for the document to report itself saved
pub fn save_document() -> Vec<UiStep> {
    vec![
        UiStep::Press {
            key: "Escape".to_string(),
        },
        UiStep::WaitFor {
            selector: ".indicator-saved".to_string(),
            timeout_ms: SAVE_TIMEOUT_MS,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_navigates_before_filling() {
        let steps = login("demo", "secret");
        assert!(matches!(&steps[0], UiStep::Navigate { path, .. } if path == "/login"));
        assert!(steps
            .iter()
            .any(|s| matches!(s, UiStep::Fill { value, .. } if value == "secret")));
        // ends with the app shell check
        assert!(matches!(steps.last(), Some(UiStep::WaitFor { .. })));
    }

    #[test]
    fn new_document_targets_the_window() {
        let steps = new_document(window::PRODUCT);
        assert!(matches!(&steps[0], UiStep::Navigate { path, .. } if path == "/window/140/new"));
    }

    #[test]
    fn lookup_fills_then_picks_first_suggestion() {
        let steps = fill_lookup("ProductCategory", "Standard_Standard Category");
        assert_eq!(steps.len(), 3);
        assert!(matches!(&steps[0], UiStep::Fill { selector, .. }
            if selector == ".form-field-ProductCategory input"));
        assert!(matches!(&steps[2], UiStep::Click { selector, .. }
            if selector == ".input-dropdown-list-option"));
    }

    #[test]
    fn flags_address_the_checkbox_input() {
        let steps = set_flag("Stocked", false);
        assert!(matches!(&steps[0], UiStep::SetChecked { selector, checked }
            if selector == ".form-field-Stocked input[type=\"checkbox\"]" && !checked));
    }
}
