//! Keyboard routing rules shared by the hosts.

/// Whether a key event aimed at this element belongs to the element.
///
/// Text fields, selects and contenteditable regions keep their keystrokes;
/// shortcuts only fire elsewhere on the page. `tag_name` is the DOM
/// `Element.tagName` (uppercase for HTML elements).
pub fn is_text_entry(tag_name: &str, content_editable: bool) -> bool {
    content_editable
        || ["INPUT", "TEXTAREA", "SELECT"]
            .iter()
            .any(|tag| tag_name.eq_ignore_ascii_case(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_keep_keys() {
        assert!(is_text_entry("INPUT", false));
        assert!(is_text_entry("TEXTAREA", false));
        assert!(is_text_entry("SELECT", false));
        assert!(is_text_entry("input", false));
    }

    #[test]
    fn test_content_editable_keeps_keys() {
        assert!(is_text_entry("DIV", true));
    }

    #[test]
    fn test_other_elements_get_shortcuts() {
        assert!(!is_text_entry("BODY", false));
        assert!(!is_text_entry("CANVAS", false));
        assert!(!is_text_entry("BUTTON", false));
    }
}
