//! Free-text column filter, matched as a case-insensitive substring

/// Text typed into a column's filter-row box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFilter {
    text: String,
    /// Trimmed, lowercased `text`
    needle: String,
}

impl TextFilter {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the typed text. Returns whether matching changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        self.text = text.into();
        let needle = self.text.trim().to_lowercase();
        if needle == self.needle {
            return false;
        }
        self.needle = needle;
        true
    }

    /// Active while the trimmed text is not empty
    pub fn is_filter_active(&self) -> bool {
        !self.needle.is_empty()
    }

    pub fn does_filter_pass(&self, value: &str) -> bool {
        !self.is_filter_active() || value.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_passes_everything() {
        let filter = TextFilter::default();
        assert!(!filter.is_filter_active());
        assert!(filter.does_filter_pass(""));
        assert!(filter.does_filter_pass("Portal 2"));
    }

    #[test]
    fn test_matching_ignores_case_and_surrounding_space() {
        let mut filter = TextFilter::default();
        assert!(filter.set_text("  PORTAL "));
        assert!(filter.is_filter_active());
        assert!(filter.does_filter_pass("Portal 2"));
        assert!(filter.does_filter_pass("the portal"));
        assert!(!filter.does_filter_pass("Celeste"));
        assert_eq!(filter.text(), "  PORTAL ");
    }

    #[test]
    fn test_set_text_reports_only_matching_changes() {
        let mut filter = TextFilter::default();
        assert!(filter.set_text("cel"));
        assert!(!filter.set_text("CEL "));
        assert!(filter.set_text("celeste"));
        assert!(filter.set_text("   "));
        assert!(!filter.is_filter_active());
    }
}
