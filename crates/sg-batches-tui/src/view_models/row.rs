//! Display-ready list rows
//!
//! Both screens render through the same row shape. The projection from
//! domain records happens up front, so the render pass and the filter only
//! ever see plain text and styles.

use ratatui::style::Color;

/// Icon shown in the state column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Circle,
    Check,
    XCircle,
    Document,
    Exclamation,
    Clock,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Circle => "○",
            Icon::Check => "✓",
            Icon::XCircle => "✗",
            Icon::Document => "▤",
            Icon::Exclamation => "!",
            Icon::Clock => "◷",
        }
    }
}

/// Color applied to a row's icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    #[default]
    Plain,
    Green,
    Red,
    Purple,
}

impl Tint {
    pub fn color(&self) -> Color {
        match self {
            Tint::Plain => Color::Reset,
            Tint::Green => Color::Green,
            Tint::Red => Color::Red,
            Tint::Purple => Color::Magenta,
        }
    }
}

/// Row-scoped actions beyond opening the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Publish,
    Retry,
}

/// One display-ready row of either list screen.
#[derive(Debug, Clone)]
pub struct ListRow {
    /// Stable id of the underlying record, used to map the cursor back to
    /// the domain object after filtering.
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub icon: Icon,
    pub tint: Tint,
    /// Right-aligned counts column, for items that carry counts.
    pub accessory: Option<String>,
    /// Extra strings the filter matches besides title and subtitle.
    pub keywords: Vec<String>,
    /// Extra actions available on this row.
    pub actions: Vec<RowAction>,
    /// Absolute URL opened on Enter and shown on y.
    pub url: String,
}

impl ListRow {
    /// Case-insensitive substring match against title, subtitle and
    /// keywords. The empty needle matches everything.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.subtitle.to_lowercase().contains(&needle)
            || self
                .keywords
                .iter()
                .any(|keyword| keyword.to_lowercase().contains(&needle))
    }

    pub fn has_action(&self, action: RowAction) -> bool {
        self.actions.contains(&action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ListRow {
        ListRow {
            id: "id-1".to_string(),
            title: "alice / update-ci-images".to_string(),
            subtitle: "by Alice Doe, updated 2h ago".to_string(),
            icon: Icon::Circle,
            tint: Tint::Green,
            accessory: None,
            keywords: vec!["open".to_string()],
            actions: vec![RowAction::Retry],
            url: "https://sourcegraph.example/x".to_string(),
        }
    }

    #[test]
    fn test_matches_title_subtitle_and_keywords() {
        let row = row();
        assert!(row.matches(""));
        assert!(row.matches("CI-IMAGES"));
        assert!(row.matches("alice doe"));
        assert!(row.matches("OPEN"));
        assert!(!row.matches("merged"));
    }

    #[test]
    fn test_has_action() {
        let row = row();
        assert!(row.has_action(RowAction::Retry));
        assert!(!row.has_action(RowAction::Publish));
    }
}
