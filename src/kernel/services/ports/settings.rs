use serde::{Deserialize, Serialize};

use super::config::CheckConfig;
use crate::kernel::editor::HighlightKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub check: CheckConfig,
    #[serde(default)]
    pub theme: ThemeSettings,
}

/// Colors as `#RRGGBB` or a named ANSI color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_underline: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            keyword_fg: Some("#569CD6".to_string()),
            comment_fg: Some("#6A9955".to_string()),
            string_fg: Some("#CE9178".to_string()),
            number_fg: Some("#B5CEA8".to_string()),
            function_fg: Some("#DCDCAA".to_string()),
            error_underline: Some("red".to_string()),
        }
    }
}

impl ThemeSettings {
    pub fn color_for(&self, kind: HighlightKind) -> Option<&str> {
        let value = match kind {
            HighlightKind::Keyword => &self.keyword_fg,
            HighlightKind::Comment => &self.comment_fg,
            HighlightKind::String => &self.string_fg,
            HighlightKind::Number => &self.number_fg,
            HighlightKind::Function => &self.function_fg,
            HighlightKind::ErrorUnderline => &self.error_underline,
        };
        value.as_deref()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
