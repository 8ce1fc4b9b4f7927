//! Extension configuration.
//!
//! The host page's structure is fixed and not designed here, so the
//! defaults carry the names it uses. A JSON override may replace any of
//! them; missing fields keep their defaults.

use serde::Deserialize;
use smol_str::SmolStr;

use crate::error::ConfigError;

/// Class names, attributes and selectors of the host page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageSelectors {
    /// Class of the cell holding one rendered line of code.
    pub line_class: SmolStr,
    /// Class added to a row once it is known to be part of a comment.
    pub comment_class: SmolStr,
    /// Class of a collapsed placeholder row.
    pub placeholder_class: SmolStr,
    /// Attribute marking a placeholder row, carrying the block start index.
    pub placeholder_attr: SmolStr,
    /// Class of the page-wide toggle button.
    pub button_class: SmolStr,
    /// Selector of the navigation element the button is inserted after.
    pub nav_selector: SmolStr,
    /// Id of the container the host page swaps on in-page navigation.
    pub container_id: SmolStr,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            line_class: SmolStr::new_static("blob-code"),
            comment_class: SmolStr::new_static("blob-expanded"),
            placeholder_class: SmolStr::new_static("js-expandable-line"),
            placeholder_attr: SmolStr::new_static("data-position"),
            button_class: SmolStr::new_static("toggle-comment-btn"),
            nav_selector: SmolStr::new_static(".file-navigation .breadcrumb"),
            container_id: SmolStr::new_static("js-repo-pjax-container"),
        }
    }
}

/// Top-level extension settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtensionConfig {
    /// Whether comments start collapsed on the first render.
    pub start_hidden: bool,
    /// Text of the page-wide toggle button.
    pub button_label: SmolStr,
    pub selectors: PageSelectors,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            start_hidden: true,
            button_label: SmolStr::new_static("Toggle Comments"),
            selectors: PageSelectors::default(),
        }
    }
}

impl ExtensionConfig {
    /// Parse a configuration override from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty names, which would match every element or none.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.selectors;
        let fields = [
            ("lineClass", &s.line_class),
            ("commentClass", &s.comment_class),
            ("placeholderClass", &s.placeholder_class),
            ("placeholderAttr", &s.placeholder_attr),
            ("buttonClass", &s.button_class),
            ("navSelector", &s.nav_selector),
            ("containerId", &s.container_id),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(name));
            }
        }
        Ok(())
    }
}
