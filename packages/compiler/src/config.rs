//! Compiler configuration

use serde::{Deserialize, Serialize};

/// Shape of the generated program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputFormat {
    /// A standalone `function tmpl(...) {}` declaration.
    Function,
    /// An ES module exporting the render function by default.
    #[default]
    Module,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    /// Name of the generated render function.
    pub name: String,
    pub format: OutputFormat,
    /// Route fragment-only URLs (`href="#foo"`) through the scoped fragment id primitive.
    pub scope_fragment_id: bool,
    /// Handled by the packaging layer; reported back on the compiled template untouched.
    pub enable_static_content_optimization: bool,
    pub preserve_comments: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            name: "tmpl".to_string(),
            format: OutputFormat::Module,
            scope_fragment_id: false,
            enable_static_content_optimization: true,
            preserve_comments: false,
        }
    }
}

impl CompilerConfig {
    pub fn function() -> Self {
        CompilerConfig {
            format: OutputFormat::Function,
            ..Default::default()
        }
    }
}
