//! Rendering options.

/// Default host image scaling mode.
pub const DEFAULT_IMAGE_MODE: &str = "widthFix";

/// Default link target.
pub const DEFAULT_LINK_TARGET: &str = "_blank";

/// Options controlling how recognized constructs are spelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Add inline border styles to tables and their cells.
    pub table_borders: bool,
    /// Render single line breaks inside a chunk as break elements.
    /// When disabled, a plain `\n` is kept instead.
    pub hard_breaks: bool,
    /// Scaling mode attribute for images.
    pub image_mode: String,
    /// Target attribute for links, omitted when `None`.
    pub link_target: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            table_borders: true,
            hard_breaks: true,
            image_mode: DEFAULT_IMAGE_MODE.to_owned(),
            link_target: Some(DEFAULT_LINK_TARGET.to_owned()),
        }
    }
}
