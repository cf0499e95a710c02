use super::error_index::LineErrorIndex;

/// Pointer position in the text area's own coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPosition {
    pub x: u16,
    pub y: u16,
}

/// Maps pointer positions to document lines; implemented by the host's
/// text-rendering component.
pub trait LineLocator {
    fn line_at(&self, position: PointerPosition) -> Option<usize>;
}

/// Fixed-height rows starting at `origin_y`, scrolled by `scroll_top` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportLocator {
    pub origin_y: u16,
    pub row_height: u16,
    pub scroll_top: usize,
    pub line_count: usize,
}

impl LineLocator for ViewportLocator {
    fn line_at(&self, position: PointerPosition) -> Option<usize> {
        let rel = position.y.checked_sub(self.origin_y)?;
        let row = usize::from(rel / self.row_height.max(1));
        let line = self.scroll_top.checked_add(row)?;
        (line < self.line_count).then_some(line)
    }
}

/// Error message to show for `position`, or `None` to hide the tooltip.
pub fn tooltip_at<'a>(
    position: PointerPosition,
    locator: &dyn LineLocator,
    index: &'a LineErrorIndex,
) -> Option<&'a str> {
    let line = locator.line_at(position)?;
    index.message(line)
}
