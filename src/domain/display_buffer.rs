//! Append-only display buffer with an auto-scrolling viewport.
//!
//! [`DisplayBuffer`] accumulates streamed output exactly as received. It is
//! never truncated or reset: the only mutation is [`DisplayBuffer::append`],
//! which also moves the [`Viewport`] to the newest content.

/// Window over the buffer, measured in lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    height: usize,
    scroll_top: usize,
}

impl Viewport {
    /// Creates a viewport showing `height` lines, scrolled to the top.
    #[must_use]
    pub const fn new(height: usize) -> Self {
        Self {
            height,
            scroll_top: 0,
        }
    }

    /// Index of the first visible line.
    #[must_use]
    pub const fn scroll_top(&self) -> usize {
        self.scroll_top
    }
}

/// Accumulated console output owned by the UI bridge.
#[derive(Debug, Clone)]
pub struct DisplayBuffer {
    text: String,
    newlines: usize,
    viewport: Viewport,
}

impl DisplayBuffer {
    /// Creates an empty buffer whose viewport shows `viewport_height` lines.
    #[must_use]
    pub fn new(viewport_height: usize) -> Self {
        Self {
            text: String::new(),
            newlines: 0,
            viewport: Viewport::new(viewport_height),
        }
    }

    /// Appends `fragment` verbatim and scrolls the viewport to the end.
    ///
    /// No size limit is applied.
    pub fn append(&mut self, fragment: &str) {
        self.text.push_str(fragment);
        self.newlines += fragment.bytes().filter(|b| *b == b'\n').count();
        self.scroll_to_end();
    }

    /// Returns the full buffer contents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the buffer in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if nothing has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines, counting a trailing unterminated line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        if self.text.is_empty() || self.text.ends_with('\n') {
            self.newlines
        } else {
            self.newlines + 1
        }
    }

    /// Largest valid scroll position: the first line of the last full page.
    #[must_use]
    pub fn max_scroll(&self) -> usize {
        self.line_count().saturating_sub(self.viewport.height)
    }

    /// Returns `true` when the newest content is visible.
    #[must_use]
    pub fn is_scrolled_to_end(&self) -> bool {
        self.viewport.scroll_top == self.max_scroll()
    }

    /// Current viewport.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to_end(&mut self) {
        self.viewport.scroll_top = self.max_scroll();
    }
}
