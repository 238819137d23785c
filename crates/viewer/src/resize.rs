//! Drag-resizing of the pattern info modal.
//!
//! While the resizer is held, a full-screen cover is shown so fast drags keep
//! delivering move events; releasing anywhere ends the drag.

/// Space kept for the resizer handle itself.
pub const HANDLE_OFFSET: i32 = 32;

/// Height of the modal for a cursor at `client_y` in a window `inner_height`
/// pixels tall.
pub fn panel_height(inner_height: i32, client_y: i32) -> i32 {
    inner_height - client_y + HANDLE_OFFSET
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalResizer {
    dragging: bool,
    height: Option<i32>,
}

impl ModalResizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mouse_down(&mut self) {
        self.dragging = true;
    }

    /// Returns the new modal height while dragging.
    pub fn mouse_move(&mut self, inner_height: i32, client_y: i32) -> Option<i32> {
        if !self.dragging {
            return None;
        }
        let height = panel_height(inner_height, client_y);
        self.height = Some(height);
        Some(height)
    }

    pub fn mouse_up(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The cover is shown exactly while dragging.
    pub fn cover_visible(&self) -> bool {
        self.dragging
    }

    /// Last height set by a drag, as a CSS length.
    pub fn height_css(&self) -> Option<String> {
        self.height.map(|h| format!("{}px", h))
    }
}
