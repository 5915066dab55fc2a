//! Blinking console cursor shown after the site title.
//!
//! The blinker knows nothing about the title animation. It flips between two
//! class names on its own period, starting visible.

/// Two-state visibility toggler.
#[derive(Debug, Clone)]
pub struct CursorBlinker {
    visible: bool,
    visible_class: String,
    hidden_class: String,
}

impl CursorBlinker {
    /// `base` is the cursor's own class; `hidden` is appended while it is off.
    pub fn new(base: &str, hidden: &str) -> Self {
        Self {
            visible: true,
            visible_class: base.to_string(),
            hidden_class: format!("{base} {hidden}"),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Class name for the current state.
    pub fn class_name(&self) -> &str {
        if self.visible {
            &self.visible_class
        } else {
            &self.hidden_class
        }
    }

    /// Flip the state and return the class name to apply.
    pub fn toggle(&mut self) -> &str {
        self.visible = !self.visible;
        self.class_name()
    }
}
