#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! The host toolkit translates its native input into these types before
//! handing it to a list box. All events derive `Clone`, `PartialEq`, and `Eq`
//! for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Mouse coordinates are pixels relative to the receiving widget's
//!   top-left corner and may be negative while a drag leaves the widget
//! - `KeyEventKind` defaults to `Press` when the host can't tell
//! - `Modifiers` use bitflags for easy combination
//! - A context-menu click is signalled with [`Modifiers::POPUP`], which the
//!   host sets for right clicks (and ctrl-clicks on platforms that use them)

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A mouse event.
    Mouse(MouseEvent),

    /// The widget was resized.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },

    /// Focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Check if the platform command modifier (Ctrl or Cmd) is held.
    #[must_use]
    pub const fn command(&self) -> bool {
        self.modifiers.is_command()
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Delete key.
    Delete,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Function key (F1-F24).
    F(u8),
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys (and the context-menu trigger) held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0_0000;
        /// Shift key.
        const SHIFT = 0b0_0001;
        /// Alt/Option key.
        const ALT   = 0b0_0010;
        /// Control key.
        const CTRL  = 0b0_0100;
        /// Super/Meta/Command key.
        const SUPER = 0b0_1000;
        /// The click should open a context menu.
        const POPUP = 0b1_0000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

impl Modifiers {
    /// Whether the platform command modifier (Ctrl or Cmd) is held.
    #[must_use]
    pub const fn is_command(self) -> bool {
        self.intersects(Self::CTRL.union(Self::SUPER))
    }

    /// Whether Shift is held.
    #[must_use]
    pub const fn is_shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    /// Whether this is a context-menu click.
    #[must_use]
    pub const fn is_popup_menu(self) -> bool {
        self.contains(Self::POPUP)
    }
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The type of mouse event.
    pub kind: MouseEventKind,

    /// X coordinate in pixels, relative to the widget.
    pub x: i32,

    /// Y coordinate in pixels, relative to the widget.
    pub y: i32,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event.
    ///
    /// A right-button press or release carries [`Modifiers::POPUP`].
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: i32, y: i32) -> Self {
        let modifiers = match kind {
            MouseEventKind::Down(MouseButton::Right) | MouseEventKind::Up(MouseButton::Right) => {
                Modifiers::POPUP
            }
            _ => Modifiers::NONE,
        };
        Self {
            kind,
            x,
            y,
            modifiers,
        }
    }

    /// Add modifiers to the event.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// The type of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Mouse button pressed down.
    Down(MouseButton),

    /// Mouse button released.
    Up(MouseButton),

    /// Mouse dragged while button held, past the host's drag threshold.
    Drag(MouseButton),

    /// Second press of a double click.
    DoubleClick(MouseButton),

    /// Mouse moved (no button pressed).
    Moved,

    /// Mouse left the widget.
    Exit,

    /// Mouse wheel scrolled up.
    ScrollUp,

    /// Mouse wheel scrolled down.
    ScrollDown,

    /// Mouse wheel scrolled left (horizontal scroll).
    ScrollLeft,

    /// Mouse wheel scrolled right (horizontal scroll).
    ScrollRight,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,

    /// Right mouse button.
    Right,

    /// Middle mouse button (scroll wheel click).
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_is_char() {
        let event = KeyEvent::new(KeyCode::Char('a'));
        assert!(event.is_char('a'));
        assert!(!event.is_char('x'));
    }

    #[test]
    fn key_event_command_accepts_ctrl_or_super() {
        let ctrl = KeyEvent::new(KeyCode::Char('a')).with_modifiers(Modifiers::CTRL);
        let cmd = KeyEvent::new(KeyCode::Char('a')).with_modifiers(Modifiers::SUPER);
        let alt = KeyEvent::new(KeyCode::Char('a')).with_modifiers(Modifiers::ALT);
        assert!(ctrl.command());
        assert!(cmd.command());
        assert!(!alt.command());
    }

    #[test]
    fn key_event_combined_modifiers() {
        let event = KeyEvent::new(KeyCode::Home).with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        assert!(event.command());
        assert!(event.shift());
    }

    #[test]
    fn key_event_kind() {
        let press = KeyEvent::new(KeyCode::Enter);
        assert_eq!(press.kind, KeyEventKind::Press);

        let release = press.with_kind(KeyEventKind::Release);
        assert_eq!(release.kind, KeyEventKind::Release);
    }

    #[test]
    fn right_button_carries_popup() {
        let down = MouseEvent::new(MouseEventKind::Down(MouseButton::Right), 3, 4);
        assert!(down.modifiers.is_popup_menu());

        let left = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 3, 4);
        assert!(!left.modifiers.is_popup_menu());
    }

    #[test]
    fn with_modifiers_keeps_popup() {
        let event = MouseEvent::new(MouseEventKind::Down(MouseButton::Right), 0, 0)
            .with_modifiers(Modifiers::SHIFT);
        assert!(event.modifiers.is_popup_menu());
        assert!(event.modifiers.is_shift());
    }

    #[test]
    fn mouse_event_position_may_be_negative() {
        let event = MouseEvent::new(MouseEventKind::Drag(MouseButton::Left), -5, 20);
        assert_eq!(event.position(), (-5, 20));
    }

    #[test]
    fn modifiers_default() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert!(!Modifiers::NONE.is_command());
    }

    #[test]
    fn event_is_clone_and_eq() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('x')));
        let cloned = event.clone();
        assert_eq!(event, cloned);
        let _resize = Event::Resize {
            width: 100,
            height: 40,
        };
        let _focus = Event::Focus(true);
    }
}
