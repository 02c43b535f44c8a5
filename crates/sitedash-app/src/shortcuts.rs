//! Keyboard bindings for dashboard customization.

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Move the dragged widget one slot earlier.
    StepBackward,
    /// Move the dragged widget one slot later.
    StepForward,
    /// Pick up the focused widget, or drop the dragged one.
    PickUpOrDrop,
    /// End the drag, keeping moves already made.
    Cancel,
    ToggleEditMode,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub action: KeyAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, action: KeyAction, description: &'static str) -> Self {
        Self {
            key,
            action,
            description,
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("ArrowLeft", KeyAction::StepBackward, "Move widget earlier"),
            Shortcut::new("ArrowUp", KeyAction::StepBackward, "Move widget earlier"),
            Shortcut::new("ArrowRight", KeyAction::StepForward, "Move widget later"),
            Shortcut::new("ArrowDown", KeyAction::StepForward, "Move widget later"),
            Shortcut::new("Space", KeyAction::PickUpOrDrop, "Pick up or drop the focused widget"),
            Shortcut::new("Enter", KeyAction::PickUpOrDrop, "Pick up or drop the focused widget"),
            Shortcut::new("Escape", KeyAction::Cancel, "Stop dragging"),
            Shortcut::new("E", KeyAction::ToggleEditMode, "Toggle customize mode"),
        ]
    }

    /// Action bound to a key name. Letters match case-insensitively and
    /// `" "` is accepted for Space.
    pub fn action_for(key: &str) -> Option<KeyAction> {
        let key = if key == " " { "Space" } else { key };
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.key.eq_ignore_ascii_case(key))
            .map(|shortcut| shortcut.action)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:12} {}", shortcut.key, shortcut.description);
        }
        println!();
    }
}
