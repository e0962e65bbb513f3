/// Device-independent navigation intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SemanticAction {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    Menu,
    View,
    PageLeft,
    PageRight,
}

impl SemanticAction {
    pub const fn direction(self) -> Option<Direction> {
        match self {
            SemanticAction::Up => Some(Direction::Up),
            SemanticAction::Down => Some(Direction::Down),
            SemanticAction::Left => Some(Direction::Left),
            SemanticAction::Right => Some(Direction::Right),
            _ => None,
        }
    }

    /// The native key a controller action is bridged to, if any.
    pub const fn bridge_key(self) -> Option<NavKey> {
        match self {
            SemanticAction::Up => Some(NavKey::ArrowUp),
            SemanticAction::Down => Some(NavKey::ArrowDown),
            SemanticAction::Left => Some(NavKey::ArrowLeft),
            SemanticAction::Right => Some(NavKey::ArrowRight),
            SemanticAction::Confirm => Some(NavKey::Enter),
            SemanticAction::Cancel => Some(NavKey::Escape),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The subset of keys the traversal primitive understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Escape,
}

impl NavKey {
    pub fn from_egui(key: eframe::egui::Key) -> Option<Self> {
        use eframe::egui::Key;
        match key {
            Key::ArrowUp => Some(NavKey::ArrowUp),
            Key::ArrowDown => Some(NavKey::ArrowDown),
            Key::ArrowLeft => Some(NavKey::ArrowLeft),
            Key::ArrowRight => Some(NavKey::ArrowRight),
            Key::Enter => Some(NavKey::Enter),
            Key::Escape => Some(NavKey::Escape),
            _ => None,
        }
    }

    pub const fn action(self) -> SemanticAction {
        match self {
            NavKey::ArrowUp => SemanticAction::Up,
            NavKey::ArrowDown => SemanticAction::Down,
            NavKey::ArrowLeft => SemanticAction::Left,
            NavKey::ArrowRight => SemanticAction::Right,
            NavKey::Enter => SemanticAction::Confirm,
            NavKey::Escape => SemanticAction::Cancel,
        }
    }

    pub const fn direction(self) -> Option<Direction> {
        self.action().direction()
    }
}

/// Where a key event delivered to the navigator came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOrigin {
    /// A genuine device key-down, delivered exactly once.
    Native,
    /// Generated by the controller bridge.
    Bridged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavKeyEvent {
    pub key: NavKey,
    pub origin: KeyOrigin,
}

impl NavKeyEvent {
    pub const fn native(key: NavKey) -> Self {
        Self {
            key,
            origin: KeyOrigin::Native,
        }
    }

    pub const fn bridged(key: NavKey) -> Self {
        Self {
            key,
            origin: KeyOrigin::Bridged,
        }
    }
}

/// A classified action tagged with how the navigator learns about it.
///
/// Keyboard actions are `Native`: the key-down that produced them is already
/// delivered to the navigator. Controller actions are `Bridged`: the engine
/// must synthesize the key event itself. Keeping these as separate variants
/// means the bridge can never run for keyboard input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionEvent {
    Native(SemanticAction),
    Bridged(SemanticAction),
}

impl ActionEvent {
    pub const fn action(self) -> SemanticAction {
        match self {
            ActionEvent::Native(action) | ActionEvent::Bridged(action) => action,
        }
    }

    /// The synthesized key event for bridged actions.
    pub const fn bridge_event(self) -> Option<NavKeyEvent> {
        match self {
            ActionEvent::Native(_) => None,
            ActionEvent::Bridged(action) => match action.bridge_key() {
                Some(key) => Some(NavKeyEvent::bridged(key)),
                None => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_actions_never_bridge() {
        for key in [
            NavKey::ArrowUp,
            NavKey::ArrowDown,
            NavKey::ArrowLeft,
            NavKey::ArrowRight,
            NavKey::Enter,
            NavKey::Escape,
        ] {
            assert_eq!(ActionEvent::Native(key.action()).bridge_event(), None);
            assert_eq!(
                ActionEvent::Bridged(key.action()).bridge_event(),
                Some(NavKeyEvent::bridged(key))
            );
        }
    }

    #[test]
    fn shoulder_and_menu_actions_have_no_key() {
        for action in [
            SemanticAction::Menu,
            SemanticAction::View,
            SemanticAction::PageLeft,
            SemanticAction::PageRight,
        ] {
            assert_eq!(ActionEvent::Bridged(action).bridge_event(), None);
        }
    }

    #[test]
    fn maps_egui_keys() {
        use eframe::egui::Key;
        assert_eq!(NavKey::from_egui(Key::Enter), Some(NavKey::Enter));
        assert_eq!(NavKey::from_egui(Key::ArrowLeft), Some(NavKey::ArrowLeft));
        assert_eq!(NavKey::from_egui(Key::A), None);
    }
}
