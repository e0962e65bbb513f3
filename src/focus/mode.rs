use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// The device family currently driving the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputMode {
    Pointer,
    Keyboard,
    Controller,
}

impl InputMode {
    const fn to_raw(self) -> u8 {
        match self {
            InputMode::Pointer => 0,
            InputMode::Keyboard => 1,
            InputMode::Controller => 2,
        }
    }

    const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => InputMode::Keyboard,
            2 => InputMode::Controller,
            _ => InputMode::Pointer,
        }
    }

    /// Presentational tag mirrored for styling consumers.
    pub const fn tag(self) -> &'static str {
        match self {
            InputMode::Pointer => "intent-pointer",
            InputMode::Keyboard => "intent-keyboard",
            InputMode::Controller => "intent-controller",
        }
    }

    /// Whether leaves may paint a focus ring in this mode.
    pub const fn shows_focus_ring(self) -> bool {
        !matches!(self, InputMode::Pointer)
    }
}

/// Read-only view of the authoritative input mode. Cheap to clone and hand to
/// anything that renders.
#[derive(Clone, Debug)]
pub struct ModeHandle {
    cell: Arc<AtomicU8>,
}

impl ModeHandle {
    #[must_use]
    pub fn get(&self) -> InputMode {
        InputMode::from_raw(self.cell.load(Ordering::SeqCst))
    }
}

/// The only writer of the input mode; owned by the classifier.
#[derive(Debug)]
pub(crate) struct ModeWriter {
    cell: Arc<AtomicU8>,
    tag: &'static str,
}

impl ModeWriter {
    pub(crate) fn new(initial: InputMode) -> Self {
        Self {
            cell: Arc::new(AtomicU8::new(initial.to_raw())),
            tag: initial.tag(),
        }
    }

    pub(crate) fn handle(&self) -> ModeHandle {
        ModeHandle {
            cell: self.cell.clone(),
        }
    }

    pub(crate) fn get(&self) -> InputMode {
        InputMode::from_raw(self.cell.load(Ordering::SeqCst))
    }

    /// Returns `true` when the stored mode actually changed.
    pub(crate) fn set(&mut self, mode: InputMode) -> bool {
        let previous = self.cell.swap(mode.to_raw(), Ordering::SeqCst);
        if previous == mode.to_raw() {
            return false;
        }
        self.tag = mode.tag();
        true
    }

    pub(crate) fn tag(&self) -> &'static str {
        self.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_observe_writer_updates() {
        let mut writer = ModeWriter::new(InputMode::Pointer);
        let handle = writer.handle();
        assert_eq!(handle.get(), InputMode::Pointer);

        assert!(writer.set(InputMode::Controller));
        assert_eq!(handle.get(), InputMode::Controller);
        assert_eq!(writer.tag(), "intent-controller");
    }

    #[test]
    fn repeated_mode_is_not_a_change() {
        let mut writer = ModeWriter::new(InputMode::Keyboard);
        assert!(!writer.set(InputMode::Keyboard));
        assert!(writer.set(InputMode::Pointer));
        assert!(!writer.set(InputMode::Pointer));
    }

    #[test]
    fn only_pointer_mode_hides_focus_ring() {
        assert!(!InputMode::Pointer.shows_focus_ring());
        assert!(InputMode::Keyboard.shows_focus_ring());
        assert!(InputMode::Controller.shows_focus_ring());
    }
}
