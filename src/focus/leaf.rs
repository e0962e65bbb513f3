use super::mode::InputMode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LeafKind {
    #[default]
    Control,
    /// Takes text input; CANCEL only releases it.
    TextEntry,
}

/// Registration data for one interactive element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafSpec {
    pub key: String,
    pub scope: Option<String>,
    pub focusable: bool,
    pub kind: LeafKind,
}

impl LeafSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            scope: None,
            focusable: true,
            kind: LeafKind::Control,
        }
    }

    pub fn in_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.focusable = enabled;
        self
    }

    pub fn text_entry(mut self) -> Self {
        self.kind = LeafKind::TextEntry;
        self
    }
}

/// Capability composed by anything that wants to take part in navigation.
pub trait Focusable {
    fn spec(&self) -> LeafSpec;

    /// CONFIRM arrived while this leaf held focus.
    fn activate(&mut self);
}

/// A [`Focusable`] backed by a closure.
pub struct CallbackLeaf {
    spec: LeafSpec,
    on_activate: Box<dyn FnMut()>,
}

impl CallbackLeaf {
    pub fn new(spec: LeafSpec, on_activate: impl FnMut() + 'static) -> Self {
        Self {
            spec,
            on_activate: Box::new(on_activate),
        }
    }
}

impl Focusable for CallbackLeaf {
    fn spec(&self) -> LeafSpec {
        self.spec.clone()
    }

    fn activate(&mut self) {
        (self.on_activate)();
    }
}

/// Proof of a live registration. Not clonable: whoever holds it owns the
/// leaf and gives it back through `FocusEngine::detach`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct LeafHandle {
    key: String,
}

impl LeafHandle {
    pub(crate) fn new(key: String) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Focus as seen by one leaf for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LeafState {
    /// The navigator's focus pointer is on this leaf.
    pub raw_focused: bool,
    /// Draw a focus ring: raw focus outside pointer mode.
    pub visually_focused: bool,
}

impl LeafState {
    pub fn resolve(raw_focused: bool, mode: InputMode) -> Self {
        Self {
            raw_focused,
            visually_focused: raw_focused && mode.shows_focus_ring(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn pointer_mode_never_shows_focus() {
        for raw in [true, false] {
            assert!(!LeafState::resolve(raw, InputMode::Pointer).visually_focused);
        }
        assert!(LeafState::resolve(true, InputMode::Controller).visually_focused);
        assert!(!LeafState::resolve(false, InputMode::Keyboard).visually_focused);
    }

    #[test]
    fn callback_leaf_runs_its_closure() {
        let count = Rc::new(Cell::new(0));
        let sink = count.clone();
        let mut leaf = CallbackLeaf::new(LeafSpec::new("play").in_scope("home"), move || {
            sink.set(sink.get() + 1)
        });
        leaf.activate();
        leaf.activate();
        assert_eq!(count.get(), 2);
        assert_eq!(leaf.spec().scope.as_deref(), Some("home"));
    }

    #[test]
    fn spec_builder_sets_flags() {
        let spec = LeafSpec::new("jvm-args").enabled(false).text_entry();
        assert!(!spec.focusable);
        assert_eq!(spec.kind, LeafKind::TextEntry);
    }
}
