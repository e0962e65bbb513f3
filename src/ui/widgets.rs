use std::collections::{HashMap, HashSet};

use eframe::egui::{self, Color32, CornerRadius, Rect, Stroke, StrokeKind};
use log::debug;
use tokio::sync::mpsc::UnboundedSender;

use super::state::UiCommand;
use crate::focus::FocusEngine;
use crate::focus::leaf::{CallbackLeaf, LeafHandle, LeafSpec, LeafState};
use crate::focus::scope::ScopeOptions;

/// Bridges egui's immediate-mode widgets to the retained focus registry.
///
/// Scopes and leaves are mounted the first frame they are drawn and stay
/// mounted while they keep being drawn. Anything not drawn between
/// [`FrameBinder::begin_frame`] and [`FrameBinder::end_frame`] is detached.
pub struct FrameBinder {
    commands: UnboundedSender<UiCommand>,
    leaves: HashMap<String, LeafHandle>,
    scopes: Vec<String>,
    seen_leaves: HashSet<String>,
    seen_scopes: HashSet<String>,
}

impl FrameBinder {
    pub fn new(commands: UnboundedSender<UiCommand>) -> Self {
        Self {
            commands,
            leaves: HashMap::new(),
            scopes: Vec::new(),
            seen_leaves: HashSet::new(),
            seen_scopes: HashSet::new(),
        }
    }

    pub fn begin_frame(&mut self) {
        self.seen_leaves.clear();
        self.seen_scopes.clear();
    }

    pub fn scope(
        &mut self,
        engine: &mut FocusEngine,
        name: &str,
        options: impl FnOnce() -> ScopeOptions,
    ) {
        self.mount(engine, name, options, false);
    }

    /// Like [`FrameBinder::scope`], but the scope also joins the pane stack.
    /// Draw panes outermost first.
    pub fn pane(
        &mut self,
        engine: &mut FocusEngine,
        name: &str,
        options: impl FnOnce() -> ScopeOptions,
    ) {
        self.mount(engine, name, options, true);
    }

    fn mount(
        &mut self,
        engine: &mut FocusEngine,
        name: &str,
        options: impl FnOnce() -> ScopeOptions,
        pane: bool,
    ) {
        self.seen_scopes.insert(name.to_owned());
        if engine.is_scope_mounted(name) {
            return;
        }
        if pane {
            engine.mount_pane(name, options());
        } else {
            engine.mount_scope(name, options());
        }
        self.scopes.push(name.to_owned());
    }

    /// Bind a drawn widget to its leaf and return the focus state to paint
    /// with. `command` is sent when CONFIRM lands on the leaf.
    pub fn leaf(
        &mut self,
        engine: &mut FocusEngine,
        spec: LeafSpec,
        command: UiCommand,
        rect: Rect,
    ) -> LeafState {
        let key = spec.key.clone();
        if !spec.focusable {
            if let Some(handle) = self.leaves.remove(&key) {
                engine.detach(handle);
            }
            return LeafState::default();
        }

        self.seen_leaves.insert(key.clone());
        if !self.leaves.contains_key(&key) {
            let commands = self.commands.clone();
            let leaf = CallbackLeaf::new(spec, move || {
                let _ = commands.send(command.clone());
            });
            let Some(handle) = engine.attach(Box::new(leaf)) else {
                return LeafState::default();
            };
            self.leaves.insert(key.clone(), handle);
        }

        match self.leaves.get(&key) {
            Some(handle) => {
                engine.set_geometry(handle, rect);
                engine.leaf_state(handle)
            }
            None => LeafState::default(),
        }
    }

    pub fn handle(&self, key: &str) -> Option<&LeafHandle> {
        self.leaves.get(key)
    }

    pub fn end_frame(&mut self, engine: &mut FocusEngine) {
        let stale: Vec<String> = self
            .leaves
            .keys()
            .filter(|key| !self.seen_leaves.contains(*key))
            .cloned()
            .collect();
        for key in stale {
            if let Some(handle) = self.leaves.remove(&key) {
                debug!("focus: leaf {key} no longer drawn");
                engine.detach(handle);
            }
        }

        let (kept, gone): (Vec<String>, Vec<String>) = self
            .scopes
            .drain(..)
            .partition(|name| self.seen_scopes.contains(name));
        for name in gone.iter().rev() {
            engine.unmount_scope(name);
        }
        self.scopes = kept;
    }
}

/// Outline a leaf that holds visual focus.
pub fn paint_focus_ring(ui: &egui::Ui, rect: Rect, state: LeafState, color: Color32) {
    if state.visually_focused {
        ui.painter().rect_stroke(
            rect.expand(3.0),
            CornerRadius::same(12),
            Stroke::new(2.0, color),
            StrokeKind::Outside,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::action::NavKey;
    use crate::focus::classifier::{KeyPress, RawInput};
    use crate::focus::navigator::GeometricNavigator;
    use eframe::egui::{pos2, vec2};
    use tokio::sync::mpsc;

    fn row(index: f32) -> Rect {
        Rect::from_min_size(pos2(0.0, index * 50.0), vec2(200.0, 40.0))
    }

    fn press(engine: &mut FocusEngine, key: NavKey) {
        engine.handle_input(RawInput::KeyDown {
            key: KeyPress::Nav(key),
            trusted: true,
        });
    }

    #[test]
    fn confirm_sends_the_leaf_command() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut engine = FocusEngine::new(Box::new(GeometricNavigator::new()), 0.5);
        let mut binder = FrameBinder::new(tx);

        binder.begin_frame();
        binder.scope(&mut engine, "home", ScopeOptions::default);
        binder.leaf(
            &mut engine,
            LeafSpec::new("home-play").in_scope("home"),
            UiCommand::Play,
            row(0.0),
        );
        binder.end_frame(&mut engine);

        engine.restore("home", Some("home-play"));
        press(&mut engine, NavKey::Enter);
        assert_eq!(rx.try_recv().ok(), Some(UiCommand::Play));
    }

    #[test]
    fn undrawn_leaves_and_scopes_are_released() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut engine = FocusEngine::new(Box::new(GeometricNavigator::new()), 0.5);
        let mut binder = FrameBinder::new(tx);

        binder.begin_frame();
        binder.scope(&mut engine, "picker", || ScopeOptions::default().trapping());
        binder.leaf(
            &mut engine,
            LeafSpec::new("instance-0").in_scope("picker"),
            UiCommand::SelectInstance(0),
            row(0.0),
        );
        binder.end_frame(&mut engine);
        assert!(binder.handle("instance-0").is_some());
        engine.restore("picker", Some("instance-0"));

        binder.begin_frame();
        binder.end_frame(&mut engine);
        assert!(binder.handle("instance-0").is_none());
        assert!(!engine.is_scope_mounted("picker"));
        assert_eq!(engine.focused(), None);
        assert_eq!(engine.last_focused("picker"), Some("instance-0"));
    }

    #[test]
    fn disabled_leaf_reports_no_focus() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut engine = FocusEngine::new(Box::new(GeometricNavigator::new()), 0.5);
        let mut binder = FrameBinder::new(tx);

        binder.begin_frame();
        binder.leaf(
            &mut engine,
            LeafSpec::new("home-play"),
            UiCommand::Play,
            row(0.0),
        );
        let state = binder.leaf(
            &mut engine,
            LeafSpec::new("home-play").enabled(false),
            UiCommand::Play,
            row(0.0),
        );
        binder.end_frame(&mut engine);
        assert_eq!(state, LeafState::default());
        assert!(binder.handle("home-play").is_none());
    }
}
