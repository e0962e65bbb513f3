use std::collections::HashMap;

use eframe::egui::Rect;
use log::debug;

use super::action::{ActionEvent, NavKeyEvent, SemanticAction};
use super::bus::{ActionBus, SubscriptionId};
use super::classifier::{InputClassifier, KeyPress, RawInput};
use super::escape::{EscapeCascade, EscapeOutcome};
use super::gamepad::GamepadSnapshot;
use super::leaf::{Focusable, LeafHandle, LeafKind, LeafState};
use super::mode::{InputMode, ModeHandle};
use super::navigator::{NavResponse, NodeKind, SpatialNavigator};
use super::scope::{ScopeManager, ScopeOptions};

struct LeafEntry {
    kind: LeafKind,
    leaf: Box<dyn Focusable>,
}

/// What one call into the engine did, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineReport {
    pub mode_changed: bool,
    pub actions: Vec<SemanticAction>,
    pub focus_changes: Vec<String>,
    pub activated: Vec<String>,
    pub escape: Option<EscapeOutcome>,
}

/// The single owned focus context: input mode, action bus, scope history,
/// escape cascade and the navigator all live here and are only mutated
/// through this API.
pub struct FocusEngine {
    classifier: InputClassifier,
    navigator: Box<dyn SpatialNavigator>,
    scopes: ScopeManager,
    cascade: EscapeCascade,
    bus: ActionBus,
    leaves: HashMap<String, LeafEntry>,
}

impl FocusEngine {
    pub fn new(navigator: Box<dyn SpatialNavigator>, dead_zone: f32) -> Self {
        Self {
            classifier: InputClassifier::new(dead_zone),
            navigator,
            scopes: ScopeManager::default(),
            cascade: EscapeCascade::default(),
            bus: ActionBus::default(),
            leaves: HashMap::new(),
        }
    }

    pub fn mode(&self) -> InputMode {
        self.classifier.mode()
    }

    pub fn mode_handle(&self) -> ModeHandle {
        self.classifier.mode_handle()
    }

    /// Presentational mirror of the mode for styling.
    pub fn mode_tag(&self) -> &'static str {
        self.classifier.mode_tag()
    }

    pub fn focused(&self) -> Option<&str> {
        self.navigator.focused()
    }

    pub fn active_pane(&self) -> Option<&str> {
        self.cascade.panes().active()
    }

    pub fn last_focused(&self, scope: &str) -> Option<&str> {
        self.scopes.last_focused(scope)
    }

    pub fn clear_history(&mut self, scope: &str) {
        self.scopes.clear(scope);
    }

    pub fn subscribe(
        &mut self,
        action: SemanticAction,
        handler: impl FnMut(SemanticAction) + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(action, handler)
    }

    #[allow(dead_code)]
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Feed one pointer or keyboard event.
    pub fn handle_input(&mut self, input: RawInput) -> EngineReport {
        let classified = self.classifier.classify(input);
        let mut report = EngineReport {
            mode_changed: classified.mode_changed,
            ..EngineReport::default()
        };

        // The genuine key-down reaches the navigator exactly once, here.
        // Directional keys stay with a text field that holds input.
        if let RawInput::KeyDown {
            key: KeyPress::Nav(key),
            trusted: true,
        } = input
        {
            let typing = self.cascade.text_entry().is_some() && key.direction().is_some();
            if !typing {
                self.deliver(NavKeyEvent::native(key), &mut report);
            }
        }

        for event in classified.actions {
            self.dispatch(event, &mut report);
        }
        report
    }

    /// Evaluate one frame of controller state.
    pub fn poll_controllers(&mut self, pads: &[Option<GamepadSnapshot>]) -> EngineReport {
        let classified = self.classifier.poll(pads);
        let mut report = EngineReport {
            mode_changed: classified.mode_changed,
            ..EngineReport::default()
        };
        for event in classified.actions {
            self.dispatch(event, &mut report);
        }
        report
    }

    fn dispatch(&mut self, event: ActionEvent, report: &mut EngineReport) {
        let action = event.action();
        report.actions.push(action);

        if action == SemanticAction::Cancel {
            // Resolved ahead of every subscriber so an overlay always wins.
            let outcome = self.resolve_cancel();
            if let Some(bridged) = event.bridge_event() {
                self.deliver(bridged, report);
            }
            if let EscapeOutcome::ReturnedToPane {
                focused: Some(leaf),
                ..
            } = &outcome
            {
                report.focus_changes.push(leaf.clone());
            }
            if outcome == EscapeOutcome::NavigateBack {
                self.bus.publish(action);
            }
            report.escape = Some(outcome);
            return;
        }

        if let Some(bridged) = event.bridge_event() {
            self.deliver(bridged, report);
        }
        self.bus.publish(action);
    }

    fn resolve_cancel(&mut self) -> EscapeOutcome {
        let outcome = self
            .cascade
            .resolve(&mut self.scopes, self.navigator.as_mut());
        debug!("escape: cancel resolved to {outcome:?}");
        if let EscapeOutcome::ReturnedToPane {
            focused: Some(leaf),
            ..
        } = &outcome
        {
            let leaf = leaf.clone();
            self.focus_changed(&leaf);
        }
        outcome
    }

    fn deliver(&mut self, event: NavKeyEvent, report: &mut EngineReport) {
        match self.navigator.handle_key(event) {
            NavResponse::Moved(leaf) => {
                self.focus_changed(&leaf);
                report.focus_changes.push(leaf);
            }
            NavResponse::Activated(leaf) => {
                if let Some(entry) = self.leaves.get_mut(&leaf) {
                    entry.leaf.activate();
                    report.activated.push(leaf);
                }
            }
            NavResponse::Ignored => {}
        }
    }

    /// The navigator confirmed focus on `leaf`.
    fn focus_changed(&mut self, leaf: &str) {
        self.scopes.remember_focus(self.navigator.as_ref(), leaf);
        self.cascade
            .focus_entered(&self.scopes, self.navigator.as_ref(), leaf);
    }

    /// Register a leaf. Disabled leaves are kept out of the registry entirely
    /// and get no handle.
    pub fn attach(&mut self, leaf: Box<dyn Focusable>) -> Option<LeafHandle> {
        let spec = leaf.spec();
        if !spec.focusable {
            return None;
        }
        if self.leaves.contains_key(&spec.key) {
            debug!("focus: leaf {} re-attached", spec.key);
        }
        self.navigator
            .register(&spec.key, spec.scope.as_deref(), NodeKind::Leaf);
        self.leaves.insert(
            spec.key.clone(),
            LeafEntry {
                kind: spec.kind,
                leaf,
            },
        );
        Some(LeafHandle::new(spec.key))
    }

    pub fn detach(&mut self, handle: LeafHandle) {
        let key = handle.key();
        self.leaves.remove(key);
        self.navigator.unregister(key);
        if self.cascade.text_entry() == Some(key) {
            self.cascade.end_text_entry();
        }
    }

    /// Layout rectangle used for directional movement.
    pub fn set_geometry(&mut self, handle: &LeafHandle, rect: Rect) {
        self.navigator.set_geometry(handle.key(), rect);
    }

    pub fn leaf_state(&self, handle: &LeafHandle) -> LeafState {
        let raw = self.navigator.focused() == Some(handle.key());
        LeafState::resolve(raw, self.mode())
    }

    /// Point the navigator at a leaf the pointer just activated, without
    /// touching the input mode. Refused for leaves outside the overlay that
    /// currently holds focus.
    pub fn focus_self(&mut self, handle: &LeafHandle) -> bool {
        let key = handle.key();
        let overlay = self
            .navigator
            .focused()
            .and_then(|focused| self.scopes.escape_scope(self.navigator.as_ref(), focused));
        if let Some(overlay) = overlay
            && !self
                .scopes
                .enclosing(self.navigator.as_ref(), key)
                .contains(&overlay)
        {
            debug!("focus: {key} is outside overlay {overlay}; pointer focus ignored");
            return false;
        }
        match self.navigator.move_focus_to(key) {
            Some(leaf) => {
                self.focus_changed(&leaf);
                true
            }
            None => false,
        }
    }

    /// Mark a text-entry leaf as holding input focus.
    pub fn begin_text_entry(&mut self, handle: &LeafHandle) {
        let is_text = self
            .leaves
            .get(handle.key())
            .is_some_and(|entry| entry.kind == LeafKind::TextEntry);
        if is_text {
            self.cascade.begin_text_entry(handle.key());
        }
    }

    pub fn end_text_entry(&mut self) -> Option<String> {
        self.cascade.end_text_entry()
    }

    pub fn text_entry(&self) -> Option<&str> {
        self.cascade.text_entry()
    }

    pub fn mount_scope(&mut self, name: &str, options: ScopeOptions) {
        self.scopes.mount(self.navigator.as_mut(), name, options);
    }

    pub fn unmount_scope(&mut self, name: &str) {
        self.scopes.unmount(self.navigator.as_mut(), name);
        self.cascade.panes_mut().unmount(name);
    }

    /// A scope that also takes part in the page-level pane stack. Panes
    /// mount outermost first.
    pub fn mount_pane(&mut self, name: &str, options: ScopeOptions) {
        self.mount_scope(name, options);
        self.cascade.panes_mut().mount(name);
    }

    pub fn is_scope_mounted(&self, name: &str) -> bool {
        self.scopes.is_mounted(name)
    }

    /// Pointer interaction inside a pane makes it active.
    pub fn pointer_in_pane(&mut self, pane: &str) -> bool {
        self.cascade.panes_mut().activate(pane)
    }

    /// Hand control to `pane` (e.g. after picking a sidebar entry) and move
    /// focus into it.
    pub fn commit_to_pane(&mut self, pane: &str) -> Option<String> {
        self.cascade.panes_mut().activate(pane);
        self.restore(pane, Some(pane))
    }

    /// Restore the remembered focus of `scope`, else `fallback`.
    pub fn restore(&mut self, scope: &str, fallback: Option<&str>) -> Option<String> {
        let focused = self
            .scopes
            .restore(self.navigator.as_mut(), scope, fallback)?;
        self.focus_changed(&focused);
        Some(focused)
    }
}
