use std::collections::HashMap;

use log::debug;

use super::navigator::{NodeKind, SpatialNavigator};

type EscapeHandler = Box<dyn FnMut()>;

/// How a scope behaves once mounted.
#[derive(Default)]
pub struct ScopeOptions {
    pub parent: Option<String>,
    /// Directional movement may not leave this scope.
    pub traps: bool,
    /// Consumes CANCEL while focus is inside; only honoured on trapping scopes.
    pub on_escape: Option<EscapeHandler>,
}

impl ScopeOptions {
    pub fn within(parent: impl Into<String>) -> Self {
        Self {
            parent: Some(parent.into()),
            ..Self::default()
        }
    }

    pub fn trapping(mut self) -> Self {
        self.traps = true;
        self
    }

    pub fn on_escape(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_escape = Some(Box::new(handler));
        self
    }
}

struct ScopeEntry {
    traps: bool,
    on_escape: Option<EscapeHandler>,
}

/// Named focus scopes plus the per-scope "last focused leaf" table.
///
/// History is keyed by scope name and outlives the scope itself, so a page
/// that is left and re-entered lands back on the same leaf.
#[derive(Default)]
pub struct ScopeManager {
    scopes: HashMap<String, ScopeEntry>,
    history: HashMap<String, String>,
}

impl ScopeManager {
    pub fn mount(&mut self, nav: &mut dyn SpatialNavigator, name: &str, options: ScopeOptions) {
        nav.register(
            name,
            options.parent.as_deref(),
            NodeKind::Container {
                boundary: options.traps,
            },
        );
        debug!(
            "focus: scope {name} mounted (traps: {}, escape: {})",
            options.traps,
            options.on_escape.is_some()
        );
        self.scopes.insert(
            name.to_owned(),
            ScopeEntry {
                traps: options.traps,
                on_escape: options.on_escape,
            },
        );
    }

    pub fn unmount(&mut self, nav: &mut dyn SpatialNavigator, name: &str) {
        if self.scopes.remove(name).is_some() {
            nav.unregister(name);
            debug!("focus: scope {name} unmounted");
        }
    }

    pub fn is_mounted(&self, name: &str) -> bool {
        self.scopes.contains_key(name)
    }

    pub fn traps(&self, name: &str) -> bool {
        self.scopes.get(name).is_some_and(|scope| scope.traps)
    }

    /// Mounted scopes around `key`, innermost first.
    pub fn enclosing(&self, nav: &dyn SpatialNavigator, key: &str) -> Vec<String> {
        const MAX_DEPTH: usize = 64;

        let mut chain = Vec::new();
        let mut current = nav.parent_of(key);
        for _ in 0..MAX_DEPTH {
            let Some(parent) = current else { break };
            if self.is_mounted(parent) {
                chain.push(parent.to_owned());
            }
            current = nav.parent_of(parent);
        }
        chain
    }

    pub fn remember(&mut self, scope: &str, leaf: &str) {
        self.history.insert(scope.to_owned(), leaf.to_owned());
    }

    /// Record `leaf` as the last focus of every mounted scope around it.
    pub fn remember_focus(&mut self, nav: &dyn SpatialNavigator, leaf: &str) {
        for scope in self.enclosing(nav, leaf) {
            self.remember(&scope, leaf);
        }
    }

    pub fn last_focused(&self, scope: &str) -> Option<&str> {
        self.history.get(scope).map(String::as_str)
    }

    pub fn clear(&mut self, scope: &str) {
        self.history.remove(scope);
    }

    /// Move focus to the remembered leaf of `scope`, falling back to
    /// `fallback` when nothing is remembered or the remembered leaf is gone.
    /// Returns the leaf that ended up focused.
    pub fn restore(
        &self,
        nav: &mut dyn SpatialNavigator,
        scope: &str,
        fallback: Option<&str>,
    ) -> Option<String> {
        if let Some(remembered) = self.history.get(scope) {
            if let Some(focused) = nav.move_focus_to(remembered) {
                return Some(focused);
            }
            debug!("focus: remembered leaf {remembered} of {scope} is gone; using fallback");
        }
        let fallback = fallback?;
        let focused = nav.move_focus_to(fallback);
        if focused.is_none() {
            debug!("focus: fallback {fallback} for {scope} is not registered");
        }
        focused
    }

    /// Innermost trapping scope around `key` that has an escape handler.
    pub fn escape_scope(&self, nav: &dyn SpatialNavigator, key: &str) -> Option<String> {
        self.enclosing(nav, key).into_iter().find(|name| {
            self.traps(name)
                && self
                    .scopes
                    .get(name)
                    .is_some_and(|scope| scope.on_escape.is_some())
        })
    }

    pub fn fire_escape(&mut self, name: &str) -> bool {
        match self.scopes.get_mut(name).and_then(|scope| scope.on_escape.as_mut()) {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}
