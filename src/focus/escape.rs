use log::debug;

use super::navigator::SpatialNavigator;
use super::scope::ScopeManager;

/// Who consumed a CANCEL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EscapeOutcome {
    /// A trapping scope's escape handler ran.
    Overlay(String),
    /// A text field gave up input focus; nothing navigated.
    ReleasedTextEntry(String),
    /// Focus went back to the enclosing pane.
    ReturnedToPane {
        pane: String,
        focused: Option<String>,
    },
    /// Already on the outermost pane: leave the screen.
    NavigateBack,
}

/// Page-level panes, outermost first, with the one currently active.
///
/// Transitions only happen on focus entering a pane, pointer interaction in a
/// pane, an explicit commit, or a CANCEL; there are no timers.
#[derive(Debug, Default)]
pub struct PaneStack {
    panes: Vec<String>,
    active: Option<String>,
}

impl PaneStack {
    /// Panes mount outermost first; the first to mount starts active.
    pub fn mount(&mut self, name: &str) {
        if !self.contains(name) {
            self.panes.push(name.to_owned());
        }
        if self.active.is_none() {
            self.active = Some(name.to_owned());
        }
    }

    pub fn unmount(&mut self, name: &str) {
        self.panes.retain(|pane| pane != name);
        if self.active.as_deref() == Some(name) {
            self.active = self.panes.first().cloned();
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.panes.iter().any(|pane| pane == name)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Returns `true` when the active pane changed.
    pub fn activate(&mut self, name: &str) -> bool {
        if !self.contains(name) || self.active.as_deref() == Some(name) {
            return false;
        }
        debug!("escape: active pane -> {name}");
        self.active = Some(name.to_owned());
        true
    }

    /// The pane one level out from the active one.
    pub fn outer(&self) -> Option<&str> {
        let active = self.active.as_deref()?;
        let index = self.panes.iter().position(|pane| pane == active)?;
        index
            .checked_sub(1)
            .map(|outer| self.panes[outer].as_str())
    }
}

/// Resolves CANCEL to exactly one consumer, in priority order: trapping
/// overlay, text entry, pane stack.
#[derive(Debug, Default)]
pub struct EscapeCascade {
    panes: PaneStack,
    text_entry: Option<String>,
}

impl EscapeCascade {
    pub fn panes(&self) -> &PaneStack {
        &self.panes
    }

    pub fn panes_mut(&mut self) -> &mut PaneStack {
        &mut self.panes
    }

    pub fn text_entry(&self) -> Option<&str> {
        self.text_entry.as_deref()
    }

    pub fn begin_text_entry(&mut self, key: &str) {
        self.text_entry = Some(key.to_owned());
    }

    pub fn end_text_entry(&mut self) -> Option<String> {
        self.text_entry.take()
    }

    /// Track a confirmed focus change: activate the innermost pane around the
    /// new leaf and drop text entry that focus has left.
    pub fn focus_entered(&mut self, scopes: &ScopeManager, nav: &dyn SpatialNavigator, leaf: &str) {
        if self.text_entry.as_deref().is_some_and(|entry| entry != leaf) {
            self.text_entry = None;
        }
        if let Some(pane) = scopes
            .enclosing(nav, leaf)
            .into_iter()
            .find(|scope| self.panes.contains(scope))
        {
            self.panes.activate(&pane);
        }
    }

    pub fn resolve(
        &mut self,
        scopes: &mut ScopeManager,
        nav: &mut dyn SpatialNavigator,
    ) -> EscapeOutcome {
        let overlay = nav
            .focused()
            .and_then(|focused| scopes.escape_scope(&*nav, focused));
        if let Some(scope) = overlay
            && scopes.fire_escape(&scope)
        {
            return EscapeOutcome::Overlay(scope);
        }

        if let Some(entry) = self.text_entry.take() {
            return EscapeOutcome::ReleasedTextEntry(entry);
        }

        match self.panes.outer().map(str::to_owned) {
            Some(outer) => {
                self.panes.activate(&outer);
                let focused = scopes.restore(nav, &outer, Some(&outer));
                EscapeOutcome::ReturnedToPane {
                    pane: outer,
                    focused,
                }
            }
            None => EscapeOutcome::NavigateBack,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_mounted_pane_starts_active() {
        let mut panes = PaneStack::default();
        assert_eq!(panes.active(), None);
        panes.mount("sidebar");
        panes.mount("content");
        assert_eq!(panes.active(), Some("sidebar"));
        assert_eq!(panes.outer(), None);
    }

    #[test]
    fn outer_of_content_is_sidebar() {
        let mut panes = PaneStack::default();
        panes.mount("sidebar");
        panes.mount("content");
        assert!(panes.activate("content"));
        assert!(!panes.activate("content"));
        assert_eq!(panes.outer(), Some("sidebar"));
    }

    #[test]
    fn unknown_panes_cannot_activate() {
        let mut panes = PaneStack::default();
        panes.mount("sidebar");
        assert!(!panes.activate("details"));
        assert_eq!(panes.active(), Some("sidebar"));
    }

    #[test]
    fn unmounting_the_active_pane_falls_back_to_outermost() {
        let mut panes = PaneStack::default();
        panes.mount("sidebar");
        panes.mount("content");
        panes.activate("content");
        panes.unmount("content");
        assert_eq!(panes.active(), Some("sidebar"));
        panes.unmount("sidebar");
        assert_eq!(panes.active(), None);
    }
}
