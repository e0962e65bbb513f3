use std::collections::HashMap;

use eframe::egui::Rect;
use log::trace;

use super::action::{Direction, NavKey, NavKeyEvent};

/// Secondary-axis drift is penalised this much relative to travel distance.
const ORTHOGONAL_WEIGHT: f32 = 2.0;
/// Candidates must be at least this far along the travel axis.
const MIN_TRAVEL: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    /// A grouping node. Boundaries stop directional movement at their edge.
    Container { boundary: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavResponse {
    Ignored,
    Moved(String),
    Activated(String),
}

/// Directional traversal primitive: keeps the registry of focusable nodes and
/// the single live focus pointer.
pub trait SpatialNavigator {
    fn register(&mut self, key: &str, parent: Option<&str>, kind: NodeKind);
    fn unregister(&mut self, key: &str);
    fn set_geometry(&mut self, key: &str, rect: Rect);
    fn is_registered(&self, key: &str) -> bool;
    fn parent_of(&self, key: &str) -> Option<&str>;
    fn focused(&self) -> Option<&str>;
    /// Focus `key` (or the first leaf of a container). Returns the leaf that
    /// ends up focused, or `None` when nothing suitable is registered.
    fn move_focus_to(&mut self, key: &str) -> Option<String>;
    fn handle_key(&mut self, event: NavKeyEvent) -> NavResponse;
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<String>,
    kind: NodeKind,
    rect: Option<Rect>,
    order: u64,
}

/// Rectangle-based navigator: picks the nearest leaf in the travel direction,
/// confined to the innermost boundary around the current focus.
#[derive(Default)]
pub struct GeometricNavigator {
    nodes: HashMap<String, Node>,
    focused: Option<String>,
    /// Boundary that held the focused leaf when it was unregistered.
    lost_in: Option<String>,
    next_order: u64,
}

impl GeometricNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    fn ancestors<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let limit = self.nodes.len();
        let mut current = self.nodes.get(key).and_then(|node| node.parent.as_deref());
        std::iter::from_fn(move || {
            let here = current?;
            current = self.nodes.get(here).and_then(|node| node.parent.as_deref());
            Some(here)
        })
        .take(limit)
    }

    fn is_within(&self, key: &str, container: &str) -> bool {
        self.ancestors(key).any(|ancestor| ancestor == container)
    }

    fn enclosing_boundary<'a>(&'a self, key: &'a str) -> Option<&'a str> {
        self.ancestors(key).find(|ancestor| {
            matches!(
                self.nodes.get(*ancestor).map(|node| node.kind),
                Some(NodeKind::Container { boundary: true })
            )
        })
    }

    fn leaves(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.kind == NodeKind::Leaf)
            .map(|(key, node)| (key.as_str(), node))
    }

    /// Top-most, then left-most leaf; leaves without geometry come last in
    /// registration order.
    fn first_leaf(&self, within: Option<&str>) -> Option<String> {
        self.leaves()
            .filter(|(key, _)| within.is_none_or(|container| self.is_within(key, container)))
            .min_by(|(_, a), (_, b)| {
                let pos = |node: &Node| {
                    node.rect
                        .map(|r| (0u8, r.min.y, r.min.x))
                        .unwrap_or((1, 0.0, 0.0))
                };
                let (a_missing, a_y, a_x) = pos(a);
                let (b_missing, b_y, b_x) = pos(b);
                a_missing
                    .cmp(&b_missing)
                    .then(a_y.total_cmp(&b_y))
                    .then(a_x.total_cmp(&b_x))
                    .then(a.order.cmp(&b.order))
            })
            .map(|(key, _)| key.to_owned())
    }

    /// Where the first directional key lands when nothing is focused: inside
    /// the boundary that lost the focus while it is still registered,
    /// otherwise anywhere.
    fn entry_leaf(&self) -> Option<String> {
        let confined = self
            .lost_in
            .as_deref()
            .filter(|boundary| self.is_registered(boundary));
        self.first_leaf(confined)
    }

    fn step(&self, from: &str, direction: Direction) -> Option<String> {
        let origin = self.nodes.get(from)?.rect?;
        let boundary = self.enclosing_boundary(from);
        self.leaves()
            .filter(|(key, _)| *key != from)
            .filter(|(key, _)| boundary.is_none_or(|container| self.is_within(key, container)))
            .filter_map(|(key, node)| {
                let score = travel_score(origin, node.rect?, direction)?;
                Some((key, score, node.order))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.2.cmp(&b.2)))
            .map(|(key, _, _)| key.to_owned())
    }
}

fn travel_score(from: Rect, to: Rect, direction: Direction) -> Option<f32> {
    let (a, b) = (from.center(), to.center());
    let (travel, drift) = match direction {
        Direction::Right => (b.x - a.x, (b.y - a.y).abs()),
        Direction::Left => (a.x - b.x, (b.y - a.y).abs()),
        Direction::Down => (b.y - a.y, (b.x - a.x).abs()),
        Direction::Up => (a.y - b.y, (b.x - a.x).abs()),
    };
    (travel >= MIN_TRAVEL).then_some(travel + drift * ORTHOGONAL_WEIGHT)
}

impl SpatialNavigator for GeometricNavigator {
    fn register(&mut self, key: &str, parent: Option<&str>, kind: NodeKind) {
        self.next_order += 1;
        let order = self.next_order;
        let rect = self.nodes.get(key).and_then(|node| node.rect);
        self.nodes.insert(
            key.to_owned(),
            Node {
                parent: parent.map(str::to_owned),
                kind,
                rect,
                order,
            },
        );
    }

    fn unregister(&mut self, key: &str) {
        if self.focused.as_deref() == Some(key) {
            self.lost_in = self.enclosing_boundary(key).map(str::to_owned);
            self.focused = None;
        }
        self.nodes.remove(key);
    }

    fn set_geometry(&mut self, key: &str, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.rect = Some(rect);
        }
    }

    fn is_registered(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    fn parent_of(&self, key: &str) -> Option<&str> {
        self.nodes.get(key).and_then(|node| node.parent.as_deref())
    }

    fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    fn move_focus_to(&mut self, key: &str) -> Option<String> {
        let target = match self.nodes.get(key)?.kind {
            NodeKind::Leaf => key.to_owned(),
            NodeKind::Container { .. } => self.first_leaf(Some(key))?,
        };
        self.focused = Some(target.clone());
        self.lost_in = None;
        Some(target)
    }

    fn handle_key(&mut self, event: NavKeyEvent) -> NavResponse {
        trace!("navigator: {:?} ({:?})", event.key, event.origin);
        match event.key {
            NavKey::Enter => match &self.focused {
                Some(key) => NavResponse::Activated(key.clone()),
                None => NavResponse::Ignored,
            },
            NavKey::Escape => NavResponse::Ignored,
            key => {
                let Some(direction) = key.direction() else {
                    return NavResponse::Ignored;
                };
                let next = match self.focused.as_deref() {
                    Some(current) => self.step(current, direction),
                    None => self.entry_leaf(),
                };
                match next {
                    Some(next) => {
                        self.focused = Some(next.clone());
                        self.lost_in = None;
                        NavResponse::Moved(next)
                    }
                    None => NavResponse::Ignored,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    fn cell(col: f32, row: f32) -> Rect {
        Rect::from_min_size(pos2(col * 100.0, row * 40.0), vec2(90.0, 30.0))
    }

    fn press(nav: &mut GeometricNavigator, key: NavKey) -> NavResponse {
        nav.handle_key(NavKeyEvent::native(key))
    }

    /// A sidebar boundary (column 0) next to an open content column (column 1).
    fn split_layout() -> GeometricNavigator {
        let mut nav = GeometricNavigator::new();
        nav.register("sidebar", None, NodeKind::Container { boundary: true });
        nav.register("content", None, NodeKind::Container { boundary: false });
        for row in 0..3 {
            let side = format!("side-{row}");
            let body = format!("body-{row}");
            nav.register(&side, Some("sidebar"), NodeKind::Leaf);
            nav.register(&body, Some("content"), NodeKind::Leaf);
            nav.set_geometry(&side, cell(0.0, row as f32));
            nav.set_geometry(&body, cell(1.0, row as f32));
        }
        nav
    }

    #[test]
    fn moves_to_nearest_neighbour() {
        let mut nav = split_layout();
        nav.move_focus_to("body-0");
        assert_eq!(press(&mut nav, NavKey::ArrowDown), NavResponse::Moved("body-1".into()));
        assert_eq!(press(&mut nav, NavKey::ArrowLeft), NavResponse::Moved("side-1".into()));
    }

    #[test]
    fn boundary_blocks_outward_movement() {
        let mut nav = split_layout();
        nav.move_focus_to("side-2");
        assert_eq!(press(&mut nav, NavKey::ArrowRight), NavResponse::Ignored);
        assert_eq!(press(&mut nav, NavKey::ArrowDown), NavResponse::Ignored);
        assert_eq!(nav.focused(), Some("side-2"));
    }

    #[test]
    fn container_focus_delegates_to_first_leaf() {
        let mut nav = split_layout();
        assert_eq!(nav.move_focus_to("content"), Some("body-0".into()));
        assert_eq!(nav.focused(), Some("body-0"));
    }

    #[test]
    fn unknown_keys_are_rejected_without_side_effects() {
        let mut nav = split_layout();
        nav.move_focus_to("side-1");
        assert_eq!(nav.move_focus_to("missing"), None);
        assert_eq!(nav.focused(), Some("side-1"));
    }

    #[test]
    fn unregistering_the_focused_leaf_clears_focus() {
        let mut nav = split_layout();
        nav.move_focus_to("body-2");
        nav.unregister("body-2");
        assert_eq!(nav.focused(), None);
        assert!(!nav.is_registered("body-2"));
    }

    #[test]
    fn enter_activates_the_focused_leaf() {
        let mut nav = split_layout();
        assert_eq!(press(&mut nav, NavKey::Enter), NavResponse::Ignored);
        nav.move_focus_to("side-0");
        assert_eq!(press(&mut nav, NavKey::Enter), NavResponse::Activated("side-0".into()));
        assert_eq!(press(&mut nav, NavKey::Escape), NavResponse::Ignored);
    }

    #[test]
    fn first_direction_without_focus_picks_top_left() {
        let mut nav = split_layout();
        assert_eq!(press(&mut nav, NavKey::ArrowUp), NavResponse::Moved("side-0".into()));
    }

    #[test]
    fn losing_focus_inside_a_boundary_keeps_the_next_move_inside() {
        let mut nav = split_layout();
        nav.register("top", None, NodeKind::Leaf);
        nav.set_geometry("top", Rect::from_min_size(pos2(0.0, -60.0), vec2(90.0, 30.0)));
        nav.move_focus_to("side-2");
        nav.unregister("side-2");

        assert_eq!(press(&mut nav, NavKey::ArrowUp), NavResponse::Moved("side-0".into()));
        assert_eq!(press(&mut nav, NavKey::ArrowUp), NavResponse::Ignored);
    }

    #[test]
    fn emptied_boundary_holds_the_next_move() {
        let mut nav = split_layout();
        nav.move_focus_to("side-0");
        for row in 0..3 {
            nav.unregister(&format!("side-{row}"));
        }
        assert_eq!(press(&mut nav, NavKey::ArrowRight), NavResponse::Ignored);

        nav.unregister("sidebar");
        assert_eq!(press(&mut nav, NavKey::ArrowRight), NavResponse::Moved("body-0".into()));
    }

    #[test]
    fn leaves_without_geometry_are_not_travel_targets() {
        let mut nav = split_layout();
        nav.register("lazy", Some("content"), NodeKind::Leaf);
        nav.move_focus_to("body-2");
        assert_eq!(press(&mut nav, NavKey::ArrowDown), NavResponse::Ignored);
        assert_eq!(nav.parent_of("lazy"), Some("content"));
    }
}
