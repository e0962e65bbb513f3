use log::{debug, info};

use super::action::{ActionEvent, NavKey, SemanticAction};
use super::gamepad::GamepadSnapshot;
use super::mode::{InputMode, ModeHandle, ModeWriter};

const AXIS_X: usize = 0;
const AXIS_Y: usize = 1;

/// Standard-layout button index to action.
const BUTTON_ACTIONS: [(usize, SemanticAction); 10] = [
    (0, SemanticAction::Confirm),
    (1, SemanticAction::Cancel),
    (4, SemanticAction::PageLeft),
    (5, SemanticAction::PageRight),
    (8, SemanticAction::View),
    (9, SemanticAction::Menu),
    (12, SemanticAction::Up),
    (13, SemanticAction::Down),
    (14, SemanticAction::Left),
    (15, SemanticAction::Right),
];

/// A raw device event as delivered by the windowing layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawInput {
    PointerMoved,
    PointerPressed,
    KeyDown { key: KeyPress, trusted: bool },
}

/// egui reports Shift, Control, Alt and Meta only as modifier state on other
/// keys, never as key-downs of their own, so there is no modifier variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPress {
    Nav(NavKey),
    Other,
}

impl KeyPress {
    pub fn from_egui(key: eframe::egui::Key) -> Self {
        NavKey::from_egui(key).map_or(KeyPress::Other, KeyPress::Nav)
    }
}

/// Result of feeding one event (or one poll) through the classifier. The mode
/// is already updated by the time this is returned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classified {
    pub mode_changed: bool,
    pub actions: Vec<ActionEvent>,
}

/// Owns the authoritative [`InputMode`] and turns raw device input into
/// edge-triggered semantic actions.
pub struct InputClassifier {
    mode: ModeWriter,
    dead_zone: f32,
    axes_engaged: [bool; 2],
    buttons_held: Vec<bool>,
    extra_pads_reported: bool,
}

impl InputClassifier {
    pub fn new(dead_zone: f32) -> Self {
        Self {
            mode: ModeWriter::new(InputMode::Pointer),
            dead_zone,
            axes_engaged: [false; 2],
            buttons_held: Vec::new(),
            extra_pads_reported: false,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode.get()
    }

    pub fn mode_handle(&self) -> ModeHandle {
        self.mode.handle()
    }

    pub fn mode_tag(&self) -> &'static str {
        self.mode.tag()
    }

    fn switch_mode(&mut self, mode: InputMode, out: &mut Classified) {
        if self.mode.set(mode) {
            debug!("input: mode -> {mode:?}");
            out.mode_changed = true;
        }
    }

    pub fn classify(&mut self, input: RawInput) -> Classified {
        let mut out = Classified::default();
        match input {
            RawInput::PointerMoved | RawInput::PointerPressed => {
                self.switch_mode(InputMode::Pointer, &mut out);
            }
            RawInput::KeyDown { trusted: false, .. } => {}
            RawInput::KeyDown { key, .. } => {
                self.switch_mode(InputMode::Keyboard, &mut out);
                if let KeyPress::Nav(nav) = key {
                    out.actions.push(ActionEvent::Native(nav.action()));
                }
            }
        }
        out
    }

    /// Evaluate one animation frame of controller state. Only the controller in
    /// slot 0 is read; others are reported once and otherwise ignored.
    pub fn poll(&mut self, pads: &[Option<GamepadSnapshot>]) -> Classified {
        let mut out = Classified::default();

        let connected = pads.iter().flatten().count();
        if connected > 1 && !self.extra_pads_reported {
            info!("controller: {connected} controllers connected; only slot 0 drives navigation");
            self.extra_pads_reported = true;
        } else if connected <= 1 {
            self.extra_pads_reported = false;
        }

        let Some(pad) = pads.first().and_then(Option::as_ref) else {
            self.axes_engaged = [false; 2];
            self.buttons_held.clear();
            return out;
        };

        let x = pad.axis(AXIS_X);
        let y = pad.axis(AXIS_Y);
        let engaged = [x.abs() > self.dead_zone, y.abs() > self.dead_zone];

        if engaged[0] && !self.axes_engaged[0] {
            self.switch_mode(InputMode::Controller, &mut out);
            let action = if x > 0.0 {
                SemanticAction::Right
            } else {
                SemanticAction::Left
            };
            out.actions.push(ActionEvent::Bridged(action));
        }
        if engaged[1] && !self.axes_engaged[1] {
            self.switch_mode(InputMode::Controller, &mut out);
            let action = if y > 0.0 {
                SemanticAction::Down
            } else {
                SemanticAction::Up
            };
            out.actions.push(ActionEvent::Bridged(action));
        }
        self.axes_engaged = engaged;

        if self.buttons_held.len() < pad.buttons.len() {
            self.buttons_held.resize(pad.buttons.len(), false);
        }
        for index in 0..self.buttons_held.len() {
            let pressed = pad.pressed(index);
            if pressed && !self.buttons_held[index] {
                self.switch_mode(InputMode::Controller, &mut out);
                if let Some((_, action)) = BUTTON_ACTIONS.iter().find(|(i, _)| *i == index) {
                    out.actions.push(ActionEvent::Bridged(*action));
                }
            }
            self.buttons_held[index] = pressed;
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad(x: f32, y: f32, pressed: &[usize]) -> Vec<Option<GamepadSnapshot>> {
        let mut buttons = vec![false; 17];
        for &index in pressed {
            buttons[index] = true;
        }
        vec![Some(GamepadSnapshot {
            id: "Xbox Wireless Controller".into(),
            axes: vec![x, y],
            buttons,
        })]
    }

    fn actions(out: &Classified) -> Vec<SemanticAction> {
        out.actions.iter().map(|event| event.action()).collect()
    }

    #[test]
    fn held_stick_emits_a_single_right() {
        let mut classifier = InputClassifier::new(0.5);
        let frames = [0.0, 0.9, 0.9, 0.0];
        let emitted: Vec<Vec<SemanticAction>> = frames
            .iter()
            .map(|&x| actions(&classifier.poll(&pad(x, 0.0, &[]))))
            .collect();

        assert_eq!(
            emitted,
            vec![vec![], vec![SemanticAction::Right], vec![], vec![]]
        );
        assert_eq!(classifier.mode(), InputMode::Controller);
    }

    #[test]
    fn stick_below_dead_zone_is_silent() {
        let mut classifier = InputClassifier::new(0.5);
        for x in [0.1, 0.3, 0.5, -0.5, 0.2] {
            assert!(classifier.poll(&pad(x, x, &[])).actions.is_empty());
        }
        assert_eq!(classifier.mode(), InputMode::Pointer);
    }

    #[test]
    fn every_threshold_crossing_fires_once() {
        let mut classifier = InputClassifier::new(0.5);
        let mut seen = Vec::new();
        for y in [0.0, -0.8, -0.9, -0.7, 0.0, 0.6, 0.95, 0.4, 0.0] {
            seen.extend(actions(&classifier.poll(&pad(0.0, y, &[]))));
        }
        assert_eq!(seen, vec![SemanticAction::Up, SemanticAction::Down]);
    }

    #[test]
    fn buttons_fire_on_press_not_hold() {
        let mut classifier = InputClassifier::new(0.5);
        let mut seen = Vec::new();
        for held in [&[][..], &[0], &[0], &[0, 1], &[], &[0]] {
            seen.extend(actions(&classifier.poll(&pad(0.0, 0.0, held))));
        }
        assert_eq!(
            seen,
            vec![
                SemanticAction::Confirm,
                SemanticAction::Cancel,
                SemanticAction::Confirm
            ]
        );
    }

    #[test]
    fn axes_are_reported_before_buttons() {
        let mut classifier = InputClassifier::new(0.5);
        let out = classifier.poll(&pad(0.9, 0.9, &[0, 13]));
        assert_eq!(
            actions(&out),
            vec![
                SemanticAction::Right,
                SemanticAction::Down,
                SemanticAction::Confirm,
                SemanticAction::Down
            ]
        );
        assert!(out.actions.iter().all(|a| matches!(a, ActionEvent::Bridged(_))));
    }

    #[test]
    fn unmapped_button_only_switches_mode() {
        let mut classifier = InputClassifier::new(0.5);
        let out = classifier.poll(&pad(0.0, 0.0, &[3]));
        assert!(out.actions.is_empty());
        assert!(out.mode_changed);
        assert_eq!(classifier.mode(), InputMode::Controller);
    }

    #[test]
    fn only_the_first_controller_is_read() {
        let mut classifier = InputClassifier::new(0.5);
        let mut second = pad(0.9, 0.0, &[0, 1]);
        let mut pads = vec![pad(0.0, 0.0, &[]).remove(0)];
        pads.append(&mut second);

        assert!(classifier.poll(&pads).actions.is_empty());
        assert!(classifier.poll(&pads).actions.is_empty());
        assert_eq!(classifier.mode(), InputMode::Pointer);
    }

    #[test]
    fn no_controller_is_a_no_op() {
        let mut classifier = InputClassifier::new(0.5);
        assert_eq!(classifier.poll(&[]), Classified::default());
        assert_eq!(classifier.poll(&[None, None]), Classified::default());
    }

    #[test]
    fn reconnecting_resets_edge_state() {
        let mut classifier = InputClassifier::new(0.5);
        assert_eq!(actions(&classifier.poll(&pad(0.0, 0.0, &[0]))).len(), 1);
        classifier.poll(&[]);
        assert_eq!(
            actions(&classifier.poll(&pad(0.0, 0.0, &[0]))),
            vec![SemanticAction::Confirm]
        );
    }

    #[test]
    fn keyboard_actions_are_native() {
        let mut classifier = InputClassifier::new(0.5);
        let out = classifier.classify(RawInput::KeyDown {
            key: KeyPress::Nav(NavKey::ArrowDown),
            trusted: true,
        });
        assert!(out.mode_changed);
        assert_eq!(out.actions, vec![ActionEvent::Native(SemanticAction::Down)]);
        assert_eq!(classifier.mode_tag(), "intent-keyboard");
    }

    #[test]
    fn untrusted_keys_are_ignored() {
        let mut classifier = InputClassifier::new(0.5);
        let synthetic = classifier.classify(RawInput::KeyDown {
            key: KeyPress::Nav(NavKey::Enter),
            trusted: false,
        });
        assert_eq!(synthetic, Classified::default());
        assert_eq!(classifier.mode(), InputMode::Pointer);
    }

    #[test]
    fn other_keys_switch_mode_without_actions() {
        let mut classifier = InputClassifier::new(0.5);
        let out = classifier.classify(RawInput::KeyDown {
            key: KeyPress::Other,
            trusted: true,
        });
        assert!(out.mode_changed);
        assert!(out.actions.is_empty());
    }

    #[test]
    fn pointer_switches_mode_immediately() {
        let mut classifier = InputClassifier::new(0.5);
        classifier.poll(&pad(0.9, 0.0, &[]));
        let out = classifier.classify(RawInput::PointerMoved);
        assert!(out.mode_changed);
        assert!(out.actions.is_empty());
        assert_eq!(classifier.mode(), InputMode::Pointer);
        assert!(!classifier.classify(RawInput::PointerPressed).mode_changed);
    }
}
