use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::util::cancel_requested;

/// One polled controller in the standard layout: axes 0/1 are the left stick
/// (positive right / down), buttons follow the standard gamepad indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GamepadSnapshot {
    pub id: String,
    pub axes: Vec<f32>,
    pub buttons: Vec<bool>,
}

impl GamepadSnapshot {
    pub fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    pub fn pressed(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }
}

/// Something that can list the connected controllers, slot by slot.
pub trait GamepadSource {
    fn poll(&mut self) -> Vec<Option<GamepadSnapshot>>;
}

/// Used when no native controller backend is compiled in.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGamepads;

impl GamepadSource for NoGamepads {
    fn poll(&mut self) -> Vec<Option<GamepadSnapshot>> {
        Vec::new()
    }
}

/// Per-frame controller polling with an explicit lifetime.
///
/// The cancel flag is acquired by [`ControllerPoll::start`] and raised when the
/// poll is dropped; once raised, [`ControllerPoll::tick`] stops reading.
pub struct ControllerPoll {
    source: Box<dyn GamepadSource>,
    cancel: Option<Arc<AtomicBool>>,
}

impl ControllerPoll {
    pub fn start(source: Box<dyn GamepadSource>) -> Self {
        debug!("controller: poll loop started");
        Self {
            source,
            cancel: Some(Arc::new(AtomicBool::new(false))),
        }
    }

    /// Shared stop flag for teardown from outside the frame loop.
    #[allow(dead_code)]
    pub fn stop_flag(&self) -> Option<Arc<AtomicBool>> {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        !cancel_requested(&self.cancel)
    }

    /// Read the controller list for this frame; `None` once stopped.
    pub fn tick(&mut self) -> Option<Vec<Option<GamepadSnapshot>>> {
        if !self.is_running() {
            return None;
        }
        Some(self.source.poll())
    }
}

impl Drop for ControllerPoll {
    fn drop(&mut self) {
        if let Some(flag) = self.cancel.take() {
            flag.store(true, Ordering::SeqCst);
            debug!("controller: poll loop released");
        }
    }
}

/// Pick the native controller backend when the `gamepad` feature is enabled.
pub fn native_source() -> Box<dyn GamepadSource> {
    #[cfg(feature = "gamepad")]
    {
        match gilrs_backend::GilrsSource::new() {
            Ok(source) => return Box::new(source),
            Err(err) => log::warn!("controller: {err}; controller input disabled"),
        }
    }
    Box::new(NoGamepads)
}

#[cfg(feature = "gamepad")]
mod gilrs_backend {
    use gilrs::{Axis, Button, Gilrs};
    use log::warn;

    use super::{GamepadSnapshot, GamepadSource};

    // Standard gamepad button order.
    const STANDARD_BUTTONS: [Button; 17] = [
        Button::South,
        Button::East,
        Button::West,
        Button::North,
        Button::LeftTrigger,
        Button::RightTrigger,
        Button::LeftTrigger2,
        Button::RightTrigger2,
        Button::Select,
        Button::Start,
        Button::LeftThumb,
        Button::RightThumb,
        Button::DPadUp,
        Button::DPadDown,
        Button::DPadLeft,
        Button::DPadRight,
        Button::Mode,
    ];

    pub struct GilrsSource {
        gilrs: Gilrs,
    }

    impl GilrsSource {
        pub fn new() -> Result<Self, String> {
            match Gilrs::new() {
                Ok(gilrs) => Ok(Self { gilrs }),
                Err(gilrs::Error::NotImplemented(gilrs)) => {
                    warn!("controller: platform not supported by gilrs; using dummy backend");
                    Ok(Self { gilrs })
                }
                Err(err) => Err(format!("gamepad backend unavailable: {err}")),
            }
        }
    }

    impl GamepadSource for GilrsSource {
        fn poll(&mut self) -> Vec<Option<GamepadSnapshot>> {
            // Drain pending events so cached pad state is current.
            while self.gilrs.next_event().is_some() {}
            self.gilrs
                .gamepads()
                .map(|(_, pad)| {
                    Some(GamepadSnapshot {
                        id: pad.name().to_owned(),
                        // gilrs reports Y up; the standard layout is Y down.
                        axes: vec![pad.value(Axis::LeftStickX), -pad.value(Axis::LeftStickY)],
                        buttons: STANDARD_BUTTONS
                            .iter()
                            .map(|button| pad.is_pressed(*button))
                            .collect(),
                    })
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OnePad;

    impl GamepadSource for OnePad {
        fn poll(&mut self) -> Vec<Option<GamepadSnapshot>> {
            vec![Some(GamepadSnapshot {
                id: "pad".into(),
                axes: vec![0.0, 0.0],
                buttons: vec![false; 17],
            })]
        }
    }

    #[test]
    fn empty_source_polls_nothing() {
        let mut poll = ControllerPoll::start(Box::new(NoGamepads));
        assert_eq!(poll.tick(), Some(Vec::new()));
    }

    #[test]
    fn raising_the_flag_stops_the_loop() {
        let mut poll = ControllerPoll::start(Box::new(OnePad));
        assert_eq!(poll.tick().map(|pads| pads.len()), Some(1));

        let flag = poll.stop_flag().expect("flag while running");
        flag.store(true, Ordering::SeqCst);
        assert!(!poll.is_running());
        assert_eq!(poll.tick(), None);
    }

    #[test]
    fn dropping_the_poll_releases_the_token() {
        let poll = ControllerPoll::start(Box::new(OnePad));
        let flag = poll.stop_flag().expect("flag while running");
        drop(poll);
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn out_of_range_reads_are_neutral() {
        let pad = GamepadSnapshot::default();
        assert_eq!(pad.axis(3), 0.0);
        assert!(!pad.pressed(12));
    }
}
