use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{info, warn};
use sysinfo::System;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::gamepad::GamepadSnapshot;
use crate::util::deadline_passed;

const DMI_PRODUCT_NAME: &str = "/sys/class/dmi/id/product_name";
/// Steam Deck board names (LCD and OLED).
const HANDHELD_BOARDS: [&str; 2] = ["Jupiter", "Galileo"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceKind {
    Handheld,
    Generic,
}

pub type DeviceProbe = Arc<dyn Fn() -> Result<DeviceKind, String> + Send + Sync>;

/// Identify the machine the launcher runs on.
pub fn detect_device_kind() -> Result<DeviceKind, String> {
    if std::env::var("SteamDeck").is_ok_and(|value| value == "1") {
        return Ok(DeviceKind::Handheld);
    }
    if System::host_name().is_some_and(|host| host.eq_ignore_ascii_case("steamdeck")) {
        return Ok(DeviceKind::Handheld);
    }
    if cfg!(target_os = "linux") {
        let product = std::fs::read_to_string(DMI_PRODUCT_NAME)
            .map_err(|e| format!("unable to read {DMI_PRODUCT_NAME}: {e}"))?;
        let kind = if HANDHELD_BOARDS.contains(&product.trim()) {
            DeviceKind::Handheld
        } else {
            DeviceKind::Generic
        };
        return Ok(kind);
    }
    Ok(DeviceKind::Generic)
}

/// Transient notice: a visible flag plus an auto-hide deadline.
#[derive(Clone, Debug)]
pub struct NoticeState {
    kind: DeviceKind,
    hide_at: Option<Instant>,
    duration: Duration,
}

impl NoticeState {
    pub fn new(duration: Duration) -> Self {
        Self {
            kind: DeviceKind::Generic,
            hide_at: None,
            duration,
        }
    }

    pub fn show(&mut self, kind: DeviceKind, now: Instant) {
        self.kind = kind;
        self.hide_at = Some(now + self.duration);
    }

    /// Hide the notice once its deadline passes.
    pub fn tick(&mut self, now: Instant) {
        if deadline_passed(self.hide_at, now) {
            self.hide_at = None;
        }
    }

    pub fn visible(&self) -> bool {
        self.hide_at.is_some()
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.hide_at.map(|at| at.saturating_duration_since(now))
    }
}

/// Shows a notice when a controller appears. The device probe runs on the
/// tokio runtime and reports back over a channel, so nothing here ever waits.
pub struct ControllerAnnouncer {
    notice: NoticeState,
    known: HashSet<String>,
    probe: DeviceProbe,
    runtime: Handle,
    results_tx: mpsc::UnboundedSender<Result<DeviceKind, String>>,
    results_rx: mpsc::UnboundedReceiver<Result<DeviceKind, String>>,
}

impl ControllerAnnouncer {
    pub fn new(runtime: Handle, probe: DeviceProbe, duration: Duration) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            notice: NoticeState::new(duration),
            known: HashSet::new(),
            probe,
            runtime,
            results_tx,
            results_rx,
        }
    }

    pub fn notice(&self) -> &NoticeState {
        &self.notice
    }

    /// Compare this frame's controllers against the known set and start a
    /// probe for every newcomer. Controllers present at startup count too.
    pub fn observe(&mut self, pads: &[Option<GamepadSnapshot>]) {
        let present: HashSet<String> = pads
            .iter()
            .enumerate()
            .filter_map(|(slot, pad)| pad.as_ref().map(|pad| format!("{slot}:{}", pad.id)))
            .collect();

        for id in present.difference(&self.known) {
            info!("controller: connected {id}");
            self.spawn_probe();
        }
        self.known = present;
    }

    fn spawn_probe(&self) {
        let probe = self.probe.clone();
        let tx = self.results_tx.clone();
        self.runtime.spawn(async move {
            let result = tokio::task::spawn_blocking(move || probe())
                .await
                .unwrap_or_else(|e| Err(format!("device probe task failed: {e}")));
            let _ = tx.send(result);
        });
    }

    /// Apply finished probes and expire the notice.
    pub fn sync(&mut self, now: Instant) {
        while let Ok(result) = self.results_rx.try_recv() {
            let kind = match result {
                Ok(kind) => kind,
                Err(err) => {
                    warn!("controller: device identification failed: {err}");
                    DeviceKind::Generic
                }
            };
            self.notice.show(kind, now);
        }
        self.notice.tick(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::runtime::Runtime;

    fn pads(ids: &[&str]) -> Vec<Option<GamepadSnapshot>> {
        ids.iter()
            .map(|id| {
                Some(GamepadSnapshot {
                    id: (*id).to_owned(),
                    ..GamepadSnapshot::default()
                })
            })
            .collect()
    }

    fn settle(announcer: &mut ControllerAnnouncer) {
        for _ in 0..400 {
            announcer.sync(Instant::now());
            if announcer.notice().visible() {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn notice_hides_after_its_duration() {
        let start = Instant::now();
        let mut notice = NoticeState::new(Duration::from_secs(3));
        notice.show(DeviceKind::Handheld, start);
        notice.tick(start + Duration::from_secs(2));
        assert!(notice.visible());
        assert_eq!(notice.remaining(start + Duration::from_secs(2)), Some(Duration::from_secs(1)));
        notice.tick(start + Duration::from_secs(3));
        assert!(!notice.visible());
    }

    #[test]
    fn probe_result_picks_the_label() {
        let rt = Runtime::new().expect("runtime");
        let probe: DeviceProbe = Arc::new(|| Ok(DeviceKind::Handheld));
        let mut announcer =
            ControllerAnnouncer::new(rt.handle().clone(), probe, Duration::from_secs(3));

        announcer.observe(&pads(&["Steam Deck Controller"]));
        settle(&mut announcer);
        assert!(announcer.notice().visible());
        assert_eq!(announcer.notice().kind(), DeviceKind::Handheld);
    }

    #[test]
    fn failed_probe_still_shows_generic_notice() {
        let rt = Runtime::new().expect("runtime");
        let probe: DeviceProbe = Arc::new(|| Err("no DMI".into()));
        let mut announcer =
            ControllerAnnouncer::new(rt.handle().clone(), probe, Duration::from_secs(3));

        announcer.observe(&pads(&["Generic USB Pad"]));
        settle(&mut announcer);
        assert!(announcer.notice().visible());
        assert_eq!(announcer.notice().kind(), DeviceKind::Generic);
    }

    #[test]
    fn known_controllers_are_not_announced_again() {
        let rt = Runtime::new().expect("runtime");
        let probe: DeviceProbe = Arc::new(|| Ok(DeviceKind::Generic));
        let mut announcer =
            ControllerAnnouncer::new(rt.handle().clone(), probe, Duration::from_millis(1));

        announcer.observe(&pads(&["pad"]));
        settle(&mut announcer);
        std::thread::sleep(Duration::from_millis(5));
        announcer.sync(Instant::now());
        assert!(!announcer.notice().visible());

        announcer.observe(&pads(&["pad"]));
        std::thread::sleep(Duration::from_millis(50));
        announcer.sync(Instant::now());
        assert!(!announcer.notice().visible());
    }
}
