use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Check whether an optional cancellation flag has been raised.
#[must_use]
pub fn cancel_requested(cancel: &Option<Arc<AtomicBool>>) -> bool {
    cancel
        .as_ref()
        .map(|flag| flag.load(Ordering::SeqCst))
        .unwrap_or(false)
}

/// Whether an optional deadline has passed. An absent deadline never expires.
#[must_use]
pub fn deadline_passed(deadline: Option<Instant>, now: Instant) -> bool {
    deadline.is_some_and(|at| now >= at)
}

/// Clamp a stick dead zone into a range where both edges stay reachable.
#[must_use]
pub fn clamp_dead_zone(value: f32) -> f32 {
    const MIN: f32 = 0.05;
    const MAX: f32 = 0.95;

    if value.is_nan() {
        return 0.5;
    }
    value.clamp(MIN, MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn respects_optional_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        assert!(!cancel_requested(&Some(flag.clone())));
        flag.store(true, Ordering::SeqCst);
        assert!(cancel_requested(&Some(flag)));
        assert!(!cancel_requested(&None));
    }

    #[test]
    fn deadlines_expire_inclusively() {
        let now = Instant::now();
        assert!(!deadline_passed(None, now));
        assert!(deadline_passed(Some(now), now));
        assert!(!deadline_passed(Some(now + Duration::from_secs(1)), now));
    }

    #[test]
    fn clamps_dead_zone() {
        assert_eq!(clamp_dead_zone(0.5), 0.5);
        assert_eq!(clamp_dead_zone(0.0), 0.05);
        assert_eq!(clamp_dead_zone(3.0), 0.95);
        assert_eq!(clamp_dead_zone(f32::NAN), 0.5);
    }
}
