//! Activation Constraints
//!
//! Decides when a press on a draggable turns into a drag. Everything here is
//! plain data so the rules can be tested without a browser.

use serde::{Deserialize, Serialize};

use crate::collision::Point;

/// When a press becomes a drag
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationConstraint {
    /// Drag once the pointer moved further than `px` from the press origin
    Distance { px: f64 },
    /// Drag after `ms` if the pointer stayed within `tolerance` px.
    /// Moving further before the delay elapses aborts the press.
    Delay { ms: u32, tolerance: f64 },
}

/// Per-input activation settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub mouse: ActivationConstraint,
    pub touch: ActivationConstraint,
}

impl SensorConfig {
    /// Plain sortable list: mouse drags on any movement, touch after 5px
    pub fn list() -> Self {
        Self {
            mouse: ActivationConstraint::Distance { px: 0.0 },
            touch: ActivationConstraint::Distance { px: 5.0 },
        }
    }

    /// Cards that are also clickable: hold for 150ms, 5px tolerance
    pub fn delayed() -> Self {
        let hold = ActivationConstraint::Delay { ms: 150, tolerance: 5.0 };
        Self { mouse: hold, touch: hold }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self::list()
    }
}

/// Which kind of input started a press
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sensor {
    Mouse,
    Touch,
}

/// What a pending press should do next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Wait,
    Activate,
    Abort,
}

/// A press on a draggable that has not become a drag yet
#[derive(Clone, Debug, PartialEq)]
pub struct PendingPress {
    pub id: String,
    pub sensor: Sensor,
    pub origin: Point,
    /// Press time in milliseconds (`performance.now()` in the browser)
    pub started_at: f64,
    pub constraint: ActivationConstraint,
    /// Distinguishes presses so a stale delay timer cannot activate a newer one
    pub seq: u32,
}

impl PendingPress {
    /// Pointer moved to `at` at time `now`
    pub fn on_move(&self, at: Point, now: f64) -> Activation {
        let moved = self.origin.distance_to(at);
        match self.constraint {
            ActivationConstraint::Distance { px } => {
                if moved > px { Activation::Activate } else { Activation::Wait }
            }
            ActivationConstraint::Delay { ms, tolerance } => {
                if now - self.started_at >= f64::from(ms) {
                    Activation::Activate
                } else if moved > tolerance {
                    Activation::Abort
                } else {
                    Activation::Wait
                }
            }
        }
    }

    /// Delay timer fired at `now` without any movement beyond tolerance
    pub fn on_elapsed(&self, now: f64) -> Activation {
        match self.constraint {
            ActivationConstraint::Delay { ms, .. } if now - self.started_at >= f64::from(ms) => Activation::Activate,
            _ => Activation::Wait,
        }
    }

    /// Milliseconds to wait before `on_elapsed` can activate, if this press is delay-based
    pub fn delay_ms(&self) -> Option<u32> {
        match self.constraint {
            ActivationConstraint::Delay { ms, .. } => Some(ms),
            ActivationConstraint::Distance { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(constraint: ActivationConstraint) -> PendingPress {
        PendingPress {
            id: "task-1".to_string(),
            sensor: Sensor::Mouse,
            origin: Point::new(100.0, 100.0),
            started_at: 1000.0,
            constraint,
            seq: 1,
        }
    }

    #[test]
    fn test_distance_waits_until_threshold_exceeded() {
        let p = press(ActivationConstraint::Distance { px: 5.0 });
        assert_eq!(p.on_move(Point::new(103.0, 104.0), 1001.0), Activation::Wait);
        assert_eq!(p.on_move(Point::new(106.0, 100.0), 1001.0), Activation::Activate);
    }

    #[test]
    fn test_zero_distance_activates_on_any_movement() {
        let p = press(ActivationConstraint::Distance { px: 0.0 });
        assert_eq!(p.on_move(Point::new(100.0, 100.0), 1001.0), Activation::Wait);
        assert_eq!(p.on_move(Point::new(100.5, 100.0), 1001.0), Activation::Activate);
    }

    #[test]
    fn test_delay_aborts_when_moved_too_early() {
        let p = press(ActivationConstraint::Delay { ms: 150, tolerance: 5.0 });
        assert_eq!(p.on_move(Point::new(102.0, 102.0), 1050.0), Activation::Wait);
        assert_eq!(p.on_move(Point::new(120.0, 100.0), 1050.0), Activation::Abort);
    }

    #[test]
    fn test_delay_activates_after_hold() {
        let p = press(ActivationConstraint::Delay { ms: 150, tolerance: 5.0 });
        assert_eq!(p.on_elapsed(1100.0), Activation::Wait);
        assert_eq!(p.on_elapsed(1150.0), Activation::Activate);
        // Movement after the hold drags instead of aborting
        assert_eq!(p.on_move(Point::new(140.0, 100.0), 1200.0), Activation::Activate);
    }

    #[test]
    fn test_distance_press_ignores_elapsed_time() {
        let p = press(ActivationConstraint::Distance { px: 5.0 });
        assert_eq!(p.on_elapsed(99_999.0), Activation::Wait);
        assert_eq!(p.delay_ms(), None);
    }

    #[test]
    fn test_presets() {
        let list = SensorConfig::list();
        assert_eq!(list.touch, ActivationConstraint::Distance { px: 5.0 });
        let delayed = SensorConfig::delayed();
        assert_eq!(delayed.mouse, ActivationConstraint::Delay { ms: 150, tolerance: 5.0 });
        assert_eq!(delayed.mouse, delayed.touch);
    }

    #[test]
    fn test_config_from_json_keeps_defaults_for_missing_fields() {
        let cfg: SensorConfig = serde_json::from_str(r#"{"touch":{"delay":{"ms":200,"tolerance":8.0}}}"#).unwrap();
        assert_eq!(cfg.mouse, SensorConfig::list().mouse);
        assert_eq!(cfg.touch, ActivationConstraint::Delay { ms: 200, tolerance: 8.0 });
    }
}
