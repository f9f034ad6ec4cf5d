//! Gesture Session
//!
//! Step logic of one drag gesture: press, move, delay, release, cancel.
//! Each step returns the events to hand to a [`DragHandler`]; the browser
//! layer only mirrors the state into signals.

use crate::collision::Point;
use crate::sensor::{Activation, PendingPress};
use crate::{DragHandler, DropTarget};

/// Something a [`DragHandler`] must hear about
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEvent {
    Started(String),
    Over { id: String, target: Option<DropTarget> },
    Ended { id: String, over: Option<DropTarget> },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gesture {
    pending: Option<PendingPress>,
    active: Option<String>,
    over: Option<DropTarget>,
    pointer: Option<Point>,
}

impl Gesture {
    pub fn pending(&self) -> Option<&PendingPress> {
        self.pending.as_ref()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn over(&self) -> Option<&DropTarget> {
        self.over.as_ref()
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Record a press. Ignored while a drag is running.
    pub fn press(&mut self, press: PendingPress) {
        if self.active.is_none() {
            self.pending = Some(press);
        }
    }

    fn retarget(&mut self, target: Option<DropTarget>) -> Option<GestureEvent> {
        let id = self.active.clone()?;
        if self.over == target {
            return None;
        }
        self.over = target.clone();
        Some(GestureEvent::Over { id, target })
    }

    fn activate(&mut self, press: PendingPress, at: Point, resolve: impl FnOnce(Point) -> Option<DropTarget>) -> Vec<GestureEvent> {
        self.pending = None;
        self.active = Some(press.id.clone());
        self.pointer = Some(at);
        let mut events = vec![GestureEvent::Started(press.id)];
        events.extend(self.retarget(resolve(at)));
        events
    }

    /// Pointer moved to `at` at time `now`
    pub fn pointer_moved(&mut self, at: Point, now: f64, resolve: impl FnOnce(Point) -> Option<DropTarget>) -> Vec<GestureEvent> {
        if self.active.is_some() {
            self.pointer = Some(at);
            return self.retarget(resolve(at)).into_iter().collect();
        }
        let Some(press) = self.pending.clone() else { return Vec::new() };
        match press.on_move(at, now) {
            Activation::Activate => self.activate(press, at, resolve),
            Activation::Abort => {
                self.pending = None;
                Vec::new()
            }
            Activation::Wait => Vec::new(),
        }
    }

    /// Delay timer of press `seq` fired at `now`
    pub fn delay_elapsed(&mut self, seq: u32, now: f64, resolve: impl FnOnce(Point) -> Option<DropTarget>) -> Vec<GestureEvent> {
        let press = match &self.pending {
            Some(p) if p.seq == seq && self.active.is_none() => p.clone(),
            _ => return Vec::new(),
        };
        match press.on_elapsed(now) {
            Activation::Activate => {
                let at = press.origin;
                self.activate(press, at, resolve)
            }
            _ => Vec::new(),
        }
    }

    /// Whether press `seq` is still waiting for its delay
    pub fn is_waiting(&self, seq: u32) -> bool {
        self.active.is_none() && self.pending.as_ref().is_some_and(|p| p.seq == seq)
    }

    /// Pointer released: drop on the current target
    pub fn release(&mut self) -> Option<GestureEvent> {
        let over = self.over.take();
        self.finish(over)
    }

    /// Gesture aborted (touch cancel, Escape, focus lost): end without a target
    pub fn cancel(&mut self) -> Option<GestureEvent> {
        self.finish(None)
    }

    fn finish(&mut self, over: Option<DropTarget>) -> Option<GestureEvent> {
        self.pending = None;
        self.over = None;
        self.pointer = None;
        self.active.take().map(|id| GestureEvent::Ended { id, over })
    }
}

/// Hand events to the handler in order
pub fn deliver<H: DragHandler>(handler: &H, events: impl IntoIterator<Item = GestureEvent>) {
    for event in events {
        match event {
            GestureEvent::Started(id) => {
                log::debug!("[DND] Drag start: {}", id);
                handler.drag_start(&id);
            }
            GestureEvent::Over { id, target } => handler.drag_over(&id, target.as_ref()),
            GestureEvent::Ended { id, over } => {
                log::debug!("[DND] Drag end: {} over {:?}", id, over);
                handler.drag_end(&id, over);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{ActivationConstraint, Sensor};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl DragHandler for Recorder {
        fn drag_start(&self, id: &str) {
            self.calls.borrow_mut().push(format!("start {}", id));
        }

        fn drag_over(&self, id: &str, target: Option<&DropTarget>) {
            self.calls.borrow_mut().push(format!("over {} {:?}", id, target));
        }

        fn drag_end(&self, id: &str, over: Option<DropTarget>) {
            self.calls.borrow_mut().push(format!("end {} {:?}", id, over));
        }
    }

    fn press(constraint: ActivationConstraint, seq: u32) -> PendingPress {
        PendingPress {
            id: "task-1".to_string(),
            sensor: Sensor::Touch,
            origin: Point::new(0.0, 0.0),
            started_at: 0.0,
            constraint,
            seq,
        }
    }

    fn distance() -> ActivationConstraint {
        ActivationConstraint::Distance { px: 5.0 }
    }

    fn hold() -> ActivationConstraint {
        ActivationConstraint::Delay { ms: 150, tolerance: 5.0 }
    }

    fn onto(id: &str) -> impl FnOnce(Point) -> Option<DropTarget> {
        let target = DropTarget::Item(id.to_string());
        move |_| Some(target)
    }

    fn dragging(over: &str) -> Gesture {
        let mut g = Gesture::default();
        g.press(press(distance(), 1));
        g.pointer_moved(Point::new(20.0, 0.0), 10.0, onto(over));
        g
    }

    #[test]
    fn test_move_past_threshold_starts_drag() {
        let mut g = Gesture::default();
        g.press(press(distance(), 1));
        assert!(g.pointer_moved(Point::new(2.0, 0.0), 5.0, onto("task-2")).is_empty());

        let events = g.pointer_moved(Point::new(20.0, 0.0), 10.0, onto("task-2"));
        assert_eq!(
            events,
            vec![
                GestureEvent::Started("task-1".to_string()),
                GestureEvent::Over { id: "task-1".to_string(), target: Some(DropTarget::Item("task-2".to_string())) },
            ]
        );
        assert_eq!(g.active(), Some("task-1"));
        assert_eq!(g.pending(), None);
        assert_eq!(g.pointer(), Some(Point::new(20.0, 0.0)));
    }

    #[test]
    fn test_same_target_is_not_repeated() {
        let mut g = dragging("task-2");
        assert!(g.pointer_moved(Point::new(25.0, 0.0), 20.0, onto("task-2")).is_empty());
        assert_eq!(g.pointer_moved(Point::new(30.0, 0.0), 30.0, |_| None).len(), 1);
        assert_eq!(g.over(), None);
    }

    #[test]
    fn test_release_drops_on_target() {
        let mut g = dragging("task-3");
        let ended = g.release();
        assert_eq!(
            ended,
            Some(GestureEvent::Ended { id: "task-1".to_string(), over: Some(DropTarget::Item("task-3".to_string())) })
        );
        assert_eq!(g, Gesture::default());
    }

    #[test]
    fn test_cancel_ends_without_target() {
        let mut g = dragging("task-3");
        let recorder = Recorder::default();
        deliver(&recorder, g.cancel());
        assert_eq!(recorder.calls(), vec!["end task-1 None".to_string()]);
        assert_eq!(g.active(), None);
        assert_eq!(g.over(), None);
    }

    #[test]
    fn test_pending_press_never_ends_a_drag() {
        let recorder = Recorder::default();

        let mut g = Gesture::default();
        g.press(press(distance(), 1));
        deliver(&recorder, g.release());
        assert_eq!(g.pending(), None);

        g.press(press(hold(), 2));
        deliver(&recorder, g.cancel());
        assert_eq!(g.pending(), None);

        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_delay_timer_activates_after_hold() {
        let mut g = Gesture::default();
        g.press(press(hold(), 7));
        let recorder = Recorder::default();
        deliver(&recorder, g.delay_elapsed(7, 150.0, |_| None));
        assert_eq!(recorder.calls(), vec!["start task-1".to_string()]);
        assert_eq!(g.pointer(), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_delay_timer_early_keeps_waiting() {
        let mut g = Gesture::default();
        g.press(press(hold(), 7));
        assert!(g.delay_elapsed(7, 149.0, |_| None).is_empty());
        assert!(g.is_waiting(7));
        assert_eq!(g.active(), None);
    }

    #[test]
    fn test_stale_delay_timer_is_ignored() {
        let mut g = Gesture::default();
        g.press(press(hold(), 1));
        g.press(press(hold(), 2));
        assert!(g.delay_elapsed(1, 500.0, |_| None).is_empty());
        assert!(!g.is_waiting(1));
        assert!(g.is_waiting(2));
    }

    #[test]
    fn test_moving_during_hold_aborts_press() {
        let mut g = Gesture::default();
        g.press(press(hold(), 3));
        assert!(g.pointer_moved(Point::new(0.0, 40.0), 50.0, onto("task-2")).is_empty());
        assert_eq!(g.pending(), None);
        // Timer firing later finds nothing to activate
        assert!(g.delay_elapsed(3, 200.0, |_| None).is_empty());
    }

    #[test]
    fn test_press_ignored_while_dragging() {
        let mut g = dragging("task-2");
        g.press(press(distance(), 9));
        assert_eq!(g.pending(), None);
        assert_eq!(g.active(), Some("task-1"));
    }
}
