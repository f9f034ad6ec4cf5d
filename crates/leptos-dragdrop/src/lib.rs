//! Leptos DragDrop Utilities
//!
//! Pointer and touch drag-and-drop for Leptos.
//! Activation constraints separate a click from a drag; the drop target is
//! resolved by closest center over elements tagged with `data-dnd-*` attributes.
//! Consumers receive start / over / end events through [`DragHandler`].

pub mod collision;
pub mod sensor;
pub mod session;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub use collision::{closest_center, resolve_target, ContainerRect, ItemRect, Point, Rect};
pub use sensor::{Activation, ActivationConstraint, PendingPress, Sensor, SensorConfig};
pub use session::{Gesture, GestureEvent};

/// Attribute carrying a draggable card's id
pub const ITEM_ATTR: &str = "data-dnd-item";
/// Attribute carrying the container id a card is rendered in
pub const PARENT_ATTR: &str = "data-dnd-parent";
/// Attribute carrying a container's id
pub const CONTAINER_ATTR: &str = "data-dnd-container";

/// How long clicks stay suppressed after a drop
const CLICK_SUPPRESS_MS: u32 = 100;

/// Drop target types
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Over another card
    Item(String),
    /// Over a container with no card nearby (e.g. an empty board)
    Container(String),
}

/// Receives the gesture events of a drag session
pub trait DragHandler: Clone + 'static {
    fn drag_start(&self, id: &str);

    /// Hover target changed; transient feedback only
    fn drag_over(&self, _id: &str, _target: Option<&DropTarget>) {}

    /// Gesture finished. `over` is `None` on cancel or when released over nothing.
    fn drag_end(&self, id: &str, over: Option<DropTarget>);
}

/// DnD state signals
///
/// Mirrors of the current [`Gesture`] for rendering; the gesture itself is
/// the source of truth.
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub active_id_read: ReadSignal<Option<String>>,
    pub active_id_write: WriteSignal<Option<String>>,
    pub over_read: ReadSignal<Option<DropTarget>>,
    pub over_write: WriteSignal<Option<DropTarget>>,
    /// Last pointer position while dragging, for the overlay
    pub pointer_read: ReadSignal<Option<Point>>,
    pub pointer_write: WriteSignal<Option<Point>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Press that has not become a drag yet
    pub pending_read: ReadSignal<Option<PendingPress>>,
    pub pending_write: WriteSignal<Option<PendingPress>>,
    gesture: StoredValue<Gesture>,
    config: StoredValue<SensorConfig>,
    press_seq: StoredValue<u32>,
}

pub fn create_dnd_signals(config: SensorConfig) -> DndSignals {
    let (active_id_read, active_id_write) = signal(None::<String>);
    let (over_read, over_write) = signal(None::<DropTarget>);
    let (pointer_read, pointer_write) = signal(None::<Point>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<PendingPress>);
    DndSignals {
        active_id_read,
        active_id_write,
        over_read,
        over_write,
        pointer_read,
        pointer_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        gesture: StoredValue::new(Gesture::default()),
        config: StoredValue::new(config),
        press_seq: StoredValue::new(0),
    }
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Run one gesture step against the stored session
fn step<R>(dnd: &DndSignals, f: impl FnOnce(&mut Gesture) -> R) -> R {
    let mut gesture = dnd.gesture.get_value();
    let out = f(&mut gesture);
    dnd.gesture.set_value(gesture);
    out
}

/// Copy the gesture state into the signals, touching only what changed
fn sync(dnd: &DndSignals) {
    let gesture = dnd.gesture.get_value();

    let active = gesture.active().map(str::to_string);
    if dnd.active_id_read.get_untracked() != active {
        dnd.active_id_write.set(active);
    }
    let over = gesture.over().cloned();
    if dnd.over_read.get_untracked() != over {
        dnd.over_write.set(over);
    }
    let pointer = gesture.pointer();
    if dnd.pointer_read.get_untracked() != pointer {
        dnd.pointer_write.set(pointer);
    }
    let pending = gesture.pending().cloned();
    if dnd.pending_read.get_untracked() != pending {
        dnd.pending_write.set(pending);
    }
}

/// The click that follows a drop must not count as a click on the card
fn suppress_click(dnd: &DndSignals) {
    dnd.drag_just_ended_write.set(true);
    let clear = dnd.drag_just_ended_write;
    Timeout::new(CLICK_SUPPRESS_MS, move || clear.set(false)).forget();
}

fn dispatch<H: DragHandler>(dnd: &DndSignals, handler: &H, events: Vec<GestureEvent>) {
    sync(dnd);
    if events.iter().any(|e| matches!(e, GestureEvent::Ended { .. })) {
        suppress_click(dnd);
    }
    session::deliver(handler, events);
}

fn begin_press(dnd: &DndSignals, id: String, sensor: Sensor, origin: Point) {
    let config = dnd.config.get_value();
    let constraint = match sensor {
        Sensor::Mouse => config.mouse,
        Sensor::Touch => config.touch,
    };
    let seq = dnd.press_seq.get_value().wrapping_add(1);
    dnd.press_seq.set_value(seq);
    let press = PendingPress {
        id,
        sensor,
        origin,
        started_at: now_ms(),
        constraint,
        seq,
    };
    step(dnd, |g| g.press(press));
    sync(dnd);
}

fn is_control(target: Option<web_sys::EventTarget>) -> bool {
    target.is_some_and(|t| {
        t.dyn_ref::<web_sys::HtmlInputElement>().is_some() || t.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
    })
}

/// Create mousedown handler for draggable cards
/// Records a pending press; the sensor constraint decides when it becomes a drag
pub fn make_on_mousedown(dnd: DndSignals, item_id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || is_control(ev.target()) {
            return;
        }
        let origin = Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()));
        begin_press(&dnd, item_id.clone(), Sensor::Mouse, origin);
    }
}

/// Create touchstart handler for draggable cards
pub fn make_on_touchstart(dnd: DndSignals, item_id: String) -> impl Fn(web_sys::TouchEvent) + Clone + 'static {
    move |ev: web_sys::TouchEvent| {
        if ev.touches().length() != 1 || is_control(ev.target()) {
            return;
        }
        if let Some(origin) = touch_point(&ev.touches()) {
            begin_press(&dnd, item_id.clone(), Sensor::Touch, origin);
        }
    }
}

fn touch_point(list: &web_sys::TouchList) -> Option<Point> {
    list.get(0)
        .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
}

fn measure<T>(selector: &str, read: impl Fn(&web_sys::Element, Rect) -> Option<T>) -> Vec<T> {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return Vec::new();
    };
    let Ok(nodes) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .filter_map(|el| {
            let r = el.get_bounding_client_rect();
            read(&el, Rect::new(r.left(), r.top(), r.width(), r.height()))
        })
        .collect()
}

fn measure_items() -> Vec<ItemRect> {
    measure(&format!("[{ITEM_ATTR}]"), |el, rect| {
        Some(ItemRect {
            id: el.get_attribute(ITEM_ATTR)?,
            container: el.get_attribute(PARENT_ATTR),
            rect,
        })
    })
}

fn measure_containers() -> Vec<ContainerRect> {
    measure(&format!("[{CONTAINER_ATTR}]"), |el, rect| {
        Some(ContainerRect { id: el.get_attribute(CONTAINER_ATTR)?, rect })
    })
}

/// Target under `at`, measured from the live DOM
fn resolve_at(at: Point) -> Option<DropTarget> {
    resolve_target(at, &measure_containers(), &measure_items())
}

/// Returns true while a drag is in progress after handling the move
fn pointer_moved<H: DragHandler>(dnd: &DndSignals, handler: &H, at: Point) -> bool {
    let now = now_ms();
    let events = step(dnd, |g| g.pointer_moved(at, now, resolve_at));
    dispatch(dnd, handler, events);
    dnd.gesture.get_value().active().is_some()
}

/// Pointer released: drop on the current target, or just clear a pending press
fn release<H: DragHandler>(dnd: &DndSignals, handler: &H) {
    let ended = step(dnd, Gesture::release);
    dispatch(dnd, handler, ended.into_iter().collect());
}

/// Abort the current gesture; a running drag still ends, without a target
pub fn cancel_drag<H: DragHandler>(dnd: &DndSignals, handler: &H) {
    let ended = step(dnd, Gesture::cancel);
    dispatch(dnd, handler, ended.into_iter().collect());
}

/// Fire the delay check for press `seq` after `ms`
fn schedule_delay<H: DragHandler>(dnd: DndSignals, handler: H, seq: u32, ms: u32) {
    Timeout::new(ms, move || {
        let now = now_ms();
        let events = step(&dnd, |g| g.delay_elapsed(seq, now, resolve_at));
        let still_waiting = dnd.gesture.get_value().is_waiting(seq);
        dispatch(&dnd, &handler, events);
        // Timers and the performance clock can disagree by a fraction of a millisecond
        if still_waiting {
            schedule_delay(dnd, handler, seq, 1);
        }
    })
    .forget();
}

fn listen(target: &web_sys::EventTarget, event: &str, passive: Option<bool>, f: impl FnMut(web_sys::Event) + 'static) {
    let cb = Closure::<dyn FnMut(web_sys::Event)>::new(f);
    let added = match passive {
        Some(passive) => {
            let opts = web_sys::AddEventListenerOptions::new();
            opts.set_passive(passive);
            target.add_event_listener_with_callback_and_add_event_listener_options(event, cb.as_ref().unchecked_ref(), &opts)
        }
        None => target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()),
    };
    if added.is_err() {
        log::warn!("[DND] Failed to bind {} listener", event);
    }
    cb.forget();
}

/// Bind the document-level listeners that drive a drag session.
///
/// Covers pointer movement, release, touch cancel, Escape and window blur,
/// plus the delay timer of delay-constrained presses.
pub fn bind_dnd<H: DragHandler>(dnd: DndSignals, handler: H) {
    let Some(win) = web_sys::window() else { return };
    let Some(doc) = win.document() else { return };

    let h = handler.clone();
    listen(&doc, "mousemove", None, move |ev| {
        if let Some(ev) = ev.dyn_ref::<web_sys::MouseEvent>() {
            pointer_moved(&dnd, &h, Point::new(f64::from(ev.client_x()), f64::from(ev.client_y())));
        }
    });

    let h = handler.clone();
    listen(&doc, "mouseup", None, move |_| release(&dnd, &h));

    let h = handler.clone();
    listen(&doc, "touchmove", Some(false), move |ev| {
        if let Some(tev) = ev.dyn_ref::<web_sys::TouchEvent>() {
            if let Some(at) = touch_point(&tev.touches()) {
                // Keep the page from scrolling under an active drag
                if pointer_moved(&dnd, &h, at) {
                    ev.prevent_default();
                }
            }
        }
    });

    let h = handler.clone();
    listen(&doc, "touchend", None, move |_| release(&dnd, &h));

    let h = handler.clone();
    listen(&doc, "touchcancel", None, move |_| cancel_drag(&dnd, &h));

    let h = handler.clone();
    listen(&doc, "keydown", None, move |ev| {
        if let Some(kev) = ev.dyn_ref::<web_sys::KeyboardEvent>() {
            if kev.key() == "Escape" {
                cancel_drag(&dnd, &h);
            }
        }
    });

    let h = handler.clone();
    listen(&win, "blur", None, move |_| cancel_drag(&dnd, &h));

    // Delay-constrained presses activate from a timer when the pointer holds still
    Effect::new(move |_| {
        let Some(press) = dnd.pending_read.get() else { return };
        if let Some(ms) = press.delay_ms() {
            schedule_delay(dnd, handler.clone(), press.seq, ms);
        }
    });
}
