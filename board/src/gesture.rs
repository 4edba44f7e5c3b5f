//! Gesture arbitration: single-finger draw vs. two-finger pinch.
//!
//! The arbiter is a state machine over the set of active contact points. It
//! has a single entry point, [`GestureArbiter::handle`], which consumes raw
//! pointer events and returns what the gesture means, keeping the machine
//! independent of the host's event dispatch. Drawing and pinching are
//! mutually exclusive: a second contact during a draw discards the
//! in-progress stroke (the caller cancels capture on [`GestureEvent::PinchStart`])
//! and the gesture becomes a pinch. A finger left over after a pinch never
//! draws; the machine only returns to drawing from a fully idle state.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::doc::Point;

/// Host pointer identifier (`PointerEvent.pointerId`).
pub type PointerId = i64;

/// A raw pointer event forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { id: PointerId, x: f64, y: f64 },
    Move { id: PointerId, x: f64, y: f64 },
    Up { id: PointerId },
    /// OS-level interrupt (e.g. a system gesture stole the pointer).
    Cancel { id: PointerId },
}

/// The arbitrated meaning of one pointer event.
///
/// Coordinates are screen-space client pixels. `PinchStart` doubles as the
/// re-baseline signal whenever the tracked contact pair changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Ignored,
    DrawStart { x: f64, y: f64 },
    DrawMove { x: f64, y: f64 },
    DrawEnd,
    /// The draw was interrupted; discard the in-progress stroke.
    DrawCancel,
    PinchStart { distance: f64, center_x: f64, center_y: f64 },
    PinchMove { distance: f64, center_x: f64, center_y: f64 },
    PinchEnd,
}

/// Which gesture the contact set currently represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Drawing,
    Pinching,
}

#[derive(Debug, Clone, Copy)]
struct Contact {
    id: PointerId,
    x: f64,
    y: f64,
}

/// Tracks active contacts and disambiguates draw from pinch.
#[derive(Debug, Default)]
pub struct GestureArbiter {
    contacts: Vec<Contact>,
    phase: GesturePhase,
    /// The contact that started the current draw, while `phase == Drawing`.
    drawing_id: Option<PointerId>,
}

impl GestureArbiter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Consume one pointer event and return its arbitrated meaning.
    pub fn handle(&mut self, event: PointerEvent) -> GestureEvent {
        match event {
            PointerEvent::Down { id, x, y } => self.on_down(id, x, y),
            PointerEvent::Move { id, x, y } => self.on_move(id, x, y),
            PointerEvent::Up { id } => self.on_up(id),
            PointerEvent::Cancel { id } => self.on_cancel(id),
        }
    }

    fn on_down(&mut self, id: PointerId, x: f64, y: f64) -> GestureEvent {
        self.upsert_contact(id, x, y);

        match (self.phase, self.contacts.len()) {
            (GesturePhase::Idle, 1) => {
                self.phase = GesturePhase::Drawing;
                self.drawing_id = Some(id);
                GestureEvent::DrawStart { x, y }
            }
            // A second contact always wins over an in-progress draw, and any
            // contact-set growth during a pinch re-baselines it.
            (GesturePhase::Drawing | GesturePhase::Idle | GesturePhase::Pinching, n) if n >= 2 => {
                self.phase = GesturePhase::Pinching;
                self.drawing_id = None;
                self.pinch_start()
            }
            _ => GestureEvent::Ignored,
        }
    }

    fn on_move(&mut self, id: PointerId, x: f64, y: f64) -> GestureEvent {
        if !self.upsert_known_contact(id, x, y) {
            return GestureEvent::Ignored;
        }

        match self.phase {
            GesturePhase::Drawing if self.drawing_id == Some(id) => GestureEvent::DrawMove { x, y },
            GesturePhase::Pinching if self.contacts.len() >= 2 => self.pinch_move(),
            _ => GestureEvent::Ignored,
        }
    }

    fn on_up(&mut self, id: PointerId) -> GestureEvent {
        self.remove_contact(id);

        match self.phase {
            GesturePhase::Drawing if self.drawing_id == Some(id) => {
                self.phase = GesturePhase::Idle;
                self.drawing_id = None;
                GestureEvent::DrawEnd
            }
            GesturePhase::Pinching => match self.contacts.len() {
                // Two fingers remain: re-baseline on the new tracked pair.
                n if n >= 2 => self.pinch_start(),
                1 => GestureEvent::PinchEnd,
                _ => {
                    self.phase = GesturePhase::Idle;
                    GestureEvent::Ignored
                }
            },
            _ => GestureEvent::Ignored,
        }
    }

    /// Pointer-cancel drops the whole gesture: all contacts are forgotten
    /// and the machine returns to idle immediately.
    fn on_cancel(&mut self, _id: PointerId) -> GestureEvent {
        let was = self.phase;
        self.contacts.clear();
        self.phase = GesturePhase::Idle;
        self.drawing_id = None;

        match was {
            GesturePhase::Drawing => GestureEvent::DrawCancel,
            GesturePhase::Pinching => GestureEvent::PinchEnd,
            GesturePhase::Idle => GestureEvent::Ignored,
        }
    }

    fn pinch_start(&self) -> GestureEvent {
        let (distance, center) = self.pinch_geometry();
        GestureEvent::PinchStart { distance, center_x: center.x, center_y: center.y }
    }

    fn pinch_move(&self) -> GestureEvent {
        let (distance, center) = self.pinch_geometry();
        GestureEvent::PinchMove { distance, center_x: center.x, center_y: center.y }
    }

    /// Distance and midpoint of the first two tracked contacts.
    fn pinch_geometry(&self) -> (f64, Point) {
        let a = self.contacts[0];
        let b = self.contacts[1];
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let distance = (dx * dx + dy * dy).sqrt();
        let center = Point::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5);
        (distance, center)
    }

    fn upsert_contact(&mut self, id: PointerId, x: f64, y: f64) {
        if !self.upsert_known_contact(id, x, y) {
            self.contacts.push(Contact { id, x, y });
        }
    }

    fn upsert_known_contact(&mut self, id: PointerId, x: f64, y: f64) -> bool {
        match self.contacts.iter_mut().find(|c| c.id == id) {
            Some(contact) => {
                contact.x = x;
                contact.y = y;
                true
            }
            None => false,
        }
    }

    fn remove_contact(&mut self, id: PointerId) {
        self.contacts.retain(|c| c.id != id);
    }
}
