use crate::api::types::ElementHandle;

/// Host events the scene understands, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at screen coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// The viewport changed size or orientation.
    Resize { width: f32, height: f32 },
    /// A frame animation started with `play_animation` finished.
    AnimationComplete { handle: ElementHandle },
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them once per frame.
#[derive(Debug)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events, oldest first.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_arrival_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Resize { width: 390.0, height: 844.0 });
        q.push(InputEvent::AnimationComplete { handle: ElementHandle(7) });
        assert_eq!(q.len(), 3);

        let events = q.drain();
        assert!(q.is_empty());
        assert_eq!(events[0], InputEvent::PointerDown { x: 10.0, y: 20.0 });
        assert!(matches!(events[2], InputEvent::AnimationComplete { handle: ElementHandle(7) }));
    }
}
