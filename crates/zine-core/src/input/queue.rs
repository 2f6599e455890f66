//! Bounded FIFO of input events filled by host callbacks.

use heapless::Deque;
use log::warn;

use super::{InputEvent, InputProvider};

/// Events waiting for the next `tick`, drained in arrival order.
#[derive(Debug)]
pub struct QueuedInput<const N: usize> {
    events: Deque<InputEvent, N>,
}

impl<const N: usize> Default for QueuedInput<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> QueuedInput<N> {
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    /// Appends `event`; when the queue is full the event is dropped and
    /// handed back.
    pub fn push(&mut self, event: InputEvent) -> Result<(), InputEvent> {
        self.events.push_back(event).inspect_err(|dropped| {
            warn!("zine-input: queue full ({N}), dropping {dropped:?}");
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<const N: usize> InputProvider for QueuedInput<N> {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(self.events.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_come_out_in_arrival_order() {
        let mut queue = QueuedInput::<4>::new();
        queue.push(InputEvent::HoverEnter).unwrap();
        queue.push(InputEvent::NextPressed).unwrap();

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.poll_event(), Ok(Some(InputEvent::HoverEnter)));
        assert_eq!(queue.poll_event(), Ok(Some(InputEvent::NextPressed)));
        assert_eq!(queue.poll_event(), Ok(None));
        assert!(queue.is_empty());
    }

    #[test]
    fn overflow_hands_the_event_back() {
        let mut queue = QueuedInput::<1>::new();
        queue.push(InputEvent::NextPressed).unwrap();

        assert_eq!(
            queue.push(InputEvent::PreviousPressed),
            Err(InputEvent::PreviousPressed)
        );
        assert_eq!(queue.len(), 1);
    }
}
