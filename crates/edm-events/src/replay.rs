//! Replaying events that were produced elsewhere.

use std::collections::VecDeque;

use crate::{Event, EventStream, ReadError, ReadErrorKind, Span};

/// An [`EventStream`] over a prepared list of events.
#[derive(Debug, Clone, Default)]
pub struct EventReplay<'src> {
    events: VecDeque<Event<'src>>,
    /// Span of the last event handed out, for errors past the end.
    last: Span,
}

impl<'src> EventReplay<'src> {
    /// Replay `events` in order.
    pub fn new(events: impl IntoIterator<Item = Event<'src>>) -> Self {
        Self {
            events: events.into_iter().collect(),
            last: Span::default(),
        }
    }

    /// Number of events not yet consumed.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl<'src> FromIterator<Event<'src>> for EventReplay<'src> {
    fn from_iter<I: IntoIterator<Item = Event<'src>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'src> EventStream<'src> for EventReplay<'src> {
    fn has_next(&mut self) -> bool {
        !self.events.is_empty()
    }

    fn next_event(&mut self) -> Result<Event<'src>, ReadError> {
        match self.events.pop_front() {
            Some(event) => {
                self.last = event.span();
                Ok(event)
            }
            None => Err(ReadError::new(
                ReadErrorKind::UnexpectedEof,
                Span::empty(self.last.end),
            )),
        }
    }

    fn close(&mut self) {
        self.events.clear();
    }
}
