/// Represents a change the presenter may want to report.
pub trait Event: Clone {}

/// A handler for application events.
pub trait EventHandler<E: Event> {
    /// Handles an event.
    fn handle(&mut self, event: E);
}

impl<E, F> EventHandler<E> for F
where
    E: Event,
    F: FnMut(E),
{
    fn handle(&mut self, event: E) {
        self(event)
    }
}
