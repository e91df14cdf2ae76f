/// Process-lifetime request counters exported to monitoring.
///
/// Implementations are constructed once at startup and shared; increments
/// are infallible.
pub trait RequestCounter: Send + Sync {
    fn increment_internal_counter(&self);

    fn increment_external_counter(&self);
}
