use archiv_core::Aggregate;

use crate::{Event, EventBus};

/// Execute an aggregate command deterministically (no IO).
///
/// 1. **Decide**: `aggregate.handle(command)` returns events without mutating.
/// 2. **Evolve**: each event is applied in order.
///
/// A rejected command leaves the aggregate untouched.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: Aggregate,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        A::apply(aggregate, ev);
    }
    Ok(events)
}

/// Like [`execute`], then publish every applied event on `bus`.
///
/// Publication is best effort: the state change has already happened, so a bus
/// failure is logged and the events are still returned.
pub fn execute_and_publish<A, B>(
    aggregate: &mut A,
    command: &A::Command,
    bus: &B,
) -> Result<Vec<A::Event>, A::Error>
where
    A: Aggregate,
    A::Event: Event,
    B: EventBus<A::Event> + ?Sized,
{
    let events = execute(aggregate, command)?;
    for ev in &events {
        if let Err(error) = bus.publish(ev.clone()) {
            tracing::warn!(event_type = ev.event_type(), ?error, "event publication failed");
        }
    }
    Ok(events)
}
