//! Partitioning validated events by service.

use std::collections::BTreeMap;

use beatwatch_types::HeartbeatEvent;

/// Events for each service, oldest first, keyed by service identifier.
///
/// A `BTreeMap` so that iteration order depends only on the set of services,
/// never on arrival order.
pub type ServiceEvents = BTreeMap<String, Vec<HeartbeatEvent>>;

/// Group events by exact service name and sort each group by timestamp.
///
/// The sort is stable, so events sharing a timestamp keep their arrival order.
pub fn group_by_service<I>(events: I) -> ServiceEvents
where
    I: IntoIterator<Item = HeartbeatEvent>,
{
    let mut grouped = ServiceEvents::new();
    for event in events {
        grouped.entry(event.service.clone()).or_default().push(event);
    }

    for events in grouped.values_mut() {
        events.sort_by_key(|e| e.timestamp);
    }

    grouped
}
