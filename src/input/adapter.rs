use std::sync::mpsc::Receiver;
use std::time::Duration;

use tracing::{debug, error, info};

use super::action::ParamWrite;
use super::device::{DeviceAcquisition, MidiBackend, MidiConnection};
use super::mapping::RoutingTable;
use super::midi::ControlEvent;

enum Link {
    Acquiring(DeviceAcquisition),
    Connected(Box<dyn MidiConnection>),
    Unavailable,
}

/// Turns MIDI control changes into parameter writes.
///
/// Device acquisition runs once in the background. If it fails the adapter
/// stays unavailable for the rest of the session.
pub struct MidiAdapter {
    routes: RoutingTable,
    link: Link,
    events: Receiver<ControlEvent>,
}

impl MidiAdapter {
    /// Starts acquiring `device` through `backend`.
    #[must_use]
    pub fn new(routes: RoutingTable, backend: Box<dyn MidiBackend>, device: &str) -> Self {
        info!(%device, routes = routes.len(), "acquiring MIDI device");
        let (acquisition, events) = DeviceAcquisition::spawn(backend, device.to_string());
        Self {
            routes,
            link: Link::Acquiring(acquisition),
            events,
        }
    }

    #[must_use]
    pub fn routes(&self) -> &RoutingTable {
        &self.routes
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self.link, Link::Connected(_))
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self.link, Link::Unavailable)
    }

    /// Looks up the route for `event`. Unmapped controls are dropped.
    #[must_use]
    pub fn dispatch(&self, event: &ControlEvent) -> Option<ParamWrite> {
        let Some(route) = self.routes.lookup(&event.device, event.key) else {
            debug!(device = %event.device, key = event.key, "unmapped control");
            return None;
        };
        Some(route.action.write(event.velocity, route.invert))
    }

    /// Advances device acquisition and drains queued events in arrival
    /// order. Never blocks.
    pub fn poll(&mut self) -> Vec<ParamWrite> {
        if let Link::Acquiring(acquisition) = &self.link {
            if let Some(outcome) = acquisition.poll() {
                self.settle(outcome);
            }
        }
        self.drain()
    }

    /// Blocks up to `timeout` for device acquisition to finish. Returns
    /// whether the adapter is connected afterwards.
    pub fn wait_for_device(&mut self, timeout: Duration) -> bool {
        if let Link::Acquiring(acquisition) = &self.link {
            if let Some(outcome) = acquisition.wait(timeout) {
                self.settle(outcome);
            }
        }
        self.is_connected()
    }

    fn settle(&mut self, outcome: Result<Box<dyn MidiConnection>, crate::error::MidiError>) {
        self.link = match outcome {
            Ok(connection) => {
                info!(port = connection.port_name(), "MIDI device connected");
                Link::Connected(connection)
            }
            Err(err) => {
                error!(%err, "MIDI input disabled");
                Link::Unavailable
            }
        };
    }

    fn drain(&self) -> Vec<ParamWrite> {
        self.events
            .try_iter()
            .filter_map(|event| self.dispatch(&event))
            .collect()
    }
}
