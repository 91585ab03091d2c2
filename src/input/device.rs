use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::error::MidiError;

use super::midi::ControlEvent;

/// Callback receiving raw MIDI bytes. Backends may call it from any thread.
pub type MessageSink = Box<dyn FnMut(&[u8]) + Send + 'static>;

/// An open input port. Dropping it closes the port.
pub trait MidiConnection: Send {
    fn port_name(&self) -> &str;
}

/// The MIDI transport.
pub trait MidiBackend: Send {
    /// Names of the available input ports.
    ///
    /// # Errors
    ///
    /// Returns [`MidiError::Backend`] if the ports cannot be enumerated.
    fn input_names(&self) -> Result<Vec<String>, MidiError>;

    /// Opens the port called `name`, delivering its messages to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`MidiError`] if the port cannot be opened.
    fn open(&mut self, name: &str, sink: MessageSink)
        -> Result<Box<dyn MidiConnection>, MidiError>;
}

type AcquisitionResult = Result<Box<dyn MidiConnection>, MidiError>;

/// Single-shot background search for a named input device.
///
/// Events from the opened port arrive on the receiver returned by
/// [`DeviceAcquisition::spawn`], in arrival order.
pub struct DeviceAcquisition {
    result: Receiver<AcquisitionResult>,
}

impl DeviceAcquisition {
    /// Starts looking for the input named exactly `device`.
    #[must_use]
    pub fn spawn(
        mut backend: Box<dyn MidiBackend>,
        device: String,
    ) -> (Self, Receiver<ControlEvent>) {
        let (events_tx, events_rx) = mpsc::channel::<ControlEvent>();
        let (result_tx, result_rx) = mpsc::channel::<AcquisitionResult>();

        thread::spawn(move || {
            let outcome = acquire(backend.as_mut(), &device, events_tx);
            // The adapter may already be gone.
            let _ = result_tx.send(outcome);
        });

        (Self { result: result_rx }, events_rx)
    }

    /// Returns the outcome once the search has finished, without blocking.
    pub fn poll(&self) -> Option<AcquisitionResult> {
        match self.result.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(MidiError::AcquisitionAborted)),
        }
    }

    /// Blocks up to `timeout` for the outcome.
    pub fn wait(&self, timeout: Duration) -> Option<AcquisitionResult> {
        match self.result.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(MidiError::AcquisitionAborted)),
        }
    }
}

fn acquire(
    backend: &mut dyn MidiBackend,
    device: &str,
    events: Sender<ControlEvent>,
) -> AcquisitionResult {
    let names = backend.input_names()?;
    debug!(?names, "MIDI inputs");
    let name = names
        .into_iter()
        .find(|name| name == device)
        .ok_or_else(|| MidiError::DeviceNotFound(device.to_string()))?;

    let port = name.clone();
    let sink: MessageSink = Box::new(move |bytes| {
        if let Some(event) = ControlEvent::from_bytes(&port, bytes) {
            let _ = events.send(event);
        }
    });
    backend.open(&name, sink)
}

type SinkTable = Arc<Mutex<HashMap<String, MessageSink>>>;

/// An in-process backend whose ports are fed through a [`VirtualInput`].
///
/// Used for replaying recorded sessions and in tests.
pub struct VirtualBackend {
    ports: Vec<String>,
    sinks: SinkTable,
}

/// Sending half of a [`VirtualBackend`].
#[derive(Clone)]
pub struct VirtualInput {
    sinks: SinkTable,
}

struct VirtualConnection {
    port: String,
    sinks: SinkTable,
}

impl VirtualBackend {
    #[must_use]
    pub fn new(ports: Vec<String>) -> (Self, VirtualInput) {
        let sinks = SinkTable::default();
        (
            Self {
                ports,
                sinks: Arc::clone(&sinks),
            },
            VirtualInput { sinks },
        )
    }
}

impl MidiBackend for VirtualBackend {
    fn input_names(&self) -> Result<Vec<String>, MidiError> {
        Ok(self.ports.clone())
    }

    fn open(
        &mut self,
        name: &str,
        sink: MessageSink,
    ) -> Result<Box<dyn MidiConnection>, MidiError> {
        if !self.ports.iter().any(|p| p == name) {
            return Err(MidiError::DeviceNotFound(name.to_string()));
        }
        self.sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), sink);
        Ok(Box::new(VirtualConnection {
            port: name.to_string(),
            sinks: Arc::clone(&self.sinks),
        }))
    }
}

impl VirtualInput {
    /// Delivers `bytes` to whoever opened `port`. Returns whether the port
    /// was open.
    pub fn send(&self, port: &str, bytes: &[u8]) -> bool {
        let mut sinks = self.sinks.lock().unwrap_or_else(PoisonError::into_inner);
        match sinks.get_mut(port) {
            Some(sink) => {
                sink(bytes);
                true
            }
            None => false,
        }
    }
}

impl MidiConnection for VirtualConnection {
    fn port_name(&self) -> &str {
        &self.port
    }
}

impl Drop for VirtualConnection {
    fn drop(&mut self) {
        self.sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.port);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn connects_by_exact_name_and_forwards_control_changes() {
        let (backend, input) =
            VirtualBackend::new(vec!["MPK mini".into(), "MPK mini 3".into()]);
        let (acquisition, events) =
            DeviceAcquisition::spawn(Box::new(backend), "MPK mini 3".into());
        let connection = acquisition.wait(WAIT).unwrap().unwrap();
        assert_eq!(connection.port_name(), "MPK mini 3");

        assert!(input.send("MPK mini 3", &[0xb0, 70, 127]));
        assert!(input.send("MPK mini 3", &[0x90, 60, 100]));
        assert!(!input.send("MPK mini", &[0xb0, 70, 1]));

        let event = events.try_recv().unwrap();
        assert_eq!(event.device, "MPK mini 3");
        assert_eq!((event.key, event.velocity), (70, 127));
        assert!(events.try_recv().is_err());

        drop(connection);
        assert!(!input.send("MPK mini 3", &[0xb0, 70, 127]));
    }

    #[test]
    fn missing_device_fails_once() {
        let (backend, _input) = VirtualBackend::new(vec!["Other".into()]);
        let (acquisition, _events) =
            DeviceAcquisition::spawn(Box::new(backend), "MPK mini 3".into());
        let outcome = acquisition.wait(WAIT).unwrap();
        assert!(matches!(outcome, Err(MidiError::DeviceNotFound(name)) if name == "MPK mini 3"));
        // The worker is gone after reporting.
        assert!(matches!(
            acquisition.wait(WAIT),
            Some(Err(MidiError::AcquisitionAborted))
        ));
    }
}
