//! MIDI controller input routed onto the parameter surface.

mod action;
mod adapter;
mod device;
mod mapping;
mod midi;

pub use action::{ControlAction, ParamWrite, MAX_VELOCITY};
pub use adapter::MidiAdapter;
pub use device::{
    DeviceAcquisition, MessageSink, MidiBackend, MidiConnection, VirtualBackend, VirtualInput,
};
pub use mapping::{ControlEntry, DeviceControls, DeviceMapping, Route, RoutingTable};
pub use midi::{ControlEvent, MidiMessage};
