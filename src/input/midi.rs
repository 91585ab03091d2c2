/// A decoded channel-voice MIDI message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    ControlChange { channel: u8, control: u8, value: u8 },
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    /// Any other status byte.
    Other { status: u8 },
}

impl MidiMessage {
    /// Decodes raw bytes. Returns `None` for an empty buffer or a
    /// channel-voice message missing its data bytes.
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        let channel = status & 0x0f;
        let pair = || match data {
            [a, b, ..] => Some((a & 0x7f, b & 0x7f)),
            _ => None,
        };
        let message = match status & 0xf0 {
            0xb0 => {
                let (control, value) = pair()?;
                Self::ControlChange {
                    channel,
                    control,
                    value,
                }
            }
            // Note-on with velocity 0 is a note-off.
            0x90 => match pair()? {
                (key, 0) => Self::NoteOff {
                    channel,
                    key,
                    velocity: 0,
                },
                (key, velocity) => Self::NoteOn {
                    channel,
                    key,
                    velocity,
                },
            },
            0x80 => {
                let (key, velocity) = pair()?;
                Self::NoteOff {
                    channel,
                    key,
                    velocity,
                }
            }
            _ => Self::Other { status },
        };
        Some(message)
    }
}

/// A control-change event attributed to an input device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEvent {
    pub device: String,
    pub key: u8,
    pub velocity: u8,
}

impl ControlEvent {
    /// Builds an event from raw bytes; non-control-change messages yield `None`.
    #[must_use]
    pub fn from_bytes(device: &str, bytes: &[u8]) -> Option<Self> {
        match MidiMessage::parse(bytes)? {
            MidiMessage::ControlChange { control, value, .. } => Some(Self {
                device: device.to_string(),
                key: control,
                velocity: value,
            }),
            _ => None,
        }
    }
}
