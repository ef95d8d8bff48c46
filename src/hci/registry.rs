use core::fmt;

use heapless::FnvIndexMap;

use crate::error::{Error, Result};
use crate::hci::command::{Command, CommandPacket};
use crate::hci::commands::{
    Disconnect, HciCommand, Inquiry, InquiryCancel, LeSetRandomAddress, ReadBdAddr, ReadRssi, Reset,
};
use crate::hci::event::{Event, EventPacket};
use crate::hci::events::{CommandComplete, CommandStatus, HciEvent};
use crate::hci::opcode::Opcode;

pub const COMMAND_REGISTRY_CAPACITY: usize = 32;
pub const EVENT_REGISTRY_CAPACITY: usize = 16;

/// Decodes a command's parameter block into a typed command.
pub type CommandDecoder = fn(&[u8]) -> Result<HciCommand>;

/// Decodes an event's parameter block into a typed event.
pub type EventDecoder = fn(&[u8]) -> Result<HciEvent>;

fn decode_command<C>(parameters: &[u8]) -> Result<HciCommand>
where
    C: Command + Into<HciCommand>,
{
    C::from_parameters(parameters).map(Into::into)
}

fn decode_event<E>(parameters: &[u8]) -> Result<HciEvent>
where
    E: Event + Into<HciEvent>,
{
    E::from_parameters(parameters).map(Into::into)
}

/// Maps opcodes to typed command decoders.
///
/// Opcodes without an entry, or whose decoder rejects the parameters,
/// decode to [`HciCommand::Generic`].
#[derive(Clone, Default)]
pub struct CommandRegistry {
    decoders: FnvIndexMap<Opcode, CommandDecoder, COMMAND_REGISTRY_CAPACITY>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every typed command this crate defines.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        let decoders: [(Opcode, CommandDecoder); 7] = [
            (Reset::OPCODE, decode_command::<Reset>),
            (ReadBdAddr::OPCODE, decode_command::<ReadBdAddr>),
            (Inquiry::OPCODE, decode_command::<Inquiry>),
            (InquiryCancel::OPCODE, decode_command::<InquiryCancel>),
            (Disconnect::OPCODE, decode_command::<Disconnect>),
            (ReadRssi::OPCODE, decode_command::<ReadRssi>),
            (LeSetRandomAddress::OPCODE, decode_command::<LeSetRandomAddress>),
        ];
        for (opcode, decoder) in decoders {
            if let Err(err) = registry.register(opcode, decoder) {
                log::warn!("skipping decoder for opcode {}: {}", opcode, err);
            }
        }
        registry
    }

    /// Register a decoder, returning the one it replaces.
    pub fn register(&mut self, opcode: Opcode, decoder: CommandDecoder) -> Result<Option<CommandDecoder>> {
        let previous = self.decoders.insert(opcode, decoder).map_err(|_| Error::RegistryFull {
            capacity: COMMAND_REGISTRY_CAPACITY,
        })?;
        if previous.is_some() {
            log::warn!("replacing decoder for opcode {}", opcode);
        }
        Ok(previous)
    }

    pub fn register_command<C>(&mut self) -> Result<Option<CommandDecoder>>
    where
        C: Command + Into<HciCommand>,
    {
        self.register(C::OPCODE, decode_command::<C>)
    }

    pub fn get(&self, opcode: Opcode) -> Option<CommandDecoder> {
        self.decoders.get(&opcode).copied()
    }

    pub fn contains(&self, opcode: Opcode) -> bool {
        self.decoders.contains_key(&opcode)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    pub fn decode(&self, packet: CommandPacket) -> HciCommand {
        let Some(decoder) = self.get(packet.opcode()) else {
            log::debug!("no decoder for opcode {}, keeping generic", packet.opcode());
            return HciCommand::Generic(packet);
        };
        match decoder(packet.parameters()) {
            Ok(command) => command,
            Err(err) => {
                log::debug!("opcode {} kept generic: {}", packet.opcode(), err);
                HciCommand::Generic(packet)
            }
        }
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CommandRegistry ")?;
        f.debug_set().entries(self.decoders.keys()).finish()
    }
}

/// Maps event codes to typed event decoders.
///
/// Events without an entry, or whose decoder rejects the parameters,
/// decode to [`HciEvent::Generic`].
#[derive(Clone, Default)]
pub struct EventRegistry {
    decoders: FnvIndexMap<u8, EventDecoder, EVENT_REGISTRY_CAPACITY>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut registry = Self::new();
        let decoders: [(u8, EventDecoder); 2] = [
            (CommandComplete::EVENT_CODE, decode_event::<CommandComplete>),
            (CommandStatus::EVENT_CODE, decode_event::<CommandStatus>),
        ];
        for (code, decoder) in decoders {
            if let Err(err) = registry.register(code, decoder) {
                log::warn!("skipping decoder for event {:#04x}: {}", code, err);
            }
        }
        registry
    }

    pub fn register(&mut self, event_code: u8, decoder: EventDecoder) -> Result<Option<EventDecoder>> {
        let previous = self.decoders.insert(event_code, decoder).map_err(|_| Error::RegistryFull {
            capacity: EVENT_REGISTRY_CAPACITY,
        })?;
        if previous.is_some() {
            log::warn!("replacing decoder for event {:#04x}", event_code);
        }
        Ok(previous)
    }

    pub fn register_event<E>(&mut self) -> Result<Option<EventDecoder>>
    where
        E: Event + Into<HciEvent>,
    {
        self.register(E::EVENT_CODE, decode_event::<E>)
    }

    pub fn contains(&self, event_code: u8) -> bool {
        self.decoders.contains_key(&event_code)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    pub fn decode(&self, packet: EventPacket) -> HciEvent {
        let Some(decoder) = self.decoders.get(&packet.event_code()).copied() else {
            log::debug!("no decoder for event {:#04x}, keeping generic", packet.event_code());
            return HciEvent::Generic(packet);
        };
        match decoder(packet.parameters()) {
            Ok(event) => event,
            Err(err) => {
                log::debug!("event {:#04x} kept generic: {}", packet.event_code(), err);
                HciEvent::Generic(packet)
            }
        }
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventRegistry ")?;
        f.debug_set().entries(self.decoders.keys()).finish()
    }
}
