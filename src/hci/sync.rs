use alloc::vec::Vec;
use core::fmt;

use crate::error::{Error, Result};
use crate::hci::handle::{check_flag, Handle};
use crate::hci::parser::{self, HandleWord};
use crate::packet::{HciPacket, PacketType};

/// Largest payload the 8-bit length field can describe.
pub const MAX_SYNC_DATA_LEN: usize = 0xFF;

/// Packet status flag values, controller to host.
pub mod status {
    pub const CORRECTLY_RECEIVED: u8 = 0b00;
    pub const POSSIBLY_INVALID: u8 = 0b01;
    pub const NO_DATA: u8 = 0b10;
    pub const PARTIALLY_LOST: u8 = 0b11;
}

/// A synchronous (SCO/eSCO) data frame.
///
/// Bits 12-13 of the handle word are reserved: written as zero and
/// ignored when decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynchronousDataPacket {
    handle: Handle,
    packet_status_flag: u8,
    data: Vec<u8>,
}

impl SynchronousDataPacket {
    pub fn new(connection_handle: u16, packet_status_flag: u8, data: Vec<u8>) -> Result<Self> {
        let handle = Handle::new(connection_handle)?;
        let packet_status_flag = check_flag("packet_status_flag", packet_status_flag)?;
        if data.len() > MAX_SYNC_DATA_LEN {
            return Err(Error::PayloadTooLong {
                len: data.len(),
                max: MAX_SYNC_DATA_LEN,
            });
        }
        Ok(Self {
            handle,
            packet_status_flag,
            data,
        })
    }

    pub fn connection_handle(&self) -> u16 {
        self.handle.raw()
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn packet_status_flag(&self) -> u8 {
        self.packet_status_flag
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn decode_body_with(body: &[u8], exact: bool) -> Result<Self> {
        let (rest, (word, len)) = parser::header(parser::sync_header, body, Self::MIN_BODY_LEN)?;
        log::trace!(
            "sync handle {:#05x} status {:02b} len {}",
            word.handle,
            word.high_flags,
            len
        );
        let data = parser::payload(rest, len as usize, exact)?;
        Self::new(word.handle, word.high_flags, data.to_vec())
    }
}

impl HciPacket for SynchronousDataPacket {
    const PACKET_TYPE: PacketType = PacketType::SynchronousData;
    const MIN_BODY_LEN: usize = 3;

    fn encode_body(&self, out: &mut Vec<u8>) {
        let word = HandleWord::pack(self.handle.raw(), 0, self.packet_status_flag);
        out.extend_from_slice(&word.to_le_bytes());
        out.push(self.data.len() as u8);
        out.extend_from_slice(&self.data);
    }

    fn decode_body(body: &[u8]) -> Result<Self> {
        Self::decode_body_with(body, false)
    }

    fn body_len(&self) -> usize {
        Self::MIN_BODY_LEN + self.data.len()
    }
}

impl fmt::Display for SynchronousDataPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HCI Synchronous Data handle {} status {} len {}",
            self.handle,
            self.packet_status_flag,
            self.data.len()
        )
    }
}
