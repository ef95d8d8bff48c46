use alloc::vec::Vec;
use core::fmt;

use crate::error::{Error, Result};
use crate::hci::handle::{check_flag, Handle};
use crate::hci::parser::{self, HandleWord};
use crate::packet::{HciPacket, PacketType};

/// Largest payload the 16-bit length field can describe.
pub const MAX_ACL_DATA_LEN: usize = 0xFFFF;

/// Packet boundary flag values.
pub mod boundary {
    pub const FIRST_NON_AUTO_FLUSHABLE: u8 = 0b00;
    pub const CONTINUING: u8 = 0b01;
    pub const FIRST_AUTO_FLUSHABLE: u8 = 0b10;
    pub const COMPLETE: u8 = 0b11;
}

/// An ACL data frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclDataPacket {
    handle: Handle,
    pb_flag: u8,
    bc_flag: u8,
    data: Vec<u8>,
}

impl AclDataPacket {
    pub fn new(connection_handle: u16, pb_flag: u8, bc_flag: u8, data: Vec<u8>) -> Result<Self> {
        let handle = Handle::new(connection_handle)?;
        let pb_flag = check_flag("pb_flag", pb_flag)?;
        let bc_flag = check_flag("bc_flag", bc_flag)?;
        if data.len() > MAX_ACL_DATA_LEN {
            return Err(Error::PayloadTooLong {
                len: data.len(),
                max: MAX_ACL_DATA_LEN,
            });
        }
        Ok(Self {
            handle,
            pb_flag,
            bc_flag,
            data,
        })
    }

    pub fn connection_handle(&self) -> u16 {
        self.handle.raw()
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn pb_flag(&self) -> u8 {
        self.pb_flag
    }

    pub fn bc_flag(&self) -> u8 {
        self.bc_flag
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    fn handle_word(&self) -> u16 {
        HandleWord::pack(self.handle.raw(), self.pb_flag, self.bc_flag)
    }

    /// Decode a frame body, optionally rejecting bytes past the payload.
    pub(crate) fn decode_body_with(body: &[u8], exact: bool) -> Result<Self> {
        let (rest, (word, len)) = parser::header(parser::acl_header, body, Self::MIN_BODY_LEN)?;
        log::trace!(
            "acl handle {:#05x} pb {:02b} bc {:02b} len {}",
            word.handle,
            word.low_flags,
            word.high_flags,
            len
        );
        let data = parser::payload(rest, len as usize, exact)?;
        Self::new(word.handle, word.low_flags, word.high_flags, data.to_vec())
    }
}

impl HciPacket for AclDataPacket {
    const PACKET_TYPE: PacketType = PacketType::AclData;
    const MIN_BODY_LEN: usize = 4;

    fn encode_body(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.handle_word().to_le_bytes());
        out.extend_from_slice(&(self.data.len() as u16).to_le_bytes());
        out.extend_from_slice(&self.data);
    }

    fn decode_body(body: &[u8]) -> Result<Self> {
        Self::decode_body_with(body, false)
    }

    fn body_len(&self) -> usize {
        Self::MIN_BODY_LEN + self.data.len()
    }
}

impl fmt::Display for AclDataPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HCI ACL Data handle {} pb {} bc {} len {}",
            self.handle,
            self.pb_flag,
            self.bc_flag,
            self.data.len()
        )
    }
}
