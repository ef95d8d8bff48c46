//! Error types for HCI packet operations.

use thiserror::Error;

use crate::packet::PacketType;

/// Errors returned while building or parsing HCI packets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("empty buffer")]
    Empty,

    /// Fewer bytes than the minimum header size.
    #[error("buffer too short: need at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    /// Byte 0 is not the packet type the decoder expects.
    #[error("wrong packet indicator {actual:#04x}, expected {expected}")]
    WrongDiscriminator { expected: PacketType, actual: u8 },

    /// The declared length field disagrees with the bytes that follow it.
    #[error("declared length {declared} does not match {available} available bytes")]
    LengthMismatch { declared: usize, available: usize },

    /// Connection handle outside 0x0000..=0x0EFF.
    #[error("invalid connection handle {0:#06x}, must be at most 0x0EFF")]
    InvalidHandle(u16),

    /// A packed 2-bit flag outside 0..=3.
    #[error("invalid {field} {value}, must be between 0 and 3")]
    InvalidFlag { field: &'static str, value: u8 },

    /// Data payload longer than the frame kind allows.
    #[error("payload too long: {len} bytes (max {max})")]
    PayloadTooLong { len: usize, max: usize },

    /// Command parameters longer than 255 bytes.
    #[error("command parameters too long: {0} bytes (max 255)")]
    ParameterTooLong(usize),

    /// A typed command parameter outside its allowed range.
    #[error("invalid command parameter {field}: {value:#x}")]
    InvalidParameter { field: &'static str, value: u32 },

    #[error("unknown packet type {0:#04x}")]
    UnknownPacketType(u8),

    /// A recognised packet type this decoder does not handle yet.
    #[error("{0} packets are not supported")]
    NotImplemented(PacketType),

    /// Malformed Bluetooth device address.
    #[error("invalid BD_ADDR: {0}")]
    InvalidAddress(&'static str),

    /// A decoder registry has no room left.
    #[error("registry full, capacity {capacity}")]
    RegistryFull { capacity: usize },
}

impl Error {
    /// True for errors caused by malformed input bytes, as opposed to
    /// frames the decoder recognises but does not handle.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Error::NotImplemented(_) | Error::UnknownPacketType(_))
    }
}

pub type Result<T> = core::result::Result<T, Error>;
