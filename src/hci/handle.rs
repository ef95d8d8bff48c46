use core::fmt;

use crate::error::{Error, Result};

pub const MAX_CONNECTION_HANDLE: u16 = 0x0EFF;

/// A 12-bit connection handle in 0x0000..=0x0EFF.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    handle: u16,
}

impl Handle {
    pub fn new(handle: u16) -> Result<Self> {
        if handle > MAX_CONNECTION_HANDLE {
            return Err(Error::InvalidHandle(handle));
        }
        Ok(Self { handle })
    }

    pub fn raw(&self) -> u16 {
        self.handle
    }
}

impl TryFrom<u16> for Handle {
    type Error = Error;

    fn try_from(handle: u16) -> Result<Self> {
        Handle::new(handle)
    }
}

impl From<Handle> for u16 {
    fn from(handle: Handle) -> Self {
        handle.handle
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#05X}", self.handle)
    }
}

/// Validate a 2-bit flag destined for the top nibble of a handle word.
pub(crate) fn check_flag(field: &'static str, value: u8) -> Result<u8> {
    if value > 0b11 {
        return Err(Error::InvalidFlag { field, value });
    }
    Ok(value)
}
