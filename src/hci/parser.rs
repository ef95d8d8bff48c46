use nom::bytes::complete::take;
use nom::number::complete::{le_u16, le_u8};
use nom::sequence::tuple;
use nom::IResult;

use crate::error::{Error, Result};

/// Unpacked ACL or synchronous handle word.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HandleWord {
    pub handle: u16,
    // bits 12-13
    pub low_flags: u8,
    // bits 14-15
    pub high_flags: u8,
}

impl HandleWord {
    pub fn pack(handle: u16, low_flags: u8, high_flags: u8) -> u16 {
        (handle & 0x0FFF) | (u16::from(low_flags & 0b11) << 12) | (u16::from(high_flags & 0b11) << 14)
    }
}

impl From<u16> for HandleWord {
    fn from(raw: u16) -> Self {
        HandleWord {
            handle: raw & 0x0FFF,
            low_flags: ((raw >> 12) & 0b11) as u8,
            high_flags: ((raw >> 14) & 0b11) as u8,
        }
    }
}

pub fn handle_word(i: &[u8]) -> IResult<&[u8], HandleWord> {
    let (i, raw) = le_u16(i)?;
    Ok((i, HandleWord::from(raw)))
}

/// `opcode(2) length(1)`
pub fn command_header(i: &[u8]) -> IResult<&[u8], (u16, u8)> {
    tuple((le_u16, le_u8))(i)
}

/// `handle_word(2) length(2)`
pub fn acl_header(i: &[u8]) -> IResult<&[u8], (HandleWord, u16)> {
    tuple((handle_word, le_u16))(i)
}

/// `handle_word(2) length(1)`
pub fn sync_header(i: &[u8]) -> IResult<&[u8], (HandleWord, u8)> {
    tuple((handle_word, le_u8))(i)
}

/// `event_code(1) length(1)`
pub fn event_header(i: &[u8]) -> IResult<&[u8], (u8, u8)> {
    tuple((le_u8, le_u8))(i)
}

/// Command Complete: `num_hci_command_packets(1) opcode(2)`
pub fn command_complete_params(i: &[u8]) -> IResult<&[u8], (u8, u16)> {
    tuple((le_u8, le_u16))(i)
}

/// Command Status: `status(1) num_hci_command_packets(1) opcode(2)`
pub fn command_status_params(i: &[u8]) -> IResult<&[u8], (u8, u8, u16)> {
    tuple((le_u8, le_u8, le_u16))(i)
}

/// Run a header parser, reporting a short buffer as [`Error::TooShort`].
pub fn header<'a, O>(
    parser: impl FnOnce(&'a [u8]) -> IResult<&'a [u8], O>,
    i: &'a [u8],
    expected: usize,
) -> Result<(&'a [u8], O)> {
    parser(i).map_err(|_| Error::TooShort {
        expected,
        actual: i.len(),
    })
}

/// Take exactly `declared` payload bytes from `rest`.
///
/// With `exact` set, bytes left over after the payload are also a mismatch.
pub fn payload(rest: &[u8], declared: usize, exact: bool) -> Result<&[u8]> {
    let mismatch = Error::LengthMismatch {
        declared,
        available: rest.len(),
    };
    if exact && rest.len() != declared {
        return Err(mismatch);
    }
    let taken: IResult<&[u8], &[u8]> = take(declared)(rest);
    match taken {
        Ok((_trailing, data)) => Ok(data),
        Err(_) => Err(mismatch),
    }
}
