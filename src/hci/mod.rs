//! HCI packet codecs.

pub mod acl;
pub mod command;
pub mod commands;
pub mod event;
pub mod events;
pub mod handle;
pub mod opcode;
pub mod parser;
pub mod registry;
pub mod sync;
pub mod vendor;

pub use acl::AclDataPacket;
pub use command::{Command, CommandPacket};
pub use commands::HciCommand;
pub use event::{Event, EventPacket};
pub use events::{CommandComplete, CommandStatus, HciEvent, StatusCode};
pub use handle::Handle;
pub use opcode::{Ogf, Opcode};
pub use registry::{CommandRegistry, EventRegistry};
pub use sync::SynchronousDataPacket;
