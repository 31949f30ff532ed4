//! SCI framing, unit/OID tables, and dispatch (C1 + C2).

pub mod dispatch;
pub mod frame;
pub mod unit;

pub use dispatch::dispatch;
pub use frame::{FrameDecoder, SciFrame};
pub use unit::{ListenAddress, UnitId};
