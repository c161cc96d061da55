//! lapsecam-net - Network link and control-plane session for Lapsecam
//!
//! Establishes the radio link with a bounded retry budget, layers the
//! control-plane session on top of it, and pumps remote configuration
//! writes and terminal commands for a bounded window each wake cycle.

pub mod control;
pub mod error;
pub mod link;
pub mod manager;

pub use control::{ControlChannel, ControlEvent, StatusUpdate, TerminalCommand};
pub use error::{ConnectError, ControlError, LinkError};
pub use link::{LinkIdentity, NetworkLink};
pub use manager::{Connectivity, RetryBudget, SessionReport};
