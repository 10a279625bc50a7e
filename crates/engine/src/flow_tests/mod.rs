//! Flow tests: whole games played through the engine boundary.
//!
//! Each test seats a table, deals the roles through the `AssignRoles`
//! instruction and then answers pending instructions the way a moderator
//! would. No I/O; everything runs in memory.
//!
//! ```bash
//! cargo test -p hollow-engine --lib flow_tests
//! ```

mod flow_helpers;
mod observer_tests;
mod role_flow_tests;

pub use flow_helpers::*;
