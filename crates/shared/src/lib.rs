//! Hollow Shared - the moderator instruction/response protocol
//!
//! Types exchanged between the engine and whatever client the moderator
//! uses (the bundled CLI, or a UI):
//! - `ModeratorInstruction`: what the engine asks for
//! - `ResponseInput`: what the client sends back
//! - `ModeratorResponse`: a response accepted by the instruction it answers
//! - `ContractError`: why a response was refused
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - domain vocabulary, serde, thiserror, tracing
//! 2. **Contract only** - shape and count checks live here; game rules do not
//! 3. **Tagged wire format** - every union carries a `"type"` discriminator

pub mod error;
pub mod instructions;
pub mod responses;

pub use error::ContractError;
pub use instructions::{
    CountConstraint, InstructionKind, InstructionText, ModeratorInstruction, RoleCandidates,
};
pub use responses::{ModeratorResponse, ResponseInput};
