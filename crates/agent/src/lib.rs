//! Returns engine and its tool-calling surface.
//!
//! This crate wires the return-eligibility policy to storage and exposes the
//! result as two named tools an agent framework can call:
//!
//! 1. **Engine** (`engine`) - validate the identifier, fetch order state,
//!    apply the 30-day window and terminal-status rules, and perform the
//!    guarded transition to `return_initiated`.
//! 2. **Tools** (`tools`) - `check_return_eligibility` / `initiate_return`
//!    wrappers that take JSON input and always answer with rendered text.
//!
//! # Safety principle
//!
//! Nothing here raises across the tool boundary. Every failure mode,
//! including database errors, is folded into a descriptive sentence because
//! the consuming agent can only relay text to the end user.

pub mod engine;
pub mod tools;

pub use engine::ReturnsEngine;
pub use tools::{returns_toolset, CheckReturnEligibilityTool, InitiateReturnTool, Tool, ToolRegistry};
