//! Input: pointer, modifier and key types mapped to a shared action vocabulary.
//!
//! # Invariants
//! - The editor consumes [`Action`]s and pointer events, never platform key codes.
//! - Bindings live in one table so every front-end behaves the same.

pub mod action;
pub mod keymap;
pub mod pointer;

pub use action::{Action, Tool};
pub use keymap::{Key, map_key};
pub use pointer::{Button, Modifiers};
