//! Driven adapters: persistence and the remote model client.

pub mod openai;
pub mod persistence;
