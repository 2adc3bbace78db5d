//! Transports implementing [`crate::domain::ports::Transport`].

pub mod http;
pub mod in_memory;
