//! Shared helpers: lenient JSON coercion, text utilities and XML writing.

pub mod json;
pub(crate) mod string;
pub(crate) mod xml;
