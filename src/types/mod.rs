//! Tipos compartilhados do invcache.

pub mod config;
pub mod errors;
pub mod matrix;
