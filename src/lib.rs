//! Library crate for catalogo-jogos, exposing modules for binaries and tests.

pub mod config;
pub mod dao;
pub mod dto;
pub mod error;
pub mod fault_boundary;
pub mod routes;
pub mod services;
pub mod state;
