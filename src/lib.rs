// Biblioteca raíz del crate `notasbackend`.
// Registro de estudiantes, materias con componentes ponderados y notas por
// componente, expuesto como API HTTP sobre un almacén de tablas.
pub mod api_json;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod resumen;
pub mod server;
pub mod service;
pub mod store;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;

pub use error::{NotasError, Result};
