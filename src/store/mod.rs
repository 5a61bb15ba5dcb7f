//! Capa de acceso a datos: operaciones por tabla con filtros de igualdad.
//!
//! - `sqlite`: almacén local (archivo o memoria) con filas JSON.
//! - `postgrest`: interfaz REST del almacén alojado.
//!
//! Ambas devuelven las filas insertadas o afectadas como `serde_json::Value`.

pub mod postgrest;
pub mod sqlite;

use serde_json::Value;
use std::fmt;

use crate::error::{NotasError, Result};

pub use postgrest::PostgrestStore;
pub use sqlite::SqliteStore;

/// Una fila de una tabla tal como viaja por el almacén.
pub type Row = Value;

/// Filtro de igualdad `columna == valor`.
pub type Filtro<'a> = (&'a str, Value);

pub enum Store {
    Sqlite(SqliteStore),
    Postgrest(PostgrestStore),
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Store::Sqlite(_) => write!(f, "Store::Sqlite(..)"),
            Store::Postgrest(_) => write!(f, "Store::Postgrest(..)"),
        }
    }
}

impl Store {
    pub fn backend(&self) -> &'static str {
        match self {
            Store::Sqlite(_) => "sqlite",
            Store::Postgrest(_) => "postgrest",
        }
    }

    pub async fn insert(&self, tabla: &str, fila: Row) -> Result<Vec<Row>> {
        match self {
            Store::Sqlite(s) => s.insert(tabla, fila),
            Store::Postgrest(p) => p.insert(tabla, fila).await,
        }
    }

    /// Inserta `fila` o, si ya existe una fila con los mismos valores en
    /// `on_conflict`, mezcla sus campos sobre la existente.
    pub async fn upsert(&self, tabla: &str, fila: Row, on_conflict: &[&str]) -> Result<Vec<Row>> {
        match self {
            Store::Sqlite(s) => s.upsert(tabla, fila, on_conflict),
            Store::Postgrest(p) => p.upsert(tabla, fila, on_conflict).await,
        }
    }

    pub async fn select(&self, tabla: &str, filtros: &[Filtro<'_>]) -> Result<Vec<Row>> {
        match self {
            Store::Sqlite(s) => s.select(tabla, filtros),
            Store::Postgrest(p) => p.select(tabla, filtros).await,
        }
    }

    pub async fn update(&self, tabla: &str, cambios: Row, filtros: &[Filtro<'_>]) -> Result<Vec<Row>> {
        match self {
            Store::Sqlite(s) => s.update(tabla, cambios, filtros),
            Store::Postgrest(p) => p.update(tabla, cambios, filtros).await,
        }
    }
}

/// Deja sólo alfanuméricos y guion bajo en nombres de tabla/columna.
pub(crate) fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

pub(crate) fn coincide(fila: &Row, filtros: &[Filtro<'_>]) -> bool {
    filtros.iter().all(|(col, valor)| fila.get(*col) == Some(valor))
}

/// Copia los campos de `cambios` sobre `fila`. Ambos deben ser objetos.
pub(crate) fn mezclar(fila: &mut Row, cambios: &Row) -> Result<()> {
    let destino = fila
        .as_object_mut()
        .ok_or_else(|| NotasError::Store("la fila almacenada no es un objeto".to_string()))?;
    let origen = cambios
        .as_object()
        .ok_or_else(|| NotasError::Store("los cambios deben ser un objeto JSON".to_string()))?;
    for (k, v) in origen {
        destino.insert(k.clone(), v.clone());
    }
    Ok(())
}

/// Construye los filtros de conflicto a partir de los valores de la propia fila.
pub(crate) fn filtros_de_conflicto<'a>(fila: &Row, on_conflict: &[&'a str]) -> Result<Vec<Filtro<'a>>> {
    on_conflict
        .iter()
        .map(|col| {
            fila.get(*col)
                .cloned()
                .map(|v| (*col, v))
                .ok_or_else(|| NotasError::Store(format!("la fila no trae la columna de conflicto '{}'", col)))
        })
        .collect()
}
