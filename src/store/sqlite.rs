//! Almacén SQLite: una tabla física por tabla lógica, con cada fila guardada
//! como documento JSON (`id INTEGER PRIMARY KEY, data TEXT`).
//!
//! Los filtros se evalúan sobre la fila ya decodificada. Sirve para desarrollo
//! local y para las pruebas; en producción se usa `postgrest`.

use rusqlite::{params, Connection};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::{coincide, filtros_de_conflicto, mezclar, sanitize_name, Filtro, Row};
use crate::error::{NotasError, Result};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Abre (o crea) la base en `path`. `":memory:"` abre una base en memoria.
    pub fn open(path: &str) -> Result<Self> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            if let Some(dir) = Path::new(path).parent() {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    fs::create_dir_all(dir)
                        .map_err(|e| NotasError::Store(format!("no se pudo crear {}: {}", dir.display(), e)))?;
                }
            }
            Connection::open(path)?
        };
        Ok(SqliteStore { conn: Mutex::new(conn) })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| NotasError::Store("conexión sqlite envenenada".to_string()))
    }

    pub fn insert(&self, tabla: &str, fila: Row) -> Result<Vec<Row>> {
        if !fila.is_object() {
            return Err(NotasError::Store("sólo se pueden insertar objetos JSON".to_string()));
        }
        let conn = self.lock()?;
        let tabla = ensure_table(&conn, tabla)?;
        insertar(&conn, &tabla, &fila)?;
        Ok(vec![fila])
    }

    pub fn upsert(&self, tabla: &str, fila: Row, on_conflict: &[&str]) -> Result<Vec<Row>> {
        let filtros = filtros_de_conflicto(&fila, on_conflict)?;
        let mut conn = self.lock()?;
        let tabla = ensure_table(&conn, tabla)?;
        let tx = conn.transaction()?;
        let existentes: Vec<(i64, Row)> = leer_filas(&tx, &tabla)?
            .into_iter()
            .filter(|(_, f)| coincide(f, &filtros))
            .collect();

        let out = if existentes.is_empty() {
            insertar(&tx, &tabla, &fila)?;
            vec![fila]
        } else {
            actualizar(&tx, &tabla, existentes, &fila)?
        };
        tx.commit()?;
        Ok(out)
    }

    pub fn select(&self, tabla: &str, filtros: &[Filtro<'_>]) -> Result<Vec<Row>> {
        let conn = self.lock()?;
        let tabla = ensure_table(&conn, tabla)?;
        Ok(leer_filas(&conn, &tabla)?
            .into_iter()
            .map(|(_, f)| f)
            .filter(|f| coincide(f, filtros))
            .collect())
    }

    pub fn update(&self, tabla: &str, cambios: Row, filtros: &[Filtro<'_>]) -> Result<Vec<Row>> {
        let mut conn = self.lock()?;
        let tabla = ensure_table(&conn, tabla)?;
        let tx = conn.transaction()?;
        let afectadas: Vec<(i64, Row)> = leer_filas(&tx, &tabla)?
            .into_iter()
            .filter(|(_, f)| coincide(f, filtros))
            .collect();
        let out = actualizar(&tx, &tabla, afectadas, &cambios)?;
        tx.commit()?;
        Ok(out)
    }
}

fn ensure_table(conn: &Connection, tabla: &str) -> Result<String> {
    let nombre = sanitize_name(tabla);
    let sql = format!(
        "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT, data TEXT NOT NULL)",
        nombre
    );
    conn.execute(&sql, [])?;
    Ok(nombre)
}

fn leer_filas(conn: &Connection, tabla: &str) -> Result<Vec<(i64, Row)>> {
    let mut stmt = conn.prepare(&format!("SELECT id, data FROM {} ORDER BY id", tabla))?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
    let mut out = Vec::new();
    for r in rows {
        let (id, data) = r?;
        out.push((id, serde_json::from_str::<Row>(&data)?));
    }
    Ok(out)
}

fn insertar(conn: &Connection, tabla: &str, fila: &Row) -> Result<()> {
    let data = serde_json::to_string(fila)?;
    conn.execute(&format!("INSERT INTO {} (data) VALUES (?1)", tabla), params![data])?;
    Ok(())
}

fn actualizar(conn: &Connection, tabla: &str, filas: Vec<(i64, Row)>, cambios: &Row) -> Result<Vec<Row>> {
    let mut out = Vec::with_capacity(filas.len());
    for (id, mut fila) in filas {
        mezclar(&mut fila, cambios)?;
        let data = serde_json::to_string(&fila)?;
        conn.execute(&format!("UPDATE {} SET data = ?1 WHERE id = ?2", tabla), params![data, id])?;
        out.push(fila);
    }
    Ok(out)
}
