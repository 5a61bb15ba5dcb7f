pub mod handlers;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

use crate::error::{NotasError, Result};

pub const MAX_PARCIALES: u32 = 5;
pub const MAX_ASIGNACIONES: u32 = 30;

/// Cuerpo de `POST /registrar`. El id se genera en el servidor.
///
/// ```json
/// {
///   "nombre": "Fabricio",
///   "apellido": "Mendoza",
///   "correo": "fabricio@example.com",
///   "genero": "M",
///   "password": "no-se-guarda"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct RegistroEstudiante {
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    #[serde(default)]
    pub genero: Option<String>,
    // Se acepta por compatibilidad con el cliente; la gestión de credenciales
    // no es parte de este servicio.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

/// Cuerpo de `POST /estudiantes`: igual que el registro pero con id explícito
/// (texto o número).
#[derive(Debug, Serialize, Deserialize)]
pub struct NuevoEstudiante {
    #[serde(deserialize_with = "id_como_texto")]
    pub id: String,
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    #[serde(default)]
    pub genero: Option<String>,
}

/// Cuerpo de `POST /registrar-materia`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegistroMateria {
    pub uuid_estudiante: String,
    pub nombre_materia: String,
    pub parc_porc: f64,
    pub asig_porc: f64,
    pub portafolio_porc: f64,
    pub semestral_porc: f64,
    pub cant_parciales: u32,
    pub cant_asignaciones: u32,
}

/// Cuerpo de `POST /registrar-nota`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegistroNota {
    pub uuid_estudiante: String,
    pub nombre_materia: String,
    pub nota: f64,
    pub tipo_nota: String,
}

/// Cuerpo de `POST /obtener-materias`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConsultaMaterias {
    pub uuid_estudiante: String,
}

/// Cuerpo de `POST /obtener-notas-por-materia`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConsultaNotas {
    pub uuid_estudiante: String,
    pub nombre_materia: String,
}

fn id_como_texto<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Texto(String),
        Numero(i64),
    }
    Ok(match Id::deserialize(d)? {
        Id::Texto(s) => s,
        Id::Numero(n) => n.to_string(),
    })
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"))
}

pub fn validar_correo(correo: &str) -> Result<()> {
    if email_regex().is_match(correo.trim()) {
        Ok(())
    } else {
        Err(NotasError::Validation(format!("correo inválido: '{}'", correo)))
    }
}

fn requerido(campo: &str, valor: &str) -> Result<()> {
    if valor.trim().is_empty() {
        return Err(NotasError::Validation(format!("{} es requerido", campo)));
    }
    Ok(())
}

pub fn validar_datos_estudiante(nombre: &str, apellido: &str, correo: &str) -> Result<()> {
    requerido("nombre", nombre)?;
    requerido("apellido", apellido)?;
    validar_correo(correo)
}

impl RegistroMateria {
    /// Porcentajes en 0..=100 que suman 100 y cantidades dentro de sus límites.
    pub fn validar(&self) -> Result<()> {
        requerido("uuid_estudiante", &self.uuid_estudiante)?;
        requerido("nombre_materia", &self.nombre_materia)?;

        let porcentajes = [
            ("parc_porc", self.parc_porc),
            ("asig_porc", self.asig_porc),
            ("portafolio_porc", self.portafolio_porc),
            ("semestral_porc", self.semestral_porc),
        ];
        for (campo, p) in porcentajes {
            if !p.is_finite() || !(0.0..=100.0).contains(&p) {
                return Err(NotasError::Validation(format!("{} debe estar entre 0 y 100", campo)));
            }
        }
        let total: f64 = porcentajes.iter().map(|(_, p)| p).sum();
        if (total - 100.0).abs() > 1e-6 {
            return Err(NotasError::Validation(format!("los porcentajes deben sumar 100, suman {}", total)));
        }

        if !(1..=MAX_PARCIALES).contains(&self.cant_parciales) {
            return Err(NotasError::Validation(format!("cant_parciales debe estar entre 1 y {}", MAX_PARCIALES)));
        }
        if !(1..=MAX_ASIGNACIONES).contains(&self.cant_asignaciones) {
            return Err(NotasError::Validation(format!(
                "cant_asignaciones debe estar entre 1 y {}",
                MAX_ASIGNACIONES
            )));
        }
        Ok(())
    }
}
