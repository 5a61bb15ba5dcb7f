// Estructuras de datos principales

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Nombre de las tablas en el almacén.
pub const TABLA_ESTUDIANTE: &str = "estudiante";
pub const TABLA_MATERIA_ESTUDIANTE: &str = "materia_estudiante";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estudiante {
    pub id: String,
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    #[serde(default)]
    pub genero: Option<String>,
}

/// Registro de una materia inscrita por un estudiante ("materia por estudiante").
///
/// La clave es (`uuid_estudiante`, `nombre_materia`); `nombre_materia` se guarda
/// siempre en mayúsculas. Un registro recién creado no trae notas: según el
/// almacén las secuencias llegan ausentes o como `null`, y ambos casos se leen
/// como secuencia vacía.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MateriaEstudiante {
    pub uuid_estudiante: String,
    pub nombre_materia: String,
    pub parc_porc: f64,
    pub asig_porc: f64,
    pub portafolio_porc: f64,
    pub semestral_porc: f64,
    pub cant_parciales: u32,
    pub cant_asignaciones: u32,
    #[serde(default, deserialize_with = "secuencia_o_nula")]
    pub notas_parciales: Vec<f64>,
    #[serde(default, deserialize_with = "secuencia_o_nula")]
    pub notas_asignaciones: Vec<f64>,
    #[serde(default)]
    pub nota_portafolio: Option<f64>,
    #[serde(default)]
    pub nota_semestral: Option<f64>,
    #[serde(default)]
    pub nota_final: Option<f64>,
}

fn secuencia_o_nula<'de, D>(d: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<f64>>::deserialize(d)?.unwrap_or_default())
}

/// Tipos de nota reconocidos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoNota {
    Parcial,
    Asignacion,
    Semestral,
    Portafolio,
    Final,
}

impl TipoNota {
    pub const TODOS: [TipoNota; 5] = [
        TipoNota::Parcial,
        TipoNota::Asignacion,
        TipoNota::Semestral,
        TipoNota::Portafolio,
        TipoNota::Final,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TipoNota::Parcial => "PARCIAL",
            TipoNota::Asignacion => "ASIGNACION",
            TipoNota::Semestral => "SEMESTRAL",
            TipoNota::Portafolio => "PORTAFOLIO",
            TipoNota::Final => "FINAL",
        }
    }

    /// Los tipos que se acumulan en una secuencia acotada.
    pub fn es_acumulable(&self) -> bool {
        matches!(self, TipoNota::Parcial | TipoNota::Asignacion)
    }
}

impl fmt::Display for TipoNota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Una nota ya clasificada, lista para aplicarse a un registro.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotaSubmission {
    pub tipo: TipoNota,
    pub nota: f64,
}
