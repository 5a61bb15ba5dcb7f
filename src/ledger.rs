//! Libro de notas: aplica una nota a un registro de materia respetando la
//! cantidad de espacios configurada para parciales y asignaciones.
//!
//! Este módulo no toca el almacén. Devuelve el parche con los campos cambiados
//! y es quien llama (ver `service`) el que lo persiste.

use serde_json::{json, Value};

use crate::error::{NotasError, Result};
use crate::models::{MateriaEstudiante, NotaSubmission, TipoNota};

pub const NOTA_MINIMA: f64 = 0.0;
pub const NOTA_MAXIMA: f64 = 100.0;

/// Normaliza el nombre de una materia: recorta, colapsa espacios internos y
/// pasa a mayúsculas. `normalizar_materia(normalizar_materia(x)) == normalizar_materia(x)`.
pub fn normalizar_materia(nombre: &str) -> String {
    nombre
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Normaliza la etiqueta de tipo de nota: mayúsculas, sin espacios en los
/// extremos y sin tildes (`asignación` -> `ASIGNACION`).
pub fn normalizar_tipo(tipo: &str) -> String {
    tipo.trim()
        .to_uppercase()
        .chars()
        .map(|c| match c {
            'Á' | 'À' | 'Ä' => 'A',
            'É' | 'È' | 'Ë' => 'E',
            'Í' | 'Ì' | 'Ï' => 'I',
            'Ó' | 'Ò' | 'Ö' => 'O',
            'Ú' | 'Ù' | 'Ü' => 'U',
            otro => otro,
        })
        .collect()
}

pub fn parse_tipo(tipo: &str) -> Result<TipoNota> {
    let norm = normalizar_tipo(tipo);
    TipoNota::TODOS
        .into_iter()
        .find(|t| t.as_str() == norm)
        .ok_or_else(|| NotasError::InvalidKind(tipo.to_string()))
}

pub fn validar_nota(nota: f64) -> Result<()> {
    if !nota.is_finite() || !(NOTA_MINIMA..=NOTA_MAXIMA).contains(&nota) {
        return Err(NotasError::Validation(format!(
            "la nota debe estar entre {} y {}, se recibió {}",
            NOTA_MINIMA, NOTA_MAXIMA, nota
        )));
    }
    Ok(())
}

/// Aplica `nota` al registro.
///
/// Parciales y asignaciones se agregan al final de su secuencia y fallan con
/// `CapacityExceeded` si ya está llena. Semestral, portafolio y final
/// sobrescriben su campo. Si devuelve error el registro queda intacto.
pub fn aplicar_nota(registro: &mut MateriaEstudiante, nota: NotaSubmission) -> Result<Value> {
    validar_nota(nota.nota)?;

    let patch = match nota.tipo {
        TipoNota::Parcial => {
            agregar_acotado(&mut registro.notas_parciales, registro.cant_parciales, nota)?;
            json!({"notas_parciales": registro.notas_parciales})
        }
        TipoNota::Asignacion => {
            agregar_acotado(&mut registro.notas_asignaciones, registro.cant_asignaciones, nota)?;
            json!({"notas_asignaciones": registro.notas_asignaciones})
        }
        TipoNota::Semestral => {
            registro.nota_semestral = Some(nota.nota);
            json!({"nota_semestral": nota.nota})
        }
        TipoNota::Portafolio => {
            registro.nota_portafolio = Some(nota.nota);
            json!({"nota_portafolio": nota.nota})
        }
        TipoNota::Final => {
            registro.nota_final = Some(nota.nota);
            json!({"nota_final": nota.nota})
        }
    };
    Ok(patch)
}

/// Igual que `aplicar_nota` pero recibe la etiqueta de tipo tal como llega del cliente.
pub fn aplicar_nota_etiquetada(registro: &mut MateriaEstudiante, tipo: &str, nota: f64) -> Result<Value> {
    let tipo = parse_tipo(tipo)?;
    aplicar_nota(registro, NotaSubmission { tipo, nota })
}

fn agregar_acotado(secuencia: &mut Vec<f64>, maximo: u32, nota: NotaSubmission) -> Result<()> {
    let maximo = maximo as usize;
    if secuencia.len() >= maximo {
        return Err(NotasError::CapacityExceeded {
            tipo: nota.tipo.to_string(),
            actual: secuencia.len(),
            maximo,
        });
    }
    secuencia.push(nota.nota);
    Ok(())
}
