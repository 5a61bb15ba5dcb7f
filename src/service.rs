//! Operaciones del servicio: registro de estudiantes y materias, registro de
//! notas y consultas. Cada operación hace sus lecturas/escrituras contra el
//! `Store` y delega las reglas de notas a `ledger`.

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api_json::{validar_datos_estudiante, NuevoEstudiante, RegistroEstudiante, RegistroMateria, RegistroNota};
use crate::error::{NotasError, Result};
use crate::ledger::{aplicar_nota, normalizar_materia, parse_tipo, validar_nota};
use crate::models::{
    Estudiante, MateriaEstudiante, NotaSubmission, TABLA_ESTUDIANTE, TABLA_MATERIA_ESTUDIANTE,
};
use crate::resumen::{resumir, ResumenMateria};
use crate::store::{Filtro, Row, Store};

/// Notas de una materia tal como las devuelve `/obtener-notas-por-materia`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotasMateria {
    pub nombre_materia: String,
    pub parc_porc: f64,
    pub asig_porc: f64,
    pub portafolio_porc: f64,
    pub semestral_porc: f64,
    pub cant_parciales: u32,
    pub cant_asignaciones: u32,
    pub notas_parciales: Vec<f64>,
    pub notas_asignaciones: Vec<f64>,
    pub nota_portafolio: Option<f64>,
    pub nota_semestral: Option<f64>,
    pub nota_final: Option<f64>,
    pub resumen: ResumenMateria,
}

impl From<MateriaEstudiante> for NotasMateria {
    fn from(m: MateriaEstudiante) -> Self {
        let resumen = resumir(&m);
        NotasMateria {
            nombre_materia: m.nombre_materia,
            parc_porc: m.parc_porc,
            asig_porc: m.asig_porc,
            portafolio_porc: m.portafolio_porc,
            semestral_porc: m.semestral_porc,
            cant_parciales: m.cant_parciales,
            cant_asignaciones: m.cant_asignaciones,
            notas_parciales: m.notas_parciales,
            notas_asignaciones: m.notas_asignaciones,
            nota_portafolio: m.nota_portafolio,
            nota_semestral: m.nota_semestral,
            nota_final: m.nota_final,
            resumen,
        }
    }
}

fn clave_materia<'a>(uuid_estudiante: &str, nombre_materia: &str) -> Vec<Filtro<'a>> {
    vec![
        ("uuid_estudiante", json!(uuid_estudiante)),
        ("nombre_materia", json!(nombre_materia)),
    ]
}

fn primera<T: serde::de::DeserializeOwned>(filas: Vec<Row>) -> Result<Option<T>> {
    match filas.into_iter().next() {
        Some(f) => Ok(Some(serde_json::from_value(f)?)),
        None => Ok(None),
    }
}

/// `POST /registrar`: crea un estudiante con un id nuevo.
pub async fn registrar_estudiante(store: &Store, datos: RegistroEstudiante) -> Result<Estudiante> {
    let estudiante = Estudiante {
        id: Uuid::new_v4().to_string(),
        nombre: datos.nombre.trim().to_string(),
        apellido: datos.apellido.trim().to_string(),
        correo: normalizar_correo(&datos.correo),
        genero: datos.genero.map(|g| g.trim().to_string()).filter(|g| !g.is_empty()),
    };
    crear_estudiante(store, estudiante).await
}

/// `POST /estudiantes`: crea un estudiante con el id indicado.
pub async fn insertar_estudiante(store: &Store, datos: NuevoEstudiante) -> Result<Estudiante> {
    if datos.id.trim().is_empty() {
        return Err(NotasError::Validation("id es requerido".to_string()));
    }
    let estudiante = Estudiante {
        id: datos.id.trim().to_string(),
        nombre: datos.nombre.trim().to_string(),
        apellido: datos.apellido.trim().to_string(),
        correo: normalizar_correo(&datos.correo),
        genero: datos.genero.map(|g| g.trim().to_string()).filter(|g| !g.is_empty()),
    };
    crear_estudiante(store, estudiante).await
}

/// El correo identifica al estudiante sin distinguir mayúsculas.
fn normalizar_correo(correo: &str) -> String {
    correo.trim().to_lowercase()
}

async fn crear_estudiante(store: &Store, estudiante: Estudiante) -> Result<Estudiante> {
    validar_datos_estudiante(&estudiante.nombre, &estudiante.apellido, &estudiante.correo)?;

    if !store.select(TABLA_ESTUDIANTE, &[("id", json!(estudiante.id))]).await?.is_empty() {
        return Err(NotasError::Conflict(format!("ya existe un estudiante con id {}", estudiante.id)));
    }
    if !store.select(TABLA_ESTUDIANTE, &[("correo", json!(estudiante.correo))]).await?.is_empty() {
        return Err(NotasError::Conflict(format!("el correo {} ya está registrado", estudiante.correo)));
    }

    let mut fila = serde_json::to_value(&estudiante)?;
    fila["created_at"] = json!(Utc::now().to_rfc3339());
    store.insert(TABLA_ESTUDIANTE, fila).await?;
    tracing::info!(id = %estudiante.id, "estudiante registrado");
    Ok(estudiante)
}

async fn exigir_estudiante(store: &Store, uuid_estudiante: &str) -> Result<()> {
    if store.select(TABLA_ESTUDIANTE, &[("id", json!(uuid_estudiante))]).await?.is_empty() {
        return Err(NotasError::NotFound(format!("estudiante {}", uuid_estudiante)));
    }
    Ok(())
}

pub async fn buscar_materia(store: &Store, uuid_estudiante: &str, nombre_materia: &str) -> Result<Option<MateriaEstudiante>> {
    let nombre = normalizar_materia(nombre_materia);
    let filas = store
        .select(TABLA_MATERIA_ESTUDIANTE, &clave_materia(uuid_estudiante, &nombre))
        .await?;
    primera(filas)
}

/// `POST /registrar-materia`: inscribe una materia para el estudiante.
///
/// Si la inscripción ya existe sólo se actualiza la configuración (porcentajes
/// y cantidades); las notas ya guardadas se conservan, y no se permite bajar una
/// cantidad por debajo de las notas registradas.
pub async fn registrar_materia(store: &Store, datos: RegistroMateria) -> Result<MateriaEstudiante> {
    datos.validar()?;
    exigir_estudiante(store, &datos.uuid_estudiante).await?;
    let nombre = normalizar_materia(&datos.nombre_materia);

    if let Some(actual) = buscar_materia(store, &datos.uuid_estudiante, &nombre).await? {
        if (datos.cant_parciales as usize) < actual.notas_parciales.len()
            || (datos.cant_asignaciones as usize) < actual.notas_asignaciones.len()
        {
            return Err(NotasError::Conflict(format!(
                "{} ya tiene más notas registradas que las cantidades pedidas",
                nombre
            )));
        }
    }

    let fila = json!({
        "uuid_estudiante": datos.uuid_estudiante,
        "nombre_materia": nombre,
        "parc_porc": datos.parc_porc,
        "asig_porc": datos.asig_porc,
        "portafolio_porc": datos.portafolio_porc,
        "semestral_porc": datos.semestral_porc,
        "cant_parciales": datos.cant_parciales,
        "cant_asignaciones": datos.cant_asignaciones,
    });
    let filas = store
        .upsert(TABLA_MATERIA_ESTUDIANTE, fila, &["uuid_estudiante", "nombre_materia"])
        .await?;
    let registro: MateriaEstudiante = primera(filas)?
        .ok_or_else(|| NotasError::Store("el almacén no devolvió la materia registrada".to_string()))?;
    tracing::info!(estudiante = %registro.uuid_estudiante, materia = %registro.nombre_materia, "materia registrada");
    Ok(registro)
}

/// `POST /registrar-nota`: agrega o sobrescribe una nota según su tipo.
pub async fn registrar_nota(store: &Store, datos: RegistroNota) -> Result<MateriaEstudiante> {
    let tipo = parse_tipo(&datos.tipo_nota)?;
    validar_nota(datos.nota)?;
    let nombre = normalizar_materia(&datos.nombre_materia);

    // TODO: mover el agregado a una función del almacén (RPC) para que dos
    // notas concurrentes sobre la misma materia no se pisen; hoy es leer,
    // agregar y escribir la secuencia completa.
    let mut registro = buscar_materia(store, &datos.uuid_estudiante, &nombre)
        .await?
        .ok_or_else(|| NotasError::NotFound(format!("materia {} del estudiante {}", nombre, datos.uuid_estudiante)))?;

    let cambios: Value = aplicar_nota(&mut registro, NotaSubmission { tipo, nota: datos.nota })?;
    let filas = store
        .update(TABLA_MATERIA_ESTUDIANTE, cambios, &clave_materia(&datos.uuid_estudiante, &nombre))
        .await?;
    if filas.is_empty() {
        return Err(NotasError::NotFound(format!("materia {} del estudiante {}", nombre, datos.uuid_estudiante)));
    }
    tracing::info!(estudiante = %datos.uuid_estudiante, materia = %nombre, %tipo, nota = datos.nota, "nota registrada");
    Ok(registro)
}

/// `POST /obtener-materias`: nombres de las materias inscritas por el estudiante.
pub async fn obtener_materias(store: &Store, uuid_estudiante: &str) -> Result<Vec<String>> {
    let filas = store
        .select(TABLA_MATERIA_ESTUDIANTE, &[("uuid_estudiante", json!(uuid_estudiante))])
        .await?;
    let mut nombres: Vec<String> = filas
        .iter()
        .filter_map(|f| f.get("nombre_materia").and_then(|v| v.as_str()).map(str::to_string))
        .collect();
    nombres.sort();
    nombres.dedup();
    Ok(nombres)
}

/// `POST /obtener-notas-por-materia`.
pub async fn obtener_notas_por_materia(store: &Store, uuid_estudiante: &str, nombre_materia: &str) -> Result<NotasMateria> {
    let registro = buscar_materia(store, uuid_estudiante, nombre_materia)
        .await?
        .ok_or_else(|| {
            NotasError::NotFound(format!(
                "materia {} del estudiante {}",
                normalizar_materia(nombre_materia),
                uuid_estudiante
            ))
        })?;
    Ok(registro.into())
}
