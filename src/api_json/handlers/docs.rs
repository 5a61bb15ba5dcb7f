use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::api_json::{RegistroEstudiante, RegistroMateria, RegistroNota};
use crate::models::TipoNota;
use crate::store::Store;

/// GET /health
pub async fn health_handler(store: web::Data<Store>) -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok", "store": store.backend()}))
}

/// GET /help
/// Ejemplos de cuerpos para cada endpoint.
pub async fn help_handler() -> impl Responder {
    let registro = RegistroEstudiante {
        nombre: "Fabricio".to_string(),
        apellido: "Mendoza".to_string(),
        correo: "fabricio@example.com".to_string(),
        genero: Some("M".to_string()),
        password: None,
    };
    let materia = RegistroMateria {
        uuid_estudiante: "a835d4d7-320b-43dc-92e3-05e95d56aa62".to_string(),
        nombre_materia: "Politica".to_string(),
        parc_porc: 40.0,
        asig_porc: 30.0,
        portafolio_porc: 20.0,
        semestral_porc: 10.0,
        cant_parciales: 2,
        cant_asignaciones: 4,
    };
    let nota = RegistroNota {
        uuid_estudiante: "a835d4d7-320b-43dc-92e3-05e95d56aa62".to_string(),
        nombre_materia: "politica".to_string(),
        nota: 87.0,
        tipo_nota: "parcial".to_string(),
    };
    let tipos: Vec<&str> = TipoNota::TODOS.iter().map(|t| t.as_str()).collect();

    HttpResponse::Ok().json(json!({
        "description": "API de registro de notas. Todos los endpoints de escritura y consulta son POST con cuerpo JSON.",
        "registrar_example": registro,
        "registrar_materia_example": materia,
        "registrar_nota_example": nota,
        "obtener_materias_example": {"uuid_estudiante": "a835d4d7-320b-43dc-92e3-05e95d56aa62"},
        "obtener_notas_example": {"uuid_estudiante": "a835d4d7-320b-43dc-92e3-05e95d56aa62", "nombre_materia": "POLITICA"},
        "tipos_nota": tipos,
        "note": "Los porcentajes deben sumar 100; cant_parciales 1-5, cant_asignaciones 1-30; notas 0-100."
    }))
}
