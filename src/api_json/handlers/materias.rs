use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::api_json::{ConsultaMaterias, RegistroMateria};
use crate::error::NotasError;
use crate::service;
use crate::store::Store;

/// POST /registrar-materia
pub async fn registrar_materia_handler(
    store: web::Data<Store>,
    body: web::Json<RegistroMateria>,
) -> Result<HttpResponse, NotasError> {
    let registro = service::registrar_materia(&store, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "mensaje": format!("Materia {} registrada.", registro.nombre_materia),
        "data": registro
    })))
}

/// POST /obtener-materias
/// Devuelve sólo los nombres de las materias, en orden alfabético.
pub async fn obtener_materias_handler(
    store: web::Data<Store>,
    body: web::Json<ConsultaMaterias>,
) -> Result<HttpResponse, NotasError> {
    let payload = body.into_inner();
    if payload.uuid_estudiante.trim().is_empty() {
        return Err(NotasError::Validation("uuid_estudiante es requerido".to_string()));
    }
    let nombres = service::obtener_materias(&store, &payload.uuid_estudiante).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": nombres })))
}
