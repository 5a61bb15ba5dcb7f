use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::api_json::{NuevoEstudiante, RegistroEstudiante};
use crate::error::NotasError;
use crate::service;
use crate::store::Store;

/// POST /registrar
/// Registra un estudiante nuevo; el id se genera en el servidor.
pub async fn registrar_estudiante_handler(
    store: web::Data<Store>,
    body: web::Json<RegistroEstudiante>,
) -> Result<HttpResponse, NotasError> {
    let estudiante = service::registrar_estudiante(&store, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "mensaje": "Estudiante registrado exitosamente.",
        "data": estudiante
    })))
}

/// POST /estudiantes
/// Inserta un estudiante con el id que envía el cliente.
pub async fn insertar_estudiante_handler(
    store: web::Data<Store>,
    body: web::Json<NuevoEstudiante>,
) -> Result<HttpResponse, NotasError> {
    let estudiante = service::insertar_estudiante(&store, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "mensaje": "Estudiante insertado correctamente",
        "data": [estudiante]
    })))
}
