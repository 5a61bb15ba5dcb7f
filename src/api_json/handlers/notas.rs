use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::api_json::{ConsultaNotas, RegistroNota};
use crate::error::NotasError;
use crate::service;
use crate::store::Store;

/// POST /registrar-nota
/// `tipo_nota` se normaliza (mayúsculas, sin tildes) antes de clasificarla.
pub async fn registrar_nota_handler(
    store: web::Data<Store>,
    body: web::Json<RegistroNota>,
) -> Result<HttpResponse, NotasError> {
    let registro = service::registrar_nota(&store, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "mensaje": "Nota registrada exitosamente.",
        "data": service::NotasMateria::from(registro)
    })))
}

/// POST /obtener-notas-por-materia
pub async fn obtener_notas_handler(
    store: web::Data<Store>,
    body: web::Json<ConsultaNotas>,
) -> Result<HttpResponse, NotasError> {
    let payload = body.into_inner();
    let notas = service::obtener_notas_por_materia(&store, &payload.uuid_estudiante, &payload.nombre_materia).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": notas })))
}
