use actix_cors::Cors;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::json;
use std::io;

use crate::api_json::handlers::{
    health_handler, help_handler, insertar_estudiante_handler, obtener_materias_handler, obtener_notas_handler,
    registrar_estudiante_handler, registrar_materia_handler, registrar_nota_handler,
};
use crate::config::Settings;
use crate::store::Store;

/// Cuerpos JSON mal formados responden 400 con la misma forma que los demás errores.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = json!({"error": format!("invalid JSON body: {}", err), "codigo": "validation"});
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Rutas de la API. Separado de `run_server` para poder montarlo en pruebas.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/registrar", web::post().to(registrar_estudiante_handler))
        .route("/estudiantes", web::post().to(insertar_estudiante_handler))
        .route("/registrar-materia", web::post().to(registrar_materia_handler))
        .route("/registrar-nota", web::post().to(registrar_nota_handler))
        .route("/obtener-materias", web::post().to(obtener_materias_handler))
        .route("/obtener-notas-por-materia", web::post().to(obtener_notas_handler))
        .route("/health", web::get().to(health_handler))
        .route("/help", web::get().to(help_handler));
}

fn cors(origins: &[String]) -> Cors {
    let base = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .max_age(3600);
    if origins.is_empty() {
        return base.allow_any_origin();
    }
    origins.iter().fold(base, |c, o| c.allowed_origin(o))
}

pub async fn run_server(settings: Settings) -> io::Result<()> {
    let store: Store = settings
        .open_store()
        .map_err(|e| io::Error::other(e.to_string()))?;
    tracing::info!(store = store.backend(), bind = %settings.bind, "iniciando servidor");

    let store = web::Data::new(store);
    let origins = settings.cors_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(cors(&origins))
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(configure)
    })
    .bind(settings.bind.as_str())?
    .run()
    .await
}
