use actix_web::{http::StatusCode, test, web, App};
use notasbackend::server::configure;
use notasbackend::store::{SqliteStore, Store};
use serde_json::{json, Value};

fn store() -> web::Data<Store> {
    web::Data::new(Store::Sqlite(SqliteStore::open_in_memory().expect("sqlite en memoria")))
}

#[actix_web::test]
async fn test_registrar_y_consultar_notas() {
    let app = test::init_service(App::new().app_data(store()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/registrar")
        .set_json(json!({"nombre": "Fabricio", "apellido": "Mendoza", "correo": "fab@example.com", "genero": "M", "password": "x"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["mensaje"], "Estudiante registrado exitosamente.");
    let id = body["data"]["id"].as_str().expect("id generado").to_string();

    let req = test::TestRequest::post()
        .uri("/registrar-materia")
        .set_json(json!({
            "uuid_estudiante": id, "nombre_materia": "politica",
            "parc_porc": 30, "asig_porc": 20, "portafolio_porc": 15, "semestral_porc": 35,
            "cant_parciales": 1, "cant_asignaciones": 2
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/registrar-nota")
        .set_json(json!({"uuid_estudiante": id, "nombre_materia": "Politica", "nota": 91, "tipo_nota": "parcial"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["notas_parciales"], json!([91.0]));

    let req = test::TestRequest::post()
        .uri("/registrar-nota")
        .set_json(json!({"uuid_estudiante": id, "nombre_materia": "Politica", "nota": 60, "tipo_nota": "parcial"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["codigo"], "capacity_exceeded");

    let req = test::TestRequest::post()
        .uri("/obtener-materias")
        .set_json(json!({"uuid_estudiante": id}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!(["POLITICA"]));

    let req = test::TestRequest::post()
        .uri("/obtener-notas-por-materia")
        .set_json(json!({"uuid_estudiante": id, "nombre_materia": "POLITICA"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["notas_parciales"], json!([91.0]));
    assert_eq!(body["data"]["resumen"]["parciales"]["banda"], "alto");
    assert_eq!(body["data"]["nota_final"], Value::Null);
}

#[actix_web::test]
async fn test_codigos_de_error() {
    let app = test::init_service(App::new().app_data(store()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/registrar-nota")
        .set_json(json!({"uuid_estudiante": "x", "nombre_materia": "Y", "nota": 50, "tipo_nota": "quiz"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/registrar-nota")
        .set_json(json!({"uuid_estudiante": "x", "nombre_materia": "Y", "nota": 50, "tipo_nota": "final"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/obtener-notas-por-materia")
        .set_json(json!({"uuid_estudiante": "x"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["codigo"], "validation");

    let req = test::TestRequest::post()
        .uri("/estudiantes")
        .set_json(json!({"id": 1, "nombre": "A", "apellido": "B", "correo": "malo"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_health_y_help() {
    let app = test::init_service(App::new().app_data(store()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"status": "ok", "store": "sqlite"}));

    let req = test::TestRequest::get().uri("/help").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["tipos_nota"], json!(["PARCIAL", "ASIGNACION", "SEMESTRAL", "PORTAFOLIO", "FINAL"]));
    assert!(body["registrar_example"].get("password").is_none());
}
