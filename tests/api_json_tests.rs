use notasbackend::api_json::*;

#[test]
fn test_parse_registro_materia() {
    let json_data = r#"
    {
        "uuid_estudiante": "a835d4d7-320b-43dc-92e3-05e95d56aa62",
        "nombre_materia": "politica",
        "parc_porc": 30,
        "asig_porc": 20,
        "portafolio_porc": 15,
        "semestral_porc": 35,
        "cant_parciales": 2,
        "cant_asignaciones": 5
    }
    "#;

    let materia: RegistroMateria = serde_json::from_str(json_data).expect("Debe parsear la materia");
    assert_eq!(materia.nombre_materia, "politica");
    assert_eq!(materia.parc_porc, 30.0);
    assert_eq!(materia.cant_asignaciones, 5);
    assert!(materia.validar().is_ok());
}

#[test]
fn test_parse_registro_nota_como_lo_envia_el_cliente() {
    // el formulario del cliente manda tipo_nota en minúsculas
    let json_data = r#"
    {
        "uuid_estudiante": "a835d4d7-320b-43dc-92e3-05e95d56aa62",
        "nombre_materia": "POLITICA",
        "nota": 87,
        "tipo_nota": "asignacion"
    }
    "#;

    let nota: RegistroNota = serde_json::from_str(json_data).expect("Debe parsear la nota");
    assert_eq!(nota.nota, 87.0);
    assert_eq!(nota.tipo_nota, "asignacion");
}

#[test]
fn test_parse_registro_estudiante_sin_genero() {
    let json_data = r#"
    {
        "nombre": "Juan",
        "apellido": "Pérez",
        "correo": "juan.perez@example.com"
    }
    "#;

    let r: RegistroEstudiante = serde_json::from_str(json_data).expect("Debe parsear el registro");
    assert!(r.genero.is_none());
    assert!(r.password.is_none());
    assert!(validar_datos_estudiante(&r.nombre, &r.apellido, &r.correo).is_ok());
}

#[test]
fn test_materia_con_porcentajes_negativos() {
    let json_data = r#"
    {
        "uuid_estudiante": "e1",
        "nombre_materia": "Fisica",
        "parc_porc": -10,
        "asig_porc": 60,
        "portafolio_porc": 30,
        "semestral_porc": 20,
        "cant_parciales": 1,
        "cant_asignaciones": 1
    }
    "#;
    let materia: RegistroMateria = serde_json::from_str(json_data).unwrap();
    assert!(materia.validar().is_err());
}

#[test]
fn test_materia_sin_nombre() {
    let materia = RegistroMateria {
        uuid_estudiante: "e1".to_string(),
        nombre_materia: "   ".to_string(),
        parc_porc: 25.0,
        asig_porc: 25.0,
        portafolio_porc: 25.0,
        semestral_porc: 25.0,
        cant_parciales: 1,
        cant_asignaciones: 1,
    };
    assert!(materia.validar().is_err());
}
