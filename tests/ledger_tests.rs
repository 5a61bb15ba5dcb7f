use notasbackend::ledger::{aplicar_nota, aplicar_nota_etiquetada, normalizar_materia, normalizar_tipo};
use notasbackend::models::{MateriaEstudiante, NotaSubmission, TipoNota};
use notasbackend::NotasError;

fn materia(cant_parciales: u32, notas_parciales: Vec<f64>) -> MateriaEstudiante {
    MateriaEstudiante {
        uuid_estudiante: "e1".to_string(),
        nombre_materia: "HISTORIA".to_string(),
        parc_porc: 40.0,
        asig_porc: 30.0,
        portafolio_porc: 20.0,
        semestral_porc: 10.0,
        cant_parciales,
        cant_asignaciones: 2,
        notas_parciales,
        notas_asignaciones: Vec::new(),
        nota_portafolio: None,
        nota_semestral: None,
        nota_final: None,
    }
}

#[test]
fn test_ejemplo_dos_parciales() {
    let mut r = materia(2, vec![80.0]);

    aplicar_nota(&mut r, NotaSubmission { tipo: TipoNota::Parcial, nota: 90.0 }).unwrap();
    assert_eq!(r.notas_parciales, vec![80.0, 90.0]);

    let err = aplicar_nota(&mut r, NotaSubmission { tipo: TipoNota::Parcial, nota: 70.0 }).unwrap_err();
    assert!(matches!(err, NotasError::CapacityExceeded { .. }));
    assert_eq!(r.notas_parciales, vec![80.0, 90.0]);
}

#[test]
fn test_cada_agregado_suma_exactamente_uno() {
    let mut r = materia(5, Vec::new());
    let notas = [55.0, 61.5, 70.0, 99.0, 100.0];
    for (i, n) in notas.iter().enumerate() {
        let antes = r.notas_parciales.clone();
        aplicar_nota_etiquetada(&mut r, "parcial", *n).unwrap();
        assert_eq!(r.notas_parciales.len(), i + 1);
        assert_eq!(&r.notas_parciales[..i], &antes[..]);
    }
    assert_eq!(r.notas_parciales, notas.to_vec());
}

#[test]
fn test_tipos_invalidos_no_mutan() {
    let mut r = materia(2, vec![80.0]);
    let original = r.clone();
    for tipo in ["examen", "parciales", "", "asistencia"] {
        let err = aplicar_nota_etiquetada(&mut r, tipo, 50.0).unwrap_err();
        assert!(matches!(err, NotasError::InvalidKind(_)), "tipo {:?}", tipo);
    }
    assert_eq!(r, original);
}

#[test]
fn test_normalizacion_es_idempotente() {
    let materias = ["calculo", "  Cálculo  II ", "ÉTICA profesional", "x"];
    for m in materias {
        let n = normalizar_materia(m);
        assert_eq!(normalizar_materia(&n), n);
    }
    let tipos = ["parcial", "Asignación", " semestral ", "PORTAFOLIO", "fInAl", "otro"];
    for t in tipos {
        let n = normalizar_tipo(t);
        assert_eq!(normalizar_tipo(&n), n);
    }
}
