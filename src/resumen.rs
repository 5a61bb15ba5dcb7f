//! Resumen de lectura para un registro de materia: promedios por componente,
//! espacios libres y una banda cualitativa por nota.
//!
//! No combina los porcentajes en una nota final ponderada.

use serde::Serialize;

use crate::models::MateriaEstudiante;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Banda {
    Alto,
    Medio,
    Bajo,
}

pub fn banda(nota: f64) -> Banda {
    if nota >= 85.0 {
        Banda::Alto
    } else if nota >= 70.0 {
        Banda::Medio
    } else {
        Banda::Bajo
    }
}

/// Promedio redondeado al entero más cercano; `None` si la lista está vacía.
pub fn promedio(notas: &[f64]) -> Option<f64> {
    if notas.is_empty() {
        return None;
    }
    let total: f64 = notas.iter().sum();
    Some((total / notas.len() as f64).round())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumenComponente {
    pub promedio: Option<f64>,
    pub banda: Option<Banda>,
    pub registradas: usize,
    pub restantes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumenMateria {
    pub parciales: ResumenComponente,
    pub asignaciones: ResumenComponente,
    pub banda_portafolio: Option<Banda>,
    pub banda_semestral: Option<Banda>,
    pub banda_final: Option<Banda>,
}

fn componente(notas: &[f64], esperadas: u32) -> ResumenComponente {
    let promedio = promedio(notas);
    ResumenComponente {
        promedio,
        banda: promedio.map(banda),
        registradas: notas.len(),
        restantes: (esperadas as usize).saturating_sub(notas.len()),
    }
}

pub fn resumir(registro: &MateriaEstudiante) -> ResumenMateria {
    ResumenMateria {
        parciales: componente(&registro.notas_parciales, registro.cant_parciales),
        asignaciones: componente(&registro.notas_asignaciones, registro.cant_asignaciones),
        banda_portafolio: registro.nota_portafolio.map(banda),
        banda_semestral: registro.nota_semestral.map(banda),
        banda_final: registro.nota_final.map(banda),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bandas_en_los_bordes() {
        assert_eq!(banda(85.0), Banda::Alto);
        assert_eq!(banda(84.9), Banda::Medio);
        assert_eq!(banda(70.0), Banda::Medio);
        assert_eq!(banda(69.99), Banda::Bajo);
    }

    #[test]
    fn promedio_redondeado() {
        assert_eq!(promedio(&[]), None);
        assert_eq!(promedio(&[80.0, 85.0]), Some(83.0));
        assert_eq!(promedio(&[70.0, 71.0, 71.0]), Some(71.0));
    }

    #[test]
    fn resumen_de_registro_parcial() {
        let r = MateriaEstudiante {
            uuid_estudiante: "e1".into(),
            nombre_materia: "POLITICA".into(),
            parc_porc: 30.0,
            asig_porc: 20.0,
            portafolio_porc: 15.0,
            semestral_porc: 35.0,
            cant_parciales: 3,
            cant_asignaciones: 2,
            notas_parciales: vec![90.0, 86.0],
            notas_asignaciones: vec![],
            nota_portafolio: Some(60.0),
            nota_semestral: None,
            nota_final: None,
        };
        let res = resumir(&r);
        assert_eq!(res.parciales.promedio, Some(88.0));
        assert_eq!(res.parciales.banda, Some(Banda::Alto));
        assert_eq!(res.parciales.restantes, 1);
        assert_eq!(res.asignaciones.promedio, None);
        assert_eq!(res.asignaciones.restantes, 2);
        assert_eq!(res.banda_portafolio, Some(Banda::Bajo));
        assert_eq!(res.banda_semestral, None);
    }
}
