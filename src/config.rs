//! Configuración desde variables de entorno (se carga `.env` si existe).
//!
//! | variable | uso |
//! |---|---|
//! | `NOTAS_BIND` | dirección del servidor, por defecto `127.0.0.1:8000` |
//! | `NOTAS_STORE` | `sqlite` o `postgrest` |
//! | `SUPABASE_URL` | URL base del almacén alojado |
//! | `SUPABASE_SERVICE_ROLE` / `SUPABASE_KEY` | clave del almacén |
//! | `NOTAS_DB_PATH` | archivo sqlite (`:memory:` admitido) |
//! | `NOTAS_CORS_ORIGINS` | orígenes separados por coma, `*` = cualquiera |

use std::env;

use crate::error::{NotasError, Result};
use crate::store::{PostgrestStore, SqliteStore, Store};

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_DB_PATH: &str = "data/notas.db";

#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    Sqlite { path: String },
    Postgrest { url: String, api_key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind: String,
    pub store: StoreConfig,
    /// Vacío significa "cualquier origen".
    pub cors_origins: Vec<String>,
}

fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        load_dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda; así las
    /// pruebas no dependen del entorno del proceso.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind = get("NOTAS_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let url = get("SUPABASE_URL");
        let api_key = get("SUPABASE_SERVICE_ROLE").or_else(|| get("SUPABASE_KEY"));

        let backend = match get("NOTAS_STORE") {
            Some(b) => b.to_lowercase(),
            None if url.is_some() => "postgrest".to_string(),
            None => "sqlite".to_string(),
        };

        let store = match backend.as_str() {
            "sqlite" => StoreConfig::Sqlite {
                path: get("NOTAS_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            },
            "postgrest" | "supabase" => {
                let url = url.ok_or_else(|| NotasError::Config("NOTAS_STORE=postgrest requiere SUPABASE_URL".to_string()))?;
                let api_key = api_key.ok_or_else(|| {
                    NotasError::Config("NOTAS_STORE=postgrest requiere SUPABASE_SERVICE_ROLE o SUPABASE_KEY".to_string())
                })?;
                StoreConfig::Postgrest { url, api_key }
            }
            otro => return Err(NotasError::Config(format!("NOTAS_STORE desconocido: {}", otro))),
        };

        let cors_origins = get("NOTAS_CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty() && p != "*")
                    .collect()
            })
            .unwrap_or_default();

        Ok(Settings { bind, store, cors_origins })
    }

    pub fn open_store(&self) -> Result<Store> {
        match &self.store {
            StoreConfig::Sqlite { path } => Ok(Store::Sqlite(SqliteStore::open(path)?)),
            StoreConfig::Postgrest { url, api_key } => Ok(Store::Postgrest(PostgrestStore::new(url, api_key)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let m: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|k| m.get(k).cloned())
    }

    #[test]
    fn valores_por_defecto() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.bind, DEFAULT_BIND);
        assert_eq!(s.store, StoreConfig::Sqlite { path: DEFAULT_DB_PATH.to_string() });
        assert!(s.cors_origins.is_empty());
    }

    #[test]
    fn url_del_almacen_activa_postgrest() {
        let s = settings(&[("SUPABASE_URL", "https://x.supabase.co"), ("SUPABASE_KEY", "k")]).unwrap();
        assert_eq!(
            s.store,
            StoreConfig::Postgrest { url: "https://x.supabase.co".to_string(), api_key: "k".to_string() }
        );
    }

    #[test]
    fn service_role_tiene_prioridad() {
        let s = settings(&[
            ("SUPABASE_URL", "https://x"),
            ("SUPABASE_KEY", "anon"),
            ("SUPABASE_SERVICE_ROLE", "service"),
        ])
        .unwrap();
        assert!(matches!(s.store, StoreConfig::Postgrest { ref api_key, .. } if api_key == "service"));
    }

    #[test]
    fn sqlite_explicito_ignora_url() {
        let s = settings(&[("NOTAS_STORE", "SQLITE"), ("SUPABASE_URL", "https://x"), ("NOTAS_DB_PATH", ":memory:")]).unwrap();
        assert_eq!(s.store, StoreConfig::Sqlite { path: ":memory:".to_string() });
    }

    #[test]
    fn errores_de_configuracion() {
        assert!(matches!(settings(&[("NOTAS_STORE", "postgrest")]), Err(NotasError::Config(_))));
        assert!(matches!(settings(&[("SUPABASE_URL", "https://x")]), Err(NotasError::Config(_))));
        assert!(matches!(settings(&[("NOTAS_STORE", "mongo")]), Err(NotasError::Config(_))));
    }

    #[test]
    fn origenes_cors() {
        let s = settings(&[("NOTAS_CORS_ORIGINS", "http://localhost:4200, https://app.example , *")]).unwrap();
        assert_eq!(s.cors_origins, vec!["http://localhost:4200", "https://app.example"]);
    }
}
