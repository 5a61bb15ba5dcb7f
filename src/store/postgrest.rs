//! Cliente para la interfaz REST del almacén alojado (`/rest/v1/{tabla}`).
//!
//! Filtros como `columna=eq.valor`; todas las escrituras piden
//! `Prefer: return=representation` para recibir las filas afectadas.

use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;

use super::{Filtro, Row};
use crate::error::{NotasError, Result};

pub struct PostgrestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PostgrestStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(NotasError::Config("SUPABASE_URL vacío".to_string()));
        }
        if api_key.trim().is_empty() {
            return Err(NotasError::Config("falta la clave de servicio del almacén".to_string()));
        }
        let client = Client::builder()
            .build()
            .map_err(|e| NotasError::Config(format!("no se pudo crear el cliente http: {}", e)))?;
        Ok(PostgrestStore {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// URL de la tabla con los filtros y parámetros extra en la query.
    pub fn table_url(&self, tabla: &str, filtros: &[Filtro<'_>], extra: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/rest/v1/{}", self.base_url, tabla))
            .map_err(|e| NotasError::Config(format!("URL del almacén inválida: {}", e)))?;
        {
            let mut q = url.query_pairs_mut();
            for (k, v) in extra {
                q.append_pair(k, v);
            }
            for (col, valor) in filtros {
                q.append_pair(col, &format!("eq.{}", valor_de_filtro(valor)));
            }
        }
        Ok(url)
    }

    async fn enviar(&self, method: Method, url: Url, prefer: &str, body: Option<&Row>) -> Result<Vec<Row>> {
        tracing::debug!(%method, %url, "postgrest");
        let mut req = self
            .client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", prefer);
        if let Some(b) = body {
            req = req.json(b);
        }
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let texto = resp.text().await.unwrap_or_default();
            return Err(error_de_estado(status, &texto));
        }
        let texto = resp.text().await?;
        if texto.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&texto)? {
            Value::Array(filas) => Ok(filas),
            otra => Ok(vec![otra]),
        }
    }

    pub async fn insert(&self, tabla: &str, fila: Row) -> Result<Vec<Row>> {
        let url = self.table_url(tabla, &[], &[])?;
        self.enviar(Method::POST, url, "return=representation", Some(&fila)).await
    }

    pub async fn upsert(&self, tabla: &str, fila: Row, on_conflict: &[&str]) -> Result<Vec<Row>> {
        let extra = [("on_conflict", on_conflict.join(","))];
        let url = self.table_url(tabla, &[], &extra)?;
        self.enviar(
            Method::POST,
            url,
            "return=representation,resolution=merge-duplicates",
            Some(&fila),
        )
        .await
    }

    pub async fn select(&self, tabla: &str, filtros: &[Filtro<'_>]) -> Result<Vec<Row>> {
        let url = self.table_url(tabla, filtros, &[("select", "*".to_string())])?;
        self.enviar(Method::GET, url, "return=representation", None).await
    }

    pub async fn update(&self, tabla: &str, cambios: Row, filtros: &[Filtro<'_>]) -> Result<Vec<Row>> {
        let url = self.table_url(tabla, filtros, &[])?;
        self.enviar(Method::PATCH, url, "return=representation", Some(&cambios)).await
    }
}

fn valor_de_filtro(valor: &Value) -> String {
    match valor {
        Value::String(s) => s.clone(),
        otro => otro.to_string(),
    }
}

fn error_de_estado(status: StatusCode, texto: &str) -> NotasError {
    // El almacén devuelve {"code","message",...}; nos quedamos con el mensaje si viene.
    let mensaje = serde_json::from_str::<Value>(texto)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| texto.to_string());
    match status {
        StatusCode::CONFLICT => NotasError::Conflict(mensaje),
        StatusCode::NOT_FOUND => NotasError::NotFound(mensaje),
        _ => NotasError::Store(format!("{}: {}", status, mensaje)),
    }
}
