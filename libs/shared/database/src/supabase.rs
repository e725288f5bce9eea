use anyhow::{Result, anyhow};
use reqwest::{
    Client, RequestBuilder, Response,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Method,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, warn};

use shared_config::AppConfig;

/// Access to the managed document store over its REST surface.
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }
    
    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        
        match HeaderValue::from_str(&self.anon_key) {
            Ok(value) => {
                headers.insert("apikey", value);
            }
            Err(_) => warn!("Anon key contains invalid header characters, sending request without it"),
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        
        headers
    }
    
    pub async fn request<T>(&self, method: Method, path: &str, 
                            query: &[(String, String)]) 
                            -> Result<T> 
    where T: DeserializeOwned {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {} with {} query parameter(s)", url, query.len());
        
        let req = self.client.request(method, &url)
            .headers(self.get_headers())
            .query(query);
        
        let data = self.send(req).await?.json::<T>().await?;
        Ok(data)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let response = req.send().await?;
        
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);
            
            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Authentication error: {}", error_text),
                404 => anyhow!("Resource not found: {}", error_text),
                409 => anyhow!("Conflict: {}", error_text),
                _ => anyhow!("API error ({}): {}", status, error_text),
            });
        }
        
        Ok(response)
    }

    fn write_request<B>(&self, method: Method, table: &str, id: Option<&str>, body: &B) -> RequestBuilder
    where B: Serialize + ?Sized {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        debug!("Writing to {} ({})", url, method);

        let mut req = self.client.request(method, &url)
            .headers(self.get_headers())
            .header("Prefer", "return=representation")
            .json(body);

        if let Some(id) = id {
            req = req.query(&[("id", format!("eq.{}", id))]);
        }
        req
    }

    /// Query a collection with equality predicates (`field=eq.value`).
    pub async fn select_eq<T>(&self, table: &str, filters: &[(&str, &str)],
                              order_by: Option<&str>) -> Result<Vec<T>>
    where T: DeserializeOwned {
        let mut query: Vec<(String, String)> = filters.iter()
            .map(|(field, value)| (field.to_string(), format!("eq.{}", value)))
            .collect();

        if let Some(order) = order_by {
            query.push(("order".to_string(), format!("{}.asc", order)));
        }

        self.request(Method::GET, &format!("/rest/v1/{}", table), &query).await
    }

    /// Fetch a single document by key, `None` when the collection has no match.
    pub async fn get_by_id<T>(&self, table: &str, id: &str) -> Result<Option<T>>
    where T: DeserializeOwned {
        let rows: Vec<T> = self.select_eq(table, &[("id", id)], None).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert one document and return the stored rows.
    pub async fn insert<B, T>(&self, table: &str, body: &B) -> Result<Vec<T>>
    where B: Serialize + ?Sized, T: DeserializeOwned {
        let req = self.write_request(Method::POST, table, None, body);
        let rows = self.send(req).await?.json::<Vec<T>>().await?;
        Ok(rows)
    }

    /// Patch the document with the given key; an empty result means no match.
    pub async fn update_by_id<B, T>(&self, table: &str, id: &str, body: &B) -> Result<Option<T>>
    where B: Serialize + ?Sized, T: DeserializeOwned {
        let req = self.write_request(Method::PATCH, table, Some(id), body);
        let rows = self.send(req).await?.json::<Vec<T>>().await?;
        Ok(rows.into_iter().next())
    }

    pub async fn delete_by_id(&self, table: &str, id: &str) -> Result<()> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        debug!("Deleting from {}", url);

        let req = self.client.request(Method::DELETE, &url)
            .headers(self.get_headers())
            .query(&[("id", format!("eq.{}", id))]);

        self.send(req).await?;
        Ok(())
    }
}
