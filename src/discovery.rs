use async_trait::async_trait;
use serde::Deserialize;

/// A resolved (host, port) for a downstream service. Obtained fresh from
/// service discovery on every request and never cached.
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    pub host: String,
    pub port: u16,
}

/// Name-to-address resolution for downstream services. Injected into the
/// handler state so tests can supply fixed or absent endpoints.
#[async_trait]
pub trait ServiceDiscovery: Send + Sync {
    /// Look up the current network location of a named service.
    /// `Ok(None)` means the service has no registered instances.
    async fn resolve(&self, name: &str) -> anyhow::Result<Option<ServiceEndpoint>>;
}

#[derive(Deserialize)]
struct CatalogService {
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "ServicePort")]
    service_port: u16,
}

/// Resolves services through the Consul catalog API.
pub struct ConsulDiscovery {
    base_url: String,
    client: reqwest::Client,
}

impl ConsulDiscovery {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ServiceDiscovery for ConsulDiscovery {
    async fn resolve(&self, name: &str) -> anyhow::Result<Option<ServiceEndpoint>> {
        let url = format!("{}/v1/catalog/service/{}", self.base_url, name);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("Consul API returned {}", response.status());
        }

        let services: Vec<CatalogService> = response.json().await?;

        // Multiple instances may be registered; take the first one.
        Ok(services.into_iter().next().map(|s| ServiceEndpoint {
            host: s.address,
            port: s.service_port,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_entry_parses_consul_fields() {
        let services: Vec<CatalogService> = serde_json::from_str(
            r#"[{"Node": "worker-1", "Address": "10.0.0.5", "ServiceName": "proxy", "ServicePort": 8080}]"#,
        )
        .unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].address, "10.0.0.5");
        assert_eq!(services[0].service_port, 8080);
    }

    #[test]
    fn empty_catalog_parses_to_no_entries() {
        let services: Vec<CatalogService> = serde_json::from_str("[]").unwrap();
        assert!(services.is_empty());
    }
}
