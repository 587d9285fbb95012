//! Client HTTP sortant vers les PMS
//!
//! Une seule borne de temps (request_timeout_seconds, 10s par défaut)
//! couvre le health-check et les fetches de ressources. Les paramètres de
//! requête varient par ressource : fenêtre de dates pour réservations /
//! revenus / occupation, pagination pour les clients.

use crate::auth::{self, SecretResolver};
use crate::config::SyncConf;
use crate::models::PmsConnection;
use crate::vendors::{adapter_for, ResourceKind};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, warn};

/// Passerelle vers un PMS. Trait séparé du client concret pour pouvoir
/// scripter les réponses dans les tests de l'orchestrateur.
#[async_trait]
pub trait PmsGateway: Send + Sync {
    async fn health_check(&self, conn: &PmsConnection) -> Result<()>;
    async fn fetch_resource(&self, conn: &PmsConnection, resource: ResourceKind) -> Result<Value>;
}

pub struct PmsClient {
    http: reqwest::Client,
    resolver: Arc<dyn SecretResolver>,
    window_days: i64,
    guest_page_limit: u32,
}

impl PmsClient {
    pub fn new(cfg: &SyncConf, resolver: Arc<dyn SecretResolver>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_seconds))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            resolver,
            window_days: cfg.window_days,
            guest_page_limit: cfg.guest_page_limit,
        })
    }

    fn request(&self, conn: &PmsConnection, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header(
                "Authorization",
                self.resolver.resolve(&auth::authorization_value(conn)),
            )
    }

    fn with_query(
        &self,
        req: reqwest::RequestBuilder,
        resource: ResourceKind,
    ) -> reqwest::RequestBuilder {
        let now = OffsetDateTime::now_utc();
        let window = time::Duration::days(self.window_days);
        let fmt = |t: OffsetDateTime| t.format(&Rfc3339).unwrap_or_default();

        match resource {
            ResourceKind::Reservations => req.query(&[
                ("from", fmt(now - window)),
                ("to", fmt(now + window)),
            ]),
            ResourceKind::Guests => req.query(&[
                ("limit", self.guest_page_limit.to_string()),
                ("active", "true".to_string()),
            ]),
            ResourceKind::Rooms => req,
            ResourceKind::Revenue => req.query(&[
                ("from", fmt(now - window)),
                ("to", fmt(now)),
                ("groupBy", "day".to_string()),
            ]),
            ResourceKind::Occupancy => {
                req.query(&[("from", fmt(now - window)), ("to", fmt(now))])
            }
        }
    }
}

#[async_trait]
impl PmsGateway for PmsClient {
    async fn health_check(&self, conn: &PmsConnection) -> Result<()> {
        let url = format!("{}/health", conn.api_endpoint);
        debug!(connection = %conn.id, %url, "probing PMS health");

        let response = self
            .request(conn, &url)
            .send()
            .await
            .with_context(|| format!("health check unreachable for {}", conn.name))?;

        if !response.status().is_success() {
            warn!(connection = %conn.id, status = %response.status(), "health check rejected");
            bail!("health check failed for {}: {}", conn.name, response.status());
        }
        Ok(())
    }

    async fn fetch_resource(&self, conn: &PmsConnection, resource: ResourceKind) -> Result<Value> {
        let path = adapter_for(conn.vendor).resource_path(resource);
        let url = format!("{}{}", conn.api_endpoint, path);
        debug!(connection = %conn.id, resource = resource.as_str(), %url, "fetching resource");

        let response = self
            .with_query(self.request(conn, &url), resource)
            .send()
            .await
            .with_context(|| format!("failed to reach {} for {}", url, resource.as_str()))?;

        if !response.status().is_success() {
            bail!(
                "failed to fetch {} from {}: {}",
                resource.as_str(),
                conn.name,
                response.status()
            );
        }

        response
            .json::<Value>()
            .await
            .with_context(|| format!("invalid JSON body for {}", resource.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PassthroughResolver;
    use crate::models::{AuthKind, ConnectionStatus, SyncFrequency, VendorKind};
    use concierge_devkit::StubPms;

    fn connection(endpoint: String, vendor: VendorKind) -> PmsConnection {
        PmsConnection {
            id: "conn_stub".to_string(),
            name: "Stub PMS".to_string(),
            vendor,
            status: ConnectionStatus::Disconnected,
            last_sync: String::new(),
            api_endpoint: endpoint,
            auth_type: AuthKind::ApiKey,
            sync_frequency: SyncFrequency::Manual,
        }
    }

    fn client() -> PmsClient {
        PmsClient::new(&SyncConf::default(), Arc::new(PassthroughResolver)).unwrap()
    }

    #[tokio::test]
    async fn test_health_check_against_stub() {
        let stub = StubPms::new();
        let addr = stub.spawn().await.unwrap();
        let conn = connection(format!("http://{addr}"), VendorKind::Custom);

        client().health_check(&conn).await.unwrap();
    }

    #[tokio::test]
    async fn test_health_check_failure_is_an_error() {
        let stub = StubPms::new().with_failing_health();
        let addr = stub.spawn().await.unwrap();
        let conn = connection(format!("http://{addr}"), VendorKind::Custom);

        let err = client().health_check(&conn).await.unwrap_err();
        assert!(format!("{err:#}").contains("health check failed"));
    }

    #[tokio::test]
    async fn test_fetch_resource_follows_vendor_routes() {
        let stub = StubPms::new();
        let addr = stub.spawn().await.unwrap();
        // route Cloudbeds (/api/v1.1/getReservations) servie par le stub
        let conn = connection(format!("http://{addr}"), VendorKind::Cloudbeds);

        let raw = client()
            .fetch_resource(&conn, ResourceKind::Reservations)
            .await
            .unwrap();
        assert_eq!(raw.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        // port fermé : échec transport, pas de panique
        let conn = connection("http://127.0.0.1:1".to_string(), VendorKind::Custom);
        assert!(client().health_check(&conn).await.is_err());
    }
}
