//! Construction des en-têtes d'authentification vers les PMS.
//!
//! Le kernel ne voit JAMAIS les secrets en clair : la valeur Authorization
//! embarque un jeton opaque `{{<connexion>_<type>}}` que la couche
//! d'injection de secrets (composant externe de confiance) résout juste
//! avant l'envoi de la requête. Ici on ne fait que fabriquer le jeton.

use crate::models::{AuthKind, PmsConnection};

/// Jeton de substitution attendu par la couche d'injection de secrets.
pub fn secret_placeholder(connection_id: &str, auth_type: AuthKind) -> String {
    match auth_type {
        AuthKind::ApiKey => format!("{{{{{connection_id}_api_key}}}}"),
        AuthKind::BasicAuth => format!("{{{{{connection_id}_basic_auth}}}}"),
        AuthKind::Oauth => format!("{{{{{connection_id}_oauth_token}}}}"),
    }
}

/// Valeur complète du header Authorization, jeton non résolu inclus.
pub fn authorization_value(conn: &PmsConnection) -> String {
    let token = secret_placeholder(&conn.id, conn.auth_type);
    match conn.auth_type {
        AuthKind::ApiKey | AuthKind::Oauth => format!("Bearer {token}"),
        AuthKind::BasicAuth => format!("Basic {token}"),
    }
}

/// Résolution du jeton au moment de l'envoi. L'implémentation réelle vit
/// hors de ce processus; celle par défaut laisse le jeton opaque passer.
pub trait SecretResolver: Send + Sync {
    fn resolve(&self, header_value: &str) -> String;
}

pub struct PassthroughResolver;

impl SecretResolver for PassthroughResolver {
    fn resolve(&self, header_value: &str) -> String {
        header_value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConnectionStatus, SyncFrequency, VendorKind};

    fn connection(id: &str, auth_type: AuthKind) -> PmsConnection {
        PmsConnection {
            id: id.to_string(),
            name: "Test PMS".to_string(),
            vendor: VendorKind::Custom,
            status: ConnectionStatus::Disconnected,
            last_sync: String::new(),
            api_endpoint: "https://pms.example.com".to_string(),
            auth_type,
            sync_frequency: SyncFrequency::Manual,
        }
    }

    #[test]
    fn test_oauth_header() {
        let conn = connection("conn_42", AuthKind::Oauth);
        assert_eq!(
            authorization_value(&conn),
            "Bearer {{conn_42_oauth_token}}"
        );
    }

    #[test]
    fn test_api_key_header() {
        let conn = connection("conn_1", AuthKind::ApiKey);
        assert_eq!(authorization_value(&conn), "Bearer {{conn_1_api_key}}");
    }

    #[test]
    fn test_basic_auth_header() {
        let conn = connection("conn_1", AuthKind::BasicAuth);
        assert_eq!(authorization_value(&conn), "Basic {{conn_1_basic_auth}}");
    }

    #[test]
    fn test_passthrough_resolver_keeps_token_opaque() {
        let value = "Bearer {{conn_1_api_key}}";
        assert_eq!(PassthroughResolver.resolve(value), value);
    }
}
