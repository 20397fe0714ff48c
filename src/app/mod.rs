// Application wiring: turns a ServiceConfig into a ready CatalogService.

use crate::adapters::{CsvBookStore, HttpBookSource, MemoryBookStore};
use crate::config::toml_config::{ServiceConfig, SourceKind};
use crate::core::service::CatalogService;
use crate::core::{AllowAll, Authorizer, BookStore, RolePolicy};
use crate::server::identity::UserDirectory;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use std::sync::Arc;

pub fn build_store(config: &ServiceConfig) -> Result<Arc<dyn BookStore>> {
    let store: Arc<dyn BookStore> = match config.data.source {
        SourceKind::Csv => {
            let path = validate_required_field("data.path", &config.data.path)?;
            tracing::info!("📚 Reading books from CSV seed file: {}", path);
            Arc::new(CsvBookStore::new(path.clone()))
        }
        SourceKind::Http => {
            let endpoint = validate_required_field("data.endpoint", &config.data.endpoint)?;
            tracing::info!("🌐 Reading books from remote source: {}", endpoint);
            Arc::new(HttpBookSource::new(endpoint.clone()))
        }
        SourceKind::Memory => {
            tracing::info!("🧪 Serving built-in sample books");
            Arc::new(MemoryBookStore::sample())
        }
    };
    Ok(store)
}

pub fn build_authorizer(config: &ServiceConfig) -> Arc<dyn Authorizer> {
    if config.auth.enabled {
        tracing::info!("🔒 Read access restricted to roles: {:?}", config.auth.roles);
        Arc::new(RolePolicy::new(config.auth.roles.clone()))
    } else {
        tracing::warn!("🔓 Authorization disabled: Books are readable without credentials");
        Arc::new(AllowAll)
    }
}

pub fn build_service(config: &ServiceConfig) -> Result<CatalogService> {
    let store = build_store(config)?;
    Ok(CatalogService::new(store).with_authorizer(build_authorizer(config)))
}

pub fn build_users(config: &ServiceConfig) -> UserDirectory {
    UserDirectory::from_config(&config.auth.users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReadRequest;
    use crate::utils::error::BookshopError;

    #[tokio::test]
    async fn test_memory_service_serves_sample_books() {
        let config =
            ServiceConfig::from_toml_str("[data]\nsource = \"memory\"\n").unwrap();
        let service = build_service(&config).unwrap();

        let books = service
            .read_books(&ReadRequest::books())
            .await
            .unwrap()
            .into_books();
        assert_eq!(books.len(), 5);
        assert!(books.iter().all(|b| b.discount().is_some()));
    }

    #[tokio::test]
    async fn test_enabled_auth_rejects_anonymous_reads() {
        let config = ServiceConfig::from_toml_str(
            "[data]\nsource = \"memory\"\n\n[auth]\nenabled = true\n",
        )
        .unwrap();
        let service = build_service(&config).unwrap();

        let err = service.read_books(&ReadRequest::books()).await.unwrap_err();
        assert!(matches!(err, BookshopError::Unauthorized));
    }

    #[test]
    fn test_http_source_without_endpoint_fails() {
        let config = ServiceConfig::from_toml_str("[data]\nsource = \"http\"\n").unwrap();
        assert!(build_store(&config).is_err());
    }
}
