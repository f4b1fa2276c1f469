use std::sync::Arc;

use anyhow::Context;
use arc_swap::ArcSwapOption;
use axum::Router;
use directory_sdk::DirectoryClientV1;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::api::rest::{middleware, routes};
use crate::config::DirectoryConfig;
use crate::domain::local_client::LocalClient;
use crate::domain::service::{AppServices, ServiceConfig};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    OrmContactsRepository, OrmMembershipsRepository, OrmPermissionsRepository,
};

/// Type alias for the concrete services wired to the ORM repositories.
pub type ConcreteAppServices =
    AppServices<OrmPermissionsRepository, OrmMembershipsRepository, OrmContactsRepository>;

/// Composition root: owns configuration and, after [`init`](Self::init),
/// the service container that the REST layer and the local client share.
pub struct DirectoryModule {
    config: DirectoryConfig,
    services: ArcSwapOption<ConcreteAppServices>,
}

impl DirectoryModule {
    #[must_use]
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            config,
            services: ArcSwapOption::from(None),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Apply migrations and build the service container.
    ///
    /// # Errors
    /// Returns an error if migrations fail.
    pub async fn init(&self, db: DatabaseConnection) -> anyhow::Result<()> {
        info!("Initializing directory module");

        Migrator::up(&db, None)
            .await
            .context("failed to apply directory migrations")?;
        info!("Directory migrations applied");

        let service_config = ServiceConfig {
            max_field_length: self.config.max_field_length,
        };
        let services = AppServices::new(
            Arc::new(db),
            OrmPermissionsRepository::new(),
            OrmMembershipsRepository::new(),
            OrmContactsRepository::new(),
            &service_config,
        );

        self.services.store(Some(Arc::new(services)));
        Ok(())
    }

    fn services(&self) -> anyhow::Result<Arc<ConcreteAppServices>> {
        self.services
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client over the same services as the REST surface.
    ///
    /// # Errors
    /// Returns an error if called before [`init`](Self::init).
    pub fn client(&self) -> anyhow::Result<Arc<dyn DirectoryClientV1>> {
        Ok(Arc::new(LocalClient::new(self.services()?)))
    }

    /// Full HTTP application: routes, fallbacks and middleware.
    ///
    /// # Errors
    /// Returns an error if called before [`init`](Self::init) or if the
    /// middleware configuration is invalid.
    pub fn router(&self) -> anyhow::Result<Router> {
        let router = routes::register_routes(Router::new(), self.services()?);
        let router = middleware::apply_middleware_stack(router, &self.config)?;
        info!("Directory REST routes registered successfully");
        Ok(router)
    }
}
