//! Business logic services

pub mod accounts;
pub mod auth;
pub mod catalog;
pub mod fines;
pub mod gd;
pub mod reservations;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub accounts: accounts::AccountsService,
    pub catalog: catalog::CatalogService,
    pub reservations: reservations::ReservationsService,
    pub fines: fines::FinesService,
    pub gd: gd::GdService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            accounts: accounts::AccountsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(repository.clone()),
            fines: fines::FinesService::new(repository.clone()),
            gd: gd::GdService::new(repository),
        }
    }
}
