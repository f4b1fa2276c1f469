pub mod contacts_sea_repo;
pub mod entity;
pub mod memberships_sea_repo;
pub mod migrations;
pub mod permissions_sea_repo;

pub use contacts_sea_repo::OrmContactsRepository;
pub use memberships_sea_repo::OrmMembershipsRepository;
pub use permissions_sea_repo::OrmPermissionsRepository;
