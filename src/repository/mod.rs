//! Repository layer for database operations

pub mod campaigns;
pub mod donors;
pub mod inventory;
pub mod requests;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub donors: donors::DonorsRepository,
    pub campaigns: campaigns::CampaignsRepository,
    pub inventory: inventory::InventoryRepository,
    pub requests: requests::RequestsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            donors: donors::DonorsRepository::new(pool.clone()),
            campaigns: campaigns::CampaignsRepository::new(pool.clone()),
            inventory: inventory::InventoryRepository::new(pool.clone()),
            requests: requests::RequestsRepository::new(pool.clone()),
            pool,
        }
    }
}
