//! User registry and SMART multi-criteria ranking over a JSON REST API.
//!
//! Routes live in [`api`], persistence behind the traits in [`store`], and
//! the ranking itself is the pure function [`smart::rank`].

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod response;
pub mod smart;
pub mod store;
pub mod validation;

use std::sync::Arc;
use std::time::Instant;

use crate::store::{SmartStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub smart: Arc<dyn SmartStore>,
    pub started_at: Instant,
}

impl AppState {
    /// Build state around one store serving both users and SMART rows.
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: UserStore + SmartStore + 'static,
    {
        Self {
            users: store.clone(),
            smart: store,
            started_at: Instant::now(),
        }
    }
}
