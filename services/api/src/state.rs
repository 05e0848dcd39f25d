use std::path::PathBuf;

use crate::domain::repository::Store;
use crate::infra::bounded::{Bounded, Budgets};
use crate::infra::password::PasswordService;
use crate::usecase::auth::TokenKeys;

/// Shared application state passed to every handler via axum `State`.
///
/// Repositories handed out here are wrapped in the storage time budgets.
#[derive(Clone)]
pub struct AppState<S: Store> {
    pub store: S,
    pub budgets: Budgets,
    pub passwords: PasswordService,
    pub keys: TokenKeys,
    pub static_dir: PathBuf,
}

impl<S: Store> AppState<S> {
    pub fn car_repo(&self) -> Bounded<S::Cars> {
        Bounded::new(self.store.cars(), self.budgets)
    }

    pub fn user_repo(&self) -> Bounded<S::Users> {
        Bounded::new(self.store.users(), self.budgets)
    }

    pub fn favorite_repo(&self) -> Bounded<S::Favorites> {
        Bounded::new(self.store.favorites(), self.budgets)
    }

    pub fn review_repo(&self) -> Bounded<S::Reviews> {
        Bounded::new(self.store.reviews(), self.budgets)
    }

    pub fn jwt_secret(&self) -> &str {
        &self.keys.secret
    }
}
