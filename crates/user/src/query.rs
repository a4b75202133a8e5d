use sqlx::SqlitePool;

use crate::repository::{self, FindType};

pub use crate::repository::UserRow;

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> foodgram_shared::Result<Option<UserRow>> {
        repository::find(&self.0, FindType::Id(id.into())).await
    }

    pub async fn find_by_email(
        &self,
        email: impl Into<String>,
    ) -> foodgram_shared::Result<Option<UserRow>> {
        repository::find(&self.0, FindType::Email(email.into())).await
    }
}
