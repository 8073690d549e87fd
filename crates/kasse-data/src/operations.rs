use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait Query<T> {
    type Filter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<T>>;
}

#[async_trait]
pub trait Insert<T> {
    async fn insert(&self, item: T) -> Result<T>;
}

#[async_trait]
pub trait Update<T> {
    async fn update(&self, item: T) -> Result<T>;
}

#[async_trait]
pub trait Retrieve<T> {
    type Key;
    async fn retrieve(&self, key: Self::Key) -> Result<T>;
}

/// Mark a charge as paid. Implementations must reject settling
/// the same charge for the same member twice with
/// [`Error::Conflict`](crate::Error::Conflict).
#[async_trait]
pub trait Settle<T> {
    type Key;
    async fn settle(&self, key: Self::Key, paid_at: NaiveDate) -> Result<T>;
}
