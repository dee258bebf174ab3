use crate::domain::model::{Geocoded, ProfileRecord, Session, Zone};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn delete_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn geocoder_base_url(&self) -> &str;
    fn geocoder_timeout_seconds(&self) -> u64;
    fn data_dir(&self) -> &str;
    fn profile_key(&self) -> &str;
    fn zone(&self) -> Result<Zone>;
}

/// Free-text address lookup. Never fails: anything short of a usable match is `NotFound`.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, address: &str) -> Geocoded;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load(&self) -> Result<Option<ProfileRecord>>;
    async fn save(&self, record: &ProfileRecord) -> Result<()>;
}

/// The slice of an identity provider this crate consumes.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_session(&self) -> Result<Option<Session>>;
    async fn begin_sign_in(&self) -> Result<Session>;
    async fn end_sign_in(&self) -> Result<()>;
}
