use async_trait::async_trait;

use crate::errors::BackendError;
use crate::ids::SubjectId;
use crate::profile::{CompletedProfile, HairProfileRow};

/// Hair profile rows, keyed by subject id.
#[async_trait]
pub trait ProfileRepositoryPort: Send + Sync {
    /// Zero or one row for `subject`.
    async fn find_by_subject(
        &self,
        subject: &SubjectId,
    ) -> Result<Option<HairProfileRow>, BackendError>;

    /// Insert or merge the row for the profile's subject.
    async fn upsert(&self, profile: &CompletedProfile) -> Result<HairProfileRow, BackendError>;

    async fn exists(&self, subject: &SubjectId) -> Result<bool, BackendError> {
        Ok(self.find_by_subject(subject).await?.is_some())
    }
}

#[cfg(test)]
mockall::mock! {
    pub ProfileRepository {}

    #[async_trait]
    impl ProfileRepositoryPort for ProfileRepository {
        async fn find_by_subject(
            &self,
            subject: &SubjectId,
        ) -> Result<Option<HairProfileRow>, BackendError>;
        async fn upsert(&self, profile: &CompletedProfile) -> Result<HairProfileRow, BackendError>;
    }
}
