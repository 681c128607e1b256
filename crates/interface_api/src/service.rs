//! Claim application service
//!
//! Every write goes through the same steps: rule-engine validation, the
//! linking policy for claims that carry a parent, the main-claim conflict
//! check on updates, then persistence.

use thiserror::Error;
use tracing::{info, warn};

use core_kernel::ClaimId;
use domain_claims::linking::{check_resolved_parent, ensure_linkable};
use domain_claims::{
    Claim, ClaimError, ClaimFilter, ClaimForm, ClaimRole, ClaimRuleEngine, ClaimStatistics, ClaimType,
    NewClaim,
};
use infra_db::{ClaimsRepository, DatabaseError};

/// Errors surfaced by [`ClaimService`]
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Validates and persists claims
#[derive(Debug, Clone)]
pub struct ClaimService {
    repository: ClaimsRepository,
    engine: ClaimRuleEngine,
}

impl ClaimService {
    pub fn new(repository: ClaimsRepository) -> Self {
        Self {
            repository,
            engine: ClaimRuleEngine::new(),
        }
    }

    /// Replaces the rule engine
    pub fn with_engine(mut self, engine: ClaimRuleEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn repository(&self) -> &ClaimsRepository {
        &self.repository
    }

    /// Dry-run validation; dates are normalised first, as on save
    pub fn validate(&self, mut form: ClaimForm) -> Vec<String> {
        form.normalize_dates();
        self.engine.validate(&form)
    }

    /// Validates and stores a new claim
    pub async fn create(&self, mut form: ClaimForm) -> Result<Claim, ServiceError> {
        form.id = None;
        let details = self.prepare(form).await?;
        Ok(self.repository.create(&details).await?)
    }

    /// Validates and replaces an existing claim
    pub async fn update(&self, id: ClaimId, mut form: ClaimForm) -> Result<Claim, ServiceError> {
        form.id = Some(id);
        let details = self.prepare(form).await?;

        let existing = self.repository.get_by_id(id).await?;
        if existing.is_main_claim() && details.claim_type.role() != ClaimRole::Main {
            let linked = self.repository.count_linked(id).await?;
            if linked > 0 {
                warn!(claim_id = %id, linked, "Update would orphan linked claims");
                return Err(ClaimError::HasLinkedClaims {
                    claim_id: id.to_string(),
                    linked: linked as usize,
                }
                .into());
            }
        }

        Ok(self.repository.update(id, &details).await?)
    }

    pub async fn get(&self, id: ClaimId) -> Result<Claim, ServiceError> {
        Ok(self.repository.get_by_id(id).await?)
    }

    pub async fn search(&self, filter: &ClaimFilter) -> Result<Vec<Claim>, ServiceError> {
        Ok(self.repository.search(filter).await?)
    }

    /// Claims linked under `id`; the parent itself must exist
    pub async fn linked_claims(&self, id: ClaimId) -> Result<Vec<Claim>, ServiceError> {
        self.repository.get_by_id(id).await?;
        Ok(self.repository.linked_claims(id).await?)
    }

    pub async fn main_claims(&self, filter: &ClaimFilter) -> Result<Vec<Claim>, ServiceError> {
        Ok(self.repository.main_claims(filter).await?)
    }

    /// Deletes a claim and its linked claims, returning how many were linked
    pub async fn delete(&self, id: ClaimId) -> Result<u64, ServiceError> {
        Ok(self.repository.delete_cascade(id).await?)
    }

    pub async fn statistics(&self) -> Result<ClaimStatistics, ServiceError> {
        Ok(self.repository.statistics().await?)
    }

    async fn prepare(&self, mut form: ClaimForm) -> Result<NewClaim, ServiceError> {
        form.normalize_dates();
        let details = form.into_new_claim(&self.engine).map_err(|failure| {
            warn!(errors = ?failure.messages(), "Claim rejected by validation");
            ClaimError::from(failure)
        })?;

        if let Some(parent_id) = details.parent_claim_id {
            self.check_link(details.claim_type, parent_id).await?;
        }
        Ok(details)
    }

    async fn check_link(&self, child_type: ClaimType, parent_id: ClaimId) -> Result<(), ServiceError> {
        ensure_linkable(child_type).map_err(ClaimError::from)?;
        let parent = self.repository.find_by_id(parent_id).await?;
        check_resolved_parent(parent.as_ref()).map_err(|violation| {
            warn!(%parent_id, code = violation.code(), "Link rejected");
            ClaimError::from(violation)
        })?;
        info!(%parent_id, child_type = %child_type, "Parent link accepted");
        Ok(())
    }
}
