use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use upgrade_engine::decision::{
    LanguageProfile, ProfileChangeHandler, ProfileEvent, QualityProfile, UpgradableSpecification,
};
use upgrade_engine::error::AppError;

use crate::decisions::{evaluate, DecisionReport, DecisionRequest};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Profile storage for the service. Quality profile edits notify every
/// registered handler before the write call returns.
#[derive(Default)]
pub(crate) struct InMemoryProfileStore {
    quality: RwLock<HashMap<u32, QualityProfile>>,
    language: RwLock<HashMap<u32, LanguageProfile>>,
    handlers: Vec<Arc<dyn ProfileChangeHandler>>,
}

impl InMemoryProfileStore {
    pub(crate) fn with_handler(handler: Arc<dyn ProfileChangeHandler>) -> Self {
        Self {
            handlers: vec![handler],
            ..Self::default()
        }
    }

    /// Returns `true` when the profile did not exist before.
    pub(crate) fn upsert_quality(&self, profile: QualityProfile) -> Result<bool, AppError> {
        profile.validate()?;
        let id = profile.id;
        let created = {
            let mut guard = self.quality.write();
            guard.insert(id, profile).is_none()
        };

        let event = if created {
            ProfileEvent::Created(id)
        } else {
            ProfileEvent::Updated(id)
        };
        self.notify(&event);
        Ok(created)
    }

    pub(crate) fn delete_quality(&self, id: u32) -> Result<(), AppError> {
        let removed = self.quality.write().remove(&id);
        match removed {
            Some(_) => {
                self.notify(&ProfileEvent::Deleted(id));
                Ok(())
            }
            None => Err(AppError::NotFound(format!("quality profile {id}"))),
        }
    }

    pub(crate) fn quality(&self, id: u32) -> Result<QualityProfile, AppError> {
        self.quality
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("quality profile {id}")))
    }

    pub(crate) fn upsert_language(&self, profile: LanguageProfile) -> Result<bool, AppError> {
        profile.validate()?;
        Ok(self.language.write().insert(profile.id, profile).is_none())
    }

    pub(crate) fn language(&self, id: u32) -> Result<LanguageProfile, AppError> {
        self.language
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("language profile {id}")))
    }

    fn notify(&self, event: &ProfileEvent) {
        for handler in &self.handlers {
            handler.profile_changed(event);
        }
        info!(profile_id = event.profile_id(), ?event, "quality profile changed");
    }
}

/// Resolves stored profiles and runs the decision engine against them.
pub(crate) struct DecisionService {
    pub(crate) profiles: Arc<InMemoryProfileStore>,
    pub(crate) specification: Arc<UpgradableSpecification>,
}

impl DecisionService {
    pub(crate) fn new(specification: Arc<UpgradableSpecification>) -> Self {
        let handler: Arc<dyn ProfileChangeHandler> = specification.clone();
        Self {
            profiles: Arc::new(InMemoryProfileStore::with_handler(handler)),
            specification,
        }
    }

    pub(crate) fn decide(&self, request: &DecisionRequest) -> Result<DecisionReport, AppError> {
        let quality_profile = self.profiles.quality(request.quality_profile_id)?;
        let language_profile = self.profiles.language(request.language_profile_id)?;

        evaluate(
            &self.specification,
            &quality_profile,
            &language_profile,
            &request.current,
            request.current_preferred_word_score,
            &request.candidate,
        )
    }
}
