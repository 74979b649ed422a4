use crate::model::ApiChangeAction;
use crate::service::api_service::ApiService;
use celerik_core::{CoreResult, DbContext, ServiceArgsEf, UnitOfWork};
use std::ops::Deref;
use std::sync::Arc;

/// A business service backed by the data context `C`
pub struct ApiServiceEf<L, C, R = L> {
    service: ApiService<L, R>,
    db_context: Arc<C>,
}

impl<L: 'static, C: DbContext, R: 'static> ApiServiceEf<L, C, R> {
    pub fn new(args: ServiceArgsEf<L, C>) -> CoreResult<Self> {
        let ServiceArgsEf { args, db_context } = args;
        Ok(Self {
            service: ApiService::new(args)?,
            db_context,
        })
    }

    pub fn db_context(&self) -> &C {
        &self.db_context
    }

    /// Stage `entity` according to `action`, flushing when `commit` is set
    ///
    /// Returns the number of changes written, zero when not committing.
    pub async fn save<E>(&self, action: ApiChangeAction, entity: E, commit: bool) -> CoreResult<usize>
    where
        C: UnitOfWork<E>,
        E: Send,
    {
        match action {
            ApiChangeAction::Insert => self.db_context.add(entity)?,
            ApiChangeAction::Update => self.db_context.update(entity)?,
            ApiChangeAction::Delete => self.db_context.remove(entity)?,
        }

        if commit {
            self.db_context.save_changes().await
        } else {
            Ok(0)
        }
    }

    /// Stop tracking every entity not keyed in `excluded`
    pub fn detach_all(&self, excluded: &[&str]) -> usize {
        let detached = self.db_context.detach_all(excluded);
        tracing::debug!(detached, "Detached tracked entities");
        detached
    }
}

impl<L, C, R> Deref for ApiServiceEf<L, C, R> {
    type Target = ApiService<L, R>;

    fn deref(&self) -> &Self::Target {
        &self.service
    }
}

impl<L, C, R> std::fmt::Debug for ApiServiceEf<L, C, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiServiceEf")
            .field("service", &self.service)
            .field("db_context", &std::any::type_name::<C>())
            .finish()
    }
}
