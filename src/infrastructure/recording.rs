use crate::domain::ports::{ParamSet, StatementExecutor, StoreError};
use crate::domain::purchase::TransactionScope;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// One call captured by [`RecordingExecutor`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedCall {
    pub scope: TransactionScope,
    pub sql: String,
    pub param_sets: Vec<ParamSet>,
    pub batch: bool,
}

/// A store fake that records every execution instead of talking to a
/// database.
///
/// Clones share the same call log (`Arc<RwLock<...>>`), so a test can hand
/// one clone to the orchestrator and keep another for assertions.
#[derive(Default, Clone)]
pub struct RecordingExecutor {
    calls: Arc<RwLock<Vec<ExecutedCall>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The calls executed so far, in execution order.
    pub async fn calls(&self) -> Vec<ExecutedCall> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl StatementExecutor for RecordingExecutor {
    async fn execute_statement(
        &self,
        scope: &TransactionScope,
        sql: &str,
        params: ParamSet,
    ) -> Result<(), StoreError> {
        self.calls.write().await.push(ExecutedCall {
            scope: scope.clone(),
            sql: sql.to_string(),
            param_sets: vec![params],
            batch: false,
        });
        Ok(())
    }

    async fn execute_batch(
        &self,
        scope: &TransactionScope,
        sql: &str,
        param_sets: Vec<ParamSet>,
    ) -> Result<(), StoreError> {
        self.calls.write().await.push(ExecutedCall {
            scope: scope.clone(),
            sql: sql.to_string(),
            param_sets,
            batch: true,
        });
        Ok(())
    }
}

/// A store fake that starts failing after a fixed number of calls.
///
/// Used to prove that a mid-sequence store error aborts the rest of the
/// bundle and reaches the caller verbatim.
#[derive(Clone)]
pub struct FailingExecutor {
    succeed_for: usize,
    message: String,
    attempted: Arc<AtomicUsize>,
}

impl FailingExecutor {
    pub fn fail_after(succeed_for: usize, message: &str) -> Self {
        Self {
            succeed_for,
            message: message.to_string(),
            attempted: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many calls reached the store, failed one included.
    pub fn attempted(&self) -> usize {
        self.attempted.load(Ordering::SeqCst)
    }

    fn next(&self) -> Result<(), StoreError> {
        let seen = self.attempted.fetch_add(1, Ordering::SeqCst);
        if seen < self.succeed_for {
            Ok(())
        } else {
            Err(StoreError(self.message.clone()))
        }
    }
}

#[async_trait]
impl StatementExecutor for FailingExecutor {
    async fn execute_statement(
        &self,
        _scope: &TransactionScope,
        _sql: &str,
        _params: ParamSet,
    ) -> Result<(), StoreError> {
        self.next()
    }

    async fn execute_batch(
        &self,
        _scope: &TransactionScope,
        _sql: &str,
        _param_sets: Vec<ParamSet>,
    ) -> Result<(), StoreError> {
        self.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::HexId;
    use crate::domain::ports::SqlValue;

    fn scope() -> TransactionScope {
        TransactionScope::new(HexId::parse(&"d".repeat(32)).unwrap())
    }

    #[tokio::test]
    async fn test_recording_executor_captures_calls_in_order() {
        let executor = RecordingExecutor::new();
        let params = ParamSet::new().with("id", SqlValue::Text("x".to_string()));

        executor
            .execute_statement(&scope(), "INSERT a", params.clone())
            .await
            .unwrap();
        executor
            .execute_batch(&scope(), "INSERT b", vec![params.clone(), params])
            .await
            .unwrap();

        let calls = executor.calls().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].sql, "INSERT a");
        assert!(!calls[0].batch);
        assert_eq!(calls[1].param_sets.len(), 2);
        assert!(calls[1].batch);
    }

    #[tokio::test]
    async fn test_failing_executor_fails_from_the_nth_call() {
        let executor = FailingExecutor::fail_after(1, "connection reset");
        let params = ParamSet::new();

        assert!(executor
            .execute_statement(&scope(), "INSERT a", params.clone())
            .await
            .is_ok());
        let err = executor
            .execute_statement(&scope(), "INSERT b", params)
            .await
            .unwrap_err();

        assert_eq!(err, StoreError("connection reset".to_string()));
        assert_eq!(executor.attempted(), 2);
    }
}
