use crate::domain::purchase::TransactionScope;
use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// A value bound to a named statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Null,
}

/// Named parameters for one statement execution, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet(Vec<(String, SqlValue)>);

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: SqlValue) -> Self {
        self.0.push((name.to_string(), value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// An error surfaced by the external store, carried verbatim.
///
/// The store's message is the whole payload: writes are never retried and
/// the error is never wrapped with local context.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Narrow capability interface over the external relational store.
///
/// Both operations run under the caller's already-open transaction scope;
/// transaction lifecycle (open, commit, abort) belongs entirely to the
/// caller.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Executes one parameterized statement.
    async fn execute_statement(
        &self,
        scope: &TransactionScope,
        sql: &str,
        params: ParamSet,
    ) -> Result<(), StoreError>;

    /// Executes one statement template over a list of parameter sets.
    async fn execute_batch(
        &self,
        scope: &TransactionScope,
        sql: &str,
        param_sets: Vec<ParamSet>,
    ) -> Result<(), StoreError>;
}

pub type StatementExecutorBox = Box<dyn StatementExecutor>;
