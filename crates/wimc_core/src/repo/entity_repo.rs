//! Entity repository contract and REST implementation.
//!
//! # Responsibility
//! - Provide create/update/partial-update/find/query/delete per entity type.
//! - Map HTTP statuses and bodies to typed results and semantic errors.
//!
//! # Invariants
//! - Write paths call `Entity::validate()` before any request is sent.
//! - `update`, `partial_update` require an identifier locally.
//! - `find` reports absence as `Ok(None)`, never as an error.
//! - No caching, deduplication or retry: every call reaches the server.

use crate::http::options::RequestOptions;
use crate::http::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError, TOTAL_COUNT_HEADER,
};
use crate::model::entity::{Entity, EntityId, EntityValidationError};
use async_trait::async_trait;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for remote entity operations.
#[derive(Debug)]
pub enum RepoError {
    Transport(TransportError),
    /// Server answered with a non-success status.
    Status {
        entity: &'static str,
        status: u16,
        message: Option<String>,
    },
    Decode {
        entity: &'static str,
        source: serde_json::Error,
    },
    /// Operation needs a persisted entity but `id` is unset.
    MissingIdentifier { entity: &'static str },
    /// Route parameter could not be read as an identifier.
    InvalidIdentifier(String),
    InvalidQuery(String),
    Validation(EntityValidationError),
    /// Owning view was torn down while the call was in flight.
    Cancelled,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "{err}"),
            Self::Status {
                entity,
                status,
                message,
            } => match message {
                Some(message) => write!(f, "{entity} request failed with {status}: {message}"),
                None => write!(f, "{entity} request failed with {status}"),
            },
            Self::Decode { entity, source } => {
                write!(f, "invalid {entity} payload from server: {source}")
            }
            Self::MissingIdentifier { entity } => {
                write!(f, "{entity} has no id; it must be created first")
            }
            Self::InvalidIdentifier(value) => write!(f, "invalid identifier `{value}`"),
            Self::InvalidQuery(value) => write!(f, "invalid sort expression `{value}`"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Cancelled => write!(f, "request cancelled"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for RepoError {
    fn from(value: TransportError) -> Self {
        Self::Transport(value)
    }
}

impl From<EntityValidationError> for RepoError {
    fn from(value: EntityValidationError) -> Self {
        Self::Validation(value)
    }
}

/// One page of a list query.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityPage<T> {
    pub items: Vec<T>,
    /// Unpaged row count when the server reports it.
    pub total_count: Option<u64>,
}

/// Capability set every entity type is persisted through.
#[async_trait]
pub trait EntityRepository<T: Entity>: Send + Sync {
    /// Persists a new entity and returns it with its assigned id.
    async fn create(&self, entity: &T) -> RepoResult<T>;
    /// Fully replaces a persisted entity.
    async fn update(&self, entity: &T) -> RepoResult<T>;
    /// Changes only the fields that are set on `entity`.
    async fn partial_update(&self, entity: &T) -> RepoResult<T>;
    async fn find(&self, id: EntityId) -> RepoResult<Option<T>>;
    async fn query_page(&self, options: &RequestOptions) -> RepoResult<EntityPage<T>>;
    async fn delete(&self, id: EntityId) -> RepoResult<()>;

    async fn query(&self, options: &RequestOptions) -> RepoResult<Vec<T>> {
        Ok(self.query_page(options).await?.items)
    }
}

/// REST repository over `api/{entities}` for one entity type.
pub struct RestEntityRepository<T> {
    transport: Arc<dyn HttpTransport>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for RestEntityRepository<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> RestEntityRepository<T> {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            _entity: PhantomData,
        }
    }

    fn item_path(id: EntityId) -> String {
        format!("{}/{id}", T::RESOURCE_PATH)
    }

    fn require_id(entity: &T) -> RepoResult<EntityId> {
        entity.identifier().ok_or(RepoError::MissingIdentifier {
            entity: T::ENTITY_NAME,
        })
    }

    fn to_body(entity: &T) -> RepoResult<serde_json::Value> {
        serde_json::to_value(entity).map_err(|source| RepoError::Decode {
            entity: T::ENTITY_NAME,
            source,
        })
    }

    async fn send(&self, operation: &'static str, request: HttpRequest) -> RepoResult<HttpResponse> {
        let started_at = Instant::now();
        let method = request.method;
        match self.transport.execute(request).await {
            Ok(response) => {
                info!(
                    "event=entity_request module=repo status=ok op={} entity={} method={} http_status={} duration_ms={}",
                    operation,
                    T::ENTITY_NAME,
                    method,
                    response.status,
                    started_at.elapsed().as_millis()
                );
                Ok(response)
            }
            Err(err) => {
                error!(
                    "event=entity_request module=repo status=error op={} entity={} method={} duration_ms={} error={}",
                    operation,
                    T::ENTITY_NAME,
                    method,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    fn ensure_success(response: HttpResponse) -> RepoResult<HttpResponse> {
        if response.is_success() {
            return Ok(response);
        }
        Err(RepoError::Status {
            entity: T::ENTITY_NAME,
            status: response.status,
            message: problem_title(&response.body),
        })
    }

    fn decode<D: serde::de::DeserializeOwned>(response: &HttpResponse) -> RepoResult<D> {
        serde_json::from_slice(&response.body).map_err(|source| RepoError::Decode {
            entity: T::ENTITY_NAME,
            source,
        })
    }

    async fn write(&self, operation: &'static str, method: HttpMethod, entity: &T) -> RepoResult<T> {
        entity.validate()?;
        let path = match method {
            HttpMethod::Post => T::RESOURCE_PATH.to_string(),
            _ => Self::item_path(Self::require_id(entity)?),
        };
        let request = HttpRequest::new(method, path).with_body(Self::to_body(entity)?);
        let response = Self::ensure_success(self.send(operation, request).await?)?;
        Self::decode(&response)
    }
}

#[async_trait]
impl<T: Entity> EntityRepository<T> for RestEntityRepository<T> {
    async fn create(&self, entity: &T) -> RepoResult<T> {
        self.write("create", HttpMethod::Post, entity).await
    }

    async fn update(&self, entity: &T) -> RepoResult<T> {
        self.write("update", HttpMethod::Put, entity).await
    }

    async fn partial_update(&self, entity: &T) -> RepoResult<T> {
        self.write("partial_update", HttpMethod::Patch, entity).await
    }

    async fn find(&self, id: EntityId) -> RepoResult<Option<T>> {
        let request = HttpRequest::new(HttpMethod::Get, Self::item_path(id));
        let response = self.send("find", request).await?;
        if response.status == 404 {
            return Ok(None);
        }
        let response = Self::ensure_success(response)?;
        if response.has_null_body() {
            return Ok(None);
        }
        Self::decode(&response).map(Some)
    }

    async fn query_page(&self, options: &RequestOptions) -> RepoResult<EntityPage<T>> {
        if let Some(invalid) = options.invalid_sort() {
            return Err(RepoError::InvalidQuery(invalid.to_string()));
        }
        let request = HttpRequest::new(HttpMethod::Get, T::RESOURCE_PATH)
            .with_query(options.to_query_pairs());
        let response = Self::ensure_success(self.send("query", request).await?)?;
        let items = if response.has_null_body() {
            Vec::new()
        } else {
            Self::decode::<Vec<T>>(&response)?
        };
        let total_count = response
            .header(TOTAL_COUNT_HEADER)
            .and_then(|value| value.trim().parse::<u64>().ok());
        Ok(EntityPage { items, total_count })
    }

    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let request = HttpRequest::new(HttpMethod::Delete, Self::item_path(id));
        Self::ensure_success(self.send("delete", request).await?)?;
        Ok(())
    }
}

/// Extracts the `title` (or `message`) of a problem-details error body.
fn problem_title(body: &[u8]) -> Option<String> {
    let value = serde_json::from_slice::<serde_json::Value>(body).ok()?;
    value
        .get("title")
        .or_else(|| value.get("message"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}
