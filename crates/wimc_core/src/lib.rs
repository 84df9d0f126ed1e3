//! Client-side domain layer for the comic catalogue.
//! This crate is the single source of truth for entity and view-flow invariants.

pub mod config;
pub mod events;
pub mod http;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ClientConfig, ConfigError};
pub use events::{Alert, AlertBus, AlertKind};
pub use http::options::RequestOptions;
pub use http::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError,
};
pub use logging::{default_log_level, init_logging};
pub use model::characters::Characters;
pub use model::collection::merge_missing;
pub use model::comic::Comic;
pub use model::entity::{Entity, EntityId, EntityValidationError, Identified};
pub use model::series::Series;
pub use repo::entity_repo::{
    EntityPage, EntityRepository, RepoError, RepoResult, RestEntityRepository,
};
pub use repo::{CharactersRepository, ComicRepository, SeriesRepository};
pub use service::attachment::{AttachmentField, AttachmentLoadError, SelectedFile};
pub use service::delete::{DeleteDialog, DeleteError, ModalClosed, ModalOutcome, DELETED_REASON};
pub use service::editor::{CharactersEditor, ComicEditor, EntityEditor, SeriesEditor};
pub use service::form::{CharactersForm, ComicForm, EntityForm, SeriesForm};
pub use service::list::EntityListView;
pub use service::navigation::Navigator;
pub use service::relationship::RelationshipOptions;
pub use service::resolver::{Activation, EntityResolver};
pub use service::save::{SaveError, SaveLifecycle, SaveState};
pub use service::scope::ViewScope;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
