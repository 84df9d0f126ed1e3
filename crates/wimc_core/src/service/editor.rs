//! Edit view controllers.
//!
//! # Responsibility
//! - Wire resolver output, form state, relationship options and the save
//!   lifecycle together for each entity type.
//!
//! # Invariants
//! - Each editor owns its `ViewScope`; dropping the editor cancels its calls.
//! - Relationship options are seeded from the entity before any query runs.

use crate::model::characters::Characters;
use crate::model::comic::Comic;
use crate::model::entity::Entity;
use crate::model::series::Series;
use crate::repo::entity_repo::{EntityRepository, RepoResult};
use crate::service::form::{CharactersForm, ComicForm, EntityForm, SeriesForm};
use crate::service::navigation::Navigator;
use crate::service::relationship::RelationshipOptions;
use crate::service::save::{SaveError, SaveLifecycle, SaveState};
use crate::service::scope::ViewScope;
use std::sync::Arc;

/// Form plus save lifecycle for one entity type.
pub struct EntityEditor<F: EntityForm> {
    pub form: F,
    save: SaveLifecycle,
    scope: ViewScope,
    repo: Arc<dyn EntityRepository<F::Entity>>,
    navigator: Arc<dyn Navigator>,
}

impl<F: EntityForm> EntityEditor<F> {
    pub fn open(
        entity: &F::Entity,
        repo: Arc<dyn EntityRepository<F::Entity>>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            form: F::from_entity(entity),
            save: SaveLifecycle::new(),
            scope: ViewScope::new(F::Entity::ENTITY_NAME),
            repo,
            navigator,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn is_saving(&self) -> bool {
        self.save.is_saving()
    }

    pub fn save_state(&self) -> SaveState {
        self.save.state()
    }

    pub async fn save(&self) -> Result<F::Entity, SaveError> {
        self.save
            .save(
                &self.form,
                self.repo.as_ref(),
                self.navigator.as_ref(),
                &self.scope,
            )
            .await
    }

    /// Leaves the view without saving.
    pub fn previous_state(&self) {
        self.navigator.back();
    }
}

pub type CharactersEditor = EntityEditor<CharactersForm>;

/// Series edit view: one characters relationship.
pub struct SeriesEditor {
    pub editor: EntityEditor<SeriesForm>,
    pub characters_options: RelationshipOptions<Characters>,
}

impl SeriesEditor {
    pub fn open(
        series: &Series,
        repo: Arc<dyn EntityRepository<Series>>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let mut characters_options = RelationshipOptions::new();
        characters_options.seed([series.characters.as_ref()]);
        Self {
            editor: EntityEditor::open(series, repo, navigator),
            characters_options,
        }
    }

    pub async fn load_relationships(
        &mut self,
        characters_repo: &dyn EntityRepository<Characters>,
    ) -> RepoResult<()> {
        self.characters_options
            .load(
                characters_repo,
                self.editor.scope(),
                [self.editor.form.characters.as_ref()],
            )
            .await
    }
}

/// Comic edit view: series and characters relationships.
pub struct ComicEditor {
    pub editor: EntityEditor<ComicForm>,
    pub series_options: RelationshipOptions<Series>,
    pub characters_options: RelationshipOptions<Characters>,
}

impl ComicEditor {
    pub fn open(
        comic: &Comic,
        repo: Arc<dyn EntityRepository<Comic>>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let mut series_options = RelationshipOptions::new();
        series_options.seed([comic.series.as_ref()]);
        let mut characters_options = RelationshipOptions::new();
        characters_options.seed([comic.characters.as_ref()]);
        Self {
            editor: EntityEditor::open(comic, repo, navigator),
            series_options,
            characters_options,
        }
    }

    /// Loads both option lists; the first failure is returned after both ran.
    pub async fn load_relationships(
        &mut self,
        series_repo: &dyn EntityRepository<Series>,
        characters_repo: &dyn EntityRepository<Characters>,
    ) -> RepoResult<()> {
        let series_result = self
            .series_options
            .load(
                series_repo,
                self.editor.scope(),
                [self.editor.form.series.as_ref()],
            )
            .await;
        let characters_result = self
            .characters_options
            .load(
                characters_repo,
                self.editor.scope(),
                [self.editor.form.characters.as_ref()],
            )
            .await;
        series_result.and(characters_result)
    }
}
