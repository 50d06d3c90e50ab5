//! Category Use Case

use std::sync::Arc;

use kernel::id::CategoryId;
use kernel::pagination::{ListQuery, PageSource, Paginated, resolve};

use crate::domain::entity::category::{Category, CategoryDraft};
use crate::domain::repository::CategoryRepository;
use crate::domain::value_object::category_name::CategoryName;
use crate::error::{NewsError, NewsResult};

/// Create/update input
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
}

impl CategoryInput {
    fn into_draft(self) -> NewsResult<CategoryDraft> {
        let name = CategoryName::new(&self.name).map_err(|e| NewsError::Validation(e.to_string()))?;
        Ok(CategoryDraft {
            name,
            description: self.description,
        })
    }
}

pub struct CategoryUseCase<R>
where
    R: CategoryRepository + PageSource<Category, Error = NewsError>,
{
    repo: Arc<R>,
}

impl<R> CategoryUseCase<R>
where
    R: CategoryRepository + PageSource<Category, Error = NewsError>,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn all(&self) -> NewsResult<Vec<Category>> {
        self.repo.find_all().await
    }

    /// Paginated list searching the name, highest id first
    pub async fn list(&self, query: &ListQuery) -> NewsResult<Paginated<Category>> {
        resolve(self.repo.as_ref(), query).await
    }

    pub async fn detail(&self, category_id: CategoryId) -> NewsResult<Category> {
        self.repo
            .find_by_id(category_id)
            .await?
            .ok_or(NewsError::CategoryNotFound)
    }

    pub async fn create(&self, input: CategoryInput) -> NewsResult<Category> {
        let draft = input.into_draft()?;
        let category = self.repo.insert(&draft).await?;

        tracing::info!(category_id = %category.category_id, name = %category.name, "Category created");

        Ok(category)
    }

    pub async fn update(&self, category_id: CategoryId, input: CategoryInput) -> NewsResult<Category> {
        let draft = input.into_draft()?;
        let category = self
            .repo
            .update(category_id, &draft)
            .await?
            .ok_or(NewsError::CategoryNotFound)?;

        tracing::info!(category_id = %category.category_id, "Category updated");

        Ok(category)
    }

    /// Fails with a storage error while articles still reference the category
    pub async fn delete(&self, category_id: CategoryId) -> NewsResult<Category> {
        let category = self
            .repo
            .delete(category_id)
            .await?
            .ok_or(NewsError::CategoryNotFound)?;

        tracing::info!(category_id = %category.category_id, "Category deleted");

        Ok(category)
    }
}
