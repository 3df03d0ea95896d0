use super::prelude::*;

#[derive(Default)]
pub struct CategoryQueries;

#[Object]
impl CategoryQueries {
    /// Get all categories
    async fn get_categories(&self, ctx: &Context<'_>) -> Result<Vec<Category>> {
        let catalog = ctx.data_unchecked::<Arc<Catalog>>();
        Ok(catalog.categories())
    }
}
