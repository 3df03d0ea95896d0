use super::prelude::*;

#[derive(Default)]
pub struct MovieQueries;

#[Object]
impl MovieQueries {
    /// Get all movies, or only those in the category with the given name.
    ///
    /// A missing or empty `categoryName` means no filter; an unknown name
    /// returns an empty list.
    async fn get_movies(
        &self,
        ctx: &Context<'_>,
        category_name: Option<String>,
    ) -> Result<Vec<Movie>> {
        let catalog = ctx.data_unchecked::<Arc<Catalog>>();

        let movies = match category_name.as_deref() {
            Some(name) if !name.is_empty() => catalog.find_movies_by_category_name(name),
            _ => catalog.movies(),
        };
        Ok(movies)
    }

    /// Get a movie by ID, or `null` if there is none
    async fn get_movie(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Movie>> {
        let catalog = ctx.data_unchecked::<Arc<Catalog>>();
        Ok(catalog.find_movie_by_id(&id))
    }
}
