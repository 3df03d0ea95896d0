use super::prelude::*;

#[derive(Default)]
pub struct VoteMutations;

#[Object]
impl VoteMutations {
    /// Add one vote to a movie and notify `voteAdded` subscribers.
    ///
    /// Fails with `NOT_FOUND` when no movie has the given ID.
    async fn add_vote(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "movie_id")] movie_id: ID,
    ) -> Result<Movie> {
        let catalog = ctx.data_unchecked::<Arc<Catalog>>();
        let broker = ctx.data_unchecked::<Arc<VoteBroker>>();

        let mut delivered = 0;
        let movie = catalog
            .add_vote(&movie_id, |movie| delivered = broker.publish(movie))
            .map_err(|e| {
                tracing::warn!(movie_id = %movie_id.as_str(), error = %e, "Vote rejected");
                e.extend()
            })?;

        tracing::info!(
            movie_id = %movie.id.as_str(),
            title = %movie.title,
            vote_count = movie.vote_count,
            subscribers = delivered,
            "Vote added"
        );

        Ok(movie)
    }
}
