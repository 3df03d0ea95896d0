//! GraphQL schema definition with queries, mutations, and subscriptions

use std::sync::Arc;

use async_graphql::extensions::Tracing;
use async_graphql::{MergedObject, MergedSubscription, Schema};

use crate::catalog::Catalog;
use crate::services::VoteBroker;

use super::mutations::VoteMutations;
use super::queries::{CategoryQueries, MovieQueries, SystemQueries};
use super::subscriptions::VoteSubscriptions;

#[derive(MergedObject, Default)]
pub struct QueryRoot(SystemQueries, MovieQueries, CategoryQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(VoteMutations);

#[derive(MergedSubscription, Default)]
pub struct SubscriptionRoot(VoteSubscriptions);

/// The GraphQL schema type
pub type MovieVotesSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Build the schema around an explicitly owned catalog and vote broker
pub fn build_schema(catalog: Arc<Catalog>, broker: Arc<VoteBroker>) -> MovieVotesSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        SubscriptionRoot::default(),
    )
    .data(catalog)
    .data(broker)
    .extension(Tracing)
    .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use futures::StreamExt;
    use futures::stream::BoxStream;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn setup() -> (MovieVotesSchema, Arc<Catalog>, Arc<VoteBroker>) {
        let catalog = Arc::new(sample_catalog());
        let broker = VoteBroker::new();
        let schema = build_schema(catalog.clone(), broker.clone());
        (schema, catalog, broker)
    }

    async fn run(schema: &MovieVotesSchema, query: &str) -> Value {
        let response = schema.execute(query).await;
        assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
        response.data.into_json().unwrap()
    }

    /// Poll a subscription stream until its resolver has registered with the broker
    async fn until_registered(
        stream: &mut BoxStream<'static, async_graphql::Response>,
        broker: &VoteBroker,
        expected: usize,
    ) {
        for _ in 0..16 {
            if broker.subscriber_count() >= expected {
                break;
            }
            assert!(futures::poll!(stream.next()).is_pending());
        }
        assert_eq!(broker.subscriber_count(), expected);
    }

    fn movie_ids(data: &Value) -> Vec<&str> {
        data.as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_hello() {
        let (schema, _, _) = setup();
        assert_eq!(run(&schema, "{ hello }").await, json!({ "hello": "Hello world!" }));
    }

    #[tokio::test]
    async fn test_get_movies_without_filter() {
        let (schema, catalog, _) = setup();

        for query in [
            "{ getMovies { id } }",
            r#"{ getMovies(categoryName: "") { id } }"#,
            "{ getMovies(categoryName: null) { id } }",
        ] {
            let data = run(&schema, query).await;
            let ids = movie_ids(&data["getMovies"]);
            assert_eq!(ids.len(), catalog.movie_count());
            assert_eq!(ids, vec!["1", "2", "3", "4"]);
        }
    }

    #[tokio::test]
    async fn test_get_movies_by_category() {
        let (schema, _, _) = setup();

        let data = run(&schema, r#"{ getMovies(categoryName: "Action") { id vote_count category_ids } }"#).await;
        assert_eq!(
            data,
            json!({ "getMovies": [
                { "id": "1", "vote_count": 5, "category_ids": ["10"] },
                { "id": "2", "vote_count": 0, "category_ids": ["10", "20"] },
            ]})
        );

        let data = run(&schema, r#"{ getMovies(categoryName: "Western") { id } }"#).await;
        assert_eq!(data, json!({ "getMovies": [] }));
    }

    #[tokio::test]
    async fn test_get_movie() {
        let (schema, _, _) = setup();

        let data = run(&schema, r#"{ getMovie(id: "3") { id title vote_count } }"#).await;
        assert_eq!(data, json!({ "getMovie": { "id": "3", "title": "Movie 3", "vote_count": 12 } }));

        // Integer ids address the same movie
        let data = run(&schema, "{ getMovie(id: 3) { id } }").await;
        assert_eq!(data["getMovie"]["id"], "3");

        let data = run(&schema, r#"{ getMovie(id: "404") { id } }"#).await;
        assert_eq!(data, json!({ "getMovie": null }));
    }

    #[tokio::test]
    async fn test_relations() {
        let (schema, _, _) = setup();

        let data = run(
            &schema,
            r#"{
                getMovie(id: "4") { categories { id name } }
                getCategories { name movies { id } }
            }"#,
        )
        .await;

        // Category id 99 does not exist and resolves to null
        assert_eq!(
            data["getMovie"]["categories"],
            json!([{ "id": "20", "name": "Drama" }, null])
        );
        assert_eq!(
            data["getCategories"],
            json!([
                { "name": "Action", "movies": [{ "id": "1" }, { "id": "2" }] },
                { "name": "Drama", "movies": [{ "id": "2" }, { "id": "3" }, { "id": "4" }] },
            ])
        );
    }

    #[tokio::test]
    async fn test_add_vote_increments_cumulatively() {
        let (schema, catalog, _) = setup();
        let mutation = r#"mutation { addVote(movie_id: "1") { id vote_count } }"#;

        let data = run(&schema, mutation).await;
        assert_eq!(data, json!({ "addVote": { "id": "1", "vote_count": 6 } }));

        let data = run(&schema, mutation).await;
        assert_eq!(data["addVote"]["vote_count"], 7);
        assert_eq!(catalog.find_movie_by_id("1").unwrap().vote_count, 7);
    }

    #[tokio::test]
    async fn test_add_vote_unknown_movie() {
        let (schema, catalog, broker) = setup();
        let before = catalog.movies();
        let mut sub = broker.subscribe();

        let response = schema
            .execute(r#"mutation { addVote(movie_id: "404") { id vote_count } }"#)
            .await;

        assert_eq!(response.errors.len(), 1);
        let error = &response.errors[0];
        assert_eq!(error.message, "Movie not found: 404");
        let error = serde_json::to_value(error).unwrap();
        assert_eq!(error["extensions"]["code"], "NOT_FOUND");

        assert_eq!(catalog.movies(), before);
        assert!(futures::poll!(sub.next()).is_pending());
    }

    #[tokio::test]
    async fn test_vote_added_subscription() {
        let (schema, _, broker) = setup();

        let mut stream = schema.execute_stream("subscription { voteAdded { id vote_count } }");
        until_registered(&mut stream, &broker, 1).await;

        run(&schema, r#"mutation { addVote(movie_id: "1") { id } }"#).await;
        run(&schema, r#"mutation { addVote(movie_id: "3") { id } }"#).await;
        run(&schema, r#"mutation { addVote(movie_id: "1") { id } }"#).await;

        let mut received = Vec::new();
        for _ in 0..3 {
            let response = stream.next().await.unwrap();
            assert!(response.errors.is_empty());
            received.push(response.data.into_json().unwrap()["voteAdded"].clone());
        }

        assert_eq!(
            received,
            vec![
                json!({ "id": "1", "vote_count": 6 }),
                json!({ "id": "3", "vote_count": 13 }),
                json!({ "id": "1", "vote_count": 7 }),
            ]
        );
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_no_past_votes() {
        let (schema, _, broker) = setup();

        let mut early = schema.execute_stream("subscription { voteAdded { vote_count } }");
        until_registered(&mut early, &broker, 1).await;
        run(&schema, r#"mutation { addVote(movie_id: "1") { id } }"#).await;

        let mut late = schema.execute_stream("subscription { voteAdded { vote_count } }");
        until_registered(&mut late, &broker, 2).await;
        run(&schema, r#"mutation { addVote(movie_id: "1") { id } }"#).await;

        let first = early.next().await.unwrap().data.into_json().unwrap();
        let second = early.next().await.unwrap().data.into_json().unwrap();
        assert_eq!(first["voteAdded"]["vote_count"], 6);
        assert_eq!(second["voteAdded"]["vote_count"], 7);

        let only = late.next().await.unwrap().data.into_json().unwrap();
        assert_eq!(only["voteAdded"]["vote_count"], 7);
        assert!(futures::poll!(late.next()).is_pending());
    }

    #[tokio::test]
    async fn test_dropped_subscription_is_released() {
        let (schema, _, broker) = setup();

        let mut stream = schema.execute_stream("subscription { voteAdded { id } }");
        until_registered(&mut stream, &broker, 1).await;

        drop(stream);
        assert_eq!(broker.subscriber_count(), 0);
        run(&schema, r#"mutation { addVote(movie_id: "2") { id } }"#).await;
    }
}
