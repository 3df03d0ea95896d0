//! GraphQL subscriptions for real-time updates
//!
//! Subscriptions are served over WebSocket at `/graphql/ws`.

use std::sync::Arc;

use async_graphql::{Context, Subscription};
use futures::Stream;

use crate::services::VoteBroker;

use super::types::Movie;

#[derive(Default)]
pub struct VoteSubscriptions;

#[Subscription]
impl VoteSubscriptions {
    /// Every movie that receives a vote after the subscription starts, in vote order
    async fn vote_added<'ctx>(&self, ctx: &Context<'ctx>) -> impl Stream<Item = Movie> + 'ctx {
        let broker = ctx.data_unchecked::<Arc<VoteBroker>>();
        broker.subscribe()
    }
}
