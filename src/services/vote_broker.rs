//! Vote broker: the single "vote added" topic behind the `voteAdded` subscription.
//!
//! Every subscriber owns an unbounded channel, so a publish never waits on a
//! slow consumer and no subscriber misses an event published after it
//! registered. Dropping a [VoteSubscription] removes its registration.

use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::debug;

use crate::graphql::types::Movie;

struct Subscriber {
    id: u64,
    sender: mpsc::UnboundedSender<Movie>,
}

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    /// Kept in registration order
    subscribers: Mutex<Vec<Subscriber>>,
}

impl Registry {
    fn remove(&self, id: u64) {
        self.subscribers.lock().retain(|s| s.id != id);
    }
}

/// Broadcasts voted movies to every active subscription
#[derive(Default)]
pub struct VoteBroker {
    registry: Arc<Registry>,
}

impl VoteBroker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a new subscriber. Only events published from now on are delivered.
    pub fn subscribe(&self) -> VoteSubscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        let mut subscribers = self.registry.subscribers.lock();
        subscribers.push(Subscriber { id, sender });
        debug!(subscriber_id = id, subscribers = subscribers.len(), "Vote subscriber registered");

        VoteSubscription {
            id,
            receiver: UnboundedReceiverStream::new(receiver),
            registry: self.registry.clone(),
        }
    }

    /// Hand `movie` to every current subscriber, in registration order.
    ///
    /// Returns how many subscribers received it. Subscribers whose stream is
    /// gone are dropped from the registry.
    pub fn publish(&self, movie: &Movie) -> usize {
        let mut subscribers = self.registry.subscribers.lock();
        subscribers.retain(|s| s.sender.send(movie.clone()).is_ok());
        let delivered = subscribers.len();
        debug!(
            movie_id = %movie.id.as_str(),
            vote_count = movie.vote_count,
            subscribers = delivered,
            "Published vote"
        );
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.subscribers.lock().len()
    }
}

/// Lazy, unbounded stream of voted movies for one subscriber
pub struct VoteSubscription {
    id: u64,
    receiver: UnboundedReceiverStream<Movie>,
    registry: Arc<Registry>,
}

impl Stream for VoteSubscription {
    type Item = Movie;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Movie>> {
        Pin::new(&mut self.receiver).poll_next(cx)
    }
}

impl Drop for VoteSubscription {
    fn drop(&mut self) {
        self.registry.remove(self.id);
        debug!(subscriber_id = self.id, "Vote subscriber released");
    }
}
