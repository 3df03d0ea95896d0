//! In-process services shared by the resolvers

pub mod vote_broker;

pub use vote_broker::{VoteBroker, VoteSubscription};
