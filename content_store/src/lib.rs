//! Typed access to the Release Notes content: episodes, guests, sponsors,
//! and the ordered episode/guest association, plus the media object bucket.
//!
//! The repository traits are the only way the services touch persisted
//! state. Production wires them to DynamoDB and S3; tests and local
//! development use the in-memory implementations.

pub mod dynamodb;
pub mod error;
pub mod memory;
pub mod repository;
pub mod storage;

pub use dynamodb::{DynamoDbStore, TableNames};
pub use error::StoreError;
pub use memory::{MemoryStorage, MemoryStore};
pub use repository::{
    ContentStore, EpisodeGuestStore, EpisodeStore, GuestStore, SponsorStore,
};
pub use storage::{ObjectStorage, S3Storage};
