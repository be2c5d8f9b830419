use chrono::NaiveDate;
use types::{Episode, EpisodeGuest, Guest, Sponsor};

use crate::error::StoreError;

/// Episode persistence plus the air-date ordering queries behind the public
/// read API. Episodes without an air date never participate in the ordering
/// comparisons; they can be fetched by id but are unreachable through
/// next/previous navigation.
pub trait EpisodeStore {
    /// All episodes, most recent air date first, unscheduled episodes last.
    fn list_episodes(
        &self,
    ) -> impl Future<Output = Result<Vec<Episode>, StoreError>> + Send;

    fn get_episode(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Episode>, StoreError>> + Send;

    fn insert_episode(
        &self,
        episode: &Episode,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn update_episode(
        &self,
        episode: &Episode,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn delete_episode(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// The single episode considered current for public display: the live
    /// episode (greatest air date among live episodes when several are
    /// flagged), or the episode with the greatest air date when none is
    /// live. `None` when nothing qualifies.
    fn live_or_latest(
        &self,
    ) -> impl Future<Output = Result<Option<Episode>, StoreError>> + Send;

    /// The episode with the smallest air date strictly greater than
    /// `air_date`. Ties are broken arbitrarily.
    fn next_after(
        &self,
        air_date: NaiveDate,
    ) -> impl Future<Output = Result<Option<Episode>, StoreError>> + Send;

    /// The episode with the greatest air date strictly less than
    /// `air_date`. Ties are broken arbitrarily.
    fn previous_before(
        &self,
        air_date: NaiveDate,
    ) -> impl Future<Output = Result<Option<Episode>, StoreError>> + Send;
}

pub trait GuestStore {
    /// All guests, ordered by name.
    fn list_guests(
        &self,
    ) -> impl Future<Output = Result<Vec<Guest>, StoreError>> + Send;

    fn get_guest(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Guest>, StoreError>> + Send;

    fn insert_guest(
        &self,
        guest: &Guest,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn update_guest(
        &self,
        guest: &Guest,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn delete_guest(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

pub trait SponsorStore {
    /// All sponsors, ordered by name.
    fn list_sponsors(
        &self,
    ) -> impl Future<Output = Result<Vec<Sponsor>, StoreError>> + Send;

    fn get_sponsor(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Sponsor>, StoreError>> + Send;

    fn insert_sponsor(
        &self,
        sponsor: &Sponsor,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn update_sponsor(
        &self,
        sponsor: &Sponsor,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn delete_sponsor(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// The ordered many-to-many association between episodes and guests.
pub trait EpisodeGuestStore {
    /// Association rows for an episode, ordered by `order_position`.
    fn guests_for_episode(
        &self,
        episode_id: &str,
    ) -> impl Future<Output = Result<Vec<EpisodeGuest>, StoreError>> + Send;

    /// Replaces the episode's entire association set in one atomic
    /// operation: after it returns, `order_position` of the i-th id in
    /// `guest_ids` equals `i` and no other rows remain. An empty list
    /// clears the set.
    fn replace_for_episode(
        &self,
        episode_id: &str,
        guest_ids: &[String],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn delete_for_episode(
        &self,
        episode_id: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Everything a service needs to read and write content.
pub trait ContentStore:
    EpisodeStore
    + GuestStore
    + SponsorStore
    + EpisodeGuestStore
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> ContentStore for T where
    T: EpisodeStore
        + GuestStore
        + SponsorStore
        + EpisodeGuestStore
        + Clone
        + Send
        + Sync
        + 'static
{
}
