//! In-memory implementations of the store traits, used by local
//! development and by the integration tests of the API services. Semantics
//! mirror the DynamoDB implementation: puts are upserts, deletes are
//! idempotent, and `replace_for_episode` swaps the association set under a
//! single lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use types::{Episode, EpisodeGuest, Guest, Sponsor};

use crate::error::StoreError;
use crate::repository::{
    EpisodeGuestStore, EpisodeStore, GuestStore, SponsorStore,
};
use crate::storage::{ObjectStorage, key_from_public_url};

#[derive(Debug, Default)]
struct Inner {
    episodes: HashMap<String, Episode>,
    guests: HashMap<String, Guest>,
    sponsors: HashMap<String, Sponsor>,
    episode_guests: Vec<EpisodeGuest>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EpisodeStore for MemoryStore {
    async fn list_episodes(&self) -> Result<Vec<Episode>, StoreError> {
        let mut episodes: Vec<Episode> =
            self.lock().episodes.values().cloned().collect();

        episodes.sort_by(|a, b| b.air_date.cmp(&a.air_date));

        Ok(episodes)
    }

    async fn get_episode(
        &self,
        id: &str,
    ) -> Result<Option<Episode>, StoreError> {
        Ok(self.lock().episodes.get(id).cloned())
    }

    async fn insert_episode(
        &self,
        episode: &Episode,
    ) -> Result<(), StoreError> {
        self.lock()
            .episodes
            .insert(episode.id.clone(), episode.clone());
        Ok(())
    }

    async fn update_episode(
        &self,
        episode: &Episode,
    ) -> Result<(), StoreError> {
        self.lock()
            .episodes
            .insert(episode.id.clone(), episode.clone());
        Ok(())
    }

    async fn delete_episode(&self, id: &str) -> Result<(), StoreError> {
        self.lock().episodes.remove(id);
        Ok(())
    }

    async fn live_or_latest(&self) -> Result<Option<Episode>, StoreError> {
        let inner = self.lock();

        if let Some(live) = inner
            .episodes
            .values()
            .filter(|episode| episode.is_live)
            .max_by_key(|episode| episode.air_date)
        {
            return Ok(Some(live.clone()));
        }

        Ok(inner
            .episodes
            .values()
            .filter(|episode| episode.air_date.is_some())
            .max_by_key(|episode| episode.air_date)
            .cloned())
    }

    async fn next_after(
        &self,
        air_date: NaiveDate,
    ) -> Result<Option<Episode>, StoreError> {
        Ok(self
            .lock()
            .episodes
            .values()
            .filter(|episode| {
                episode.air_date.is_some_and(|date| date > air_date)
            })
            .min_by_key(|episode| episode.air_date)
            .cloned())
    }

    async fn previous_before(
        &self,
        air_date: NaiveDate,
    ) -> Result<Option<Episode>, StoreError> {
        Ok(self
            .lock()
            .episodes
            .values()
            .filter(|episode| {
                episode.air_date.is_some_and(|date| date < air_date)
            })
            .max_by_key(|episode| episode.air_date)
            .cloned())
    }
}

impl GuestStore for MemoryStore {
    async fn list_guests(&self) -> Result<Vec<Guest>, StoreError> {
        let mut guests: Vec<Guest> =
            self.lock().guests.values().cloned().collect();

        guests.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(guests)
    }

    async fn get_guest(&self, id: &str) -> Result<Option<Guest>, StoreError> {
        Ok(self.lock().guests.get(id).cloned())
    }

    async fn insert_guest(&self, guest: &Guest) -> Result<(), StoreError> {
        self.lock().guests.insert(guest.id.clone(), guest.clone());
        Ok(())
    }

    async fn update_guest(&self, guest: &Guest) -> Result<(), StoreError> {
        self.lock().guests.insert(guest.id.clone(), guest.clone());
        Ok(())
    }

    async fn delete_guest(&self, id: &str) -> Result<(), StoreError> {
        self.lock().guests.remove(id);
        Ok(())
    }
}

impl SponsorStore for MemoryStore {
    async fn list_sponsors(&self) -> Result<Vec<Sponsor>, StoreError> {
        let mut sponsors: Vec<Sponsor> =
            self.lock().sponsors.values().cloned().collect();

        sponsors.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(sponsors)
    }

    async fn get_sponsor(
        &self,
        id: &str,
    ) -> Result<Option<Sponsor>, StoreError> {
        Ok(self.lock().sponsors.get(id).cloned())
    }

    async fn insert_sponsor(
        &self,
        sponsor: &Sponsor,
    ) -> Result<(), StoreError> {
        self.lock()
            .sponsors
            .insert(sponsor.id.clone(), sponsor.clone());
        Ok(())
    }

    async fn update_sponsor(
        &self,
        sponsor: &Sponsor,
    ) -> Result<(), StoreError> {
        self.lock()
            .sponsors
            .insert(sponsor.id.clone(), sponsor.clone());
        Ok(())
    }

    async fn delete_sponsor(&self, id: &str) -> Result<(), StoreError> {
        self.lock().sponsors.remove(id);
        Ok(())
    }
}

impl EpisodeGuestStore for MemoryStore {
    async fn guests_for_episode(
        &self,
        episode_id: &str,
    ) -> Result<Vec<EpisodeGuest>, StoreError> {
        let mut rows: Vec<EpisodeGuest> = self
            .lock()
            .episode_guests
            .iter()
            .filter(|row| row.episode_id == episode_id)
            .cloned()
            .collect();

        rows.sort_by_key(|row| row.order_position);

        Ok(rows)
    }

    async fn replace_for_episode(
        &self,
        episode_id: &str,
        guest_ids: &[String],
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();

        inner
            .episode_guests
            .retain(|row| row.episode_id != episode_id);

        for (position, guest_id) in guest_ids.iter().enumerate() {
            inner.episode_guests.push(EpisodeGuest {
                episode_id: episode_id.to_string(),
                guest_id: guest_id.clone(),
                order_position: i32::try_from(position).map_err(|e| {
                    StoreError::Database(format!("guest list too long: {e}"))
                })?,
            });
        }

        Ok(())
    }

    async fn delete_for_episode(
        &self,
        episode_id: &str,
    ) -> Result<(), StoreError> {
        self.lock()
            .episode_guests
            .retain(|row| row.episode_id != episode_id);
        Ok(())
    }
}

const MEMORY_STORAGE_BASE_URL: &str = "https://rn-media.s3.amazonaws.com/";

/// In-memory object bucket recording uploads and deletions, with the same
/// public URL shape as the S3 implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl ObjectStorage for MemoryStorage {
    async fn upload(
        &self,
        key: &str,
        _content_type: &str,
        body: Vec<u8>,
    ) -> Result<String, StoreError> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), body);

        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{MEMORY_STORAGE_BASE_URL}{key}")
    }

    fn object_key(&self, url: &str) -> Option<String> {
        key_from_public_url(MEMORY_STORAGE_BASE_URL, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(id: &str, air_date: Option<&str>, is_live: bool) -> Episode {
        Episode {
            id: id.to_string(),
            title: format!("Episode {id}"),
            slug: format!("episode-{id}"),
            yt_video_id: "dQw4w9WgXcQ".to_string(),
            air_date: air_date.map(|date| date.parse().unwrap()),
            start_time: None,
            is_live,
            sponsor_id: None,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_replacing_guest_set_round_trips_order() {
        let store = MemoryStore::new();
        let ids: Vec<String> =
            ["g2", "g0", "g1"].iter().map(ToString::to_string).collect();

        store.replace_for_episode("e1", &ids).await.unwrap();

        let rows = store.guests_for_episode("e1").await.unwrap();
        assert_eq!(rows.len(), 3);
        for (position, row) in rows.iter().enumerate() {
            assert_eq!(row.order_position, i32::try_from(position).unwrap());
        }
        let read_ids: Vec<&str> =
            rows.iter().map(|row| row.guest_id.as_str()).collect();
        assert_eq!(read_ids, ["g2", "g0", "g1"]);
    }

    #[tokio::test]
    async fn test_replacing_guest_set_drops_unlisted_rows() {
        let store = MemoryStore::new();
        let first: Vec<String> =
            ["g0", "g1", "g2"].iter().map(ToString::to_string).collect();
        let second: Vec<String> =
            ["g1"].iter().map(ToString::to_string).collect();

        store.replace_for_episode("e1", &first).await.unwrap();
        store.replace_for_episode("e1", &second).await.unwrap();

        let rows = store.guests_for_episode("e1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].guest_id, "g1");
        assert_eq!(rows[0].order_position, 0);
    }

    #[tokio::test]
    async fn test_replace_with_empty_list_clears_associations() {
        let store = MemoryStore::new();
        let ids: Vec<String> =
            ["g0", "g1"].iter().map(ToString::to_string).collect();

        store.replace_for_episode("e1", &ids).await.unwrap();
        store.replace_for_episode("e1", &[]).await.unwrap();

        assert!(store.guests_for_episode("e1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_next_and_previous_chain() {
        let store = MemoryStore::new();
        store
            .insert_episode(&episode("a", Some("2025-01-01"), false))
            .await
            .unwrap();
        store
            .insert_episode(&episode("b", Some("2025-02-01"), false))
            .await
            .unwrap();
        store
            .insert_episode(&episode("c", Some("2025-03-01"), false))
            .await
            .unwrap();

        let next_of_a = store.next_after(date("2025-01-01")).await.unwrap();
        assert_eq!(next_of_a.unwrap().id, "b");

        let next_of_b = store.next_after(date("2025-02-01")).await.unwrap();
        assert_eq!(next_of_b.unwrap().id, "c");

        assert!(store.next_after(date("2025-03-01")).await.unwrap().is_none());

        let previous_of_c =
            store.previous_before(date("2025-03-01")).await.unwrap();
        assert_eq!(previous_of_c.unwrap().id, "b");

        assert!(
            store
                .previous_before(date("2025-01-01"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_unscheduled_episodes_excluded_from_navigation() {
        let store = MemoryStore::new();
        store
            .insert_episode(&episode("a", Some("2025-01-01"), false))
            .await
            .unwrap();
        store.insert_episode(&episode("u", None, false)).await.unwrap();

        assert!(store.next_after(date("2025-01-01")).await.unwrap().is_none());
        assert!(
            store
                .previous_before(date("2025-01-01"))
                .await
                .unwrap()
                .is_none()
        );
        assert!(store.get_episode("u").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_live_episode_wins_over_later_air_dates() {
        let store = MemoryStore::new();
        store
            .insert_episode(&episode("old-live", Some("2024-01-01"), true))
            .await
            .unwrap();
        store
            .insert_episode(&episode("newer", Some("2025-06-01"), false))
            .await
            .unwrap();

        let current = store.live_or_latest().await.unwrap().unwrap();
        assert_eq!(current.id, "old-live");
    }

    #[tokio::test]
    async fn test_latest_by_air_date_when_nothing_is_live() {
        let store = MemoryStore::new();
        store
            .insert_episode(&episode("a", Some("2025-01-01"), false))
            .await
            .unwrap();
        store
            .insert_episode(&episode("b", Some("2025-02-01"), false))
            .await
            .unwrap();

        let current = store.live_or_latest().await.unwrap().unwrap();
        assert_eq!(current.id, "b");
    }

    #[tokio::test]
    async fn test_live_or_latest_empty_catalog() {
        let store = MemoryStore::new();
        assert!(store.live_or_latest().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_episodes_most_recent_first() {
        let store = MemoryStore::new();
        store
            .insert_episode(&episode("a", Some("2025-01-01"), false))
            .await
            .unwrap();
        store
            .insert_episode(&episode("b", Some("2025-02-01"), false))
            .await
            .unwrap();
        store.insert_episode(&episode("u", None, false)).await.unwrap();

        let episodes = store.list_episodes().await.unwrap();
        let ids: Vec<&str> =
            episodes.iter().map(|episode| episode.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "u"]);
    }

    #[tokio::test]
    async fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();

        let url = storage
            .upload("avatars/g1_123.png", "image/png", vec![1, 2, 3])
            .await
            .unwrap();

        assert_eq!(storage.object_key(&url).as_deref(), Some("avatars/g1_123.png"));
        assert!(storage.contains("avatars/g1_123.png"));
        assert!(storage.object_key("https://example.com/me.png").is_none());

        storage.delete("avatars/g1_123.png").await.unwrap();
        assert!(!storage.contains("avatars/g1_123.png"));
    }
}
