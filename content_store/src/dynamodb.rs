use std::collections::HashMap;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{
    AttributeValue, Delete, Put, TransactWriteItem,
};
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use types::{Episode, EpisodeGuest, Guest, Sponsor};

use crate::error::StoreError;
use crate::repository::{
    EpisodeGuestStore, EpisodeStore, GuestStore, SponsorStore,
};

#[derive(Debug, Clone)]
pub struct TableNames {
    pub episodes: String,
    pub guests: String,
    pub sponsors: String,
    pub episode_guests: String,
}

/// DynamoDB-backed content store. The three entity tables are keyed by
/// `id`; the association table is keyed by (`episode_id`, `guest_id`).
///
/// Air-date ordering (latest/next/previous) is computed over full table
/// scans. The episode catalog is small and read traffic sits behind an
/// edge cache, so a scan per lookup is acceptable.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    tables: TableNames,
}

impl DynamoDbStore {
    #[must_use]
    pub const fn new(client: Client, tables: TableNames) -> Self {
        Self { client, tables }
    }

    async fn scan_all<T: DeserializeOwned>(
        &self,
        table: &str,
    ) -> Result<Vec<T>, StoreError> {
        let mut items = Vec::new();
        let mut last_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let mut scan = self.client.scan().table_name(table);

            if let Some(key) = last_key.clone() {
                scan = scan.set_exclusive_start_key(Some(key));
            }

            let output = scan.send().await.map_err(|e| {
                tracing::error!("DynamoDB Scan error on {table}: {e}");
                StoreError::Database(format!("failed to scan {table}"))
            })?;

            for item in output.items.unwrap_or_default() {
                items.push(serde_dynamo::from_item(item)?);
            }

            match output.last_evaluated_key {
                Some(key) => last_key = Some(key),
                None => break,
            }
        }

        Ok(items)
    }

    async fn get_item<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    "DynamoDB GetItem error on {table} for {id}: {e}"
                );
                StoreError::Database(format!("failed to get item in {table}"))
            })?;

        output
            .item
            .map(|item| serde_dynamo::from_item(item).map_err(StoreError::from))
            .transpose()
    }

    async fn put_item<T: Serialize>(
        &self,
        table: &str,
        record: &T,
    ) -> Result<(), StoreError> {
        let item: HashMap<String, AttributeValue> =
            serde_dynamo::to_item(record)?;

        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("DynamoDB PutItem error on {table}: {e}");
                StoreError::Database(format!("failed to put item in {table}"))
            })?;

        Ok(())
    }

    async fn delete_item(
        &self,
        table: &str,
        id: &str,
    ) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    "DynamoDB DeleteItem error on {table} for {id}: {e}"
                );
                StoreError::Database(format!(
                    "failed to delete item in {table}"
                ))
            })?;

        Ok(())
    }

    async fn query_episode_guests(
        &self,
        episode_id: &str,
    ) -> Result<Vec<EpisodeGuest>, StoreError> {
        let output = self
            .client
            .query()
            .table_name(&self.tables.episode_guests)
            .key_condition_expression("episode_id = :episode_id")
            .expression_attribute_values(
                ":episode_id",
                AttributeValue::S(episode_id.to_string()),
            )
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    "DynamoDB Query error on {table} for {episode_id}: {e}",
                    table = self.tables.episode_guests
                );
                StoreError::Database(
                    "failed to query episode guests".to_string(),
                )
            })?;

        let mut rows = output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| serde_dynamo::from_item(item).map_err(StoreError::from))
            .collect::<Result<Vec<EpisodeGuest>, _>>()?;

        rows.sort_by_key(|row| row.order_position);

        Ok(rows)
    }
}

impl EpisodeStore for DynamoDbStore {
    #[tracing::instrument(skip(self))]
    async fn list_episodes(&self) -> Result<Vec<Episode>, StoreError> {
        let mut episodes: Vec<Episode> =
            self.scan_all(&self.tables.episodes).await?;

        // Option<NaiveDate> orders None first, so a descending sort puts
        // unscheduled episodes last.
        episodes.sort_by(|a, b| b.air_date.cmp(&a.air_date));

        Ok(episodes)
    }

    async fn get_episode(
        &self,
        id: &str,
    ) -> Result<Option<Episode>, StoreError> {
        self.get_item(&self.tables.episodes, id).await
    }

    async fn insert_episode(
        &self,
        episode: &Episode,
    ) -> Result<(), StoreError> {
        self.put_item(&self.tables.episodes, episode).await
    }

    async fn update_episode(
        &self,
        episode: &Episode,
    ) -> Result<(), StoreError> {
        self.put_item(&self.tables.episodes, episode).await
    }

    async fn delete_episode(&self, id: &str) -> Result<(), StoreError> {
        self.delete_item(&self.tables.episodes, id).await
    }

    #[tracing::instrument(skip(self))]
    async fn live_or_latest(&self) -> Result<Option<Episode>, StoreError> {
        let episodes: Vec<Episode> =
            self.scan_all(&self.tables.episodes).await?;

        if let Some(live) = episodes
            .iter()
            .filter(|episode| episode.is_live)
            .max_by_key(|episode| episode.air_date)
        {
            return Ok(Some(live.clone()));
        }

        Ok(episodes
            .into_iter()
            .filter(|episode| episode.air_date.is_some())
            .max_by_key(|episode| episode.air_date))
    }

    async fn next_after(
        &self,
        air_date: NaiveDate,
    ) -> Result<Option<Episode>, StoreError> {
        let episodes: Vec<Episode> =
            self.scan_all(&self.tables.episodes).await?;

        Ok(episodes
            .into_iter()
            .filter(|episode| {
                episode.air_date.is_some_and(|date| date > air_date)
            })
            .min_by_key(|episode| episode.air_date))
    }

    async fn previous_before(
        &self,
        air_date: NaiveDate,
    ) -> Result<Option<Episode>, StoreError> {
        let episodes: Vec<Episode> =
            self.scan_all(&self.tables.episodes).await?;

        Ok(episodes
            .into_iter()
            .filter(|episode| {
                episode.air_date.is_some_and(|date| date < air_date)
            })
            .max_by_key(|episode| episode.air_date))
    }
}

impl GuestStore for DynamoDbStore {
    #[tracing::instrument(skip(self))]
    async fn list_guests(&self) -> Result<Vec<Guest>, StoreError> {
        let mut guests: Vec<Guest> =
            self.scan_all(&self.tables.guests).await?;

        guests.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(guests)
    }

    async fn get_guest(&self, id: &str) -> Result<Option<Guest>, StoreError> {
        self.get_item(&self.tables.guests, id).await
    }

    async fn insert_guest(&self, guest: &Guest) -> Result<(), StoreError> {
        self.put_item(&self.tables.guests, guest).await
    }

    async fn update_guest(&self, guest: &Guest) -> Result<(), StoreError> {
        self.put_item(&self.tables.guests, guest).await
    }

    async fn delete_guest(&self, id: &str) -> Result<(), StoreError> {
        self.delete_item(&self.tables.guests, id).await
    }
}

impl SponsorStore for DynamoDbStore {
    #[tracing::instrument(skip(self))]
    async fn list_sponsors(&self) -> Result<Vec<Sponsor>, StoreError> {
        let mut sponsors: Vec<Sponsor> =
            self.scan_all(&self.tables.sponsors).await?;

        sponsors.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(sponsors)
    }

    async fn get_sponsor(
        &self,
        id: &str,
    ) -> Result<Option<Sponsor>, StoreError> {
        self.get_item(&self.tables.sponsors, id).await
    }

    async fn insert_sponsor(
        &self,
        sponsor: &Sponsor,
    ) -> Result<(), StoreError> {
        self.put_item(&self.tables.sponsors, sponsor).await
    }

    async fn update_sponsor(
        &self,
        sponsor: &Sponsor,
    ) -> Result<(), StoreError> {
        self.put_item(&self.tables.sponsors, sponsor).await
    }

    async fn delete_sponsor(&self, id: &str) -> Result<(), StoreError> {
        self.delete_item(&self.tables.sponsors, id).await
    }
}

impl EpisodeGuestStore for DynamoDbStore {
    async fn guests_for_episode(
        &self,
        episode_id: &str,
    ) -> Result<Vec<EpisodeGuest>, StoreError> {
        self.query_episode_guests(episode_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn replace_for_episode(
        &self,
        episode_id: &str,
        guest_ids: &[String],
    ) -> Result<(), StoreError> {
        let existing = self.query_episode_guests(episode_id).await?;

        // One transaction covers the removals and the re-ordered puts, so
        // a failed save never leaves the episode with a partial guest
        // list. DynamoDB caps a transaction at 100 items; guest lists stay
        // far below that.
        let mut operations: Vec<TransactWriteItem> = Vec::new();

        for row in &existing {
            if guest_ids.contains(&row.guest_id) {
                continue;
            }

            let delete = Delete::builder()
                .table_name(&self.tables.episode_guests)
                .key(
                    "episode_id",
                    AttributeValue::S(episode_id.to_string()),
                )
                .key("guest_id", AttributeValue::S(row.guest_id.clone()))
                .build()
                .map_err(|e| {
                    StoreError::Database(format!(
                        "failed to build delete operation: {e}"
                    ))
                })?;

            operations
                .push(TransactWriteItem::builder().delete(delete).build());
        }

        for (position, guest_id) in guest_ids.iter().enumerate() {
            let row = EpisodeGuest {
                episode_id: episode_id.to_string(),
                guest_id: guest_id.clone(),
                order_position: i32::try_from(position).map_err(|e| {
                    StoreError::Database(format!(
                        "guest list too long: {e}"
                    ))
                })?,
            };

            let item: HashMap<String, AttributeValue> =
                serde_dynamo::to_item(&row)?;

            let put = Put::builder()
                .table_name(&self.tables.episode_guests)
                .set_item(Some(item))
                .build()
                .map_err(|e| {
                    StoreError::Database(format!(
                        "failed to build put operation: {e}"
                    ))
                })?;

            operations.push(TransactWriteItem::builder().put(put).build());
        }

        if operations.is_empty() {
            return Ok(());
        }

        self.client
            .transact_write_items()
            .set_transact_items(Some(operations))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    "DynamoDB TransactWriteItems error for {episode_id}: {e}"
                );
                StoreError::Database(
                    "failed to replace episode guests".to_string(),
                )
            })?;

        Ok(())
    }

    async fn delete_for_episode(
        &self,
        episode_id: &str,
    ) -> Result<(), StoreError> {
        let existing = self.query_episode_guests(episode_id).await?;

        for row in existing {
            self.client
                .delete_item()
                .table_name(&self.tables.episode_guests)
                .key(
                    "episode_id",
                    AttributeValue::S(row.episode_id.clone()),
                )
                .key("guest_id", AttributeValue::S(row.guest_id.clone()))
                .send()
                .await
                .map_err(|e| {
                    tracing::error!(
                        "DynamoDB DeleteItem error for {episode_id}/{guest_id}: {e}",
                        guest_id = row.guest_id
                    );
                    StoreError::Database(
                        "failed to delete episode guest".to_string(),
                    )
                })?;
        }

        Ok(())
    }
}
