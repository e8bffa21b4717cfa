//! Database layer — migrations, queries, and cursor management.

use std::collections::HashSet;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::{info, warn};

use crate::errors::Result;
use crate::events::{CampaignSummary, EventKind, EventRecord, LedgerEvent};

/// Establish a SQLite connection pool and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };
    // Create the database file on first start.
    let url = if url.contains('?') || url.contains(":memory:") {
        url
    } else {
        format!("{url}?mode=rwc")
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied successfully");
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Cursor helpers
// ─────────────────────────────────────────────────────────

/// Read the last-seen ledger from the cursor row.
/// Returns `0` when no cursor has been persisted yet.
pub async fn get_last_ledger(pool: &SqlitePool) -> Result<i64> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT last_ledger FROM indexer_cursor WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(v,)| v).unwrap_or(0))
}

/// Persist the last-seen ledger (and optionally a pagination cursor string).
pub async fn save_cursor(
    pool: &SqlitePool,
    last_ledger: i64,
    last_cursor: Option<&str>,
) -> Result<()> {
    sqlx::query("UPDATE indexer_cursor SET last_ledger = ?1, last_cursor = ?2 WHERE id = 1")
        .bind(last_ledger)
        .bind(last_cursor)
        .execute(pool)
        .await?;
    Ok(())
}

/// Read back the raw cursor string (used to resume pagination mid-ledger).
pub async fn get_cursor_string(pool: &SqlitePool) -> Result<Option<String>> {
    let row: Option<(Option<String>,)> =
        sqlx::query_as("SELECT last_cursor FROM indexer_cursor WHERE id = 1")
            .fetch_optional(pool)
            .await?;
    Ok(row.and_then(|(v,)| v))
}

// ─────────────────────────────────────────────────────────
// Event writes
// ─────────────────────────────────────────────────────────

/// Persist a batch of decoded events.  Events that share the same
/// `(ledger, tx_hash, event_type, campaign_id)` tuple, with missing values
/// treated as equal, are silently ignored to make the indexer idempotent.
pub async fn insert_events(pool: &SqlitePool, events: &[LedgerEvent]) -> Result<usize> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;
    for ev in events {
        let rows_affected = sqlx::query(
            r#"
            INSERT OR IGNORE INTO events
                (event_type, campaign_id, actor, amount, payload, ledger, timestamp, contract_id, tx_hash)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&ev.event_type)
        .bind(&ev.campaign_id)
        .bind(&ev.actor)
        .bind(&ev.amount)
        .bind(&ev.payload)
        .bind(ev.ledger)
        .bind(ev.timestamp)
        .bind(&ev.contract_id)
        .bind(&ev.tx_hash)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        count += rows_affected as usize;
    }
    tx.commit().await?;
    Ok(count)
}

// ─────────────────────────────────────────────────────────
// Event reads
// ─────────────────────────────────────────────────────────

/// Fetch all events for a given campaign, ordered by ledger ascending.
pub async fn get_events_for_campaign(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Vec<EventRecord>> {
    let rows = sqlx::query_as::<_, EventRecord>(
        r#"
        SELECT id, event_type, campaign_id, actor, amount, payload, ledger, timestamp,
               contract_id, tx_hash, created_at
        FROM   events
        WHERE  campaign_id = ?1
        ORDER  BY ledger ASC, id ASC
        "#,
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetch all events, ordered by ledger ascending.
pub async fn get_all_events(pool: &SqlitePool) -> Result<Vec<EventRecord>> {
    let rows = sqlx::query_as::<_, EventRecord>(
        r#"
        SELECT id, event_type, campaign_id, actor, amount, payload, ledger, timestamp,
               contract_id, tx_hash, created_at
        FROM   events
        ORDER  BY ledger ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fold the indexed events of one campaign into contribution totals.
///
/// Returns `None` when nothing has been indexed for `campaign_id`.
pub async fn get_campaign_summary(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Option<CampaignSummary>> {
    let events = get_events_for_campaign(pool, campaign_id).await?;
    if events.is_empty() {
        return Ok(None);
    }
    Ok(Some(summarize(campaign_id, &events)))
}

fn summarize(campaign_id: &str, events: &[EventRecord]) -> CampaignSummary {
    let funded = EventKind::CampaignFunded.as_str();
    let activated = EventKind::CampaignActivated.as_str();

    let mut contributions = 0usize;
    let mut funders = HashSet::new();
    let mut total: i128 = 0;
    let mut active = false;

    for ev in events {
        if ev.event_type == activated {
            active = true;
        }
        if ev.event_type != funded {
            continue;
        }
        active = true;
        contributions += 1;
        if let Some(actor) = &ev.actor {
            funders.insert(actor.as_str());
        }
        match ev.amount.as_deref().map(str::parse::<i128>) {
            Some(Ok(amount)) => total = total.saturating_add(amount),
            _ => warn!(
                "Unparseable amount {:?} on event {} (campaign {campaign_id})",
                ev.amount, ev.id
            ),
        }
    }

    CampaignSummary {
        campaign_id: campaign_id.to_string(),
        contributions,
        unique_funders: funders.len(),
        total_amount: total.to_string(),
        active,
    }
}

// ─────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Single-connection in-memory pool so every query sees the same database.
    pub(crate) async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        migrate(&pool).await.unwrap();
        pool
    }

    pub(crate) fn event(
        kind: EventKind,
        campaign_id: Option<&str>,
        actor: Option<&str>,
        amount: Option<&str>,
        ledger: i64,
        tx_hash: &str,
    ) -> LedgerEvent {
        LedgerEvent {
            event_type: kind.as_str().to_string(),
            campaign_id: campaign_id.map(String::from),
            actor: actor.map(String::from),
            amount: amount.map(String::from),
            payload: None,
            ledger,
            timestamp: 1_704_067_200 + ledger,
            contract_id: "CONTRACT1".to_string(),
            tx_hash: Some(tx_hash.to_string()),
        }
    }

    #[tokio::test]
    async fn cursor_starts_at_zero_and_round_trips() {
        let pool = memory_pool().await;
        assert_eq!(get_last_ledger(&pool).await.unwrap(), 0);
        assert_eq!(get_cursor_string(&pool).await.unwrap(), None);

        save_cursor(&pool, 4242, Some("0000-1")).await.unwrap();
        assert_eq!(get_last_ledger(&pool).await.unwrap(), 4242);
        assert_eq!(
            get_cursor_string(&pool).await.unwrap().as_deref(),
            Some("0000-1")
        );
    }

    #[tokio::test]
    async fn duplicate_events_are_ignored() {
        let pool = memory_pool().await;
        let batch = vec![
            event(EventKind::LedgerInitialized, None, Some("GOWNER"), None, 1, "TX0"),
            event(EventKind::CampaignCreated, Some("0"), Some("GMANAGER"), Some("10"), 10, "TX1"),
            event(EventKind::CampaignFunded, Some("0"), Some("GF1"), Some("5"), 20, "TX2"),
        ];

        assert_eq!(insert_events(&pool, &batch).await.unwrap(), 3);
        assert_eq!(insert_events(&pool, &batch).await.unwrap(), 0);
        assert_eq!(get_all_events(&pool).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn events_without_tx_hash_are_deduplicated() {
        let pool = memory_pool().await;
        let mut init = event(EventKind::LedgerInitialized, None, Some("GOWNER"), None, 1, "TX0");
        init.tx_hash = None;
        let batch = vec![init];

        assert_eq!(insert_events(&pool, &batch).await.unwrap(), 1);
        assert_eq!(insert_events(&pool, &batch).await.unwrap(), 0);
        assert_eq!(get_all_events(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn events_are_filtered_by_campaign_and_ordered() {
        let pool = memory_pool().await;
        let batch = vec![
            event(EventKind::CampaignFunded, Some("0"), Some("GF1"), Some("5"), 30, "TX3"),
            event(EventKind::CampaignCreated, Some("1"), Some("GM"), Some("10"), 15, "TX2"),
            event(EventKind::CampaignCreated, Some("0"), Some("GM"), Some("10"), 10, "TX1"),
            event(EventKind::LedgerInitialized, None, Some("GOWNER"), None, 1, "TX0"),
        ];
        insert_events(&pool, &batch).await.unwrap();

        let campaign0 = get_events_for_campaign(&pool, "0").await.unwrap();
        assert_eq!(campaign0.len(), 2);
        assert_eq!(campaign0[0].event_type, "campaign_created");
        assert_eq!(campaign0[1].event_type, "campaign_funded");

        let all = get_all_events(&pool).await.unwrap();
        let ledgers: Vec<i64> = all.iter().map(|e| e.ledger).collect();
        assert_eq!(ledgers, vec![1, 10, 15, 30]);
    }

    #[tokio::test]
    async fn summary_counts_repeat_funders_once() {
        let pool = memory_pool().await;
        let batch = vec![
            event(EventKind::CampaignCreated, Some("0"), Some("GM"), Some("10"), 10, "TX1"),
            event(EventKind::CampaignActivated, Some("0"), None, None, 20, "TX2"),
            event(EventKind::CampaignFunded, Some("0"), Some("GF1"), Some("50000000"), 20, "TX2"),
            event(EventKind::CampaignFunded, Some("0"), Some("GF2"), Some("30000000"), 21, "TX3"),
            event(EventKind::CampaignFunded, Some("0"), Some("GF1"), Some("20000000"), 22, "TX4"),
        ];
        insert_events(&pool, &batch).await.unwrap();

        let summary = get_campaign_summary(&pool, "0").await.unwrap().unwrap();
        assert_eq!(
            summary,
            CampaignSummary {
                campaign_id: "0".to_string(),
                contributions: 3,
                unique_funders: 2,
                total_amount: "100000000".to_string(),
                active: true,
            }
        );
    }

    #[tokio::test]
    async fn summary_for_unfunded_and_unknown_campaigns() {
        let pool = memory_pool().await;
        let batch = vec![event(
            EventKind::CampaignCreated,
            Some("3"),
            Some("GM"),
            Some("10"),
            10,
            "TX1",
        )];
        insert_events(&pool, &batch).await.unwrap();

        let summary = get_campaign_summary(&pool, "3").await.unwrap().unwrap();
        assert_eq!(summary.contributions, 0);
        assert_eq!(summary.total_amount, "0");
        assert!(!summary.active);

        assert!(get_campaign_summary(&pool, "4").await.unwrap().is_none());
    }

    #[test]
    fn summary_handles_amounts_beyond_i64() {
        let big = "170141183460469231731687303715884105000";
        let record = EventRecord {
            id: 1,
            event_type: "campaign_funded".to_string(),
            campaign_id: Some("0".to_string()),
            actor: Some("GF1".to_string()),
            amount: Some(big.to_string()),
            payload: None,
            ledger: 1,
            timestamp: 0,
            contract_id: "C".to_string(),
            tx_hash: None,
            created_at: 0,
        };
        let summary = summarize("0", &[record]);
        assert_eq!(summary.total_amount, big);
    }
}
