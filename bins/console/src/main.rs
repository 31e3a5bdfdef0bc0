//! Kisti collection-sheet console.
//!
//! Fetches one collector's members for a month, runs the reconciliation
//! pass per member, and prints the collection sheet with a diagnostics
//! summary.
//!
//! Environment: `KISTI_COLLECTOR` (collector id), `KISTI_YEAR`,
//! `KISTI_MONTH`, and `KISTI_SCHEDULE` (`daily`, `weekly:<weekday>`, or
//! `monthly`), plus the `KISTI__`-prefixed configuration the shared config
//! loader reads.

use anyhow::Context;
use chrono::{Datelike, NaiveDate, Utc, Weekday};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kisti_client::ApiClient;
use kisti_core::aggregate::{AggregationService, RenderModel};
use kisti_core::attribution::MatchPolicy;
use kisti_core::calendar::{ScheduleMode, collection_dates};
use kisti_core::classify::ClassifyRules;
use kisti_shared::AppConfig;
use kisti_shared::types::{CollectorId, MemberId, PageRequest, Taka};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kisti=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    let collector = CollectorId::new(
        std::env::var("KISTI_COLLECTOR").context("KISTI_COLLECTOR must be set")?,
    );
    let today = Utc::now().date_naive();
    let year = env_or("KISTI_YEAR", today.year())?;
    let month = env_or("KISTI_MONTH", today.month())?;
    let mode = schedule_mode(std::env::var("KISTI_SCHEDULE").ok().as_deref())?;

    let columns = collection_dates(mode, year, month)
        .with_context(|| format!("No collection days for {year}-{month:02}"))?;
    info!(%collector, year, month, columns = columns.len(), "building collection sheet");

    let client = ApiClient::new(&config.api)?;
    let member_ids = all_member_ids(&client, &collector).await?;
    info!(members = member_ids.len(), "fetched member list");

    let policy = MatchPolicy::from(&config.reconcile);
    let rules = ClassifyRules::default();

    let mut bundles = client
        .fetch_member_bundles(&member_ids, config.api.fetch_concurrency)
        .await;
    bundles.sort_by(|a, b| a.0.cmp(&b.0));

    for (member_id, bundle) in bundles {
        match bundle {
            Ok(bundle) => {
                let mut model = AggregationService::aggregate(
                    &bundle.member,
                    &bundle.records,
                    &columns,
                    &policy,
                    &rules,
                );
                model.diagnostics.absorb(bundle.warnings);
                print_member(&model, &columns);
            }
            Err(err) => {
                // One member's fetch failure must not sink the sheet.
                eprintln!("!! {member_id}: {err}");
            }
        }
    }

    Ok(())
}

/// Reads a parseable environment variable with a fallback.
fn env_or<T: std::str::FromStr>(key: &str, fallback: T) -> anyhow::Result<T> {
    match std::env::var(key) {
        Err(_) => Ok(fallback),
        Ok(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{key} is not a valid value: {raw}")),
    }
}

/// Parses the schedule mode argument.
fn schedule_mode(raw: Option<&str>) -> anyhow::Result<ScheduleMode> {
    match raw {
        None | Some("daily") => Ok(ScheduleMode::Daily),
        Some("monthly") => Ok(ScheduleMode::Monthly),
        Some(other) => {
            let weekday = other
                .strip_prefix("weekly:")
                .and_then(|day| day.parse::<Weekday>().ok())
                .with_context(|| format!("Unrecognized schedule mode: {other}"))?;
            Ok(ScheduleMode::Weekly(weekday))
        }
    }
}

/// Walks the collector's member pages to the end.
async fn all_member_ids(
    client: &ApiClient,
    collector: &CollectorId,
) -> anyhow::Result<Vec<MemberId>> {
    let mut ids = Vec::new();
    let mut page = PageRequest::default();

    loop {
        let response = client
            .collector_members(collector, &page)
            .await
            .context("Failed to list collector members")?;
        ids.extend(response.data.into_iter().map(|m| MemberId::new(m.id)));

        if !response.meta.has_more() {
            return Ok(ids);
        }
        page.page += 1;
    }
}

/// Prints one member's sheet block.
fn print_member(model: &RenderModel, columns: &[NaiveDate]) {
    println!(
        "== {} ({}) \u{2014} savings {}",
        model.member_name, model.member_id, model.savings_balance
    );

    for row in &model.rows {
        let products = row.product_names.join(" + ");
        println!(
            "  [{}] {} \u{2014} total {}, paid {}, pending {} ({} installments, {:?})",
            row.dofa,
            products,
            row.total_amount,
            row.paid_amount,
            row.pending_amount,
            row.installment_count,
            row.status,
        );
        if let Some(transfer) = row.opening_transfer {
            println!("      Opening Balance (Transferred): {transfer}");
        }
        if !row.savings_in.is_zero() || !row.savings_out.is_zero() {
            println!(
                "      savings in {} / out {}",
                row.savings_in, row.savings_out
            );
        }

        for cell in &row.columns {
            if cell.is_blank() {
                continue;
            }
            println!(
                "      {}: due {} | in {} | out {}",
                cell.date.format("%m-%d"),
                fmt_cell(cell.loan),
                fmt_cell(cell.savings_in),
                fmt_cell(cell.savings_out),
            );
        }
    }

    let diag = &model.diagnostics;
    if !diag.is_clean() {
        println!(
            "  -- diagnostics: {} guard skips, {} bad dates, {} bad amounts, {} over-collections, {} ambiguous",
            diag.guard_skips,
            diag.unparseable_records,
            diag.invalid_amounts,
            diag.over_collections,
            diag.ambiguous_attributions,
        );
    }

    // A fully blank month still shows its column count for orientation.
    if model.rows.is_empty() {
        println!("  (no product rows; {} columns)", columns.len());
    }
}

/// Formats an optional cell figure; blank cells print as dashes.
fn fmt_cell(value: Option<Taka>) -> String {
    value.map_or_else(|| "\u{2014}".to_string(), |v| v.to_string())
}
