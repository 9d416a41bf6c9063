// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule-feed ingestion job.
//!
//! Invoked by an external scheduler (or by hand), queries the upstream
//! feed for every requested port pair, runs the route selector, and
//! persists the survivors as one new data version. Readers keep seeing
//! the previous complete version until the run finishes, so a slow run
//! is harmless. A fixed delay between feed requests keeps the upstream
//! happy; a full cross-product run may take minutes by design.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod feed_client;

use chrono::{Local, Utc};
use clap::Parser;
use sailplan::select_preferred_rows;
use sailplan_api::save_sailing;
use sailplan_domain::{FeedEnvelope, FeedSailing, Sailing};
use sailplan_persistence::Persistence;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

use feed_client::{FeedQuery, fetch_vessel_schedules};

/// Sailplan Ingest - imports vessel schedules from the upstream feed
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file.
    #[arg(short, long)]
    database: Option<String>,

    /// Feed endpoint URL.
    #[arg(
        long,
        default_value = "https://api.trackingeyes.com/api/schedule/vesselSchedule"
    )]
    feed_url: String,

    /// Feed access token.
    #[arg(long, default_value = "")]
    token: String,

    /// Company code the token belongs to.
    #[arg(long, default_value = "")]
    company_code: String,

    /// Port of loading code(s) to query.
    #[arg(long = "pol", required = true)]
    pol_cds: Vec<String>,

    /// Port of discharge code(s) to query.
    #[arg(long = "pod", required = true)]
    pod_cds: Vec<String>,

    /// How many days before today the schedule window starts.
    #[arg(long, default_value_t = 2)]
    days_back: i64,

    /// How many weeks ahead to query.
    #[arg(long, default_value = "6")]
    weeks_out: String,

    /// Whether to include transshipment routings ("0"/"1").
    #[arg(long, default_value = "0")]
    is_transit: String,

    /// Read feed responses from this JSON fixture instead of the network.
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Select and report without persisting anything.
    #[arg(long)]
    skip_db: bool,

    /// Delay between feed requests, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
}

/// Counters for one ingestion run.
#[derive(Debug, Default)]
struct RunReport {
    /// Port pairs processed.
    pairs: usize,
    /// Port pairs whose feed query terminally failed.
    failed_pairs: usize,
    /// Rows selected across all pairs.
    selected: usize,
    /// Sailings persisted (created or updated).
    persisted: usize,
    /// Supplements created by the reconciler fanout.
    supplements_created: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Sailplan Ingest");

    let mut persistence: Option<Persistence> = if args.skip_db {
        info!("Persistence disabled (--skip-db)");
        None
    } else {
        let db_path: &str = args
            .database
            .as_deref()
            .ok_or("--database is required unless --skip-db is set")?;
        Some(Persistence::new_with_file(db_path)?)
    };

    // One data version spans the whole run, however many pairs it covers.
    let data_version: i32 = match persistence.as_mut() {
        Some(p) => p.next_data_version()?,
        None => 0,
    };
    info!(data_version, "Allocated data version for this run");

    let fixture: Option<FeedEnvelope> = match &args.fixture {
        Some(path) => {
            let raw: String = std::fs::read_to_string(path)?;
            info!(path = %path.display(), "Using feed fixture");
            Some(serde_json::from_str(&raw)?)
        }
        None => None,
    };

    let client: reqwest::Client = reqwest::Client::new();
    let total_pairs: usize = args.pol_cds.len() * args.pod_cds.len();
    let mut report: RunReport = RunReport::default();

    for pol_cd in &args.pol_cds {
        for pod_cd in &args.pod_cds {
            report.pairs += 1;
            info!(
                pair = report.pairs,
                total = total_pairs,
                pol = %pol_cd,
                pod = %pod_cd,
                "Processing port pair"
            );

            let envelope: FeedEnvelope = match &fixture {
                Some(envelope) => envelope.clone(),
                None => {
                    let query: FeedQuery = FeedQuery {
                        url: args.feed_url.clone(),
                        token: args.token.clone(),
                        company_code: args.company_code.clone(),
                        pol_cd: pol_cd.clone(),
                        pod_cd: pod_cd.clone(),
                        days_back: args.days_back,
                        weeks_out: args.weeks_out.clone(),
                        is_transit: args.is_transit.clone(),
                    };
                    fetch_vessel_schedules(&client, &query).await?
                }
            };

            if envelope.is_ok() {
                let selected: Vec<FeedSailing> =
                    select_preferred_rows(envelope.result, Some(pod_cd));
                report.selected += selected.len();
                info!(pol = %pol_cd, pod = %pod_cd, selected = selected.len(), "Selected rows");

                if let Some(p) = persistence.as_mut() {
                    persist_selected(p, selected, data_version, &mut report);
                } else {
                    for row in &selected {
                        info!(
                            vessel = row.vessel.as_deref().unwrap_or("-"),
                            voyage = row.voyage.as_deref().unwrap_or("-"),
                            carrier = row.carrier_cd.as_deref().unwrap_or("-"),
                            "Would persist"
                        );
                    }
                }
            } else {
                // One pair's failure abandons that pair only.
                report.failed_pairs += 1;
                error!(
                    pol = %pol_cd,
                    pod = %pod_cd,
                    code = envelope.code,
                    message = envelope.message.as_deref().unwrap_or(""),
                    "Feed query failed after retries; continuing with next pair"
                );
            }

            if report.pairs < total_pairs {
                tokio::time::sleep(Duration::from_millis(args.delay_ms)).await;
            }
        }
    }

    info!(
        pairs = report.pairs,
        failed_pairs = report.failed_pairs,
        selected = report.selected,
        persisted = report.persisted,
        supplements_created = report.supplements_created,
        data_version,
        "Ingestion run finished"
    );

    Ok(())
}

/// Persists one pair's selected rows and fans out their supplements.
fn persist_selected(
    persistence: &mut Persistence,
    selected: Vec<FeedSailing>,
    data_version: i32,
    report: &mut RunReport,
) {
    let fetch_timestamp: i64 = Utc::now().timestamp();
    let fetch_date: String = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    for row in selected {
        let sailing: Sailing = row.into_sailing(data_version, fetch_timestamp, &fetch_date);
        match save_sailing(persistence, &sailing) {
            Ok((_, counts)) => {
                report.persisted += 1;
                report.supplements_created += counts.created;
            }
            Err(e) => {
                // Keep going; the row can be re-imported on the next run.
                warn!(
                    error = %e,
                    vessel = %sailing.vessel,
                    voyage = %sailing.voyage,
                    "Failed to persist selected sailing"
                );
            }
        }
    }
}
