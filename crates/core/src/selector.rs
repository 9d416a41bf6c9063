// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ingestion-side selection of at most one feed row per vessel/voyage.

use sailplan_domain::FeedSailing;
use std::collections::HashMap;

/// Selects the preferred candidate rows from one feed response.
///
/// Rows are first filtered to the requested destination; the feed may
/// answer with a default destination differing from the request, and when
/// no destination was requested the first row's is taken as authoritative.
/// The survivors are partitioned by `(vessel, voyage)` and each partition
/// contributes at most one row:
///
/// 1. the first row flagged as reference carrier with exactly one
///    cooperation entry, else
/// 2. the first row flagged as reference carrier, else
/// 3. nothing — the partition is dropped from the import.
///
/// Partitions keep the feed's ordering, so "first" is feed order.
#[must_use]
pub fn select_preferred_rows(
    rows: Vec<FeedSailing>,
    requested_pod_cd: Option<&str>,
) -> Vec<FeedSailing> {
    let pod_cd: Option<String> = requested_pod_cd
        .map(str::to_string)
        .or_else(|| rows.first().and_then(|row| row.pod_cd.clone()));

    let filtered: Vec<FeedSailing> = rows
        .into_iter()
        .filter(|row| row.pod_cd == pod_cd)
        .collect();

    // Partition by (vessel, voyage), preserving first-seen partition order.
    let mut partitions: Vec<Vec<FeedSailing>> = Vec::new();
    let mut index_by_key: HashMap<(String, String), usize> = HashMap::new();
    for row in filtered {
        let key: (String, String) = (
            row.vessel.clone().unwrap_or_default(),
            row.voyage.clone().unwrap_or_default(),
        );
        if let Some(&index) = index_by_key.get(&key) {
            partitions[index].push(row);
        } else {
            index_by_key.insert(key, partitions.len());
            partitions.push(vec![row]);
        }
    }

    partitions
        .into_iter()
        .filter_map(select_from_partition)
        .collect()
}

fn select_from_partition(rows: Vec<FeedSailing>) -> Option<FeedSailing> {
    if let Some(index) = rows
        .iter()
        .position(|row| row.is_reference() && row.share_cabin_count() == 1)
    {
        return rows.into_iter().nth(index);
    }
    let index: usize = rows.iter().position(FeedSailing::is_reference)?;
    rows.into_iter().nth(index)
}
