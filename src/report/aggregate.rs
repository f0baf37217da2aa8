use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use super::catalog::{AggregationStrategy, MetricColumn};
use super::period::{bucket_date, Cadence};
use super::types::Observation;

/// Buckets observations by period and reduces each (period, column) group
/// with the column's catalog strategy. Periods appear only when at least one
/// observation landed in them; a column with no samples in a period stays
/// `None` rather than becoming zero.
pub fn aggregate(
    observations: &[Observation],
    columns: &[MetricColumn],
    cadence: Cadence,
) -> BTreeMap<NaiveDate, Vec<Option<f64>>> {
    let mut groups: BTreeMap<NaiveDate, Vec<Vec<(DateTime<Utc>, f64)>>> = BTreeMap::new();
    for obs in observations {
        let period = bucket_date(obs.at, cadence);
        let row = groups
            .entry(period)
            .or_insert_with(|| vec![Vec::new(); columns.len()]);
        row[obs.column].push((obs.at, obs.value));
    }

    groups
        .into_iter()
        .map(|(period, samples)| {
            let cells = columns
                .iter()
                .zip(&samples)
                .map(|(column, group)| reduce_group(column.strategy, group))
                .collect();
            (period, cells)
        })
        .collect()
}

fn reduce_group(strategy: AggregationStrategy, samples: &[(DateTime<Utc>, f64)]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    match strategy {
        AggregationStrategy::Mean => {
            Some(samples.iter().map(|(_, v)| v).sum::<f64>() / samples.len() as f64)
        }
        AggregationStrategy::Max => samples.iter().map(|(_, v)| *v).reduce(f64::max),
        AggregationStrategy::Latest => {
            let mut best = samples[0];
            for sample in &samples[1..] {
                if sample.0 > best.0 {
                    best = *sample;
                }
            }
            Some(best.1)
        }
        AggregationStrategy::DeltaSum => Some(samples.iter().map(|(_, v)| v).sum()),
    }
}
