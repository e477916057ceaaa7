use super::Timing;
use crate::error::Result;
use crate::timing::measure;
use esbench_client::{EsClient, Query};

pub const LETTERS: std::ops::RangeInclusive<char> = 'a'..='z';

pub const STEP_MATCH_ALL: &str = "search match_all";
pub const STEP_QUERY_STRING: &str = "search 'hey'";
pub const STEP_LETTERS: &str = "search letters";

/// One `match_all`, one query string search, then `rounds` passes of
/// single-letter query string searches `a` through `z`.
pub fn search_workload(client: &EsClient, index: &str, rounds: usize) -> Result<Vec<Timing>> {
    let mut timings = Vec::with_capacity(3);

    let (response, elapsed) = measure(|| client.search(index, &Query::MatchAll));
    let response = response?;
    tracing::info!(index, hits = response.total(), "match_all");
    timings.push(Timing::new(STEP_MATCH_ALL, 1, elapsed));

    let (response, elapsed) = measure(|| client.search(index, &Query::string("hey")));
    response?;
    timings.push(Timing::new(STEP_QUERY_STRING, 1, elapsed));

    let (searched, elapsed) = measure(|| -> Result<u64> {
        let mut searches = 0;
        for _ in 0..rounds {
            for letter in LETTERS {
                client.search(index, &Query::string(letter.to_string()))?;
                searches += 1;
            }
        }
        Ok(searches)
    });
    timings.push(Timing::new(STEP_LETTERS, searched?, elapsed));

    Ok(timings)
}
