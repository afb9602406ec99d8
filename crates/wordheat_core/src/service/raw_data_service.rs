//! Raw data stages: download and label extraction.

use super::StageResult;
use crate::fetch::{FetchConfig, RawDataClient};
use crate::model::raw::LabelGraph;
use crate::store::{read_json, write_json, write_lines, JsonIndent};
use crate::transform::labels::extract_labels;
use log::info;
use std::path::Path;

/// Downloads the raw graph and stores it verbatim at `output`.
///
/// Nothing is written when the request, status check or decode fails.
pub fn fetch_raw_data_file(config: FetchConfig, output: impl AsRef<Path>) -> StageResult<()> {
    let output = output.as_ref();
    let client = RawDataClient::new(config)?;
    let document = client.fetch()?;
    write_json(output, &document, JsonIndent::Four)?;
    info!(
        "event=raw_fetch_saved module=service status=ok path={}",
        output.display()
    );
    Ok(())
}

/// Writes normalized labels of `input` to `output`, one per line.
///
/// Returns the number of labels written.
pub fn extract_labels_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> StageResult<usize> {
    let graph: LabelGraph = read_json(input)?;
    let labels = extract_labels(&graph);
    write_lines(output.as_ref(), &labels)?;
    info!(
        "event=labels_extract module=service status=ok labels={} path={}",
        labels.len(),
        output.as_ref().display()
    );
    Ok(labels.len())
}
