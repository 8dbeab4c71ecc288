//! Order-preserving batch processing.
//!
//! Empty texts never reach the model: they get a placeholder doc instead, and
//! both halves are merged back by their original index.

use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{BatchInferer, Doc, ModelError};

/// `(original index, preprocessed text)`.
pub type Sample = (usize, String);

/// `(original index, doc)`.
pub type ProcessedSample = (usize, Doc);

/// Splits samples into `(content_bearing, empty)`, keeping relative order in each.
pub fn partition_by_content(samples: Vec<Sample>) -> (Vec<Sample>, Vec<Sample>) {
    samples.into_iter().partition(|(_, text)| !text.is_empty())
}

/// Runs content-bearing samples through the model's batch call.
///
/// Fails with [`ModelError::BatchSizeMismatch`] if the model does not return
/// exactly one doc per text.
pub fn process_content_bearing(
    model: &dyn BatchInferer,
    samples: &[Sample],
    batch_size: usize,
) -> Result<Vec<ProcessedSample>, ModelError> {
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let texts: Vec<&str> = samples.iter().map(|(_, text)| text.as_str()).collect();
    let docs = model.pipe(&texts, batch_size)?;

    if docs.len() != samples.len() {
        return Err(ModelError::BatchSizeMismatch {
            expected: samples.len(),
            actual: docs.len(),
        });
    }

    Ok(samples.iter().map(|(idx, _)| *idx).zip(docs).collect())
}

/// One placeholder doc per empty sample.
pub fn process_empty(model: &dyn BatchInferer, samples: &[Sample]) -> Vec<ProcessedSample> {
    samples
        .iter()
        .map(|(idx, _)| (*idx, model.empty_doc()))
        .collect()
}

/// Unions processed samples by index and returns them in ascending index order.
pub fn merge_in_order(processed: Vec<ProcessedSample>) -> Vec<ProcessedSample> {
    processed
        .into_iter()
        .collect::<BTreeMap<usize, Doc>>()
        .into_iter()
        .collect()
}

/// Partition, process both halves, merge back into input order.
pub fn reorder_batch(
    model: &dyn BatchInferer,
    batch: Vec<Sample>,
    batch_size: usize,
) -> Result<Vec<ProcessedSample>, ModelError> {
    let (content_bearing, empty) = partition_by_content(batch);
    debug!(
        content_bearing = content_bearing.len(),
        empty = empty.len(),
        "Processing batch"
    );

    let mut processed = process_content_bearing(model, &content_bearing, batch_size)?;
    processed.extend(process_empty(model, &empty));

    Ok(merge_in_order(processed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MockInferer;

    fn samples(texts: &[&str]) -> Vec<Sample> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| (i, t.to_string()))
            .collect()
    }

    #[test]
    fn test_partition_example() {
        let (content, empty) = partition_by_content(samples(&["hello", "", "world"]));
        assert_eq!(
            content,
            vec![(0, "hello".to_string()), (2, "world".to_string())]
        );
        assert_eq!(empty, vec![(1, String::new())]);
    }

    #[test]
    fn test_partition_is_stable() {
        let (content, empty) = partition_by_content(samples(&["", "c", "", "a", "b", ""]));
        let content_idx: Vec<usize> = content.iter().map(|(i, _)| *i).collect();
        let empty_idx: Vec<usize> = empty.iter().map(|(i, _)| *i).collect();
        assert_eq!(content_idx, vec![1, 3, 4]);
        assert_eq!(empty_idx, vec![0, 2, 5]);
    }

    #[test]
    fn test_reorder_example_batch() {
        let model = MockInferer::new("en");
        let out = reorder_batch(&model, samples(&["hello", "", "world"]), 50).unwrap();

        let indices: Vec<usize> = out.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(out[0].1.text(), "hello");
        assert!(out[1].1.is_empty());
        assert_eq!(out[1].1, model.empty_doc());
        assert_eq!(out[2].1.text(), "world");

        assert_eq!(model.batches(), vec![vec!["hello", "world"]]);
    }

    #[test]
    fn test_reorder_preserves_order_for_every_split() {
        let model = MockInferer::new("en");
        let words = ["a", "b", "c", "d", "e"];

        // Every empty/non-empty mask over five samples.
        for mask in 0u32..(1 << words.len()) {
            let texts: Vec<&str> = words
                .iter()
                .enumerate()
                .map(|(i, w)| if mask & (1 << i) != 0 { *w } else { "" })
                .collect();

            let out = reorder_batch(&model, samples(&texts), 2).unwrap();
            assert_eq!(out.len(), texts.len());
            for (i, (idx, doc)) in out.iter().enumerate() {
                assert_eq!(*idx, i);
                assert_eq!(doc.text(), texts[i], "mask {mask:#07b}");
            }
        }
    }

    #[test]
    fn test_all_empty_skips_model() {
        let model = MockInferer::new("en");
        let out = reorder_batch(&model, samples(&["", ""]), 50).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|(_, doc)| doc.is_empty()));
        assert!(model.batches().is_empty());
    }

    #[test]
    fn test_empty_batch() {
        let model = MockInferer::new("en");
        assert!(reorder_batch(&model, Vec::new(), 50).unwrap().is_empty());
    }

    #[test]
    fn test_count_mismatch_is_an_error() {
        let model = MockInferer::new("en").dropping_last();
        let err = reorder_batch(&model, samples(&["hello", "", "world"]), 50).unwrap_err();
        assert!(matches!(
            err,
            ModelError::BatchSizeMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_merge_sorts_by_index() {
        let model = MockInferer::new("en");
        let merged = merge_in_order(vec![
            (2, model.doc("c").unwrap()),
            (0, model.doc("a").unwrap()),
            (1, model.empty_doc()),
        ]);
        let texts: Vec<&str> = merged.iter().map(|(_, d)| d.text()).collect();
        assert_eq!(texts, vec!["a", "", "c"]);
    }
}
