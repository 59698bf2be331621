/// Data layer: the labeled dataset, selections over it, and the statistics
/// used to collapse it.
///
/// Architecture:
/// ```text
///   ┌────────────────┐
///   │ LabeledDataset │  coordinates + named components + meta
///   └────────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ selection │  predicate → boolean mask (true = selected)
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ statistic │  collapse non-spectral axes → 1-D profile
///   └───────────┘
/// ```

pub mod model;
pub mod selection;
pub mod statistic;
