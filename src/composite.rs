use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::Dataset;
use crate::data::naming::{DatasetRole, PlotDataName};
use crate::data::stats::SampleSummary;

// ---------------------------------------------------------------------------
// CompositeSet – the correlated datasets of one test case
// ---------------------------------------------------------------------------

/// A theoretical density together with two sample populations: one drawn
/// from the density itself and one bootstrapped from the empirical
/// distribution.
#[derive(Debug, Clone, Copy)]
pub struct CompositeSet<'a> {
    pub test_case: &'a str,
    pub main: &'a Dataset,
    pub empirical_main: &'a Dataset,
    pub empirical_bootstrap: &'a Dataset,
}

/// Side-by-side statistics of the two sample populations of a [`CompositeSet`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleComparison {
    pub test_case: String,
    pub curve_points: usize,
    pub empirical_main: SampleSummary,
    pub empirical_bootstrap: SampleSummary,
    /// `|mean(empirical_main) - mean(empirical_bootstrap)|`
    pub mean_difference: f64,
}

impl<'a> CompositeSet<'a> {
    /// `None` when either sample population is empty.
    pub fn compare(&self) -> Option<SampleComparison> {
        let empirical_main = SampleSummary::from_samples(self.empirical_main.empirical_samples())?;
        let empirical_bootstrap =
            SampleSummary::from_samples(self.empirical_bootstrap.empirical_samples())?;

        Some(SampleComparison {
            test_case: self.test_case.to_string(),
            curve_points: self.main.theoretical_len(),
            mean_difference: (empirical_main.mean - empirical_bootstrap.mean).abs(),
            empirical_main,
            empirical_bootstrap,
        })
    }
}

/// Members of one test case, keyed by role.
type Members<'a> = BTreeMap<DatasetRole, &'a Dataset>;

/// Collect complete main / empirical_main / empirical_bootstrap triples,
/// ordered by test case. Standalone datasets and incomplete groups are left out.
pub fn group<'a, I>(items: I) -> Vec<CompositeSet<'a>>
where
    I: IntoIterator<Item = (&'a PlotDataName, &'a Dataset)>,
{
    let mut by_case: BTreeMap<&'a str, Members<'a>> = BTreeMap::new();

    let members_only = items
        .into_iter()
        .filter(|(name, _)| name.role != DatasetRole::Standalone);

    for (name, dataset) in members_only {
        let members = by_case.entry(name.test_case.as_str()).or_default();
        if members.insert(name.role, dataset).is_some() {
            log::warn!(
                "Duplicate {} dataset for test case {}; keeping the last one",
                name.role,
                name.test_case
            );
        }
    }

    by_case
        .into_iter()
        .filter_map(|(test_case, m)| {
            let role = |r: DatasetRole| m.get(&r).copied();
            match (
                role(DatasetRole::Main),
                role(DatasetRole::EmpiricalMain),
                role(DatasetRole::EmpiricalBootstrap),
            ) {
                (Some(main), Some(empirical_main), Some(empirical_bootstrap)) => {
                    Some(CompositeSet {
                        test_case,
                        main,
                        empirical_main,
                        empirical_bootstrap,
                    })
                }
                _ => {
                    log::debug!("Test case {test_case} has no complete composite set");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::DatasetBuilder;

    fn named(test_case: &str, role: DatasetRole) -> PlotDataName {
        PlotDataName {
            test_case: test_case.to_string(),
            role,
        }
    }

    fn with_samples(title: &str, samples: &[f64]) -> Dataset {
        let mut builder = DatasetBuilder::new(title);
        builder.push_point(0.0, 0.4);
        for &s in samples {
            builder.push_sample(s);
        }
        builder.build()
    }

    #[test]
    fn groups_complete_triples_in_test_case_order() {
        let items = vec![
            (named("3.3.2", DatasetRole::EmpiricalBootstrap), with_samples("b", &[1.0, 3.0])),
            (named("3.3.2", DatasetRole::Main), with_samples("m", &[])),
            (named("3.1.1", DatasetRole::Standalone), with_samples("s", &[0.0])),
            (named("3.3.2", DatasetRole::EmpiricalMain), with_samples("e", &[0.0, 1.0])),
            (named("4.0", DatasetRole::Main), with_samples("lonely", &[])),
        ];

        let sets = group(items.iter().map(|(n, d)| (n, d)));
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].test_case, "3.3.2");
        assert_eq!(sets[0].main.title(), "m");
        assert_eq!(sets[0].empirical_main.title(), "e");
        assert_eq!(sets[0].empirical_bootstrap.title(), "b");
    }

    #[test]
    fn standalone_files_never_form_a_group_and_duplicates_keep_the_last() {
        let items = vec![
            (named("3.3.2", DatasetRole::Standalone), with_samples("s", &[0.0])),
            (named("3.3.2", DatasetRole::Main), with_samples("m1", &[])),
            (named("3.3.2", DatasetRole::Main), with_samples("m2", &[])),
            (named("3.3.2", DatasetRole::EmpiricalMain), with_samples("e", &[0.0])),
            (named("3.3.2", DatasetRole::EmpiricalBootstrap), with_samples("b", &[0.0])),
        ];

        let sets = group(items.iter().map(|(n, d)| (n, d)));
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].main.title(), "m2");

        let only_standalone = vec![(named("3.1.1", DatasetRole::Standalone), with_samples("s", &[]))];
        assert!(group(only_standalone.iter().map(|(n, d)| (n, d))).is_empty());
    }

    #[test]
    fn compare_reports_mean_difference() {
        let main = with_samples("m", &[]);
        let empirical_main = with_samples("e", &[0.0, 1.0]);
        let empirical_bootstrap = with_samples("b", &[1.0, 3.0]);
        let set = CompositeSet {
            test_case: "3.3.2",
            main: &main,
            empirical_main: &empirical_main,
            empirical_bootstrap: &empirical_bootstrap,
        };

        let cmp = set.compare().unwrap();
        assert_eq!(cmp.test_case, "3.3.2");
        assert_eq!(cmp.curve_points, 1);
        assert_eq!(cmp.empirical_main.mean, 0.5);
        assert_eq!(cmp.empirical_bootstrap.mean, 2.0);
        assert_eq!(cmp.mean_difference, 1.5);
    }

    #[test]
    fn compare_needs_both_populations() {
        let main = with_samples("m", &[]);
        let empty = with_samples("e", &[]);
        let full = with_samples("b", &[1.0]);
        let set = CompositeSet {
            test_case: "x",
            main: &main,
            empirical_main: &empty,
            empirical_bootstrap: &full,
        };
        assert!(set.compare().is_none());
    }
}
