use crate::params::{ParameterSpace, WalkParams, NUM_COMBINATIONS};
use crate::record::{HistogramRow, NUM_BINS};
use crate::search::{QuantumWalkSearch, SearchConfig};
use crate::sweep::{run_sweep, simulate_row, verify_file, SweepConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn search() -> QuantumWalkSearch {
        QuantumWalkSearch::new(SearchConfig::default()).unwrap()
    }

    #[test]
    fn test_rows_match_nested_loop_order() {
        // Rebuild the first rows the way the nested aux/coin/node/theta/target loop names them.
        let mut expected = Vec::new();
        'outer: for g in 0..2 {
            for h in 0..4 {
                for i in 0..16 {
                    for j in 0..16 {
                        for k in 0..16 {
                            expected.push(format!(
                                "{:01b} {:02b} {:04b} {:04b}   {:04b}   ",
                                g, h, i, j, k
                            ));
                            if expected.len() == 600 {
                                break 'outer;
                            }
                        }
                    }
                }
            }
        }
        let rows: Vec<WalkParams> = ParameterSpace::full().iter().take(600).collect();
        for (params, prefix) in rows.iter().zip(expected.iter()) {
            let row = HistogramRow {
                params: *params,
                bins: [0; NUM_BINS],
                width: 4,
            };
            assert!(row.to_string().starts_with(prefix.as_str()), "{} vs {}", row, prefix);
        }
    }

    #[test]
    fn test_marked_node_distribution_is_translation_invariant() {
        // From the all-zero register the only thing that breaks the hypercube's
        // XOR symmetry is the marked node, so moving the mark permutes the outcome.
        let search = search();
        let base = search
            .node_distribution(&WalkParams::parse("0", "00", "0000", "0000", "0000").unwrap())
            .unwrap();
        for target in [0b0001usize, 0b0110, 0b1011] {
            let p = WalkParams::parse("0", "00", "0000", "0000", &format!("{:04b}", target)).unwrap();
            let dist = search.node_distribution(&p).unwrap();
            for y in 0..16 {
                assert!(
                    (dist[y] - base[y ^ target]).abs() < 1e-9,
                    "target {:04b} outcome {:04b}",
                    target,
                    y
                );
            }
        }
    }

    #[test]
    fn test_sampled_rows_sum_to_shots() {
        let search = search();
        for index in (0..NUM_COMBINATIONS).step_by(2731) {
            let row = simulate_row(&search, Some(99), index).unwrap();
            assert_eq!(row.total(), 1024, "row {}", row);
            assert_eq!(row.params.index(), index);
            assert_eq!(HistogramRow::parse(&row.to_string(), 1).unwrap(), row);
        }
    }

    #[test]
    fn test_sweep_output_matches_row_by_row_simulation() {
        // run_sweep fans chunks out over rayon with the parallel feature;
        // simulating each combination in order must give the same bytes.
        let dir = tempfile::tempdir().unwrap();
        let config = SweepConfig {
            output: dir.path().join("data.out"),
            seed: Some(3),
            space: ParameterSpace::range(4000, 4024).unwrap(),
            chunk_size: 7,
            ..SweepConfig::default()
        };
        run_sweep(&config).unwrap();

        let search = QuantumWalkSearch::new(config.search.clone()).unwrap();
        let serial: String = config
            .space
            .indices()
            .map(|k| format!("{}\n", simulate_row(&search, config.seed, k).unwrap()))
            .collect();
        assert_eq!(fs::read_to_string(&config.output).unwrap(), serial);
    }

    #[test]
    fn test_sweep_of_one_block_passes_verification_at_default_shots() {
        let dir = tempfile::tempdir().unwrap();
        let config = SweepConfig {
            output: dir.path().join("data.out"),
            seed: Some(1),
            space: ParameterSpace::range(0, 16).unwrap(),
            ..SweepConfig::default()
        };
        run_sweep(&config).unwrap();

        let report = verify_file(&config.output, 1024, &config.space).unwrap();
        assert!(report.is_ok(), "{}", report);

        // all-zero register, target k: the k-th column dominates the k-th row
        let text = fs::read_to_string(&config.output).unwrap();
        for (k, line) in text.lines().enumerate() {
            let row = HistogramRow::parse(line, k + 1).unwrap();
            let best = (0..NUM_BINS).max_by_key(|&b| row.bins[b]).unwrap();
            assert_eq!(best, k, "row {}", line);
        }
    }
}
