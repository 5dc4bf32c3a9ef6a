use fan_replacement_sim::model::distribution::DistributionTable;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use statrs::distribution::{ChiSquared, ContinuousCDF};

const DRAWS: usize = 100_000;

/// Pearson chi-square statistic of `DRAWS` samples against the table.
fn chi_square(table: &DistributionTable, seed: u64) -> f64 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut counts = vec![0usize; table.len()];
    for _ in 0..DRAWS {
        let value = table.sample(&mut rng).unwrap();
        let index = table.values().iter().position(|&v| v == value).unwrap();
        counts[index] += 1;
    }

    counts
        .iter()
        .zip(table.probabilities())
        .map(|(&observed, &p)| {
            let expected = p * DRAWS as f64;
            (observed as f64 - expected).powi(2) / expected
        })
        .sum()
}

fn critical_value(categories: usize) -> f64 {
    ChiSquared::new((categories - 1) as f64)
        .unwrap()
        .inverse_cdf(0.9999)
}

#[test]
fn lifetime_sampling_fits_table() {
    let table = DistributionTable::fan_lifetimes().unwrap();
    let stat = chi_square(&table, 42);
    assert!(stat < critical_value(table.len()), "chi-square {stat}");
}

#[test]
fn delay_sampling_fits_table() {
    let table = DistributionTable::arrival_delays().unwrap();
    let stat = chi_square(&table, 42);
    assert!(stat < critical_value(table.len()), "chi-square {stat}");
}

#[test]
fn empirical_delay_mean_matches_expectation() {
    let table = DistributionTable::arrival_delays().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let total: f64 = (0..DRAWS).map(|_| table.sample(&mut rng).unwrap()).sum();
    let mean = total / DRAWS as f64;
    assert!((mean - table.expected_value()).abs() < 0.2, "mean {mean}");
}
