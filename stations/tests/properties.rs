use std::collections::BTreeMap;

use stations::{AggregateOptions, Aggregator, SliceLines, aggregate_bytes, emit};

/// Deterministic input with junk lines mixed in. Returns the input and the
/// values each station should have seen.
fn synthetic_input(rows: usize) -> (Vec<u8>, BTreeMap<Vec<u8>, Vec<f64>>) {
    const NAMES: [&str; 12] = [
        "Abha", "Accra", "Bergen", "Berlin", "Bilbao", "Kraków", "Napier", "Napoli", "São Paulo",
        "Tromsø", "Zürich", "Z",
    ];
    let mut state: u64 = 0x9e3779b97f4a7c15;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut input = Vec::new();
    let mut truth: BTreeMap<Vec<u8>, Vec<f64>> = BTreeMap::new();
    for i in 0..rows {
        let r = next();
        if i % 97 == 13 {
            input.extend_from_slice(b"no delimiter here\n");
            continue;
        }
        if i % 89 == 5 {
            input.extend_from_slice(b"Accra;n/a\n");
            continue;
        }
        let name = NAMES[(r % NAMES.len() as u64) as usize];
        let tenths = ((r >> 16) % 1999) as i64 - 999;
        let text = format!("{}.{}", tenths / 10, (tenths % 10).abs());
        let text = if tenths < 0 && tenths > -10 { format!("-{text}") } else { text };
        let value: f64 = text.parse().unwrap();
        input.extend_from_slice(format!("{name};{text}\n").as_bytes());
        truth.entry(name.as_bytes().to_vec()).or_default().push(value);
    }
    (input, truth)
}

fn parse_report(report: &str) -> Vec<(String, f64, f64, f64)> {
    report
        .lines()
        .map(|line| {
            let (key, nums) = line.rsplit_once('=').unwrap();
            let parts: Vec<f64> = nums.split('/').map(|p| p.parse().unwrap()).collect();
            assert_eq!(parts.len(), 3, "bad line {line}");
            (key.to_string(), parts[0], parts[1], parts[2])
        })
        .collect()
}

#[test]
fn report_matches_brute_force() {
    let (input, truth) = synthetic_input(20_000);
    let report = aggregate_bytes(&input, AggregateOptions::with_capacity(32)).unwrap();
    let rows = parse_report(&report);

    let keys: Vec<&[u8]> = rows.iter().map(|r| r.0.as_bytes()).collect();
    let want: Vec<&[u8]> = truth.keys().map(|k| k.as_slice()).collect();
    assert_eq!(keys, want);

    for ((key, min, mean, max), values) in rows.iter().zip(truth.values()) {
        let true_min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let true_max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let true_mean = values.iter().sum::<f64>() / values.len() as f64;

        assert_eq!(*min, true_min, "min for {key}");
        assert_eq!(*max, true_max, "max for {key}");
        assert!((mean - true_mean).abs() <= 0.05 + 1e-9, "mean for {key}");
        assert!(min <= mean && mean <= max, "ordering for {key}");
    }
}

#[test]
fn output_is_strictly_ascending() {
    let (input, _) = synthetic_input(5_000);
    let report = aggregate_bytes(&input, AggregateOptions::default()).unwrap();
    let keys: Vec<Vec<u8>> = report
        .lines()
        .map(|l| l.rsplit_once('=').unwrap().0.as_bytes().to_vec())
        .collect();
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn aggregation_is_idempotent() {
    let (input, _) = synthetic_input(5_000);
    let a = aggregate_bytes(&input, AggregateOptions::default()).unwrap();
    let b = aggregate_bytes(&input, AggregateOptions::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn skipped_lines_are_counted() {
    let (input, truth) = synthetic_input(1_000);
    let mut agg = Aggregator::new(AggregateOptions::with_capacity(16));
    let summary = agg.consume(&mut SliceLines::new(&input)).unwrap();

    let valid: usize = truth.values().map(Vec::len).sum();
    assert_eq!(summary.lines, 1_000);
    assert_eq!(summary.aggregated, valid as u64);
    assert_eq!(summary.skipped(), 1_000 - valid as u64);
    assert_eq!(agg.table().len(), truth.len());
    assert_eq!(emit::sorted_entries(agg.table()).len(), truth.len());
}
