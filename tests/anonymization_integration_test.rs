//! Integration tests for the table path of the anonymization engine

use fake::faker::address::en::CityName;
use fake::faker::name::en::Name;
use fake::Fake;
use veil::anonymization::{AnonymizationConfig, AnonymizationEngine, Technique};
use veil::domain::{Granularity, Table, TrustLevel, Value};

fn engine() -> AnonymizationEngine {
    AnonymizationEngine::with_seed(AnonymizationConfig::default(), 42).unwrap()
}

fn engine_with(configure: impl FnOnce(&mut AnonymizationConfig)) -> AnonymizationEngine {
    let mut config = AnonymizationConfig::default();
    configure(&mut config);
    AnonymizationEngine::with_seed(config, 42).unwrap()
}

fn people(rows: usize) -> Table {
    let mut table = Table::new(["name", "city", "age"]).unwrap();
    for i in 0..rows {
        let name: String = Name().fake();
        let city: String = CityName().fake();
        table
            .push_row(vec![
                Value::from(name),
                Value::from(city),
                Value::from(20 + i as i64),
            ])
            .unwrap();
    }
    table
}

fn single_column(values: &[f64]) -> Table {
    Table::with_rows(["v"], values.iter().map(|&v| vec![Value::from(v)]).collect()).unwrap()
}

#[test]
fn test_no_transformation_first_returns_input() {
    let table = people(5);
    for granularity in Granularity::ALL {
        let result = engine().anonymize(
            &table,
            &[Technique::NoTransformation, Technique::FullMasking],
            granularity,
            TrustLevel::High,
        );
        assert_eq!(result.table, table);
        assert_eq!(result.applied_strategy, Some(Technique::NoTransformation));
    }
}

#[test]
fn test_full_masking_is_idempotent() {
    let table = people(8);
    let mut engine = engine();
    for granularity in [Granularity::Column, Granularity::Table] {
        let once = engine.anonymize(&table, &[Technique::FullMasking], granularity, TrustLevel::Low);
        let twice =
            engine.anonymize(&once.table, &[Technique::FullMasking], granularity, TrustLevel::Low);
        assert_eq!(once.table, twice.table);
        assert_ne!(once.table, table);
    }
}

#[test]
fn test_column_full_masking_keeps_lengths() {
    let table = people(4);
    let result = engine().anonymize(
        &table,
        &[Technique::FullMasking],
        Granularity::Column,
        TrustLevel::Low,
    );

    for row in 0..table.row_count() {
        let before = table.get(row, 0).and_then(Value::as_text).unwrap();
        let after = result.table.get(row, 0).and_then(Value::as_text).unwrap();
        assert_eq!(after.chars().count(), before.chars().count());
        assert!(after.chars().all(|c| c == '*'));
    }
}

#[test]
fn test_failed_candidate_leaves_no_partial_mutation() {
    // The first column receives noise, the wide second column overflows the
    // noise scale and fails the whole attempt
    let table = Table::with_rows(
        ["a", "b"],
        vec![
            vec![Value::from(1), Value::from(0)],
            vec![Value::from(1), Value::from(1e20)],
        ],
    )
    .unwrap();
    let mut engine = engine_with(|config| config.techniques.epsilon = 1e-300);

    let failed = engine.anonymize(
        &table,
        &[Technique::NoiseInjection],
        Granularity::Column,
        TrustLevel::High,
    );
    assert_eq!(failed.applied_strategy, None);
    assert_eq!(failed.table, table);

    let recovered = engine.anonymize(
        &table,
        &[Technique::NoiseInjection, Technique::FullMasking],
        Granularity::Column,
        TrustLevel::High,
    );
    let masked_only = engine.anonymize(
        &table,
        &[Technique::FullMasking],
        Granularity::Column,
        TrustLevel::High,
    );
    assert_eq!(recovered.applied_strategy, Some(Technique::FullMasking));
    assert_eq!(recovered.table, masked_only.table);
}

#[test]
fn test_first_failure_then_success() {
    let table = people(3);

    // Binning has no table-level form
    let result = engine().anonymize(
        &table,
        &["binning", "partial_masking"],
        Granularity::Table,
        TrustLevel::Moderate,
    );
    assert_eq!(result.applied_strategy, Some(Technique::PartialMasking));

    let name = table.get(0, 0).and_then(Value::as_text).unwrap();
    let masked = result.table.get(0, 0).and_then(Value::as_text).unwrap();
    let hidden = name.chars().count() / 2;
    assert!(masked.chars().take(hidden).all(|c| c == '*'));
    assert_eq!(
        masked.chars().skip(hidden).collect::<String>(),
        name.chars().skip(hidden).collect::<String>()
    );
}

#[test]
fn test_only_first_success_is_applied() {
    let table = single_column(&[12.0, 27.0]);
    let result = engine().anonymize(
        &table,
        &[Technique::Binning, Technique::FullMasking],
        Granularity::Column,
        TrustLevel::Low,
    );
    assert_eq!(result.applied_strategy, Some(Technique::Binning));
    assert_eq!(result.table, single_column(&[10.0, 20.0]));
}

#[test]
fn test_binning_multiples_are_unchanged() {
    let table = single_column(&[10.0, 20.0, 30.0, 40.0]);
    let result = engine().anonymize(
        &table,
        &[Technique::Binning],
        Granularity::Column,
        TrustLevel::Moderate,
    );
    assert_eq!(result.applied_strategy, Some(Technique::Binning));
    assert_eq!(result.table, table);
}

#[test]
fn test_partial_masking_zip_codes() {
    let table = Table::with_rows(
        ["zip"],
        vec![vec![Value::from("12345")], vec![Value::from("67890")]],
    )
    .unwrap();
    let result = engine().anonymize(
        &table,
        &[Technique::PartialMasking],
        Granularity::Column,
        TrustLevel::Moderate,
    );
    assert_eq!(result.table.get(0, 0), Some(&Value::from("**345")));
    assert_eq!(result.table.get(1, 0), Some(&Value::from("**890")));
}

#[test]
fn test_single_cell_noise_injection() {
    let table = single_column(&[5.0]);
    let result = engine().anonymize(
        &table,
        &[Technique::NoiseInjection],
        Granularity::Column,
        TrustLevel::High,
    );
    assert_eq!(result.applied_strategy, Some(Technique::NoiseInjection));
    assert_eq!(result.table.get(0, 0), Some(&Value::Number(9.25)));
}

#[test]
fn test_seeded_noise_is_reproducible() {
    let table = single_column(&[10.0, 20.0, 30.0]);
    let first = engine().anonymize(&table, &["noise_injection"], Granularity::Column, TrustLevel::High);
    let second =
        engine().anonymize(&table, &["noise_injection"], Granularity::Column, TrustLevel::High);
    assert_eq!(first.table, second.table);
    assert_ne!(first.table, table);
}

#[test]
fn test_row_microaggregation_preserves_row_order() {
    let table = Table::with_rows(
        ["age", "income"],
        vec![
            vec![Value::from(30), Value::from(1000)],
            vec![Value::from(60), Value::from(4000)],
            vec![Value::from(40), Value::from(2000)],
            vec![Value::from(50), Value::from(3000)],
        ],
    )
    .unwrap();
    let result = engine().anonymize(
        &table,
        &[Technique::Microaggregation],
        Granularity::Row,
        TrustLevel::High,
    );

    let expected = Table::with_rows(
        ["age", "income"],
        vec![
            vec![Value::from(35), Value::from(1500)],
            vec![Value::from(55), Value::from(3500)],
            vec![Value::from(35), Value::from(1500)],
            vec![Value::from(55), Value::from(3500)],
        ],
    )
    .unwrap();
    assert_eq!(result.applied_strategy, Some(Technique::Microaggregation));
    assert_eq!(result.table, expected);
}

#[test]
fn test_microaggregation_fills_nulls_in_group() {
    let table = Table::with_rows(
        ["v"],
        vec![
            vec![Value::from(10)],
            vec![Value::Null],
            vec![Value::from(20)],
            vec![Value::from(30)],
        ],
    )
    .unwrap();
    let result = engine().anonymize(
        &table,
        &[Technique::Microaggregation],
        Granularity::Row,
        TrustLevel::High,
    );

    assert_eq!(result.applied_strategy, Some(Technique::Microaggregation));
    assert_eq!(result.table, single_column(&[15.0, 30.0, 15.0, 30.0]));
}

#[test]
fn test_table_suppression_nulls_rare_values() {
    let table = Table::with_rows(
        ["city"],
        vec![
            vec![Value::from("York")],
            vec![Value::from("York")],
            vec![Value::from("Ely")],
        ],
    )
    .unwrap();
    let result = engine().anonymize(
        &table,
        &[Technique::CellSuppression],
        Granularity::Table,
        TrustLevel::Low,
    );
    assert_eq!(result.table.get(0, 0), Some(&Value::from("York")));
    assert_eq!(result.table.get(2, 0), Some(&Value::Null));
}

#[test]
fn test_input_table_is_never_modified() {
    let table = people(6);
    let snapshot = table.clone();
    let _ = engine().anonymize(
        &table,
        &[Technique::FullMasking],
        Granularity::Table,
        TrustLevel::Low,
    );
    assert_eq!(table, snapshot);
}

#[test]
fn test_no_candidate_succeeds() {
    let table = people(2);
    let result = engine().anonymize(
        &table,
        &["k_anonymity", "binning"],
        Granularity::Table,
        TrustLevel::Low,
    );
    assert_eq!(result.applied_strategy, None);
    assert_eq!(result.table, table);
}
