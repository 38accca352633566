//! Integration tests for the preparation pipeline
//!
//! These tests run complete table → prepare → predict → report pipelines
//! against files on disk, the way an application drives the library.

use dnaclass::config::{CleanPolicy, PreparerConfig};
use dnaclass::dataset::{DatasetPreparer, ModelInfo};
use dnaclass::io::{write_predictions, SampleTableReader};
use dnaclass::labels::LabelScheme;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use tempfile::TempDir;

const TABLE: &str = "\
Sample_ID,Sequence,Disease_Risk,Class_Label,GC_Content
r1,ATCGATCGATCGATCGATCG,high,,
r2,GGGGCCCCGGGGCCCCAATT,Low Risk,,12.5
r3,AT,medium,,
r4,TTTTAAAACCCCGGGGATAT,,Bacteria,
r5,ACGTACGTACGTACGTACGT,moderate,,
r6,,high,,
r7,ACGTNNNNACGTACGTACGT,unknown,,
";

fn config() -> PreparerConfig {
    PreparerConfig::new(LabelScheme::DiseaseRisk)
        .with_max_length(24)
        .with_clean_policy(CleanPolicy {
            min_valid_bases: 10,
            min_valid_ratio: 0.8,
        })
        .with_seed(2024)
}

fn write_table(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, TABLE).unwrap();
    path
}

/// Test complete pipeline: Read CSV → Prepare → Predict → Write report
#[test]
fn test_pipeline_csv_to_report() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = write_table(&temp_dir, "samples.csv");
    let report_path = temp_dir.path().join("predictions.csv");

    let rows = SampleTableReader::from_path(&input_path)
        .unwrap()
        .read_all()
        .unwrap();
    assert_eq!(rows.len(), 7, "Should read every data row");

    let mut dataset = DatasetPreparer::new(config()).prepare(&rows).unwrap();

    // r3 too short, r6 no sequence, r7 unresolvable label
    assert_eq!(dataset.index, vec![0, 1, 3, 4]);
    // r4 has no risk value; "Bacteria" infers Medium
    assert_eq!(dataset.labels, vec![0, 2, 1, 1]);
    assert_eq!(dataset.skipped.invalid_sequence, 1);
    assert_eq!(dataset.skipped.missing_sequence, 1);
    assert_eq!(dataset.skipped.unresolved_label, 1);

    // Supplied GC value wins over the computed one
    let r2 = dataset.sample_for_row(1).unwrap();
    assert_eq!(r2.numeric_features().unwrap()[0], 12.5);
    assert_eq!(r2.derived_features.as_ref().unwrap().numeric.gc_content, 80.0);

    let probabilities = vec![
        vec![0.7, 0.2, 0.1],
        vec![0.1, 0.1, 0.8],
        vec![0.6, 0.3, 0.1],
        vec![0.2, 0.5, 0.3],
    ];
    dataset.apply_predictions(&probabilities).unwrap();
    assert_eq!(dataset.accuracy(), Some(0.75));

    {
        let file = std::fs::File::create(&report_path).unwrap();
        write_predictions(&dataset.samples, file).unwrap();
    }

    let report = std::fs::read_to_string(&report_path).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 5, "Header plus one line per prepared sample");
    assert_eq!(lines[0], "Sample_ID,Label,Predicted,Confidence,Correct");
    assert_eq!(lines[1], "r1,High,High,0.7,true");
    assert_eq!(lines[3], "r4,Medium,High,0.6,false");
}

/// Gzip input must yield exactly the rows of the plain file
#[test]
fn test_gzip_matches_plain() {
    let temp_dir = TempDir::new().unwrap();
    let plain_path = write_table(&temp_dir, "samples.csv");
    let gz_path = temp_dir.path().join("samples.csv.gz");

    {
        let file = std::fs::File::create(&gz_path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(TABLE.as_bytes()).unwrap();
        encoder.finish().unwrap();
    }

    let plain = SampleTableReader::from_path(&plain_path).unwrap().read_all().unwrap();
    let gz = SampleTableReader::from_path(&gz_path).unwrap().read_all().unwrap();
    assert_eq!(plain, gz);
}

#[test]
fn test_tsv_by_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("samples.tsv");
    std::fs::write(&path, "Sequence\tClass_Label\nACGTACGTAC\tVirus\n").unwrap();

    let rows = SampleTableReader::from_path(&path).unwrap().read_all().unwrap();
    assert_eq!(rows[0].class_label.as_deref(), Some("Virus"));
}

#[test]
fn test_malformed_table_reads_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.csv");
    std::fs::write(&path, "Sequence,Disease_Risk\nACGT,high\nACGT\n").unwrap();

    let result = SampleTableReader::from_path(&path).unwrap().read_all();
    assert!(result.is_err());
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = SampleTableReader::from_path(temp_dir.path().join("absent.csv"));
    assert!(matches!(result, Err(dnaclass::DnaclassError::Io(_))));
}

/// Holdout: scaler fitted on train only, then reused on test
#[test]
fn test_holdout_reuses_training_scaler() {
    let rows = SampleTableReader::new(TABLE.as_bytes()).read_all().unwrap();
    let preparer = DatasetPreparer::new(config().with_train_ratio(0.5));

    let holdout = preparer.prepare_holdout(&rows).unwrap();
    assert_eq!(holdout.train.len(), 2);
    assert_eq!(holdout.test.len(), 2);
    assert_eq!(holdout.train.scaler, holdout.test.scaler);

    let mut seen: Vec<usize> = holdout
        .train
        .index
        .iter()
        .chain(&holdout.test.index)
        .copied()
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 3, 4]);

    // Test vectors are the training transform applied to raw values
    for (sample, scaled) in holdout.test.samples.iter().zip(&holdout.test.features) {
        let raw = preparer.feature_vector(sample);
        assert_eq!(&holdout.train.scaler.transform_one(&raw).unwrap(), scaled);
    }
}

#[test]
fn test_holdout_is_reproducible_with_seed() {
    let rows = SampleTableReader::new(TABLE.as_bytes()).read_all().unwrap();
    let preparer = DatasetPreparer::new(config());

    let a = preparer.prepare_holdout(&rows).unwrap();
    let b = preparer.prepare_holdout(&rows).unwrap();
    assert_eq!(a.train.index, b.train.index);
    assert_eq!(a.test.index, b.test.index);
}

#[test]
fn test_model_info_save_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("model_info.json");

    let rows = SampleTableReader::new(TABLE.as_bytes()).read_all().unwrap();
    let dataset = DatasetPreparer::new(config().with_enhanced_features(true))
        .prepare(&rows)
        .unwrap();

    let info = dataset.model_info();
    info.save(&path).unwrap();
    let loaded = ModelInfo::load(&path).unwrap();

    assert_eq!(loaded, info);
    assert_eq!(loaded.feature_names.len(), 27);
    assert_eq!(loaded.class_names, vec!["High", "Medium", "Low"]);
    assert_eq!(loaded.sequence_length, 24);
}

#[test]
fn test_config_from_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dnaclass.toml");
    std::fs::write(
        &path,
        "scheme = \"disease_risk\"\nmax_length = 24\nseed = 2024\n\n[clean]\nmin_valid_bases = 10\n",
    )
    .unwrap();

    let loaded = PreparerConfig::from_path(&path).unwrap();
    assert_eq!(loaded, config());
}

/// A `NaN` cell is recomputed from the sequence instead of poisoning the column
#[test]
fn test_nan_cell_does_not_spread() {
    let table = "Sequence,Disease_Risk,GC_Content\n\
                 ATCGATCGATCGATCGATCG,high,NaN\n\
                 ATCGATCGATCGATCGATCG,low,40\n";
    let rows = SampleTableReader::new(table.as_bytes()).read_all().unwrap();
    assert!(rows[0].gc_content.unwrap().is_nan());

    let dataset = DatasetPreparer::new(config()).prepare(&rows).unwrap();
    let gc_column: Vec<f64> = dataset.features.iter().map(|f| f[0]).collect();
    assert_eq!(gc_column, vec![1.0, -1.0]);
}
