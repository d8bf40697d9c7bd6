//! Sanity checks on the rotation table and run settings.
//!
//! None of these stop a run; they produce warnings that the rotate and
//! dry-run commands print before doing any work.

use seisrot::{RotateConfig, RotationMode, RotationTable};

use crate::output;

/// Print every warning returned by [`check_all`].
pub fn report(table: &RotationTable, config: &RotateConfig, tolerance: f64) -> usize {
    let warnings = check_all(table, config, tolerance);

    for warning in &warnings {
        output::print_warning(warning);
    }

    warnings.len()
}

/// Run all checks and return warnings.
pub fn check_all(table: &RotationTable, config: &RotateConfig, tolerance: f64) -> Vec<String> {
    let mut warnings = Vec::new();

    if table.is_empty() {
        warnings.push("Rotation table lists no stations; nothing to rotate".to_string());
    }

    warnings.extend(check_orthonormal(table, tolerance));

    if let Some(w) = check_duplicates(table) {
        warnings.push(w);
    }

    if let Some(w) = check_partial_target(&config.mode) {
        warnings.push(w);
    }

    if let Some(w) = check_input_template(config) {
        warnings.push(w);
    }

    warnings
}

/// Matrices that are not rotations. Inverse rotation uses the transpose, so
/// it only undoes the forward rotation for orthonormal matrices.
fn check_orthonormal(table: &RotationTable, tolerance: f64) -> Vec<String> {
    table
        .iter()
        .filter_map(|record| {
            let err = record.matrix.orthonormality_error();
            (err > tolerance).then(|| {
                format!(
                    "Matrix for {} is not orthonormal (max |R·Rᵗ - I| = {:.3e})",
                    record.label(),
                    err
                )
            })
        })
        .collect()
}

/// Stations listed more than once write the same output paths, possibly
/// from different workers at once.
fn check_duplicates(table: &RotationTable) -> Option<String> {
    let mut labels: Vec<String> = table.iter().map(|r| r.label()).collect();
    labels.sort();

    let mut dups: Vec<String> = labels
        .windows(2)
        .filter(|w| w[0] == w[1])
        .map(|w| w[0].clone())
        .collect();
    dups.dedup();

    if dups.is_empty() {
        None
    } else {
        Some(format!(
            "Stations listed more than once write the same files; their output is undefined: {}",
            dups.join(", ")
        ))
    }
}

/// A target component computed from an incomplete source set mixes in zeros.
fn check_partial_target(mode: &RotationMode) -> Option<String> {
    let source = mode.source();
    if source.count() < 3 && mode.target().count() > 0 {
        Some(format!(
            "Mode {} reads only {} of 3 source components; missing ones are treated as zero",
            mode,
            source.count()
        ))
    } else {
        None
    }
}

/// Without `comp` every source component of a station reads the same record.
fn check_input_template(config: &RotateConfig) -> Option<String> {
    let count = config.mode.source().count();
    if count > 1 && !config.input_template.uses_component() {
        Some(format!(
            "Input template '{}' has no ${{comp}}; all {} source components read the same data",
            config.input_template, count
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
TS A01
 1.0 0.0 0.0
 0.0 1.0 0.0
 0.0 0.0 1.0
TS A02
 2.0 0.0 0.0
 0.0 1.0 0.0
 0.0 0.0 1.0
TS A01
 0.0 1.0 0.0
 1.0 0.0 0.0
 0.0 0.0 1.0
";

    fn config(mode: &str, input: &str) -> RotateConfig {
        RotateConfig::new(
            mode.parse().unwrap(),
            input.parse().unwrap(),
            "${nt}.${sta}.BX${comp}.sem.ascii".parse().unwrap(),
        )
    }

    #[test]
    fn test_orthonormal_check() {
        let table = RotationTable::parse(TABLE).unwrap();
        let warnings = check_orthonormal(&table, 1e-4);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("TS.A02"));
    }

    #[test]
    fn test_duplicate_check() {
        let table = RotationTable::parse(TABLE).unwrap();
        let w = check_duplicates(&table).unwrap();
        assert!(w.contains("TS.A01"));
        assert!(w.contains("undefined"));
        assert!(!w.contains("TS.A02"));
    }

    #[test]
    fn test_partial_target_check() {
        let full: RotationMode = "XYZ->NEZ".parse().unwrap();
        assert!(check_partial_target(&full).is_none());

        let partial: RotationMode = "00Z->NEZ".parse().unwrap();
        assert!(check_partial_target(&partial).unwrap().contains("1 of 3"));
    }

    #[test]
    fn test_input_template_check() {
        let shared = config("XYZ->NEZ", "${nt}.${sta}.semd");
        let w = check_input_template(&shared).unwrap();
        assert!(w.contains("all 3 source components"));

        // A single source component has nothing to collide with.
        assert!(check_input_template(&config("00Z->00Z", "${nt}.${sta}.semd")).is_none());
        let per_component = config("XYZ->NEZ", "${nt}.${sta}.BX${comp}.semd");
        assert!(check_input_template(&per_component).is_none());
    }

    #[test]
    fn test_check_all_empty_table() {
        let table = RotationTable::parse("").unwrap();
        let config = config("XYZ->NEZ", "${nt}.${sta}.BX${comp}.semd");
        let warnings = check_all(&table, &config, 1e-4);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("no stations"));
    }
}
