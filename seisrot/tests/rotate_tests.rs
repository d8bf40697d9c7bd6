//! Integration tests for rotating ASCII seismograms.

use std::fs;
use std::path::Path;

use seisrot::{
    AsciiSource, NameTemplate, RotateConfig, RotationMode, RotationTable, Rotator, Result,
    StationOutcome, TimeSeries,
};
use tempfile::TempDir;

const IN_TEMPLATE: &str = "${nt}.${sta}.BX${comp}.semd";
const OUT_TEMPLATE: &str = "${nt}.${sta}.BX${comp}.sem.ascii";

/// A rotation about Z by 30 degrees followed by a tilt about X by 10 degrees.
fn tilted_rows() -> [[f64; 3]; 3] {
    let (sg, cg) = 30f64.to_radians().sin_cos();
    let (sa, ca) = 10f64.to_radians().sin_cos();
    [
        [cg, -sg, 0.0],
        [ca * sg, ca * cg, -sa],
        [sa * sg, sa * cg, ca],
    ]
}

/// Write a rotation table with `n` stations named S00, S01, ...
fn write_table(path: &Path, n: usize) {
    let rows = tilted_rows();
    let mut text = String::new();
    for i in 0..n {
        text.push_str(&format!("TS S{:02}\n", i));
        for row in &rows {
            text.push_str(&format!("{:.15} {:.15} {:.15}\n", row[0], row[1], row[2]));
        }
    }
    fs::write(path, text).unwrap();
}

/// Write synthetic source components for one station.
fn write_station(dir: &Path, station: &str, comps: &str, nstep: usize) {
    for (k, comp) in comps.chars().enumerate() {
        let mut text = String::new();
        for i in 0..nstep {
            let t = -1.0 + i as f64 * 0.05;
            let a = ((i + 1) as f64 * (k + 1) as f64).sin() * 1e-3;
            text.push_str(&format!("{:.6} {:.10E}\n", t, a));
        }
        fs::write(dir.join(format!("TS.{}.BX{}.semd", station, comp)), text).unwrap();
    }
}

fn config(mode: &str, input: &str, output: &str, out_dir: &Path) -> RotateConfig {
    RotateConfig::new(
        mode.parse::<RotationMode>().unwrap(),
        input.parse::<NameTemplate>().unwrap(),
        output.parse::<NameTemplate>().unwrap(),
    )
    .output_dir(out_dir)
}

#[test]
fn test_every_station_rotated_once_across_workers() -> Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("OUTPUT_FILES");
    let output = temp.path().join("OUTPUT_FILES_sph");
    fs::create_dir(&input)?;

    let table_path = temp.path().join("rotation_nu");
    write_table(&table_path, 11);
    for i in 0..11 {
        write_station(&input, &format!("S{:02}", i), "XYZ", 40);
    }

    let table = RotationTable::open(&table_path)?;
    let source = AsciiSource::new(&input)?;
    let report = Rotator::new(
        &table,
        &source,
        config("XYZ->NEZ", IN_TEMPLATE, OUT_TEMPLATE, &output).workers(4),
    )
    .run()?;

    assert_eq!(report.len(), 11);
    assert_eq!(report.workers(), 4);
    assert_eq!(report.rotated(), 11);
    assert_eq!(report.files_written(), 33);
    assert!(report.is_success());

    let indices: Vec<usize> = report.iter().map(|s| s.index).collect();
    assert_eq!(indices, (0..11).collect::<Vec<_>>());

    for i in 0..11 {
        for comp in ['N', 'E', 'Z'] {
            assert!(output.join(format!("TS.S{:02}.BX{}.sem.ascii", i, comp)).is_file());
        }
    }

    Ok(())
}

#[test]
fn test_forward_then_inverse_restores_input() -> Result<()> {
    let temp = TempDir::new()?;
    let cart = temp.path().join("cart");
    let geo = temp.path().join("geo");
    let back = temp.path().join("back");
    fs::create_dir(&cart)?;

    let table_path = temp.path().join("rotation_nu");
    write_table(&table_path, 1);
    write_station(&cart, "S00", "XYZ", 25);

    let table = RotationTable::open(&table_path)?;

    let source = AsciiSource::new(&cart)?;
    Rotator::new(&table, &source, config("XYZ->NEZ", IN_TEMPLATE, OUT_TEMPLATE, &geo)).run()?;

    let source = AsciiSource::new(&geo)?;
    Rotator::new(&table, &source, config("XYZ<-NEZ", OUT_TEMPLATE, IN_TEMPLATE, &back)).run()?;

    for comp in ['X', 'Y', 'Z'] {
        let name = format!("TS.S00.BX{}.semd", comp);
        let original = TimeSeries::read_ascii(cart.join(&name))?;
        let restored = TimeSeries::read_ascii(back.join(&name))?;

        assert_eq!(original.time(), restored.time());
        for (a, b) in original.amplitude().iter().zip(restored.amplitude().iter()) {
            // Output keeps 8 significant digits.
            assert!((a - b).abs() <= 1e-9, "{} vs {}", a, b);
        }
    }

    Ok(())
}

#[test]
fn test_missing_source_skips_station_only() -> Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("in");
    let output = temp.path().join("out");
    fs::create_dir(&input)?;

    let table_path = temp.path().join("rotation_nu");
    write_table(&table_path, 3);
    write_station(&input, "S00", "XYZ", 10);
    write_station(&input, "S01", "XZ", 10); // no Y
    write_station(&input, "S02", "XYZ", 10);

    let table = RotationTable::open(&table_path)?;
    let source = AsciiSource::new(&input)?;
    let report = Rotator::new(
        &table,
        &source,
        config("XYZ->NEZ", IN_TEMPLATE, OUT_TEMPLATE, &output).workers(2),
    )
    .run()?;

    assert_eq!(report.rotated(), 2);
    assert_eq!(report.skipped(), 1);
    assert!(report.is_success());

    let skipped = report.iter().find(|s| s.index == 1).unwrap();
    match &skipped.outcome {
        StationOutcome::Skipped { missing } => assert!(missing.ends_with("TS.S01.BXY.semd")),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(!output.join("TS.S01.BXN.sem.ascii").exists());
    assert!(output.join("TS.S02.BXN.sem.ascii").exists());

    Ok(())
}

#[test]
fn test_placeholders_neither_read_nor_written() -> Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("in");
    let output = temp.path().join("out");
    fs::create_dir(&input)?;

    let table_path = temp.path().join("rotation_nu");
    write_table(&table_path, 1);
    // Only Z exists; X and Y are placeholders on the source side.
    write_station(&input, "S00", "Z", 10);

    let table = RotationTable::open(&table_path)?;
    let source = AsciiSource::new(&input)?;
    let report = Rotator::new(
        &table,
        &source,
        config("00Z->00Z", IN_TEMPLATE, OUT_TEMPLATE, &output),
    )
    .run()?;

    assert_eq!(report.rotated(), 1);
    assert_eq!(report.files_written(), 1);

    let written: Vec<_> = fs::read_dir(&output)?
        .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<_>>()?;
    assert_eq!(written, vec!["TS.S00.BXZ.sem.ascii".to_string()]);

    // Z output is the Z row applied to (0, 0, z): R[2][2] * z.
    let zin = TimeSeries::read_ascii(input.join("TS.S00.BXZ.semd"))?;
    let zout = TimeSeries::read_ascii(output.join("TS.S00.BXZ.sem.ascii"))?;
    let r22 = tilted_rows()[2][2];
    for (a, b) in zin.amplitude().iter().zip(zout.amplitude().iter()) {
        assert!((a * r22 - b).abs() <= 1e-9);
    }

    Ok(())
}

#[test]
fn test_output_keeps_time_column_and_layout() -> Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("in");
    let output = temp.path().join("out");
    fs::create_dir(&input)?;

    fs::write(
        temp.path().join("rotation_nu"),
        "TS S00\n1 0 0\n0 1 0\n0 0 1\n",
    )?;
    fs::write(input.join("TS.S00.BXX.semd"), "-0.5 1.0\n0.25 -2.5e-4\n")?;
    fs::write(input.join("TS.S00.BXY.semd"), "-0.5 0.0\n0.25 0.0\n")?;
    fs::write(input.join("TS.S00.BXZ.semd"), "-0.5 0.0\n0.25 0.0\n")?;

    let table = RotationTable::open(temp.path().join("rotation_nu"))?;
    let source = AsciiSource::new(&input)?;
    Rotator::new(&table, &source, config("XYZ->NEZ", IN_TEMPLATE, OUT_TEMPLATE, &output)).run()?;

    let text = fs::read_to_string(output.join("TS.S00.BXN.sem.ascii"))?;
    assert_eq!(
        text,
        "  -0.500000      1.0000000E+00\n   0.250000     -2.5000000E-04\n"
    );

    Ok(())
}

#[test]
fn test_dry_run_plan_writes_nothing() -> Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("in");
    let output = temp.path().join("out");
    fs::create_dir(&input)?;

    let table_path = temp.path().join("rotation_nu");
    write_table(&table_path, 2);
    write_station(&input, "S00", "XYZ", 7);

    let table = RotationTable::open(&table_path)?;
    let source = AsciiSource::new(&input)?;
    let rotator = Rotator::new(
        &table,
        &source,
        config("XYZ->NEZ", IN_TEMPLATE, OUT_TEMPLATE, &output),
    );

    let plans = rotator.plan_all();
    assert_eq!(plans.len(), 2);
    assert!(plans[0].is_complete());
    assert!(plans[0].sources.iter().all(|s| s.samples == Some(7)));
    assert!(!plans[1].is_complete());
    assert!(!output.exists());

    Ok(())
}
