use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{models::engine::cycle::CycleResults, support::units::UnitSystem};

use super::ReportError;

/// Decimal places used for lengths and speeds unless a caller asks otherwise.
pub const DEFAULT_PRECISION: usize = 6;

const MOTION_HEADER: &str = "angle,piston_position,piston_velocity";
const VALVE_HEADER: &str = ",intake_valve_lift,exhaust_valve_lift";

/// Writes one CSV row per sample to `writer`.
///
/// The angle column is an integer. Lengths and speeds are written with
/// `precision` decimals in `units`. The valve lift columns are left out when
/// the cycle was sampled without cams.
///
/// # Errors
///
/// Returns any I/O error raised by `writer`.
pub fn write_csv<W: Write>(
    mut writer: W,
    results: &CycleResults,
    units: UnitSystem,
    precision: usize,
) -> io::Result<()> {
    let with_valves = results.has_valve_lift;

    write!(writer, "{MOTION_HEADER}")?;
    if with_valves {
        write!(writer, "{VALVE_HEADER}")?;
    }
    writeln!(writer)?;

    for sample in &results.samples {
        write!(
            writer,
            "{},{:.precision$},{:.precision$}",
            sample.angle,
            units.length_value(sample.piston_position),
            units.velocity_value(sample.piston_velocity),
        )?;
        if with_valves {
            write!(
                writer,
                ",{:.precision$},{:.precision$}",
                units.length_value(sample.intake_valve_lift),
                units.length_value(sample.exhaust_valve_lift),
            )?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Writes the CSV report to `path`.
///
/// Missing parent directories are created and an existing file is replaced.
///
/// # Errors
///
/// Returns a [`ReportError`] naming the path that could not be created or
/// written.
pub fn save_csv(
    path: &Path,
    results: &CycleResults,
    units: UnitSystem,
    precision: usize,
) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ReportError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write_error = |source: io::Error| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, results, units, precision).map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    tracing::info!(
        path = %path.display(),
        rows = results.samples.len(),
        "CSV report written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::engine::{
        cycle::sample_cycle,
        geometry::EngineGeometry,
        test_support::{cam_specification, metric_engine},
    };

    fn render(results: &CycleResults, units: UnitSystem, precision: usize) -> String {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, results, units, precision).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn motion_only() -> CycleResults {
        let params = metric_engine();
        sample_cycle(&EngineGeometry::new(&params), None).unwrap()
    }

    fn with_cams() -> CycleResults {
        let params = metric_engine();
        let mut cams = cam_specification();
        cams.initialize();
        sample_cycle(&EngineGeometry::new(&params), Some(&cams)).unwrap()
    }

    #[test]
    fn omits_valve_columns_without_cams() {
        let csv = render(&motion_only(), UnitSystem::Metric, DEFAULT_PRECISION);
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("angle,piston_position,piston_velocity"));
        assert_eq!(lines.next(), Some("0,-1.000000,0.000000"));
        assert_eq!(csv.lines().count(), 721);
    }

    #[test]
    fn includes_valve_columns_with_cams() {
        let csv = render(&with_cams(), UnitSystem::Metric, 3);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "angle,piston_position,piston_velocity,intake_valve_lift,exhaust_valve_lift"
        );
        assert!(lines[1 + 106].starts_with("106,"));
        assert!(lines[1 + 106].contains(",12.000,0.000"));
        assert!(lines.iter().skip(1).all(|line| line.split(',').count() == 5));
    }

    #[test]
    fn reports_in_requested_units() {
        let results = motion_only();
        let csv = render(&results, UnitSystem::Imperial, 4);

        // 1 mm below the deck is 0.0394 in.
        assert_eq!(csv.lines().nth(1), Some("0,-0.0394,0.0000"));
    }

    #[test]
    fn save_creates_parent_and_replaces_file() {
        let dir = std::env::temp_dir().join("piston_motion_save_csv");
        std::fs::remove_dir_all(&dir).ok();
        let path = dir.join("nested").join("run.csv");

        save_csv(&path, &with_cams(), UnitSystem::Metric, DEFAULT_PRECISION).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(first.starts_with("angle,piston_position,piston_velocity,intake"));

        save_csv(&path, &motion_only(), UnitSystem::Metric, DEFAULT_PRECISION).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert!(second.starts_with("angle,piston_position,piston_velocity\n"));
        assert_eq!(second.lines().count(), 721);

        std::fs::remove_dir_all(&dir).ok();
    }
}
