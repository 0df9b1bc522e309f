use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::sweep::SweepSeries;

/// Writes every curve of a sweep as long-format CSV
pub fn write_series_csv<W: Write>(
    out: &mut W,
    parameter_label: &str,
    series: &[SweepSeries],
) -> std::io::Result<()> {
    writeln!(out, "series,{},com_x,com_y", parameter_label.replace(' ', "_"))?;
    for curve in series {
        for point in &curve.points {
            writeln!(
                out,
                "{},{:.6},{:.6},{:.6}",
                curve.label, point.parameter, point.com_x, point.com_y
            )?;
        }
    }
    Ok(())
}

pub fn write_series_file(path: &Path, parameter_label: &str, series: &[SweepSeries]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_series_csv(&mut out, parameter_label, series)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::SweepPoint;

    #[test]
    fn test_csv_layout() {
        let series = vec![SweepSeries {
            label: "torso angle".to_string(),
            points: vec![
                SweepPoint { parameter: 0.0, com_x: 0.01, com_y: 0.6 },
                SweepPoint { parameter: 1.0, com_x: -0.02, com_y: 0.61 },
            ],
        }];

        let mut buf = Vec::new();
        write_series_csv(&mut buf, "torso angle", &series).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "series,torso_angle,com_x,com_y");
        assert_eq!(lines[1], "torso angle,0.000000,0.010000,0.600000");
        assert_eq!(lines[2], "torso angle,1.000000,-0.020000,0.610000");
    }
}
