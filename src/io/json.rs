use std::io::{self, Write};

use crate::error::TrajectoryError;
use crate::model::Medium;
use crate::trajectory::{Trajectory, TrajectoryPoint};

/// Summary of one flight, computed from the query façade.
#[derive(Debug, Clone)]
pub struct FlightSummary {
    pub medium: Medium,
    pub launch_speed: f64,
    pub landing: Option<TrajectoryPoint>,
    pub apex: Option<TrajectoryPoint>,
    pub impact_speed: Option<f64>,
}

impl FlightSummary {
    pub fn from_trajectory(trajectory: &Trajectory<'_>, medium: Medium) -> Result<Self, TrajectoryError> {
        let landing = trajectory.landing_point(medium)?;
        let apex = trajectory.max_altitude(medium)?;
        let impact_speed = match landing {
            Some(p) => Some(trajectory.speed(p.t, medium)?),
            None => None,
        };

        Ok(FlightSummary {
            medium,
            launch_speed: trajectory.body().velocity.norm(),
            landing,
            apex,
            impact_speed,
        })
    }

    pub fn flight_time(&self) -> Option<f64> {
        self.landing.map(|p| p.t)
    }
}

fn num(v: Option<f64>) -> String {
    match v {
        Some(v) if v.is_finite() => format!("{:.4}", v),
        _ => "null".to_string(),
    }
}

/// Write flight summary as JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, name: &str, summary: &FlightSummary) -> io::Result<()> {
    let medium = match summary.medium {
        Medium::Vacuum => "vacuum",
        Medium::Air => "air",
    };
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"body\": \"{}\",", name.replace('\\', "\\\\").replace('"', "\\\""))?;
    writeln!(writer, "  \"medium\": \"{}\",", medium)?;
    writeln!(writer, "  \"launch_speed_ms\": {},", num(Some(summary.launch_speed)))?;
    writeln!(writer, "  \"landing\": {{")?;
    writeln!(writer, "    \"x_m\": {},", num(summary.landing.map(|p| p.x)))?;
    writeln!(writer, "    \"time_s\": {},", num(summary.flight_time()))?;
    writeln!(writer, "    \"impact_speed_ms\": {}", num(summary.impact_speed))?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"apex\": {{")?;
    writeln!(writer, "    \"x_m\": {},", num(summary.apex.map(|p| p.x)))?;
    writeln!(writer, "    \"y_m\": {},", num(summary.apex.map(|p| p.y)))?;
    writeln!(writer, "    \"time_s\": {}", num(summary.apex.map(|p| p.t)))?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write flight summary JSON to a file.
pub fn write_summary_file(path: &str, name: &str, summary: &FlightSummary) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, name, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyBuilder;

    #[test]
    fn summary_of_vacuum_kick() {
        let body = BodyBuilder::new().velocity(20.0, 20.0).build();
        let s = FlightSummary::from_trajectory(&body.trajectory(), Medium::Vacuum).unwrap();
        let landing = s.landing.unwrap();
        assert!((landing.x - 81.63).abs() < 0.01);
        assert!((s.apex.unwrap().y - 20.41).abs() < 0.01);
        // Symmetric flight: impact speed equals launch speed
        assert!((s.impact_speed.unwrap() - s.launch_speed).abs() < 1e-9);
    }

    #[test]
    fn json_output_is_valid() {
        let summary = FlightSummary {
            medium: Medium::Air,
            launch_speed: 28.28,
            landing: None,
            apex: Some(TrajectoryPoint { x: 1.0, y: 2.0, t: 0.5 }),
            impact_speed: None,
        };

        let mut buf = Vec::new();
        write_summary(&mut buf, "Ball \"A\"", &summary).unwrap();
        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains("\"body\": \"Ball \\\"A\\\"\""));
        assert!(json.contains("\"medium\": \"air\""));
        assert!(json.contains("\"x_m\": null"));
        assert!(json.contains("\"y_m\": 2.0000"));
    }
}
