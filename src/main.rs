use ballistic_traj::body::presets;
use ballistic_traj::io::{csv, json};
use ballistic_traj::io::json::FlightSummary;
use ballistic_traj::{Medium, TrajectoryError, DEFAULT_TOLERANCE};

/// Usage: ballistic-traj [OUTPUT_PREFIX]
///
/// With a prefix, the sampled drag trajectory is written to `<prefix>.csv` and
/// the drag flight summary to `<prefix>.json`.
fn main() {
    let prefix = std::env::args().nth(1);
    if let Err(e) = run(prefix.as_deref()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(prefix: Option<&str>) -> Result<(), TrajectoryError> {
    // -----------------------------------------------------------------------
    // Body: football kicked at 20 m/s, 45 degrees
    // -----------------------------------------------------------------------
    let mut ball = presets::football();
    ball.set_velocity_from_speed_angle(20.0, 45.0);
    let tr = ball.trajectory();

    println!();
    println!("====================================================================");
    println!("  SHORT-RANGE BALLISTICS: football, 20 m/s at 45°");
    println!("====================================================================");
    println!();
    println!(
        "  Mass: {:.2} kg   Area: {:.3} m^2   Cd: {:.2}   k/m: {:.5} 1/m",
        ball.mass.unwrap_or_default(),
        ball.area.unwrap_or_default(),
        ball.cd.unwrap_or_default(),
        ball.drag_ratio()?
    );
    println!();

    // -----------------------------------------------------------------------
    // Flight summaries
    // -----------------------------------------------------------------------
    println!("  {:<8}  {:>9}  {:>9}  {:>9}  {:>9}  {:>9}", "medium", "range(m)", "time(s)", "apex(m)", "t_apex(s)", "v_imp");
    println!("  {}", "─".repeat(64));
    let mut air_summary = None;
    for medium in [Medium::Vacuum, Medium::Air] {
        let s = FlightSummary::from_trajectory(&tr, medium)?;
        let fmt = |v: Option<f64>| v.map_or("-".to_string(), |v| format!("{:.3}", v));
        println!(
            "  {:<8}  {:>9}  {:>9}  {:>9}  {:>9}  {:>9}",
            format!("{:?}", medium),
            fmt(s.landing.map(|p| p.x)),
            fmt(s.flight_time()),
            fmt(s.apex.map(|p| p.y)),
            fmt(s.apex.map(|p| p.t)),
            fmt(s.impact_speed),
        );
        if medium == Medium::Air {
            air_summary = Some(s);
        }
    }
    println!();

    // -----------------------------------------------------------------------
    // Inverse: speed needed to reach the vacuum range with drag
    // -----------------------------------------------------------------------
    if let Some(vac) = tr.landing_point(Medium::Vacuum)? {
        let needed = tr.required_speed(vac.x, 45.0, Medium::Air, DEFAULT_TOLERANCE)?;
        println!(
            "  To land at {:.2} m with drag at 45° the ball needs {:.2} m/s (vs 20.00).",
            vac.x, needed
        );
        println!();
    }

    // -----------------------------------------------------------------------
    // Trajectory table (sampled, with drag)
    // -----------------------------------------------------------------------
    if let Some(t_land) = tr.total_flight_time(Medium::Air)? {
        println!("  Trajectory with drag");
        println!("  {}", "─".repeat(64));
        println!("  {:>7}  {:>9}  {:>9}  {:>9}", "t (s)", "x (m)", "y (m)", "v (m/s)");
        for s in tr.sample_states(0.0, t_land, 12, Medium::Air)? {
            println!("  {:>7.3}  {:>9.3}  {:>9.3}  {:>9.3}", s.time, s.pos.x, s.pos.y, s.speed());
        }

        if let Some(prefix) = prefix {
            let states = tr.sample_states(0.0, t_land, 200, Medium::Air)?;
            let csv_path = format!("{}.csv", prefix);
            match csv::write_trajectory_file(&csv_path, &states) {
                Ok(()) => println!("  Wrote {}", csv_path),
                Err(e) => eprintln!("  Failed to write {}: {}", csv_path, e),
            }
            if let Some(summary) = &air_summary {
                let json_path = format!("{}.json", prefix);
                match json::write_summary_file(&json_path, "football", summary) {
                    Ok(()) => println!("  Wrote {}", json_path),
                    Err(e) => eprintln!("  Failed to write {}: {}", json_path, e),
                }
            }
        }
    }
    println!("====================================================================");
    println!();
    Ok(())
}
