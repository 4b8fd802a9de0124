use std::io::{self, Write};

use crate::dynamics::state::State;

/// Write sampled trajectory states to CSV format.
///
/// Columns: time, x, y, vx, vy, speed
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[State]) -> io::Result<()> {
    writeln!(writer, "time,x,y,vx,vy,speed")?;

    for s in trajectory {
        writeln!(
            writer,
            "{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
            s.time,
            s.pos.x, s.pos.y,
            s.vel.x, s.vel.y,
            s.speed(),
        )?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: &str, trajectory: &[State]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_trajectory(&mut file, trajectory)
}
