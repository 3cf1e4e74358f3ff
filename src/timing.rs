//! Wall-clock and CPU time of one timed phase.

use crate::error::*;
use std::time::Instant;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Timings {
    /// Seconds of wall-clock time.
    pub wall: f64,

    /// User CPU seconds of this process.
    pub user_cpu: f64,

    /// User CPU seconds of waited-on child processes.
    pub children_user_cpu: f64,
}

pub struct Stopwatch {
    wall_start: Instant,
    cpu_start: f64,
    children_cpu_start: f64,
}

impl Stopwatch {
    pub fn start() -> Result<Self> {
        Ok(Stopwatch {
            cpu_start: user_cpu_seconds(libc::RUSAGE_SELF)?,
            children_cpu_start: user_cpu_seconds(libc::RUSAGE_CHILDREN)?,
            wall_start: Instant::now(),
        })
    }

    pub fn stop(&self) -> Result<Timings> {
        let wall = self.wall_start.elapsed().as_secs_f64();
        Ok(Timings {
            wall,
            user_cpu: user_cpu_seconds(libc::RUSAGE_SELF)? - self.cpu_start,
            children_user_cpu: user_cpu_seconds(libc::RUSAGE_CHILDREN)?
                - self.children_cpu_start,
        })
    }
}

/// Run `f` and report how long it took.
pub fn timed<T, F: FnOnce() -> Result<T>>(f: F) -> Result<(T, Timings)> {
    let stopwatch = Stopwatch::start()?;
    let value = f()?;
    Ok((value, stopwatch.stop()?))
}

fn user_cpu_seconds(who: libc::c_int) -> Result<f64> {
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    if unsafe { libc::getrusage(who, &mut usage) } != 0 {
        return Err(BenchError::Clock(std::io::Error::last_os_error()));
    }
    Ok(usage.ru_utime.tv_sec as f64 + usage.ru_utime.tv_usec as f64 / 1e6)
}
