//! Wall-clock and process CPU time measurement.

use std::time::Instant;

use crate::models::ElapsedTime;

/// Measures real and CPU time from the moment it is started.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    real: Instant,
    cpu: Option<f64>,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            real: Instant::now(),
            cpu: process_cpu_seconds(),
        }
    }

    /// Time since [`start`](Self::start), in seconds.
    ///
    /// Where process CPU time is unavailable, the CPU figure repeats the
    /// real one.
    pub fn elapsed(&self) -> ElapsedTime {
        let real = self.real.elapsed().as_secs_f64();
        let cpu = match (self.cpu, process_cpu_seconds()) {
            (Some(start), Some(now)) => (now - start).max(0.0),
            _ => real,
        };
        ElapsedTime { real, cpu }
    }
}

#[cfg(unix)]
fn process_cpu_seconds() -> Option<f64> {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `ts` is a valid, exclusively borrowed timespec.
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, &mut ts) };
    (rc == 0).then(|| ts.tv_sec as f64 + ts.tv_nsec as f64 * 1e-9)
}

#[cfg(not(unix))]
fn process_cpu_seconds() -> Option<f64> {
    None
}
