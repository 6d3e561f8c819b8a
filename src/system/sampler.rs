use std::collections::HashMap;
use std::time::Instant;

use super::platform::CpuTimes;

/// A point-in-time CPU reading for one PID, stamped with a monotonic clock.
#[derive(Clone, Copy, Debug)]
pub struct CpuTimeSample {
    pub times: CpuTimes,
    pub taken_at: Instant,
}

#[derive(Debug)]
struct Entry {
    sample: CpuTimeSample,
    last_seen_cycle: u64,
}

/// Converts pairs of time-stamped CPU readings into utilization percentages.
///
/// A single reading cannot yield a rate; the sampler keeps the most recent
/// sample per PID and computes the delta against it on the next refresh.
/// Entries for PIDs that stop appearing are swept after [`STALE_CYCLES`]
/// refreshes so the table stays bounded over long runs.
#[derive(Debug, Default)]
pub struct CpuSampler {
    history: HashMap<u32, Entry>,
    cycle: u64,
}

/// Refreshes an entry may miss before the sweep drops it.
const STALE_CYCLES: u64 = 10;
/// The sweep itself runs every few cycles, as an amortized pass.
const SWEEP_INTERVAL: u64 = 5;

impl CpuSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a refresh cycle.
    pub fn begin_cycle(&mut self) {
        self.cycle += 1;
    }

    /// Fold a fresh reading for `pid` into the history and return its
    /// utilization since the previous reading, normalized to a
    /// single-core-equivalent percentage in `[0, 100]`.
    ///
    /// Returns `None` (unknown) on the first observation of a PID, on a
    /// zero/negative wall-clock delta, or when the PID appears to have been
    /// reused by a new process.
    pub fn observe(&mut self, pid: u32, sample: CpuTimeSample, core_count: usize) -> Option<f32> {
        if core_count == 0 {
            return None;
        }

        let cycle = self.cycle;
        let Some(entry) = self.history.get_mut(&pid) else {
            self.history.insert(pid, Entry { sample, last_seen_cycle: cycle });
            return None;
        };

        // Strong reuse check: a changed creation identity means this PID now
        // belongs to a different process.
        if let (Some(prev), Some(now)) = (entry.sample.times.created, sample.times.created)
            && prev != now
        {
            *entry = Entry { sample, last_seen_cycle: cycle };
            return None;
        }

        let wall = match sample.taken_at.checked_duration_since(entry.sample.taken_at) {
            Some(d) if !d.is_zero() => d,
            // Clock anomaly or a duplicate read: no delta is computable and
            // the stored sample must survive untouched.
            _ => {
                entry.last_seen_cycle = cycle;
                return None;
            }
        };

        let prev_total = entry.sample.times.total();
        let now_total = sample.times.total();
        if now_total < prev_total {
            // Fallback reuse heuristic when no creation identity exists:
            // cumulative counters never decrease for a live process.
            *entry = Entry { sample, last_seen_cycle: cycle };
            return None;
        }

        let cpu_elapsed = now_total - prev_total;
        let percent =
            100.0 * cpu_elapsed.as_secs_f64() / wall.as_secs_f64() / core_count as f64;

        *entry = Entry { sample, last_seen_cycle: cycle };
        Some(percent.clamp(0.0, 100.0) as f32)
    }

    /// Mark the end of a refresh cycle, evicting entries that have not been
    /// observed for [`STALE_CYCLES`] cycles.
    pub fn end_cycle(&mut self) {
        if !self.cycle.is_multiple_of(SWEEP_INTERVAL) {
            return;
        }
        let cycle = self.cycle;
        self.history
            .retain(|_, entry| cycle - entry.last_seen_cycle < STALE_CYCLES);
    }

    pub fn tracked(&self, pid: u32) -> bool {
        self.history.contains_key(&pid)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn sample(at: Instant, kernel_ms: u64, user_ms: u64) -> CpuTimeSample {
        CpuTimeSample {
            times: CpuTimes {
                kernel: Duration::from_millis(kernel_ms),
                user: Duration::from_millis(user_ms),
                created: Some(Duration::from_secs(1)),
            },
            taken_at: at,
        }
    }

    #[test]
    fn first_observation_is_unknown_and_seeds_history() {
        let mut sampler = CpuSampler::new();
        sampler.begin_cycle();
        let t0 = Instant::now();
        assert_eq!(sampler.observe(1000, sample(t0, 0, 0), 1), None);
        assert!(sampler.tracked(1000));
    }

    #[test]
    fn second_sample_yields_normalized_percentage() {
        // PID 1000 at t=0 with (0, 0), at t=1s with (0.4s, 0.2s), 2 cores:
        // 100 * 0.6 / 1 / 2 = 30.0
        let mut sampler = CpuSampler::new();
        let t0 = Instant::now();
        sampler.begin_cycle();
        assert_eq!(sampler.observe(1000, sample(t0, 0, 0), 2), None);
        sampler.begin_cycle();
        let p = sampler
            .observe(1000, sample(t0 + Duration::from_secs(1), 400, 200), 2)
            .unwrap();
        assert!((p - 30.0).abs() < 1e-3, "got {p}");
    }

    #[test]
    fn single_core_delta_is_unnormalized() {
        let mut sampler = CpuSampler::new();
        let t0 = Instant::now();
        sampler.begin_cycle();
        sampler.observe(7, sample(t0, 0, 0), 1);
        sampler.begin_cycle();
        let p = sampler
            .observe(7, sample(t0 + Duration::from_secs(2), 500, 500), 1)
            .unwrap();
        assert!((p - 50.0).abs() < 1e-3, "got {p}");
    }

    #[test]
    fn zero_wall_elapsed_is_unknown_and_history_survives() {
        let mut sampler = CpuSampler::new();
        let t0 = Instant::now();
        sampler.begin_cycle();
        sampler.observe(1, sample(t0, 0, 0), 1);
        sampler.begin_cycle();
        // Same timestamp: no delta, and the t0 sample must stay in place.
        assert_eq!(sampler.observe(1, sample(t0, 100, 100), 1), None);
        sampler.begin_cycle();
        let p = sampler
            .observe(1, sample(t0 + Duration::from_secs(1), 250, 250), 1)
            .unwrap();
        // Delta is against the original (0, 0) sample, not the rejected one.
        assert!((p - 50.0).abs() < 1e-3, "got {p}");
    }

    #[test]
    fn negative_delta_is_treated_as_pid_reuse() {
        let mut sampler = CpuSampler::new();
        let t0 = Instant::now();
        sampler.begin_cycle();
        sampler.observe(2, sample(t0, 500, 500), 1);
        sampler.begin_cycle();
        assert_eq!(
            sampler.observe(2, sample(t0 + Duration::from_secs(1), 10, 10), 1),
            None
        );
        // The new process's sample seeded the history, so the next reading
        // computes a real delta.
        sampler.begin_cycle();
        let p = sampler
            .observe(2, sample(t0 + Duration::from_secs(2), 110, 110), 1)
            .unwrap();
        assert!((p - 20.0).abs() < 1e-3, "got {p}");
    }

    #[test]
    fn changed_creation_identity_is_treated_as_pid_reuse() {
        let mut sampler = CpuSampler::new();
        let t0 = Instant::now();
        sampler.begin_cycle();
        sampler.observe(3, sample(t0, 0, 0), 1);

        let mut reused = sample(t0 + Duration::from_secs(1), 900, 900);
        reused.times.created = Some(Duration::from_secs(42));
        sampler.begin_cycle();
        assert_eq!(sampler.observe(3, reused, 1), None);
    }

    #[test]
    fn sampling_jitter_clamps_to_one_hundred() {
        let mut sampler = CpuSampler::new();
        let t0 = Instant::now();
        sampler.begin_cycle();
        sampler.observe(4, sample(t0, 0, 0), 1);
        sampler.begin_cycle();
        let p = sampler
            .observe(4, sample(t0 + Duration::from_secs(1), 3000, 0), 1)
            .unwrap();
        assert_eq!(p, 100.0);
    }

    #[test]
    fn zero_cores_is_unknown() {
        let mut sampler = CpuSampler::new();
        sampler.begin_cycle();
        assert_eq!(sampler.observe(5, sample(Instant::now(), 0, 0), 0), None);
    }

    #[test]
    fn stale_entries_are_swept() {
        let mut sampler = CpuSampler::new();
        sampler.begin_cycle();
        sampler.observe(6, sample(Instant::now(), 0, 0), 1);
        assert!(sampler.tracked(6));

        // Enough empty cycles for the entry to go stale and a sweep to run.
        for _ in 0..(STALE_CYCLES + SWEEP_INTERVAL) {
            sampler.begin_cycle();
            sampler.end_cycle();
        }
        assert!(!sampler.tracked(6));
    }

    #[test]
    fn live_entries_survive_the_sweep() {
        let mut sampler = CpuSampler::new();
        let t0 = Instant::now();
        for i in 0..(STALE_CYCLES + SWEEP_INTERVAL) {
            sampler.begin_cycle();
            sampler.observe(8, sample(t0 + Duration::from_secs(i), 0, 0), 1);
            sampler.end_cycle();
        }
        assert!(sampler.tracked(8));
        assert_eq!(sampler.len(), 1);
    }
}
