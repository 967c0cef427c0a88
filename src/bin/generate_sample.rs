//! Writes a synthetic four-channel EMG recording to `data.csv` in the
//! current directory, using the column layout the viewer expects.

const CHANNELS: [u32; 4] = [21, 22, 31, 32];
const SAMPLE_RATE: f64 = 1000.0;
const DURATION_S: f64 = 12.0;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Muscle activation envelope: smooth bursts of ~1 s every `period` seconds.
fn envelope(t: f64, period: f64, phase: f64) -> f64 {
    let local = (t + phase).rem_euclid(period);
    let burst = (-(local - 1.0).powi(2) / (2.0 * 0.25_f64.powi(2))).exp();
    0.05 + burst
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let n = (SAMPLE_RATE * DURATION_S) as usize;

    let mut header = Vec::new();
    for ch in CHANNELS {
        header.push(format!("X[s]_{ch}"));
        header.push(format!("EMG{ch}"));
    }

    let output_path = "data.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(&header)?;

    for i in 0..n {
        let t = i as f64 / SAMPLE_RATE;
        let mut row = Vec::with_capacity(header.len());
        for (k, _) in CHANNELS.iter().enumerate() {
            let period = 2.5 + k as f64 * 0.5;
            let amplitude = envelope(t, period, k as f64 * 0.3);
            row.push(format!("{t:.3}"));
            // A dropped sample now and then, as real exports contain.
            if rng.next_f64() < 0.0005 {
                row.push("NaN".to_string());
            } else {
                row.push(format!("{:.5}", rng.gauss(0.0, amplitude)));
            }
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;

    println!(
        "Wrote {n} samples x {} channels to {output_path}",
        CHANNELS.len()
    );
    Ok(())
}
