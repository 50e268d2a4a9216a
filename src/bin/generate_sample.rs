use anyhow::{Context, Result};

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

    /// Uniform jitter in [-spread, spread].
    fn jitter(&mut self, spread: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * spread
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // (state, female school attendance %, population below 15 %, urban %)
    // for the NFHS-5 / Total baseline.
    let states: [(&str, f64, f64, f64); 10] = [
        ("Andhra Pradesh", 68.6, 23.4, 33.5),
        ("Assam", 77.1, 28.5, 13.1),
        ("Bihar", 57.8, 34.9, 11.3),
        ("Goa", 89.4, 19.2, 66.8),
        ("Gujarat", 74.8, 25.1, 43.4),
        ("Kerala", 97.2, 20.0, 52.3),
        ("Maharashtra", 81.3, 23.6, 45.9),
        ("Rajasthan", 61.6, 30.1, 24.9),
        ("Tamil Nadu", 83.0, 20.8, 49.1),
        ("West Bengal", 76.1, 24.4, 31.9),
    ];
    let surveys = ["NFHS-4", "NFHS-5"];
    let areas = ["Total", "Urban", "Rural"];

    let output_path = "sample_survey.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "India/States/UTs",
        "Survey",
        "Area",
        "Population and Household Profile - Population (female) age 6 years and above who ever attended school (%)",
        "Population and Household Profile - Population below age 15 years (%)",
        "Population and Household Profile - Urban population (%)",
    ])?;

    let mut rows = 0usize;
    for (state, edu, below15, urban) in states {
        for survey in surveys {
            // NFHS-4 lags NFHS-5 on school attendance and leads on the
            // share of children, like the real series.
            let survey_shift = if survey == "NFHS-4" { -4.0 } else { 0.0 };

            for area in areas {
                let area_shift = match area {
                    "Urban" => 6.0,
                    "Rural" => -5.0,
                    _ => 0.0,
                };

                let edu_value = (edu + survey_shift + area_shift + rng.jitter(1.0))
                    .clamp(0.0, 100.0);
                let below15_value =
                    (below15 - survey_shift * 0.4 + rng.jitter(0.8)).clamp(0.0, 100.0);
                let urban_value = match area {
                    "Urban" => 100.0,
                    "Rural" => 0.0,
                    _ => (urban + rng.jitter(0.5)).clamp(0.0, 100.0),
                };

                // Real NFHS exports carry suppressed and blank cells; keep
                // a few so the dashboard's N/A path stays exercised.
                let edu_field = if state == "Goa" && survey == "NFHS-4" && area == "Urban" {
                    "*".to_string()
                } else {
                    format!("{edu_value:.1}")
                };
                let urban_field = if state == "Assam" && area == "Rural" {
                    String::new()
                } else {
                    format!("{urban_value:.1}")
                };
                let below15_field = format!("{below15_value:.1}");

                writer.write_record([
                    state,
                    survey,
                    area,
                    edu_field.as_str(),
                    below15_field.as_str(),
                    urban_field.as_str(),
                ])?;
                rows += 1;
            }
        }
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
