use anyhow::{Context, Result};

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];
const ORBITS: [&str; 5] = ["LEO", "LEO (ISS)", "GTO", "Polar LEO", "SSO"];

/// Seeded splitmix64 stream; the same seed always writes the same file.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Payload cell in one of the encodings seen in scraped launch tables.
fn messy_payload(rng: &mut SampleRng) -> String {
    let roll = rng.unit();
    if roll < 0.05 {
        return String::new();
    }
    if roll < 0.10 {
        let marker = if rng.unit() < 0.5 { "Classified" } else { "~Classified" };
        return marker.to_string();
    }

    let mass = (rng.unit() * 15600.0 + 20.0).round() as u64;
    let mut text = if mass >= 1000 {
        format!("{},{:03}", mass / 1000, mass % 1000)
    } else {
        mass.to_string()
    };
    if roll > 0.85 {
        text.insert(0, '~');
    }
    text
}

fn outcome(rng: &mut SampleRng) -> &'static str {
    match rng.unit() {
        r if r < 0.90 => "Success",
        r if r < 0.95 => "Failure (in flight)",
        r if r < 0.98 => "Success (payload status unclear)",
        _ => "Failure (parachute)",
    }
}

fn main() -> Result<()> {
    let mut rng = SampleRng(42);
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_launch_data.csv".to_string());
    let rows: usize = 120;

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "Flight No.",
        "Launch Site",
        "Payload Mass (kg)",
        "Orbit",
        "Mission Outcome",
    ])?;

    for flight in 1..=rows {
        let site = rng.pick(&SITES);
        let payload = messy_payload(&mut rng);
        let orbit = rng.pick(&ORBITS);
        let result = outcome(&mut rng);
        writer.write_record([flight.to_string().as_str(), site, payload.as_str(), orbit, result])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} launches to {output_path}");
    Ok(())
}
