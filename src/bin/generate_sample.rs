use serde::Serialize;

/// One CSV row, written with the same nine columns the loader reads.
#[derive(Serialize)]
struct SampleRow {
    #[serde(rename = "fsaID")]
    fsa_id: u64,
    name: String,
    address: String,
    postcode: String,
    easting: String,
    northing: String,
    latitude: String,
    longitude: String,
    #[serde(rename = "localAuthority")]
    local_authority: String,
}

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

    /// Uniform in `[-spread, spread)`.
    fn jitter(&mut self, spread: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * spread
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (authority, centre lat, centre lon, postcode areas, pubs to generate)
const TOWNS: &[(&str, f64, f64, &[&str], usize)] = &[
    ("City of London", 51.5155, -0.0922, &["EC1", "EC2", "EC3", "EC4"], 41),
    ("Southwark", 51.5030, -0.0870, &["SE1", "SE5", "SE1"], 35),
    ("Camden", 51.5390, -0.1426, &["NW1", "NW3", "WC1"], 30),
    ("Oxford", 51.7520, -1.2577, &["OX1", "OX2", "OX4"], 19),
    ("Manchester", 53.4808, -2.2426, &["M1 ", "M4 ", "M20"], 60),
    ("Leeds", 53.8008, -1.5491, &["LS1", "LS6"], 25),
];

const PUB_WORDS: &[&str] = &[
    "Red Lion", "Crown", "Royal Oak", "White Hart", "Swan", "Plough", "Bell", "Kings Arms",
    "George", "Anchor",
];
const STREETS: &[&str] = &["High Street", "Church Lane", "Market Place", "Bridge Road", "Mill Lane"];

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "open_pubs_10000_sample.csv";
    let mut writer = csv::Writer::from_path(output_path)?;

    let mut row_id: u64 = 0;
    let mut malformed = 0usize;
    for &(authority, lat, lon, areas, count) in TOWNS {
        for _ in 0..count {
            row_id += 1;
            let area = rng.pick(areas);
            let mut latitude = format!("{:.6}", lat + rng.jitter(0.03));
            let longitude = format!("{:.6}", lon + rng.jitter(0.05));

            // Every so often a coordinate is missing, as in the real export.
            if row_id % 29 == 0 {
                latitude = "\\N".to_string();
                malformed += 1;
            }

            writer.serialize(SampleRow {
                fsa_id: 100_000 + row_id,
                name: format!("The {}", rng.pick(PUB_WORDS)),
                address: format!("{} {}, {authority}", 1 + rng.next_u64() % 200, rng.pick(STREETS)),
                postcode: format!("{} {}AB", area.trim_end(), rng.next_u64() % 10),
                easting: format!("{}", 500_000 + rng.next_u64() % 50_000),
                northing: format!("{}", 150_000 + rng.next_u64() % 50_000),
                latitude,
                longitude,
                local_authority: authority.to_string(),
            })?;
        }
    }
    writer.flush()?;

    println!("Wrote {row_id} pubs ({malformed} with a missing latitude) to {output_path}");
    Ok(())
}
