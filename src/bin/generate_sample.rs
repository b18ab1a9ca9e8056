//! Writes a deterministic sample sales CSV for trying out the dashboard:
//! `cargo run --bin generate_sample`, then open `sample_sales.csv`.

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let states = [
        "California",
        "Texas",
        "New York",
        "Washington",
        "Florida",
        "Illinois",
    ];
    // (category, typical price, price spread)
    let categories = [
        ("Electronics", 450.0, 300.0),
        ("Books", 22.0, 12.0),
        ("Clothing", 55.0, 35.0),
        ("Home & Kitchen", 120.0, 90.0),
        ("Toys", 30.0, 20.0),
    ];
    let days_in_month = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    let output_path = "sample_sales.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["Date", "State", "Category", "Sale Amount"])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for month in 1..=12u32 {
        // Order volume ramps up through the year.
        let orders_this_month = 25 + month * 4;
        for _ in 0..orders_this_month {
            let day = 1 + (rng.next_u64() % days_in_month[month as usize - 1]) as u32;
            let state = rng.pick(&states);
            let &(category, typical, spread) = rng.pick(&categories);

            let mut amount = typical + (rng.next_f64() - 0.5) * 2.0 * spread;
            // Roughly 3% refunds.
            if rng.next_f64() < 0.03 {
                amount = -amount;
            }

            writer
                .write_record([
                    format!("2023-{month:02}-{day:02}"),
                    state.to_string(),
                    category.to_string(),
                    format!("{amount:.2}"),
                ])
                .expect("Failed to write row");
            rows += 1;
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} orders to {output_path}");
}
