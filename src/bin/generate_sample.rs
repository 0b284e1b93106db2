use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const OUTPUT: &str = "Cleaned_Package_Data_County.csv";
const FORMAT: &str = "%m/%d/%Y %H:%M";
const PACKAGES: usize = 500;

/// (carrier, relative volume, mean hours in storage)
const CARRIERS: [(&str, u32, f64); 5] = [
    ("UPS", 35, 6.0),
    ("FedEx", 25, 8.0),
    ("USPS", 20, 12.0),
    ("Amazon", 15, 4.0),
    ("DHL", 5, 18.0),
];

const COUNTIES: [&str; 4] = ["Kent", "Sussex", "New Castle", "Cecil"];

fn pick_carrier(rng: &mut StdRng) -> (&'static str, f64) {
    let total: u32 = CARRIERS.iter().map(|c| c.1).sum();
    let mut roll = rng.gen_range(0..total);
    for &(name, weight, storage) in &CARRIERS {
        if roll < weight {
            return (name, storage);
        }
        roll -= weight;
    }
    (CARRIERS[0].0, CARRIERS[0].2)
}

fn minutes(hours: f64) -> Duration {
    Duration::minutes((hours * 60.0).round() as i64)
}

fn fmt(t: NaiveDateTime) -> String {
    t.format(FORMAT).to_string()
}

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(6, 0, 0))
        .expect("valid start date");

    let mut writer = csv::Writer::from_path(OUTPUT).expect("Failed to create output file");
    writer
        .write_record([
            "Package ID",
            "Carrier",
            "County",
            "Routed Date Time",
            "Stored Date Time",
            "Delivered Date Time",
        ])
        .expect("Failed to write header");

    for id in 0..PACKAGES {
        let (carrier, storage_mean) = pick_carrier(&mut rng);
        let county = COUNTIES[rng.gen_range(0..COUNTIES.len())];

        let routed = start + Duration::minutes(rng.gen_range(0..60 * 24 * 30));
        let stored = routed + minutes(rng.gen_range(0.25..4.0));
        let delivered = stored + minutes(storage_mean * rng.gen_range(0.3..2.2));

        // A few rows exercise the missing-value paths.
        let roll: f64 = rng.gen();
        let (routed, stored, delivered) = if roll < 0.02 {
            ("pending".to_string(), fmt(stored), fmt(delivered))
        } else if roll < 0.05 {
            (fmt(routed), String::new(), fmt(delivered))
        } else if roll < 0.07 {
            (fmt(routed), fmt(stored), String::new())
        } else {
            (fmt(routed), fmt(stored), fmt(delivered))
        };

        writer
            .write_record([
                format!("PKG-{id:05}"),
                carrier.to_string(),
                county.to_string(),
                routed,
                stored,
                delivered,
            ])
            .expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {PACKAGES} packages to {OUTPUT}");
}
