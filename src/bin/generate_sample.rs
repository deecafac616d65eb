use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One synthetic car. `None` marks a missing cell.
struct Car {
    brand: String,
    model: String,
    year: i64,
    price: Option<i64>,
    mileage: Option<i64>,
    engine_size: Option<f64>,
    fuel_type: Option<String>,
    transmission: String,
}

const BRANDS: &[(&str, &[&str], f64)] = &[
    ("Toyota", &["Corolla", "Camry", "RAV4"], 24000.0),
    ("Honda", &["Civic", "Accord", "CR-V"], 23000.0),
    ("Ford", &["Focus", "Fiesta", "Kuga"], 19000.0),
    ("BMW", &["320i", "X3", "118d"], 38000.0),
    ("Audi", &["A3", "A4", "Q5"], 36000.0),
    ("Kia", &["Rio", "Ceed", "Sportage"], 17000.0),
    ("Hyundai", &["i20", "i30", "Tucson"], 17500.0),
    ("Volkswagen", &["Polo", "Golf", "Tiguan"], 22000.0),
    ("Renault", &["Clio", "Megane"], 15000.0),
    ("Skoda", &["Fabia", "Octavia"], 18000.0),
    ("Mazda", &["Mazda2", "CX-5"], 21000.0),
    ("Tesla", &["Model 3"], 45000.0),
];

const FUELS: &[&str] = &["Petrol", "Diesel", "Hybrid", "Electric"];
const TRANSMISSIONS: &[&str] = &["Manual", "Automatic"];

fn generate(rng: &mut SimpleRng, count: usize) -> Vec<Car> {
    let mut cars = Vec::with_capacity(count);
    for _ in 0..count {
        let (brand, models, base_price) = *rng.pick(BRANDS);
        let model = *rng.pick(models);
        let year = 2008 + (rng.next_u64() % 16) as i64;
        let age = (2024 - year) as f64;
        let mileage = (age * 12000.0 + rng.gauss(0.0, 6000.0)).max(500.0);
        let price = (base_price * 0.92f64.powf(age) - mileage * 0.02 + rng.gauss(0.0, 1500.0))
            .max(1500.0);
        let fuel = if brand == "Tesla" { "Electric" } else { *rng.pick(FUELS) };
        let engine = if fuel == "Electric" {
            None
        } else {
            Some((rng.gauss(1.8, 0.4).clamp(1.0, 4.0) * 10.0).round() / 10.0)
        };

        // Sprinkle missing cells so the missing-value report has something to show.
        let missing = |rng: &mut SimpleRng| rng.next_f64() < 0.03;
        cars.push(Car {
            brand: brand.to_string(),
            model: model.to_string(),
            year,
            price: (!missing(rng)).then_some(price.round() as i64),
            mileage: (!missing(rng)).then_some(mileage.round() as i64),
            engine_size: engine.filter(|_| !missing(rng)),
            fuel_type: (!missing(rng)).then(|| fuel.to_string()),
            transmission: rng.pick(TRANSMISSIONS).to_string(),
        });
    }

    // A few exact duplicates for the duplicate report.
    let dupes: Vec<usize> = (0..5).map(|i| i * 37 % cars.len().max(1)).collect();
    for idx in dupes {
        let copy = cars.get(idx).map(|car| Car {
            brand: car.brand.clone(),
            model: car.model.clone(),
            fuel_type: car.fuel_type.clone(),
            transmission: car.transmission.clone(),
            ..*car
        });
        cars.extend(copy);
    }
    cars
}

const HEADERS: [&str; 8] = [
    "Brand",
    "Model",
    "Year",
    "Price",
    "Mileage",
    "Engine_Size",
    "Fuel_Type",
    "Transmission",
];

fn write_csv(cars: &[Car], path: &str) -> Result<()> {
    fn cell<T: ToString>(v: &Option<T>) -> String {
        v.as_ref().map(|v| v.to_string()).unwrap_or_default()
    }

    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(HEADERS)?;
    for car in cars {
        writer.write_record([
            car.brand.clone(),
            car.model.clone(),
            car.year.to_string(),
            cell(&car.price),
            cell(&car.mileage),
            cell(&car.engine_size),
            cell(&car.fuel_type),
            car.transmission.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(cars: &[Car], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(HEADERS[0], DataType::Utf8, false),
        Field::new(HEADERS[1], DataType::Utf8, false),
        Field::new(HEADERS[2], DataType::Int64, false),
        Field::new(HEADERS[3], DataType::Int64, true),
        Field::new(HEADERS[4], DataType::Int64, true),
        Field::new(HEADERS[5], DataType::Float64, true),
        Field::new(HEADERS[6], DataType::Utf8, true),
        Field::new(HEADERS[7], DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(cars.iter().map(|c| c.brand.as_str()))),
        Arc::new(StringArray::from_iter_values(cars.iter().map(|c| c.model.as_str()))),
        Arc::new(Int64Array::from_iter_values(cars.iter().map(|c| c.year))),
        Arc::new(Int64Array::from_iter(cars.iter().map(|c| c.price))),
        Arc::new(Int64Array::from_iter(cars.iter().map(|c| c.mileage))),
        Arc::new(Float64Array::from_iter(cars.iter().map(|c| c.engine_size))),
        Arc::new(StringArray::from_iter(cars.iter().map(|c| c.fuel_type.as_deref()))),
        Arc::new(StringArray::from_iter_values(
            cars.iter().map(|c| c.transmission.as_str()),
        )),
    ];

    let batch =
        RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let cars = generate(&mut rng, 400);

    write_csv(&cars, "cars.csv")?;
    write_parquet(&cars, "cars.parquet")?;

    println!("Wrote {} cars to cars.csv and cars.parquet", cars.len());
    Ok(())
}
