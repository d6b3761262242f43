use std::process::exit;

use optrace::trace::{bond_distances, energies};
use serde::Serialize;

/// one extracted series plus the range the plotting side needs for its axes
#[derive(Serialize)]
struct Series {
    values: Vec<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

impl Series {
    fn new(values: Vec<f64>) -> Self {
        let min = values.iter().copied().reduce(f64::min);
        let max = values.iter().copied().reduce(f64::max);
        Self { values, min, max }
    }
}

#[derive(Serialize)]
struct Report {
    energy: Series,
    distance: Series,
}

fn usage() -> ! {
    eprintln!("usage: read_log LOGFILE A B");
    exit(1);
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let [_, logfile, a, b] = &args[..] else {
        usage();
    };
    let (Ok(a), Ok(b)) = (a.parse::<usize>(), b.parse::<usize>()) else {
        usage();
    };

    let energy = energies(logfile).unwrap_or_else(|e| {
        eprintln!("failed to read energies from {logfile} with {e:?}");
        exit(1);
    });
    let distance = bond_distances(logfile, a, b).unwrap_or_else(|e| {
        eprintln!("failed to read R({a},{b}) from {logfile} with {e:?}");
        exit(1);
    });

    let report = Report {
        energy: Series::new(energy),
        distance: Series::new(distance),
    };
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
}
