use std::{
    fmt::Display,
    io::{self, ErrorKind},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// an atom as the external engine sees it: an element symbol and Cartesian
/// coordinates in Angstroms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Atom {
    pub fn new(label: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            label: label.to_string(),
            x,
            y,
            z,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl FromStr for Atom {
    type Err = io::Error;

    /// parse an Atom from a line like
    ///  C 1.0 1.0 1.0
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<_> = s.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(io::Error::new(
                ErrorKind::Other,
                "wrong number of fields in Atom",
            ));
        }
        let coord: Result<Vec<f64>, _> =
            fields[1..].iter().map(|s| s.parse()).collect();
        let Ok(coord) = coord else {
            return Err(io::Error::new(
                ErrorKind::Other,
                "failed to parse coordinate field as f64",
            ));
        };
        Ok(Self::new(fields[0], coord[0], coord[1], coord[2]))
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:2} {:15.10} {:15.10} {:15.10}",
            self.label, self.x, self.y, self.z
        )
    }
}
