use serde::{Deserialize, Serialize};
use std::{fmt::Display, io, str::FromStr};

use crate::atom::Atom;

/// a Cartesian molecular geometry. the engine interface is XYZ-only, so this
/// is just the ordered atom list; charge and spin multiplicity belong to the
/// [Program](crate::program::Program) invoking the engine
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Geom {
    pub atoms: Vec<Atom>,
}

impl Geom {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl Display for Geom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for atom in &self.atoms {
            writeln!(f, "{atom}")?
        }
        Ok(())
    }
}

impl FromStr for Geom {
    type Err = io::Error;

    /// accept either a bare block of atom lines or a conventional XYZ file
    /// with the atom count and comment header
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut atoms = Vec::new();
        let mut skip = 0;
        for line in s.lines() {
            let fields = line.split_whitespace().collect::<Vec<_>>();
            if skip > 0 {
                skip -= 1;
            } else if fields.is_empty() {
                continue;
            } else if fields.len() == 1 && fields[0].parse::<usize>().is_ok() {
                // atom count, comment line follows
                skip = 1;
            } else {
                atoms.push(line.parse()?);
            }
        }
        Ok(Self { atoms })
    }
}
