use serde::{Deserialize, Serialize};

use crate::{atom::Atom, geom::Geom};

pub mod psi4;

/// the kind of calculation to request from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Procedure {
    Opt,
    SinglePt,
}

/// the body of an engine input file with `{{.geom}}`, `{{.charge}}`, and
/// `{{.mult}}` placeholders, in the style of [Go
/// templates](https://pkg.go.dev/text/template)
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Template {
    pub header: String,
}

impl From<&str> for Template {
    fn from(s: &str) -> Self {
        Self {
            header: s.to_owned(),
        }
    }
}

/// what a finished engine run reports: the final energy in Hartrees, the
/// optimized Cartesian geometry if one was printed, and the wall time in
/// seconds
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramResult {
    pub energy: f64,
    pub cart_geom: Option<Vec<Atom>>,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    FileNotFound(String),
    ErrorInOutput(String),
    EnergyNotFound(String),
    EnergyParseError(String),
}

impl ProgramError {
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }

    pub fn is_error_in_output(&self) -> bool {
        matches!(self, Self::ErrorInOutput(_))
    }

    pub fn is_energy_not_found(&self) -> bool {
        matches!(self, Self::EnergyNotFound(_))
    }

    pub fn is_energy_parse_error(&self) -> bool {
        matches!(self, Self::EnergyParseError(_))
    }
}

pub trait Program {
    fn new(
        filename: String,
        template: Template,
        charge: isize,
        multiplicity: usize,
        geom: Geom,
    ) -> Self;

    /// the base name for input and output files, without an extension
    fn filename(&self) -> String;

    fn set_filename(&mut self, filename: &str);

    fn template(&self) -> &Template;

    /// the extension to append to `filename` for the input file
    fn extension(&self) -> String;

    fn charge(&self) -> isize;

    fn multiplicity(&self) -> usize;

    fn infile(&self) -> String;

    fn outfile(&self) -> String {
        self.filename() + ".out"
    }

    fn write_input(&mut self, proc: Procedure);

    fn read_output(filename: &str) -> Result<ProgramResult, ProgramError>;

    /// Return all the filenames associated with the Program
    fn associated_files(&self) -> Vec<String>;
}
