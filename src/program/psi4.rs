use std::{
    fs::{read_to_string, File},
    sync::OnceLock,
};

use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{atom::Atom, geom::Geom};

use super::{Procedure, Program, ProgramError, ProgramResult, Template};

#[cfg(test)]
mod tests;

static INPUT_CELL: OnceLock<[Regex; 4]> = OnceLock::new();
static CELL: OnceLock<[Regex; 6]> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Psi4 {
    filename: String,
    template: Template,
    charge: isize,
    multiplicity: usize,
    geom: Geom,
}

impl Program for Psi4 {
    fn new(
        filename: String,
        template: Template,
        charge: isize,
        multiplicity: usize,
        geom: Geom,
    ) -> Self {
        Self {
            filename,
            template,
            charge,
            multiplicity,
            geom,
        }
    }

    fn filename(&self) -> String {
        self.filename.clone()
    }

    fn set_filename(&mut self, filename: &str) {
        self.filename = String::from(filename);
    }

    fn template(&self) -> &Template {
        &self.template
    }

    fn extension(&self) -> String {
        String::from("in")
    }

    fn charge(&self) -> isize {
        self.charge
    }

    fn multiplicity(&self) -> usize {
        self.multiplicity
    }

    fn infile(&self) -> String {
        self.filename() + ".in"
    }

    /// Example [Template]:
    /// ```text
    /// molecule {
    /// {{.charge}} {{.mult}}
    /// {{.geom}}}
    ///
    /// set basis 6-31G(d)
    /// set geom_maxiter 50
    ///
    /// optimize('scf')
    /// ```
    ///
    /// `{{.geom}}` is replaced with `self.geom`, `{{.charge}}` with
    /// `self.charge`, and `{{.mult}}` with `self.multiplicity`. Note the
    /// closing brace glued to `{{.geom}}`: the rendered geometry ends with a
    /// newline, so the brace lands on its own line. If `proc` is
    /// `Procedure::Opt` and the template has no `optimize(...)` call, one is
    /// appended. If `proc` is `SinglePt`, any `optimize(...)` calls are
    /// turned into `energy(...)` calls.
    fn write_input(&mut self, proc: Procedure) {
        use std::io::Write;
        let mut body = self.template().clone().header;
        let [opt, charge, mult, geom_re] = INPUT_CELL.get_or_init(|| {
            [
                Regex::new(r"(?i)optimize\(").unwrap(),
                Regex::new(r"\{\{.charge\}\}").unwrap(),
                Regex::new(r"\{\{.mult\}\}").unwrap(),
                Regex::new(r"\{\{.geom\}\}").unwrap(),
            ]
        });
        let found_opt = opt.is_match(&body);
        {
            use std::fmt::Write;
            match proc {
                Procedure::Opt => {
                    if !found_opt {
                        writeln!(body, "optimize('scf')").unwrap();
                    }
                }
                Procedure::SinglePt => {
                    if found_opt {
                        let mut new = String::new();
                        for line in body.lines() {
                            if opt.is_match(line) {
                                writeln!(new, "{}", opt.replace(line, "energy("))
                                    .unwrap();
                            } else {
                                writeln!(new, "{line}").unwrap();
                            }
                        }
                        body = new;
                    }
                }
            }
        }
        body = geom_re.replace(&body, format!("{}", self.geom)).to_string();
        body = charge
            .replace(&body, &format!("{}", self.charge))
            .to_string();
        body = mult
            .replace(&body, &format!("{}", self.multiplicity))
            .to_string();

        let filename = self.infile();
        let mut file = match File::create(&filename) {
            Ok(f) => f,
            Err(e) => panic!("failed to create {filename} with {e}"),
        };
        write!(file, "{body}").expect("failed to write input file");
    }

    fn read_output(filename: &str) -> Result<ProgramResult, ProgramError> {
        let outfile = format!("{}.out", &filename);
        let contents = match read_to_string(&outfile) {
            Ok(s) => s,
            Err(_) => {
                return Err(ProgramError::FileNotFound(outfile));
            }
        };

        let [panic_re, error_re, time_re, energy_re, geom_re, blank_re] = CELL
            .get_or_init(|| {
                [
                    Regex::new("(?i)panic").unwrap(),
                    Regex::new(r"(?i)\berror\b").unwrap(),
                    Regex::new(r"^\s*Total time").unwrap(),
                    Regex::new(r"^\s*Final energy is").unwrap(),
                    Regex::new("Final optimized geometry").unwrap(),
                    Regex::new(r"^\s*$").unwrap(),
                ]
            });

        if panic_re.is_match(&contents) {
            panic!("panic requested in read_output");
        } else if error_re.is_match(&contents) {
            return Err(ProgramError::ErrorInOutput(outfile));
        }

        let mut energy = None;
        let mut skip = 0;
        let mut geom = false;
        let mut atoms = Vec::new();
        let mut time = 0.0;
        for line in contents.lines() {
            if skip > 0 {
                skip -= 1;
            } else if time_re.is_match(line) {
                time = line
                    .split_ascii_whitespace()
                    .nth(3)
                    .unwrap_or("0.0")
                    .parse()
                    .unwrap_or(0.0);
            } else if energy_re.is_match(line) {
                let energy_str = line.split_whitespace().nth(3);
                if let Some(e) = energy_str {
                    energy = if let Ok(v) = e.parse::<f64>() {
                        Some(v)
                    } else {
                        return Err(ProgramError::EnergyParseError(outfile));
                    }
                } else {
                    return Err(ProgramError::EnergyParseError(outfile));
                }
            } else if geom_re.is_match(line) {
                // skip the "Cartesian geometry (in Angstrom)" header
                skip = 1;
                geom = true;
                atoms.clear();
            } else if geom && blank_re.is_match(line) {
                geom = false;
            } else if geom {
                match line.parse::<Atom>() {
                    Ok(atom) => atoms.push(atom),
                    Err(e) => {
                        warn!("skipping malformed geometry line {line:?}: {e}");
                        geom = false;
                    }
                }
            }
        }

        if let Some(energy) = energy {
            return Ok(ProgramResult {
                energy,
                cart_geom: if atoms.is_empty() { None } else { Some(atoms) },
                time,
            });
        }

        Err(ProgramError::EnergyNotFound(outfile))
    }

    fn associated_files(&self) -> Vec<String> {
        vec![self.infile(), self.outfile(), "timer.dat".to_owned()]
    }
}
