//! extraction of per-iteration time series from a finished geometry
//! optimization log.
//!
//! the log is a completed, immutable artifact by the time these run, so each
//! function takes the path explicitly and makes one pass over the file.

use std::{fs::read_to_string, sync::OnceLock};

use regex::Regex;

static ENERGY_CELL: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// the log file itself is missing
    FileNotFound(String),
    /// a matching line was too short to hold the expected field
    FieldOutOfRange(String),
    /// an expected field was present but not a float
    ValueParseError(String),
    /// no line in the log matched the requested record
    NoMatch(String),
}

impl TraceError {
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }

    pub fn is_field_out_of_range(&self) -> bool {
        matches!(self, Self::FieldOutOfRange(_))
    }

    pub fn is_value_parse_error(&self) -> bool {
        matches!(self, Self::ValueParseError(_))
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch(_))
    }
}

/// one whitespace-tokenized `R(a,b)` row from the optimizer's internal
/// coordinate table. the initial geometry report and the per-iteration rows
/// share one column layout: the reference distance sits in the `previous`
/// column and the distance for the current step in the `current` column
struct DistanceLine<'a> {
    fields: Vec<&'a str>,
}

impl<'a> DistanceLine<'a> {
    const PREVIOUS: usize = 3;
    const CURRENT: usize = 6;

    /// classify `line`, anchoring the coordinate label on the second
    /// whitespace field so the token appearing in free text elsewhere on a
    /// line can never match. the `contains` check first keeps the common
    /// non-matching case cheap
    fn parse(line: &'a str, token: &str) -> Option<Self> {
        if !line.contains(token) {
            return None;
        }
        let fields: Vec<_> = line.split_whitespace().collect();
        if fields.get(1).is_some_and(|f| f.starts_with(token)) {
            Some(Self { fields })
        } else {
            None
        }
    }

    fn field(&self, idx: usize, filename: &str) -> Result<f64, TraceError> {
        let Some(raw) = self.fields.get(idx) else {
            return Err(TraceError::FieldOutOfRange(filename.to_owned()));
        };
        raw.parse()
            .map_err(|_| TraceError::ValueParseError(filename.to_owned()))
    }

    fn previous(&self, filename: &str) -> Result<f64, TraceError> {
        self.field(Self::PREVIOUS, filename)
    }

    fn current(&self, filename: &str) -> Result<f64, TraceError> {
        self.field(Self::CURRENT, filename)
    }
}

/// Extract the series of distances in Angstroms between atoms `a` and `b`
/// (1-based, in the engine's atom ordering) recorded across the optimization
/// logged in `filename`, in file (= iteration) order.
///
/// The engine reports the initial distance once, ahead of the per-iteration
/// rows, so a log with N matching rows yields N+1 samples: the initial
/// distance followed by one value per row, with the first row's value
/// repeating the initial distance. The extra leading sample is a quirk of the
/// engine's first geometry report, kept for compatibility with it.
///
/// A pair with no rows in the log, including a pair of atoms that does not
/// exist, returns [TraceError::NoMatch].
pub fn bond_distances(
    filename: &str,
    a: usize,
    b: usize,
) -> Result<Vec<f64>, TraceError> {
    let contents = match read_to_string(filename) {
        Ok(s) => s,
        Err(_) => return Err(TraceError::FileNotFound(filename.to_owned())),
    };
    let token = format!("R({a},{b})");
    let mut ret = Vec::new();
    for line in contents.lines() {
        let Some(row) = DistanceLine::parse(line, &token) else {
            continue;
        };
        if ret.is_empty() {
            ret.push(row.previous(filename)?);
        }
        ret.push(row.current(filename)?);
    }
    if ret.is_empty() {
        return Err(TraceError::NoMatch(filename.to_owned()));
    }
    Ok(ret)
}

/// Extract the series of total energies in Hartrees recorded across the
/// optimization logged in `filename`, one per `Current energy` line, in file
/// (= iteration) order. A log with no such lines gives an empty Vec, not an
/// error.
pub fn energies(filename: &str) -> Result<Vec<f64>, TraceError> {
    let contents = match read_to_string(filename) {
        Ok(s) => s,
        Err(_) => return Err(TraceError::FileNotFound(filename.to_owned())),
    };
    let energy_re = ENERGY_CELL
        .get_or_init(|| Regex::new(r"^Current energy\b").unwrap());
    let mut ret = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if !energy_re.is_match(line) {
            continue;
        }
        let Some(raw) = line.split_whitespace().nth(3) else {
            return Err(TraceError::FieldOutOfRange(filename.to_owned()));
        };
        let Ok(val) = raw.parse() else {
            return Err(TraceError::ValueParseError(filename.to_owned()));
        };
        ret.push(val);
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn opt_distances() {
        let got = bond_distances("testfiles/psi4/opt.out", 1, 2).unwrap();
        // three matching rows give four samples, with the initial distance
        // doubled at the front
        let want = vec![1.51, 1.51, 1.445, 1.395];
        assert_eq!(got, want);
    }

    #[test]
    fn opt_distances_second_pair() {
        let got = bond_distances("testfiles/psi4/opt.out", 2, 3).unwrap();
        let want = vec![1.09, 1.09, 1.0885, 1.0873];
        assert_eq!(got, want);
    }

    #[test]
    fn opt_energies() {
        let got = energies("testfiles/psi4/opt.out").unwrap();
        let want = vec![-230.712451, -230.713021, -230.71303];
        assert_eq!(got, want);
    }

    #[test]
    fn missing_pair_is_no_match() {
        // R(7,9) never appears, same as asking for atoms the molecule
        // doesn't have
        let got = bond_distances("testfiles/psi4/opt.out", 7, 9);
        assert!(got.unwrap_err().is_no_match());
    }

    #[test]
    fn token_in_comment_does_not_match() {
        let mut log = tempfile::NamedTempFile::new().unwrap();
        writeln!(log, "checking convergence of R(1,2) this iteration")
            .unwrap();
        writeln!(log, "    1   R(1,2)  =  1.50  0.0  0.0  1.52").unwrap();
        let path = log.path().to_str().unwrap();
        let got = bond_distances(path, 1, 2).unwrap();
        assert_eq!(got, vec![1.50, 1.52]);
    }

    #[test]
    fn short_distance_line() {
        let mut log = tempfile::NamedTempFile::new().unwrap();
        writeln!(log, "    1   R(1,2)  =  1.50").unwrap();
        let path = log.path().to_str().unwrap();
        let got = bond_distances(path, 1, 2);
        assert!(got.unwrap_err().is_field_out_of_range());
    }

    #[test]
    fn bad_energy_field() {
        let mut log = tempfile::NamedTempFile::new().unwrap();
        writeln!(log, "Current energy   :   -230.71q2451").unwrap();
        let path = log.path().to_str().unwrap();
        let got = energies(path);
        assert!(got.unwrap_err().is_value_parse_error());
    }

    #[test]
    fn short_energy_line() {
        let mut log = tempfile::NamedTempFile::new().unwrap();
        writeln!(log, "Current energy").unwrap();
        let path = log.path().to_str().unwrap();
        let got = energies(path);
        assert!(got.unwrap_err().is_field_out_of_range());
    }

    #[test]
    fn no_energies_is_empty() {
        let mut log = tempfile::NamedTempFile::new().unwrap();
        writeln!(log, "    1   R(1,2)  =  1.50  0.0  0.0  1.52").unwrap();
        let path = log.path().to_str().unwrap();
        let got = energies(path).unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn missing_log() {
        let got = bond_distances("testfiles/psi4/nonexistent.out", 1, 2);
        assert!(got.unwrap_err().is_file_not_found());

        let got = energies("testfiles/psi4/nonexistent.out");
        assert!(got.unwrap_err().is_file_not_found());
    }
}
