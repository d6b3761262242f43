use std::process::exit;

use optrace::{
    geom::Geom,
    program::{psi4::Psi4, Procedure, Program, Template},
};

const TEMPLATE: &str = "
molecule {
{{.charge}} {{.mult}}
{{.geom}}}

set basis 6-31G(d)
set geom_maxiter 50

optimize('scf')
";

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let [_, xyzfile, basename] = &args[..] else {
        eprintln!("usage: write_in XYZFILE BASENAME");
        exit(1);
    };
    let contents = std::fs::read_to_string(xyzfile).unwrap_or_else(|e| {
        eprintln!("failed to read {xyzfile} with {e}");
        exit(1);
    });
    let geom: Geom = contents.parse().unwrap_or_else(|e| {
        eprintln!("failed to parse {xyzfile} with {e}");
        exit(1);
    });
    let mut p = Psi4::new(
        basename.to_owned(),
        Template::from(TEMPLATE),
        0,
        1,
        geom,
    );
    p.write_input(Procedure::Opt);
}
