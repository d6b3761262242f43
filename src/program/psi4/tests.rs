use std::{fs::read_to_string, str::FromStr};

use crate::{
    geom::Geom,
    program::{psi4::Psi4, Procedure, Program, Template},
};

fn opt_templ() -> Template {
    Template::from(
        "
molecule {
{{.charge}} {{.mult}}
{{.geom}}}

set basis 6-31G(d)
set geom_maxiter 50

optimize('scf')
",
    )
}

fn single_templ() -> Template {
    Template::from(
        "
molecule {
{{.charge}} {{.mult}}
{{.geom}}}

set basis 6-31G(d)
set geom_maxiter 50

",
    )
}

enum Type {
    Opt,
    Single,
}

fn test_psi4(t: Type, dir: &str) -> Psi4 {
    Psi4::new(
        format!("{dir}/opt"),
        match t {
            Type::Opt => opt_templ(),
            Type::Single => single_templ(),
        },
        0,
        1,
        Geom::from_str(
            "
3
water geometry
 H          0.0000000000        0.7574590974        0.5217905143
 O          0.0000000000        0.0000000000       -0.0657441568
 H          0.0000000000       -0.7574590974        0.5217905143
",
        )
        .unwrap(),
    )
}

/// in these names, the first word is the template type (opt => optimize call
/// included in template, for example), and the second word is the Procedure
mod write_input {
    use super::*;

    macro_rules! check {
        ($got_dir: expr, $want_file: expr) => {
            let got_file = format!("{}/opt.in", $got_dir);
            let want_file = $want_file;
            let got = read_to_string(&got_file).expect("file not found");
            let want = read_to_string(want_file).unwrap();
            if got != want {
                panic!("\n(diff \"{}\" \"{}\")", got_file, want_file);
            }
        };
    }

    #[test]
    fn opt_opt() {
        let dir = tempfile::tempdir().unwrap();
        let dir = dir.path().to_str().unwrap();
        let mut p = test_psi4(Type::Opt, dir);
        p.write_input(Procedure::Opt);

        check!(dir, "testfiles/psi4/opt_opt.want");
    }

    #[test]
    fn opt_single() {
        let dir = tempfile::tempdir().unwrap();
        let dir = dir.path().to_str().unwrap();
        let mut p = test_psi4(Type::Opt, dir);
        p.write_input(Procedure::SinglePt);

        check!(dir, "testfiles/psi4/opt_single.want");
    }

    #[test]
    fn single_opt() {
        let dir = tempfile::tempdir().unwrap();
        let dir = dir.path().to_str().unwrap();
        let mut p = test_psi4(Type::Single, dir);
        p.write_input(Procedure::Opt);

        check!(dir, "testfiles/psi4/opt_opt.want");
    }

    #[test]
    fn single_single() {
        let dir = tempfile::tempdir().unwrap();
        let dir = dir.path().to_str().unwrap();
        let mut p = test_psi4(Type::Single, dir);
        p.write_input(Procedure::SinglePt);

        check!(dir, "testfiles/psi4/single_single.want");
    }
}

mod read_output {
    use crate::{
        atom::Atom,
        program::{ProgramError, ProgramResult},
    };

    use super::*;

    #[test]
    fn opt() {
        let got = Psi4::read_output("testfiles/psi4/opt").unwrap();
        let want = ProgramResult {
            energy: -230.7130300,
            cart_geom: Some(vec![
                Atom::new("C", 0.0000000000, 1.3950000000, 0.0000000000),
                Atom::new("C", 0.0000000000, 0.0000000000, 0.0000000000),
                Atom::new("H", 0.0000000000, -1.0873000000, 0.0000000000),
            ]),
            time: 12.34,
        };

        assert_eq!(got, want);
    }

    #[test]
    fn single() {
        let got = Psi4::read_output("testfiles/psi4/single");
        let got = got.unwrap_or_else(|e| panic!("{e:#?}"));
        let want = ProgramResult {
            energy: -76.0266327341,
            cart_geom: None,
            time: 4.73,
        };

        assert_eq!(got, want);
    }

    #[test]
    fn error() {
        let got = Psi4::read_output("testfiles/psi4/error");
        let Err(e) = got else {
            panic!("expected error got {got:?}");
        };
        assert!(e.is_error_in_output());
    }

    #[test]
    fn not_found() {
        let got = Psi4::read_output("testfiles/psi4/missing");
        assert_eq!(
            got,
            Err(ProgramError::FileNotFound(
                "testfiles/psi4/missing.out".to_owned()
            ))
        );
    }
}
