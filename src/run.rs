//! one-shot local engine invocation. the run blocks until the engine exits,
//! so the log it leaves behind is complete before any extraction starts.

use std::process::Command;

use log::{info, warn};

use crate::program::{Procedure, Program, ProgramError, ProgramResult};

/// Write `program`'s input file, run the engine binary `cmd` on it to
/// completion, and parse the finished output.
pub fn run<P: Program>(
    program: &mut P,
    cmd: &str,
    proc: Procedure,
) -> Result<ProgramResult, ProgramError> {
    program.write_input(proc);
    let infile = program.infile();
    let outfile = program.outfile();
    info!("running {cmd} on {infile}");
    let output = match Command::new(cmd)
        .args(["-i", &infile, "-o", &outfile])
        .output()
    {
        Ok(o) => o,
        Err(e) => panic!("failed to run {cmd} with {e:?}"),
    };
    if !output.status.success() {
        // the output file usually says why; let read_output report it
        warn!("{cmd} exited with {}", output.status);
    }
    P::read_output(&program.filename())
}

/// [run] with `Procedure::Opt`, the common case for trace extraction
pub fn optimize<P: Program>(
    program: &mut P,
    cmd: &str,
) -> Result<ProgramResult, ProgramError> {
    run(program, cmd, Procedure::Opt)
}
