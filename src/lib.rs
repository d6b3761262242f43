pub mod atom;
pub mod geom;
pub mod program;
pub mod run;
pub mod trace;
