//! Startup concerns external to the core interpreter (spec.md §1: "the
//! configuration-file loader" is an out-of-scope collaborator).

pub mod init_file;
