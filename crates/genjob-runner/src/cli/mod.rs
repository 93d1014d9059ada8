/*
[INPUT]:  Subcommand arguments from main
[OUTPUT]: Interactive helpers for the runner binary
[POS]:    CLI layer - binary-only modules
[UPDATE]: When adding interactive subcommands
*/

pub mod init;
