pub mod harness;

mod authorization;
mod end_to_end;
