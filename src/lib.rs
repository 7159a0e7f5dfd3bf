// This is free and unencumbered software released into the public domain.

#![doc = "ASIMOV AR overlay module."]

extern crate alloc;

pub mod cli;
pub mod shared;
