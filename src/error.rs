//! CLI Error Types
//!
//! Library errors are raised into one of these, so the printed tree reads
//! from "what the command was doing" down to the root cause.

use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not read {_0}")]
    Read(#[error(not(source))] String),
    #[display("could not write {_0}")]
    Write(#[error(not(source))] String),
    /// The batch had no lines, or no usable URLs.
    #[display("nothing to do")]
    Batch,
    #[display("could not serialize plan")]
    Plan,
    #[display("could not import {_0}")]
    Import(#[error(not(source))] String),
    #[display("could not create shortcut")]
    Render,
    #[display("could not build export")]
    Export,
    #[display("could not build archive")]
    Archive,
    #[display("could not save session")]
    Session,
}
