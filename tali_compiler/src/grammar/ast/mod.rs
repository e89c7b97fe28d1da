//! Abstract syntax tree seam for Tali

pub mod nodes;

pub use nodes::{Expression, Node, Program, Statement};
