pub mod builder;
pub mod ir;
pub mod scan;
