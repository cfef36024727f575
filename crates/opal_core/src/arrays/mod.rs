pub mod datatype;
pub mod field;
