pub mod a1_notation;
pub mod column;
pub mod row;
pub mod row_decoder;
