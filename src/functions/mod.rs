pub mod algebra;
pub mod number_theory;
pub mod polynomial;
pub mod simplify;
