pub mod company;
pub mod product;
pub mod sensitivity;
pub mod variable_range;
