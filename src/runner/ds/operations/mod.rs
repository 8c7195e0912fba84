//! Abstract operations over values and objects.

pub mod object;
pub mod test_and_comparison;
pub mod type_conversion;
