pub mod phone;
pub mod test_utils;
