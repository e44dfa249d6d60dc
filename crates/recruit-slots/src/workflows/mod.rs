pub mod crm;
pub mod promotion;
