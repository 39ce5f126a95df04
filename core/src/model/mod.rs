pub mod company;
pub mod supplier;
pub mod partner;

pub mod equipment;
pub mod equipment_partner;
