pub mod check_admin;
pub mod episodes;
pub mod subscribe;
