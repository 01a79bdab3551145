pub mod add;
pub mod commit;
pub mod del;
pub mod import;
pub mod log;
pub mod review;
