mod work_handler;

pub use work_handler::*;
