mod work;

pub use work::{NewWork, Work, WorkStatus};
