mod work_store;

pub use work_store::{PgWorkStore, WorkStore};
