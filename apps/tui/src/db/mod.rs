pub mod migrations;
pub mod profile;

pub use migrations::{create_database_pool, setup_database};
pub use profile::{
    delete_value, get_value, load_profile, restore_daily_profile, save_profile, set_value,
};
