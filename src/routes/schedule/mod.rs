mod add_block;
mod delete_all;
mod delete_block;
mod drop_block;
mod export;
mod grid;
mod import;
mod load;
mod move_block;
mod retry;
mod status;
mod update_dates;

pub use add_block::add_block;
pub use delete_all::delete_all;
pub use delete_block::delete_block;
pub use drop_block::drop_block;
pub use export::export_schedule;
pub use grid::get_grid;
pub use import::import_schedule;
pub use load::load_schedule;
pub use move_block::move_block;
pub use retry::retry_unsaved;
pub use status::get_status;
pub use update_dates::update_dates;
