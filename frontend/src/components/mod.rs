pub mod export;
pub mod gauge;
pub mod handlers;
pub mod header;
pub mod language_toggle;
pub mod preview_area;
pub mod results;
pub mod upload_section;
pub mod utils;
