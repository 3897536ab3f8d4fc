pub mod file_uploader;
pub mod header;
pub mod progress_bar;
pub mod sidebar;
pub mod summary_viewer;
