mod check;
mod render;
mod scan;
mod walk;

pub use check::check_bytes;
pub use check::check_file;
pub use check::check_files;
pub use check::Defect;
pub use check::FileReport;
pub use render::render_json;
pub use render::render_text;
pub use render::Summary;
pub use render::CLEAN_MESSAGE;
pub use scan::discover_files;
pub use scan::scan;
pub use scan::scan_paths;
pub use scan::ReportFormat;
pub use walk::walk_files;
pub use walk::WalkOptions;
