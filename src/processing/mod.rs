mod decode;
mod export;

pub use decode::prepare_upload;
pub use export::{EXPORT_BASENAME, JPEG_QUALITY, default_export_name, encode_for_export};
