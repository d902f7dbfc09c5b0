pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;
pub mod payload;

pub use error::{EditorError, EditorResult, PathError, ValidationError};
pub use validation::{normalize_instruction, validate_range};
pub use formats::ImageFormat;
pub use fs::{ImageFile, read_image_file, validate_input_path, write_output_file};
pub use payload::EncodedImage;
