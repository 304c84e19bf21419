mod analyze;
mod cleanup;
mod colors;
mod compare;
mod convert;
mod data_uri;
mod dimensions;
mod element;
mod error;
mod fs_path;
mod path_data;
mod sanitize;
mod validate;

pub use analyze::{PathStatistics, analyze_paths, path_statistics};
pub use cleanup::{normalize_whitespace, optimize_svg, remove_comments, remove_empty_attributes};
pub use colors::{SvgColor, extract_colors};
pub use compare::{DEFAULT_DIFF_THRESHOLD, DiffResult, diff_images, pixel_level_diff};
pub use convert::{
    ConversionOptions, OutputFormat, svg_file_to_image, svg_file_to_png, svg_to_image,
};
pub use data_uri::{base64_to_svg, svg_to_base64};
pub use dimensions::{SvgDimensions, ViewBox, svg_dimensions};
pub use element::{SvgElement, SvgSource, serialize_svg};
pub use error::SvgToolboxError;
pub use fs_path::{validate_read_path, validate_write_path};
pub use path_data::{
    PathCommand, PathDataReport, parse_path_data, parse_path_data_with_report,
    serialize_path_data, tokenize,
};
pub use sanitize::{SanitizeReport, remove_nan_coordinates, remove_nan_coordinates_with_report};
pub use validate::is_valid_svg_string;
