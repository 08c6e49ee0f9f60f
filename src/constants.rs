pub const DEFAULT_QUALITY: u8 = 92;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_ENDPOINT: &str = "https://api.resmush.it/";

// Form field names understood by the service
pub const FILE_FIELD: &str = "files";
pub const QUALITY_FIELD: &str = "qlty";
pub const URL_FIELD: &str = "img";

// Response keys
pub const ERROR_KEY: &str = "error";
pub const ERROR_LONG_KEY: &str = "error_long";
pub const DEST_KEY: &str = "dest";

pub const OPTIMIZED_PREFIX: &str = "optimized-";

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";

// Common output message prefixes
pub const ORIGINAL_SIZE_PREFIX: &str = "📊 Original size:";
pub const COMPRESSED_SIZE_PREFIX: &str = "📈 Compressed size:";
pub const COMPRESSION_RATIO_PREFIX: &str = "🎯 Compression ratio:";
pub const SUCCESS_PREFIX: &str = "✅";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
    WebP,
}

impl ImageKind {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "png" => Some(ImageKind::Png),
            "gif" => Some(ImageKind::Gif),
            "bmp" => Some(ImageKind::Bmp),
            "tif" | "tiff" => Some(ImageKind::Tiff),
            "webp" => Some(ImageKind::WebP),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
            ImageKind::Gif => "image/gif",
            ImageKind::Bmp => "image/bmp",
            ImageKind::Tiff => "image/tiff",
            ImageKind::WebP => "image/webp",
        }
    }
}

pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";
